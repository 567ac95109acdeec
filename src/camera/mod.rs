/// Data-Oriented Orbit Camera
///
/// Plain camera data plus free functions. The camera looks at a fixed orbit
/// target; mouse orbiting is left to the host, the engine only enforces the
/// minimum height every frame.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::constants::camera;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub fovy_radians: f32,
    pub aspect_ratio: f32,
    pub znear: f32,
    pub zfar: f32,
}

/// Camera uniform buffer for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection_matrix: [[f32; 4]; 4],
}

/// Initialize camera data at the start pose framing the map
pub fn init_camera(width: u32, height: u32) -> OrbitCamera {
    OrbitCamera {
        position: Vec3::from(camera::START_POSITION),
        target: Vec3::from(camera::TARGET),
        fovy_radians: camera::FOVY_DEGREES.to_radians(),
        aspect_ratio: aspect(width, height),
        znear: camera::ZNEAR,
        zfar: camera::ZFAR,
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Update camera aspect ratio for window resize
pub fn update_aspect_ratio(camera: &OrbitCamera, width: u32, height: u32) -> OrbitCamera {
    let mut updated = *camera;
    updated.aspect_ratio = aspect(width, height);
    updated
}

/// Keep the camera at or above `min_height`
pub fn clamp_camera_height(camera: &mut OrbitCamera, min_height: f32) {
    if camera.position.y < min_height {
        camera.position.y = min_height;
    }
}

/// Build view matrix from camera data
pub fn build_view_matrix(camera: &OrbitCamera) -> Mat4 {
    Mat4::look_at_rh(camera.position, camera.target, Vec3::Y)
}

/// Build projection matrix from camera data (wgpu depth range 0..1)
pub fn build_projection_matrix(camera: &OrbitCamera) -> Mat4 {
    Mat4::perspective_rh(
        camera.fovy_radians,
        camera.aspect_ratio,
        camera.znear,
        camera.zfar,
    )
}

/// Build the GPU uniform from camera data
pub fn build_camera_uniform(camera: &OrbitCamera) -> CameraUniform {
    let view_projection = build_projection_matrix(camera) * build_view_matrix(camera);
    CameraUniform {
        view_projection_matrix: view_projection.to_cols_array_2d(),
    }
}
