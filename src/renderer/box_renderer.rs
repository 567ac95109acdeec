use glam::{EulerRot, Mat4, Quat, Vec3};
use wgpu::util::DeviceExt;

use crate::app::AppContext;
use crate::constants::render;
use crate::physics::{aabb_center, aabb_size};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct BoxVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

/// Per-instance data: model matrix columns and RGBA colour
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BoxInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl BoxInstance {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BoxInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Unit cube centred on the origin, four vertices per face so normals stay flat
fn cube_mesh() -> (Vec<BoxVertex>, Vec<u16>) {
    // (normal, tangent u, tangent v) per face
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let n = Vec3::from(normal) * 0.5;
        let u = Vec3::from(u) * 0.5;
        let v = Vec3::from(v) * 0.5;
        let base = vertices.len() as u16;

        for corner in [n - u - v, n + u - v, n + u + v, n - u + v] {
            vertices.push(BoxVertex {
                position: corner.to_array(),
                normal,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// HSL to RGB, all components in [0, 1]
/// Pure function - each channel is a clamped linear ramp over the hue wheel
/// measured in twelfths, so primary hues give exact 0 and 1 components
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let chroma = saturation * lightness.min(1.0 - lightness);
    let channel = |offset: f32| {
        let k = (offset + hue * 12.0).rem_euclid(12.0);
        let ramp = (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        (lightness - chroma * ramp).clamp(0.0, 1.0)
    };
    [channel(0.0), channel(8.0), channel(4.0)]
}

/// Boxes standing in for the map footprint, the robot, the ball and its sparkles
/// Pure function - reads the frame state, touches no GPU resources
pub fn collect_instances(ctx: &AppContext) -> Vec<BoxInstance> {
    let mut instances = Vec::new();

    if let Some(map) = &ctx.map {
        let size = aabb_size(&map.world_box);
        let center = aabb_center(&map.world_box);
        let slab = Mat4::from_scale_rotation_translation(
            Vec3::new(size.x, render::MAP_SLAB_THICKNESS, size.z),
            Quat::IDENTITY,
            Vec3::new(center.x, ctx.tuning.floor_y - render::MAP_SLAB_THICKNESS * 0.5, center.z),
        );
        instances.push(BoxInstance::new(slab, render::MAP_COLOR));
    }

    if let Some(robot) = &ctx.robot {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::new(
                render::ROBOT_BOX_WIDTH,
                ctx.tuning.robot_target_height,
                render::ROBOT_BOX_WIDTH,
            ),
            Quat::from_rotation_y(robot.transform.yaw),
            robot.transform.position,
        );
        instances.push(BoxInstance::new(model, render::ROBOT_COLOR));
    }

    if let Some(ball) = ctx.session.ball() {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(ctx.tuning.ball_radius * 2.0),
            Quat::from_euler(EulerRot::XYZ, ball.rotation.x, ball.rotation.y, 0.0),
            ball.position,
        );
        instances.push(BoxInstance::new(model, render::BALL_COLOR));

        for sparkle in &ball.sparkles {
            let [r, g, b] = hsl_to_rgb(
                sparkle.hue,
                render::SPARKLE_SATURATION,
                render::SPARKLE_LIGHTNESS,
            );
            let model = Mat4::from_scale_rotation_translation(
                Vec3::splat(render::SPARKLE_SIZE),
                Quat::IDENTITY,
                ball.position + sparkle.offset,
            );
            instances.push(BoxInstance::new(model, [r, g, b, sparkle.opacity]));
        }
    }

    if instances.len() > render::MAX_INSTANCES {
        log::warn!(
            "[collect_instances] {} boxes exceed the instance buffer, dropping {}",
            instances.len(),
            instances.len() - render::MAX_INSTANCES
        );
        instances.truncate(render::MAX_INSTANCES);
    }
    instances
}

pub struct BoxRenderer {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    render_pipeline: wgpu::RenderPipeline,
}

impl BoxRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let (vertices, indices) = cube_mesh();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Box Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Box Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Box Instance Buffer"),
            size: (std::mem::size_of::<BoxInstance>() * render::MAX_INSTANCES)
                as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Box Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/box.wgsl").into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Box Pipeline Layout"),
                bind_group_layouts: &[camera_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Box Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<BoxVertex>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                    },
                    BoxInstance::layout(),
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            instance_buffer,
            instance_count: 0,
            render_pipeline,
        }
    }

    /// Upload this frame's boxes
    pub fn prepare(&mut self, queue: &wgpu::Queue, instances: &[BoxInstance]) {
        let count = instances.len().min(render::MAX_INSTANCES);
        if count > 0 {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&instances[..count]),
            );
        }
        self.instance_count = count as u32;
    }

    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ModelData;
    use crate::config::EngineConfig;
    use crate::constants::ball;
    use crate::physics::AABB;
    use approx::assert_relative_eq;

    #[test]
    fn cube_faces_wind_outwards() {
        let (vertices, indices) = cube_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);

        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(vertices[i as usize].position));
            let normal = Vec3::from(vertices[tri[0] as usize].normal);
            // Counter-clockwise seen from outside
            assert!((b - a).cross(c - a).dot(normal) > 0.0);
        }
    }

    #[test]
    fn hsl_matches_known_colours() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]);
        assert_eq!(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]);
        assert_eq!(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]);
        // Hue wraps around
        assert_eq!(hsl_to_rgb(1.0, 1.0, 0.5), [1.0, 0.0, 0.0]);

        let orange = hsl_to_rgb(1.0 / 12.0, 1.0, 0.5);
        assert_relative_eq!(orange[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(orange[1], 0.5, epsilon = 1e-6);
        assert_relative_eq!(orange[2], 0.0, epsilon = 1e-6);

        let pale = hsl_to_rgb(0.0, 1.0, 0.8);
        assert_relative_eq!(pale[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(pale[1], 0.6, epsilon = 1e-6);
        assert_relative_eq!(pale[2], 0.6, epsilon = 1e-6);

        assert_eq!(hsl_to_rgb(0.3, 0.0, 0.25), [0.25; 3]);
    }

    #[test]
    fn instances_follow_scene_contents() {
        let config = EngineConfig {
            seed: Some(5),
            ..EngineConfig::default()
        };
        let mut ctx = AppContext::new(&config);
        assert!(collect_instances(&ctx).is_empty());

        ctx.install_robot(&ModelData {
            name: "robot".to_string(),
            vertex_count: 8,
            bounds: AABB::new(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 1.0, 0.5)),
        });
        assert_eq!(collect_instances(&ctx).len(), 1);

        ctx.request_start(0.0).expect("start");
        let instances = collect_instances(&ctx);
        assert_eq!(instances.len(), 2 + ball::SPARKLE_COUNT);
        assert_eq!(instances[1].color, render::BALL_COLOR);

        let ball_position = ctx.session.ball().map(|b| b.position).unwrap_or_default();
        let ball_model = Mat4::from_cols_array_2d(&instances[1].model);
        assert_relative_eq!(ball_model.w_axis.truncate().distance(ball_position), 0.0, epsilon = 1e-5);
    }
}
