//! glTF measurement: JSON or GLB container, embedded or external buffers.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use glam::{Mat4, Vec3};
use gltf::buffer::Source;

use super::error::{asset_load_error, AssetErrorContext};
use super::source::AssetSource;
use super::ModelData;
use crate::error::{EngineError, EngineResult};
use crate::physics::AABB;

/// Load a glTF model and measure its world-space bounds.
pub async fn load_model<S: AssetSource>(source: &S, uri: &str) -> EngineResult<ModelData> {
    log::info!("[assets::load_model] Loading {}...", uri);

    let bytes = source.read(uri).await?;
    log::debug!("[assets::load_model] {}: {} bytes read", uri, bytes.len());

    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(&bytes).asset_format_context(uri)?;
    let buffers = resolve_buffers(source, uri, &document, blob).await?;

    let mut bounds = AABB::EMPTY;
    let mut vertex_count = 0usize;
    let mut visit = |point: Vec3| {
        bounds.expand_to_point(point);
        vertex_count += 1;
    };

    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                visit_node(&node, Mat4::IDENTITY, &buffers, &mut visit);
            }
        }
        None => {
            // Scene-less files: meshes are taken in their own space
            for mesh in document.meshes() {
                visit_mesh(&mesh, Mat4::IDENTITY, &buffers, &mut visit);
            }
        }
    }

    if vertex_count == 0 {
        return Err(EngineError::AssetFormat {
            path: uri.to_string(),
            reason: "no vertex positions found".to_string(),
        });
    }

    log::info!(
        "[assets::load_model] {} loaded: {} vertices, bounds {:?} .. {:?}",
        uri,
        vertex_count,
        bounds.min,
        bounds.max
    );

    Ok(ModelData {
        name: uri.to_string(),
        vertex_count,
        bounds,
    })
}

async fn resolve_buffers<S: AssetSource>(
    source: &S,
    model_uri: &str,
    document: &gltf::Document,
    mut blob: Option<Vec<u8>>,
) -> EngineResult<Vec<Vec<u8>>> {
    let mut buffers = Vec::with_capacity(document.buffers().len());

    for buffer in document.buffers() {
        let data = match buffer.source() {
            Source::Bin => blob
                .take()
                .ok_or_else(|| asset_load_error(model_uri, "GLB binary chunk missing"))?,
            Source::Uri(uri) if uri.starts_with("data:") => {
                decode_data_uri(uri).asset_format_context(model_uri)?
            }
            Source::Uri(uri) => {
                let path = resolve_relative_uri(model_uri, uri);
                log::debug!("[assets::resolve_buffers] Fetching buffer {}", path);
                source.read(&path).await?
            }
        };

        if data.len() < buffer.length() {
            return Err(EngineError::AssetFormat {
                path: model_uri.to_string(),
                reason: format!(
                    "buffer {} holds {} bytes, {} declared",
                    buffer.index(),
                    data.len(),
                    buffer.length()
                ),
            });
        }
        buffers.push(data);
    }

    Ok(buffers)
}

fn visit_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[Vec<u8>],
    visit: &mut impl FnMut(Vec3),
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        visit_mesh(&mesh, world, buffers, visit);
    }
    for child in node.children() {
        visit_node(&child, world, buffers, visit);
    }
}

fn visit_mesh(
    mesh: &gltf::Mesh<'_>,
    world: Mat4,
    buffers: &[Vec<u8>],
    visit: &mut impl FnMut(Vec3),
) {
    for primitive in mesh.primitives() {
        let reader = primitive.reader(|b| buffers.get(b.index()).map(|data| data.as_slice()));
        match reader.read_positions() {
            Some(positions) => {
                for p in positions {
                    visit(world.transform_point3(Vec3::from(p)));
                }
            }
            None => log::debug!(
                "[assets::visit_mesh] Primitive without positions in mesh {:?}",
                mesh.name()
            ),
        }
    }
}

/// Decode a base64 `data:` URI into bytes
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, String> {
    let payload = uri
        .strip_prefix("data:")
        .ok_or_else(|| "not a data URI".to_string())?;
    let (_, encoded) = payload
        .split_once(";base64,")
        .ok_or_else(|| "only base64 data URIs are supported".to_string())?;
    BASE64.decode(encoded).map_err(|e| e.to_string())
}

/// Resolve `relative` against the directory of `base`, as a browser would
/// for a relative link. `%20` is unescaped since scanned assets often carry
/// spaces in buffer names.
pub fn resolve_relative_uri(base: &str, relative: &str) -> String {
    let relative = relative.replace("%20", " ");
    match base.rfind('/') {
        Some(idx) => format!("{}/{}", &base[..idx], relative),
        None => relative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_round_trip() {
        let uri = format!("data:application/octet-stream;base64,{}", BASE64.encode([1u8, 2, 3]));
        assert_eq!(decode_data_uri(&uri).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn data_uri_rejects_plain_text() {
        assert!(decode_data_uri("data:text/plain,hello").is_err());
        assert!(decode_data_uri("scene.bin").is_err());
    }

    #[test]
    fn relative_uris_resolve_against_model_directory() {
        assert_eq!(
            resolve_relative_uri("models/robot/scene.gltf", "scene.bin"),
            "models/robot/scene.bin"
        );
        assert_eq!(resolve_relative_uri("scene.gltf", "scene.bin"), "scene.bin");
        assert_eq!(
            resolve_relative_uri("models/map/scene.gltf", "raw%20scan.bin"),
            "models/map/raw scan.bin"
        );
    }
}
