//! Model loading.
//!
//! Models are read through an [`AssetSource`] so the same glTF code serves
//! the native file system and the browser's `fetch`. Loading only measures
//! the model: the vertex positions are walked through the scene graph and
//! folded into a world-space bounding box, which is all placement needs.

pub mod error;
pub mod loader;
pub mod source;

pub use error::{asset_load_error, AssetErrorContext};
pub use loader::{decode_data_uri, load_model, resolve_relative_uri};
pub use source::{AssetSource, FileSource};

use crate::error::EngineResult;
use crate::physics::AABB;

/// Measured model geometry
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    /// Source URI, used in log lines
    pub name: String,
    pub vertex_count: usize,
    /// World-space bounds with node transforms applied
    pub bounds: AABB,
}

/// Load the map and the robot concurrently.
/// Each result is returned separately; one failing does not cancel the other.
pub async fn load_scene_models<S: AssetSource>(
    source: &S,
    map_uri: &str,
    robot_uri: &str,
) -> (EngineResult<ModelData>, EngineResult<ModelData>) {
    futures::join!(load_model(source, map_uri), load_model(source, robot_uri))
}
