pub mod aabb;
pub mod collision;

pub use aabb::{
    aabb_center, aabb_corners, aabb_from_points, aabb_max_dimension, aabb_size, aabb_transformed,
    AABB,
};
pub use collision::{distance, spheres_overlap};
