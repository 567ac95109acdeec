/// Scene Layout
///
/// Turns measured models into world placement: the map is normalised and laid
/// on the floor, the playable bounds are derived from it, and the robot is
/// scaled and spawned hovering above the floor.

pub mod bounds;
pub mod placement;
pub mod robot;

pub use bounds::MapBounds;
pub use placement::{place_map, place_robot, MapPlacement, RobotPlacement};
pub use robot::Robot;
