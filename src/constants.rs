// Ball Hunt Constants - SINGLE SOURCE OF TRUTH
//
// Every gameplay default lives here. `config::Tuning` starts from these values
// and a TOML file may override them at startup.
//
// Units are metres, radians and seconds unless stated otherwise. Movement
// values are per rendered frame, not per second.

/// Robot movement constants
pub mod movement {
    /// Distance travelled per frame while a movement key is held
    pub const ROBOT_SPEED: f32 = 0.15;

    /// Fraction of the remaining distance covered each frame
    pub const POSITION_LERP_FACTOR: f32 = 0.1;

    /// Fraction of the remaining yaw covered each frame
    pub const ROTATION_LERP_FACTOR: f32 = 0.08;

    /// Lowest allowed robot height above the floor
    pub const MIN_ROBOT_HEIGHT: f32 = 0.5;

    /// Highest allowed robot height above the floor
    pub const MAX_ROBOT_HEIGHT: f32 = 15.0;
}

/// World layout constants
pub mod world {
    /// Vertical reference plane used for height clamping and model placement
    pub const FLOOR_Y: f32 = -2.0;

    /// Largest dimension of the map after normalisation
    pub const MAP_TARGET_SIZE: f32 = 30.0;

    /// Inset applied to the map box on x, z and the bottom
    pub const MAP_MARGIN: f32 = 2.0;

    /// Extra room above the map top where balls may still spawn
    pub const MAP_CEILING_HEADROOM: f32 = 3.0;

    /// Bounds used until the map model has been measured
    pub const DEFAULT_MIN_X: f32 = -15.0;
    pub const DEFAULT_MAX_X: f32 = 15.0;
    pub const DEFAULT_MIN_Z: f32 = -15.0;
    pub const DEFAULT_MAX_Z: f32 = 15.0;
    pub const DEFAULT_MIN_Y: f32 = -2.0;
    pub const DEFAULT_MAX_Y: f32 = 8.0;
}

/// Robot entity constants
pub mod robot {
    /// Height of the robot model after scaling
    pub const TARGET_HEIGHT: f32 = 2.0;

    /// Initial hover height above the floor
    pub const FLOAT_HEIGHT: f32 = 3.0;

    /// Spawn location on the horizontal plane
    pub const SPAWN_X: f32 = -0.3;
    pub const SPAWN_Z: f32 = 7.5;

    /// Collision sphere radius
    pub const RADIUS: f32 = 1.5;

    /// Hover bob amplitude at rest and while moving horizontally
    pub const HOVER_AMPLITUDE_IDLE: f32 = 0.2;
    pub const HOVER_AMPLITUDE_MOVING: f32 = 0.1;

    /// Hover bob angular speed (rad/s)
    pub const HOVER_SPEED: f32 = 1.0;
}

/// Target ball constants
pub mod ball {
    /// Collision sphere radius
    pub const RADIUS: f32 = 1.0;

    /// Vertical bob around the spawn height
    pub const BOB_AMPLITUDE: f32 = 0.3;
    pub const BOB_SPEED: f32 = 2.0;

    /// Spin applied every frame (radians)
    pub const SPIN_X: f32 = 0.01;
    pub const SPIN_Y: f32 = 0.015;

    /// Sparkle particles orbiting the ball
    pub const SPARKLE_COUNT: usize = 20;
    pub const SPARKLE_SPREAD: f32 = 4.0;
    pub const SPARKLE_ORBIT_RADIUS: f32 = 2.0;
    pub const SPARKLE_MIN_SPEED: f32 = 0.01;
    pub const SPARKLE_SPEED_RANGE: f32 = 0.02;
}

/// Minigame timing and spawn rules
pub mod game {
    /// Length of one round (seconds)
    pub const ROUND_DURATION: f32 = 10.0;

    /// How long the result banner stays up before returning to idle (seconds)
    pub const RESULT_DISPLAY_DURATION: f32 = 3.0;

    /// Countdown refresh interval (seconds)
    pub const TICK_INTERVAL: f32 = 0.05;

    /// Minimum distance between a freshly spawned ball and the robot
    pub const SPAWN_MIN_DISTANCE: f32 = 5.0;

    /// Distance used when random sampling keeps landing too close
    pub const SPAWN_FALLBACK_DISTANCE: f32 = 6.0;

    /// Number of random positions tried before falling back
    pub const SPAWN_MAX_ATTEMPTS: u32 = 20;

    /// Remaining-time thresholds for the countdown colour bands (seconds)
    pub const WARNING_THRESHOLD: f32 = 6.0;
    pub const DANGER_THRESHOLD: f32 = 3.0;
}

/// Camera constants
pub mod camera {
    /// Initial eye position, framing the whole map
    pub const START_POSITION: [f32; 3] = [-0.31, 6.99, 19.71];

    /// Orbit target
    pub const TARGET: [f32; 3] = [0.0, 0.0, 0.0];

    /// The camera may never dip below this height
    pub const MIN_HEIGHT: f32 = 3.0;

    /// Vertical field of view (degrees)
    pub const FOVY_DEGREES: f32 = 75.0;

    pub const ZNEAR: f32 = 0.1;
    pub const ZFAR: f32 = 1000.0;
}

/// Rendering constants
pub mod render {
    /// Scene clear colour (0x1a1a2e)
    pub const BACKGROUND: [f64; 3] = [26.0 / 255.0, 26.0 / 255.0, 46.0 / 255.0];

    /// Debug visualisation colours
    pub const MAP_COLOR: [f32; 4] = [0.22, 0.24, 0.30, 1.0];
    pub const ROBOT_COLOR: [f32; 4] = [0.31, 0.80, 0.77, 1.0];
    pub const BALL_COLOR: [f32; 4] = [1.0, 0.84, 0.0, 0.9];

    /// Thickness of the map footprint slab
    pub const MAP_SLAB_THICKNESS: f32 = 0.1;

    /// Robot stand-in box footprint (width and depth)
    pub const ROBOT_BOX_WIDTH: f32 = 1.2;

    /// Edge length of a sparkle cube
    pub const SPARKLE_SIZE: f32 = 0.15;

    /// Sparkle colour saturation and lightness (HSL)
    pub const SPARKLE_SATURATION: f32 = 1.0;
    pub const SPARKLE_LIGHTNESS: f32 = 0.8;

    /// Capacity of the per-instance buffer
    pub const MAX_INSTANCES: usize = 64;

    /// Log robot and camera position every N frames
    pub const POSITION_LOG_INTERVAL: u64 = 60;
}

/// Window defaults
pub mod window {
    pub const TITLE: &str = "Ball Hunt";
    pub const WIDTH: u32 = 1280;
    pub const HEIGHT: u32 = 720;
}

/// Asset locations relative to the working directory
pub mod assets {
    pub const MAP_MODEL: &str = "models/luni_sul_mignone_1300ac_rawscan_gltf/scene.gltf";
    pub const ROBOT_MODEL: &str = "models/cute_robot_gltf/scene.gltf";
    pub const CONFIG_FILE: &str = "ball_hunt.toml";
    pub const CONFIG_ENV_VAR: &str = "BALL_HUNT_CONFIG";
}
