use glam::Vec3;
use rand::Rng;

use crate::config::Tuning;
use crate::constants::ball;
use crate::physics::distance;
use crate::scene::MapBounds;

/// Particle orbiting the ball; offsets are relative to the ball centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub anchor: Vec3,
    pub speed: f32,
    pub offset: Vec3,
    pub opacity: f32,
    /// Hue in [0, 1)
    pub hue: f32,
}

/// The target ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub position: Vec3,
    /// Height the bob oscillates around
    pub origin_y: f32,
    pub spawned_at: f64,
    /// Euler spin (x, y) in radians
    pub rotation: Vec3,
    pub sparkles: Vec<Sparkle>,
}

/// Random point in the bounds at least `spawn_min_distance` from the robot.
///
/// Tries `spawn_max_attempts` uniform samples. If all of them land too close,
/// the ball is put `spawn_fallback_distance` away from the robot in a random
/// horizontal direction and clamped into the bounds.
pub fn sample_spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &MapBounds,
    robot_position: Vec3,
    tuning: &Tuning,
) -> Vec3 {
    for attempt in 1..=tuning.spawn_max_attempts {
        let candidate = Vec3::new(
            bounds.min_x + rng.gen::<f32>() * (bounds.max_x - bounds.min_x),
            bounds.min_y + rng.gen::<f32>() * (bounds.max_y - bounds.min_y),
            bounds.min_z + rng.gen::<f32>() * (bounds.max_z - bounds.min_z),
        );
        if distance(candidate, robot_position) >= tuning.spawn_min_distance {
            log::debug!("[game::sample_spawn_position] Accepted sample {} after {} attempt(s)", candidate, attempt);
            return candidate;
        }
    }

    let direction = Vec3::new(rng.gen::<f32>() - 0.5, 0.0, rng.gen::<f32>() - 0.5)
        .try_normalize()
        .unwrap_or(Vec3::X);
    let fallback = bounds.clamp(robot_position + direction * tuning.spawn_fallback_distance);
    log::debug!(
        "[game::sample_spawn_position] No sample cleared {}m in {} attempts, using fallback {}",
        tuning.spawn_min_distance,
        tuning.spawn_max_attempts,
        fallback
    );
    fallback
}

fn spawn_sparkles<R: Rng + ?Sized>(rng: &mut R) -> Vec<Sparkle> {
    (0..ball::SPARKLE_COUNT)
        .map(|_| {
            let anchor = Vec3::new(
                (rng.gen::<f32>() - 0.5) * ball::SPARKLE_SPREAD,
                (rng.gen::<f32>() - 0.5) * ball::SPARKLE_SPREAD,
                (rng.gen::<f32>() - 0.5) * ball::SPARKLE_SPREAD,
            );
            Sparkle {
                anchor,
                speed: rng.gen::<f32>() * ball::SPARKLE_SPEED_RANGE + ball::SPARKLE_MIN_SPEED,
                offset: anchor,
                opacity: 0.8,
                hue: rng.gen::<f32>(),
            }
        })
        .collect()
}

/// Create a ball for a new round
pub fn spawn_ball<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &MapBounds,
    robot_position: Vec3,
    tuning: &Tuning,
    now: f64,
) -> Ball {
    let position = sample_spawn_position(rng, bounds, robot_position, tuning);
    log::info!("[game::spawn_ball] Ball spawned at {}", position);

    Ball {
        position,
        origin_y: position.y,
        spawned_at: now,
        rotation: Vec3::ZERO,
        sparkles: spawn_sparkles(rng),
    }
}

/// Per-frame ball animation: bob, spin and sparkle orbit
pub fn animate_ball(ball: &mut Ball, now: f64) {
    let time = now as f32;

    ball.position.y = ball.origin_y + (time * ball::BOB_SPEED).sin() * ball::BOB_AMPLITUDE;
    ball.rotation.x += ball::SPIN_X;
    ball.rotation.y += ball::SPIN_Y;

    for (index, sparkle) in ball.sparkles.iter_mut().enumerate() {
        let i = index as f32;
        let angle = time * sparkle.speed + i * 0.5;

        sparkle.offset = sparkle.anchor
            + Vec3::new(
                angle.cos() * ball::SPARKLE_ORBIT_RADIUS,
                (time * 3.0 + i).sin() * 0.5,
                angle.sin() * ball::SPARKLE_ORBIT_RADIUS,
            );
        sparkle.opacity = 0.5 + (time * 4.0 + i).sin() * 0.3;
        sparkle.hue = (time * 0.1 + i * 0.1).rem_euclid(1.0);
    }
}
