//! Movement patterns for walkers and fliers.
//!
//! Each function takes the actor's position by value-and-return so the
//! patterns are easy to test without a world.

use bevy::prelude::*;

use super::components::{FlightPath, PatrolRoute};
use crate::core::Facing;
use crate::sensor::{is_ground_ahead, GroundProbe};

/// Step from `current` toward `target` by at most `max_step`.
pub fn move_towards(current: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_step || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_step
    }
}

/// Walk the patrol route, turning at its bounds or at a ledge, whichever
/// comes first.
pub fn patrol_walker(
    position: Vec2,
    route: &mut PatrolRoute,
    facing: &mut Facing,
    dt: f32,
    ground: &impl GroundProbe,
) -> Vec2 {
    let mut position = position;

    if let Some(probe) = route.ledge_probe {
        if !is_ground_ahead(ground, position, route.heading, probe.offset, probe.distance) {
            route.heading = -route.heading;
        }
    }

    position.x += route.heading * route.walk_speed * dt;

    if route.heading > 0.0 && position.x >= route.right_limit {
        route.heading = -1.0;
    } else if route.heading < 0.0 && position.x <= route.left_limit {
        route.heading = 1.0;
    }

    *facing = Facing::from_sign(route.heading);
    position
}

/// Close in on the target horizontally. Returns the new position and
/// whether the walker actually moved.
///
/// Walkers without a chase speed hold their ground, and walkers never
/// chase off a ledge.
pub fn chase_walker(
    position: Vec2,
    target: Vec2,
    route: &mut PatrolRoute,
    facing: &mut Facing,
    dt: f32,
    ground: &impl GroundProbe,
) -> (Vec2, bool) {
    *facing = Facing::toward(position.x, target.x);
    if route.chase_speed <= 0.0 {
        return (position, false);
    }

    let heading = facing.sign();
    route.heading = heading;

    if let Some(probe) = route.ledge_probe {
        if !is_ground_ahead(ground, position, heading, probe.offset, probe.distance) {
            return (position, false);
        }
    }

    let mut position = position;
    position.x += heading * route.chase_speed * dt;
    (position, true)
}

/// Circle the anchor, drifting toward the current orbit point.
pub fn orbit_flier(position: Vec2, path: &mut FlightPath, facing: &mut Facing, dt: f32) -> Vec2 {
    path.angle += path.orbit_speed * dt;
    let goal = path.anchor
        + Vec2::new(
            path.angle.cos() * path.orbit_radius.x,
            path.angle.sin() * path.orbit_radius.y,
        );

    *facing = Facing::toward(position.x, goal.x);
    move_towards(position, goal, path.orbit_speed * dt)
}

/// Fly to a point above the target. Inside the stop distance only the
/// height is corrected, so the flier doesn't jitter back and forth over
/// the target.
pub fn chase_flier(
    position: Vec2,
    target: Vec2,
    path: &FlightPath,
    facing: &mut Facing,
    dt: f32,
) -> Vec2 {
    *facing = Facing::toward(position.x, target.x);

    let mut goal = Vec2::new(target.x, target.y + path.hover_height);
    if (position.x - target.x).abs() <= path.stop_distance {
        goal.x = position.x;
    }

    move_towards(position, goal, path.chase_speed * dt)
}

/// Hold position above the target while attacking.
pub fn hover_flier(
    position: Vec2,
    target: Vec2,
    path: &FlightPath,
    facing: &mut Facing,
    dt: f32,
) -> Vec2 {
    *facing = Facing::toward(position.x, target.x);

    let goal = Vec2::new(position.x, target.y + path.hover_height);
    move_towards(position, goal, path.chase_speed * dt)
}
