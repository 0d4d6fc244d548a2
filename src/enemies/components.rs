//! Enemy-related components.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::ComboPolicy;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// AI state machine for enemy behavior.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiState {
    /// Walking a route or circling, no target nearby.
    #[default]
    Patrol,
    /// Target detected; closing in.
    Chase,
    /// Target within attack range.
    Attack,
    /// Down after a lethal hit, will get back up.
    Reviving,
    /// Dead for good; removed after the corpse lifetime.
    Dead,
}

impl AiState {
    /// Dead or reviving actors neither think nor take damage.
    pub fn is_incapacitated(&self) -> bool {
        matches!(self, AiState::Reviving | AiState::Dead)
    }
}

/// Per-type decision parameters.
#[derive(Component, Clone, Copy, Debug)]
pub struct EnemyStats {
    pub detect_range: f32,
    pub combo: ComboPolicy,
}

/// Downward probe in front of a walker.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LedgeProbe {
    /// How far ahead of the body the probe starts
    pub offset: f32,
    /// How far down it looks
    pub distance: f32,
}

/// Ground-bound movement between two x bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct PatrolRoute {
    pub left_limit: f32,
    pub right_limit: f32,
    /// +1.0 walking right, -1.0 walking left
    pub heading: f32,
    pub walk_speed: f32,
    /// Zero means hold position and watch the target
    pub chase_speed: f32,
    /// None disables ledge avoidance
    pub ledge_probe: Option<LedgeProbe>,
}

impl PatrolRoute {
    /// Route bounded at `start_x ± distance`, initially heading right.
    pub fn around(start_x: f32, distance: f32) -> Self {
        let distance = distance.abs();
        Self {
            left_limit: start_x - distance,
            right_limit: start_x + distance,
            heading: 1.0,
            walk_speed: 2.0,
            chase_speed: 0.0,
            ledge_probe: None,
        }
    }
}

/// Free flight circling a fixed anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct FlightPath {
    pub anchor: Vec2,
    /// Orbit phase in radians
    pub angle: f32,
    pub orbit_speed: f32,
    /// Horizontal and vertical orbit radii
    pub orbit_radius: Vec2,
    pub chase_speed: f32,
    /// How far above the target to hover
    pub hover_height: f32,
    /// Horizontal distance under which the flier stops closing in
    pub stop_distance: f32,
}

/// How an enemy moves.
#[derive(Component, Clone, Debug, PartialEq)]
pub enum Locomotion {
    Walker(PatrolRoute),
    Flier(FlightPath),
}
