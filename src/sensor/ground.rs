//! Ground probes used by walkers to avoid stepping off ledges.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::layers::ground_query_filter;

/// Anything that can answer "does a ray from here hit ground?".
pub trait GroundProbe {
    /// Cast a ray from `origin` along `direction` and return the distance to
    /// the first ground surface within `max_distance`.
    fn probe_ground(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<f32>;
}

/// Whether there is ground just ahead of `position` in the `heading`
/// direction. The probe starts `probe_offset` in front of the actor and
/// looks straight down for `probe_distance`.
pub fn is_ground_ahead(
    probe: &impl GroundProbe,
    position: Vec2,
    heading: f32,
    probe_offset: f32,
    probe_distance: f32,
) -> bool {
    let origin = Vec2::new(position.x + heading.signum() * probe_offset, position.y);
    probe
        .probe_ground(origin, Vec2::NEG_Y, probe_distance)
        .is_some()
}

/// Level platforms as axis-aligned rectangles.
///
/// The level builder inserts this alongside the platform colliders so
/// ground probes work even when no physics context is present.
#[derive(Resource, Debug, Default, Clone)]
pub struct GroundSurfaces {
    pub platforms: Vec<Rect>,
}

impl GroundSurfaces {
    pub fn new(platforms: Vec<Rect>) -> Self {
        Self { platforms }
    }
}

impl GroundProbe for GroundSurfaces {
    fn probe_ground(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<f32> {
        let direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            return None;
        }

        self.platforms
            .iter()
            .filter_map(|platform| ray_hits_rect(origin, direction, max_distance, platform))
            .min_by(|a, b| a.total_cmp(b))
    }
}

impl GroundProbe for RapierContext {
    fn probe_ground(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<f32> {
        let direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            return None;
        }

        self.cast_ray(origin, direction, max_distance, true, ground_query_filter())
            .map(|(_, toi)| toi)
    }
}

/// Ground probe backed by whatever the world provides: the physics context
/// when one exists, otherwise the level's platform list.
#[derive(SystemParam)]
pub struct GroundSensor<'w, 's> {
    physics: Query<'w, 's, &'static RapierContext>,
    surfaces: Option<Res<'w, GroundSurfaces>>,
}

impl GroundProbe for GroundSensor<'_, '_> {
    fn probe_ground(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<f32> {
        if let Ok(context) = self.physics.get_single() {
            return context.probe_ground(origin, direction, max_distance);
        }

        match &self.surfaces {
            Some(surfaces) => surfaces.probe_ground(origin, direction, max_distance),
            // No geometry at all: assume the actor is standing on something
            None => Some(0.0),
        }
    }
}

/// Slab test of a ray against an axis-aligned rectangle. A ray starting
/// inside the rectangle hits at distance zero.
fn ray_hits_rect(origin: Vec2, direction: Vec2, max_distance: f32, rect: &Rect) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = max_distance;

    for axis in 0..2 {
        let start = origin[axis];
        let step = direction[axis];
        let (low, high) = (rect.min[axis], rect.max[axis]);

        if step.abs() < f32::EPSILON {
            if start < low || start > high {
                return None;
            }
            continue;
        }

        let mut t1 = (low - start) / step;
        let mut t2 = (high - start) / step;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}
