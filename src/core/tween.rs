//! Smooth follow for cameras and other trailing entities.

use bevy::prelude::*;

/// Makes an entity trail another entity's position.
#[derive(Component)]
pub struct SmoothFollow {
    /// Entity to follow
    pub target: Entity,
    /// Offset added to the target position
    pub offset: Vec2,
    /// Interpolation speed multiplier (higher = snappier)
    pub speed: f32,
}

impl SmoothFollow {
    pub fn new(target: Entity, speed: f32) -> Self {
        Self {
            target,
            offset: Vec2::ZERO,
            speed,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// Interpolates followers toward their targets. Z is left untouched so
/// cameras keep their depth.
pub fn update_smooth_follow(
    time: Res<Time>,
    targets: Query<&Transform, Without<SmoothFollow>>,
    mut followers: Query<(&mut Transform, &SmoothFollow)>,
) {
    let dt = time.delta_secs();

    for (mut transform, follow) in followers.iter_mut() {
        let Ok(target) = targets.get(follow.target) else {
            continue;
        };

        let goal = target.translation.truncate() + follow.offset;
        let t = (follow.speed * dt).min(1.0);
        let next = transform.translation.truncate().lerp(goal, t);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}
