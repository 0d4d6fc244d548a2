//! Distance and radius queries.

use bevy::prelude::*;

/// Straight-line distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// True if `target` is within `range` of `actor` (inclusive).
pub fn is_target_in_range(actor: Vec2, target: Vec2, range: f32) -> bool {
    distance(actor, target) <= range
}

/// Keep the candidates whose position lies within `radius` of `origin`.
///
/// Classification (which actors are even candidates) is the caller's job,
/// usually a query filter such as `With<Enemy>`.
pub fn within_radius<I>(origin: Vec2, radius: f32, candidates: I) -> impl Iterator<Item = Entity>
where
    I: IntoIterator<Item = (Entity, Vec2)>,
{
    candidates
        .into_iter()
        .filter(move |(_, position)| is_target_in_range(origin, *position, radius))
        .map(|(entity, _)| entity)
}
