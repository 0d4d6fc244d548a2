//! Collision groups shared by every collider in the game.
//!
//! - GROUND: platforms and floors, the only thing ground probes can hit
//! - PLAYER: the player body
//! - ENEMY: enemy bodies

use bevy_rapier2d::prelude::*;

pub const GROUND_GROUP: Group = Group::GROUP_1;
pub const PLAYER_GROUP: Group = Group::GROUP_2;
pub const ENEMY_GROUP: Group = Group::GROUP_3;

/// Platforms collide with every body.
pub fn ground_collision_groups() -> CollisionGroups {
    CollisionGroups::new(GROUND_GROUP, Group::ALL)
}

/// The player stands on ground and walks through enemies.
pub fn player_collision_groups() -> CollisionGroups {
    CollisionGroups::new(PLAYER_GROUP, GROUND_GROUP)
}

/// Enemies stand on ground and ignore each other.
pub fn enemy_collision_groups() -> CollisionGroups {
    CollisionGroups::new(ENEMY_GROUP, GROUND_GROUP)
}

/// Query filter that only reports ground colliders.
pub fn ground_query_filter<'a>() -> QueryFilter<'a> {
    QueryFilter::new().groups(CollisionGroups::new(Group::ALL, GROUND_GROUP))
}
