//! Animation plugin - records signals and mirrors facing onto sprites.

use bevy::prelude::*;

use super::components::*;
use crate::core::{Facing, GameplaySet};

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationSignal>().add_systems(
            Update,
            (
                (record_animation_signals, play_placeholder_animations).chain(),
                sync_sprite_facing,
            )
                .in_set(GameplaySet::Feedback),
        );
    }
}

/// Copy this frame's signals onto the receiving entities' animators.
fn record_animation_signals(
    mut signals: EventReader<AnimationSignal>,
    mut animators: Query<&mut Animator>,
) {
    for event in signals.read() {
        // Despawned or animator-less entities just miss the signal
        let Ok(mut animator) = animators.get_mut(event.entity) else {
            continue;
        };
        animator.apply(event.signal);
    }
}

/// Drain triggers into placeholder tints and paint the result.
fn play_placeholder_animations(
    time: Res<Time>,
    mut query: Query<(&mut Animator, &mut PlaceholderTint, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (mut animator, mut tint, mut sprite) in query.iter_mut() {
        for trigger in animator.take_triggers() {
            tint.play(trigger);
        }
        tint.tick(dt);

        let color = tint.current();
        if sprite.color != color {
            sprite.color = color;
        }
    }
}

/// Translate logical facing into sprite mirroring.
fn sync_sprite_facing(
    mut query: Query<(&Facing, Option<&SpriteOrientation>, &mut Sprite), Changed<Facing>>,
) {
    for (facing, orientation, mut sprite) in query.iter_mut() {
        let orientation = orientation.copied().unwrap_or_default();
        sprite.flip_x = orientation.flip_for(*facing);
    }
}
