//! Animation signal types and the per-entity signal sink.

use bevy::prelude::*;
use std::collections::HashMap;

/// One-shot animation triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimTrigger {
    Attack,
    Attack1,
    Attack2,
    Hurt,
    Die,
    Revive,
}

/// Looping animation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimFlag {
    Walking,
    Running,
    Jumping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Trigger(AnimTrigger),
    Flag(AnimFlag, bool),
}

/// Fire-and-forget animation signal for an entity.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSignal {
    pub entity: Entity,
    pub signal: Signal,
}

impl AnimationSignal {
    pub fn trigger(entity: Entity, trigger: AnimTrigger) -> Self {
        Self {
            entity,
            signal: Signal::Trigger(trigger),
        }
    }

    pub fn flag(entity: Entity, flag: AnimFlag, value: bool) -> Self {
        Self {
            entity,
            signal: Signal::Flag(flag, value),
        }
    }
}

/// Animator parameters for an entity, filled from `AnimationSignal`s.
///
/// The sprite animation layer drains `pending` each frame. Entities without
/// an `Animator` simply have their signals dropped.
#[derive(Component, Debug, Default)]
pub struct Animator {
    pub flags: HashMap<AnimFlag, bool>,
    pub pending: Vec<AnimTrigger>,
}

impl Animator {
    pub fn apply(&mut self, signal: Signal) {
        match signal {
            Signal::Trigger(trigger) => {
                self.pending.push(trigger);
            }
            Signal::Flag(flag, value) => {
                self.flags.insert(flag, value);
            }
        }
    }

    pub fn flag(&self, flag: AnimFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }

    /// Hand pending triggers to the animation layer.
    pub fn take_triggers(&mut self) -> Vec<AnimTrigger> {
        std::mem::take(&mut self.pending)
    }
}

/// Which way the sprite art faces when not flipped.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SpriteOrientation {
    pub faces_left_by_default: bool,
}

impl SpriteOrientation {
    /// Whether the sprite must be mirrored to look `facing`'s way.
    pub fn flip_for(&self, facing: crate::core::Facing) -> bool {
        let wants_left = facing == crate::core::Facing::Left;
        wants_left != self.faces_left_by_default
    }
}

/// Stand-in for sprite-sheet animation on flat-colored sprites: triggers
/// show up as short color flashes, and a downed actor fades out.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderTint {
    pub base: Color,
    pub flash_color: Color,
    /// Seconds left on the current flash
    pub flash: f32,
    pub downed: bool,
}

impl PlaceholderTint {
    pub fn new(base: Color) -> Self {
        Self {
            base,
            flash_color: base,
            flash: 0.0,
            downed: false,
        }
    }

    pub fn play(&mut self, trigger: AnimTrigger) {
        match trigger {
            AnimTrigger::Hurt => self.flash_with(Color::WHITE, 0.15),
            AnimTrigger::Attack | AnimTrigger::Attack1 => {
                self.flash_with(Color::srgb(1.0, 0.9, 0.5), 0.1)
            }
            AnimTrigger::Attack2 => self.flash_with(Color::srgb(1.0, 0.55, 0.25), 0.2),
            AnimTrigger::Die => self.downed = true,
            AnimTrigger::Revive => self.downed = false,
        }
    }

    fn flash_with(&mut self, color: Color, duration: f32) {
        self.flash_color = color;
        self.flash = duration;
    }

    pub fn tick(&mut self, dt: f32) {
        self.flash = (self.flash - dt).max(0.0);
    }

    pub fn current(&self) -> Color {
        if self.downed {
            self.base.with_alpha(0.4)
        } else if self.flash > 0.0 {
            self.flash_color
        } else {
            self.base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Facing;

    #[test]
    fn animator_records_flags_and_triggers() {
        let mut animator = Animator::default();
        animator.apply(Signal::Flag(AnimFlag::Walking, true));
        animator.apply(Signal::Trigger(AnimTrigger::Hurt));

        assert!(animator.flag(AnimFlag::Walking));
        assert!(!animator.flag(AnimFlag::Jumping));
        assert_eq!(animator.take_triggers(), vec![AnimTrigger::Hurt]);
        assert!(animator.pending.is_empty());
    }

    #[test]
    fn left_facing_art_flips_the_other_way() {
        let right_art = SpriteOrientation::default();
        let left_art = SpriteOrientation {
            faces_left_by_default: true,
        };

        assert!(right_art.flip_for(Facing::Left));
        assert!(!right_art.flip_for(Facing::Right));
        assert!(!left_art.flip_for(Facing::Left));
        assert!(left_art.flip_for(Facing::Right));
    }

    #[test]
    fn tint_flashes_then_settles() {
        let base = Color::srgb(0.5, 0.5, 0.5);
        let mut tint = PlaceholderTint::new(base);

        tint.play(AnimTrigger::Hurt);
        assert_eq!(tint.current(), Color::WHITE);
        tint.tick(0.2);
        assert_eq!(tint.current(), base);

        tint.play(AnimTrigger::Die);
        assert_eq!(tint.current(), base.with_alpha(0.4));
        tint.play(AnimTrigger::Revive);
        assert_eq!(tint.current(), base);
    }
}
