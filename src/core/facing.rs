//! Horizontal facing direction.
//!
//! Facing is plain logic state. Sprites read it at the render boundary,
//! never the other way around.

use bevy::prelude::*;

#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Direction that looks from `self_x` toward `target_x`.
    ///
    /// A target directly above or below counts as being on the right.
    pub fn toward(self_x: f32, target_x: f32) -> Self {
        if target_x < self_x {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    /// -1.0 for left, 1.0 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_toward_target() {
        assert_eq!(Facing::toward(0.0, -2.0), Facing::Left);
        assert_eq!(Facing::toward(0.0, 2.0), Facing::Right);
        assert_eq!(Facing::toward(1.0, 1.0), Facing::Right);
    }

    #[test]
    fn sign_round_trips() {
        assert_eq!(Facing::from_sign(Facing::Left.sign()), Facing::Left);
        assert_eq!(Facing::from_sign(Facing::Right.sign()), Facing::Right);
    }
}
