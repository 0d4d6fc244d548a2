//! Spatial sensor - range checks and ground probes.
//!
//! Everything here is a read-only query against current positions and
//! level geometry. Nothing in this module mutates the world.

mod ground;
mod layers;
mod range;

pub use ground::{is_ground_ahead, GroundProbe, GroundSensor, GroundSurfaces};
pub use layers::*;
pub use range::*;
