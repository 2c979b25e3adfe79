//! shunt: 2D rigid-body collision detection and resolution (SAT narrowphase, AABB resolver)

pub mod intersect;
pub mod mask;
pub mod narrowphase;
pub mod resolve;
pub mod scratch;
pub mod shapes;
pub mod types;

pub use crate::mask::CollisionMask;
pub use crate::scratch::{Projection, ScratchPool};
pub use crate::shapes::*;
pub use crate::types::*;
