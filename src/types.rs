use std::ops::{BitAnd, BitOr, BitOrAssign};

use glam::Vec2;

use crate::mask::CollisionMask;

/// Directional collision flags, used both to allow collisions per side and to
/// record which sides touched during the current step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Sides(pub u32);

impl Sides {
    pub const NONE: Sides = Sides(0);
    pub const LEFT: Sides = Sides(0x0001);
    pub const RIGHT: Sides = Sides(0x0010);
    pub const UP: Sides = Sides(0x0100);
    pub const DOWN: Sides = Sides(0x1000);
    pub const CEILING: Sides = Self::UP;
    pub const FLOOR: Sides = Self::DOWN;
    pub const WALL: Sides = Sides(Self::LEFT.0 | Self::RIGHT.0);
    pub const ANY: Sides = Sides(Self::LEFT.0 | Self::RIGHT.0 | Self::UP.0 | Self::DOWN.0);

    /// True if any of `other`'s bits are set on `self`.
    pub fn contains(self, other: Sides) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Sides) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Sides {
    type Output = Sides;

    fn bitor(self, rhs: Sides) -> Sides {
        Sides(self.0 | rhs.0)
    }
}

impl BitOrAssign for Sides {
    fn bitor_assign(&mut self, rhs: Sides) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Sides {
    type Output = Sides;

    fn bitand(self, rhs: Sides) -> Sides {
        Sides(self.0 & rhs.0)
    }
}

/// A dynamic body as seen by the resolver: position, motion state, collision
/// permissions, and the per-step AABB mask.
///
/// Mass must stay positive; the resolver's velocity exchange divides by it.
#[derive(Clone, Debug)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
    /// Bounce retained on separation, 0 (dead stop) to 1 (full bounce).
    pub elasticity: f32,
    pub immovable: bool,
    /// Sides on which this body accepts separation.
    pub allow_collisions: Sides,
    /// Sides that collided during the current step; reset by `update_mask`.
    pub touching: Sides,
    pub mask: CollisionMask,
}

impl Body {
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            mass: 1.0,
            elasticity: 0.0,
            immovable: false,
            allow_collisions: Sides::ANY,
            touching: Sides::NONE,
            mask: CollisionMask::new(position.x, position.y, width, height),
        }
    }

    /// Refresh the collision mask from the current position and reset the
    /// per-step touching flags. Call once per step, before any pair test.
    pub fn update_mask(&mut self) {
        self.touching = Sides::NONE;
        self.mask.update(self.position);
    }

    /// Move the body and its mask together so they stay coherent mid-step.
    pub(crate) fn shift_x(&mut self, dx: f32) {
        self.position.x += dx;
        self.mask.x += dx;
    }

    pub(crate) fn shift_y(&mut self, dy: f32) {
        self.position.y += dy;
        self.mask.y += dy;
    }
}

/// Result of a narrowphase pair test.
///
/// `overlap_n` is the unit direction that separates `a` out of `b`;
/// `overlap_v` is that direction scaled by the overlap depth. Reusable across
/// queries; each narrowphase entry point clears it before writing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Response {
    pub overlap: f32,
    pub overlap_n: Vec2,
    pub overlap_v: Vec2,
    pub a_in_b: bool,
    pub b_in_a: bool,
}

impl Response {
    pub fn new() -> Self {
        let mut response = Self {
            overlap: 0.0,
            overlap_n: Vec2::ZERO,
            overlap_v: Vec2::ZERO,
            a_in_b: true,
            b_in_a: true,
        };
        response.clear();
        response
    }

    /// Reset for reuse. `overlap` starts at `f32::MAX` so the first real axis
    /// always wins the minimum-overlap comparison.
    pub fn clear(&mut self) {
        self.overlap = f32::MAX;
        self.overlap_n = Vec2::ZERO;
        self.overlap_v = Vec2::ZERO;
        self.a_in_b = true;
        self.b_in_a = true;
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

/// A static tile cell as supplied by the tilemap collaborator.
///
/// `mass` is accepted for API symmetry with body pairs but tiles are always
/// treated as immovable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub mass: f32,
    pub collide_left: bool,
    pub collide_right: bool,
    pub collide_up: bool,
    pub collide_down: bool,
}

impl Tile {
    /// A tile collidable on all four edges.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            mass: 1.0,
            collide_left: true,
            collide_right: true,
            collide_up: true,
            collide_down: true,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Resolver tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolveConfig {
    /// Maximum tolerated penetration beyond the per-step movement before a
    /// correction is discarded as stale. Tunable for feel; the default suits
    /// tile-sized sprites moving a few units per step.
    pub overlap_bias: f32,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self { overlap_bias: 4.0 }
    }
}
