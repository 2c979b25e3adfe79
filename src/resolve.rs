//! Positional separation and velocity exchange for AABB bodies, against each
//! other and against static tiles.
//!
//! X always resolves before Y. Each axis only separates when the two bodies
//! actually moved relative to each other this step and their swept hulls on
//! that axis intersect, and an overlap deeper than the step movement plus
//! the configured bias is discarded as stale rather than corrected in one
//! jump.

use tracing::trace;

use crate::types::{Body, ResolveConfig, Sides, Tile};

fn sign(v: f32) -> f32 {
    if v > 0.0 { 1.0 } else { -1.0 }
}

/// Post-impact speed for a body absorbing the other body's momentum, keeping
/// kinetic energy along the axis: `sqrt(v_other^2 * m_other / m_self)` with
/// the other body's direction.
fn exchanged_velocity(v_other: f32, m_other: f32, m_self: f32) -> f32 {
    debug_assert!(m_self > 0.0 && m_other > 0.0, "body mass must be positive");
    ((v_other * v_other * m_other) / m_self).sqrt() * sign(v_other)
}

/// Apply the axis impulse once an overlap has been accepted. Movable pairs
/// split the correction in half and exchange momentum; against an immovable
/// partner the movable body takes the full correction and reflects.
fn exchange_x(a: &mut Body, b: &mut Body, overlap: f32) {
    let va = a.velocity.x;
    let vb = b.velocity.x;
    if !a.immovable && !b.immovable {
        let half = overlap * 0.5;
        a.shift_x(-half);
        b.shift_x(half);
        let mut new_va = exchanged_velocity(vb, b.mass, a.mass);
        let mut new_vb = exchanged_velocity(va, a.mass, b.mass);
        let average = (new_va + new_vb) * 0.5;
        new_va -= average;
        new_vb -= average;
        a.velocity.x = average + new_va * a.elasticity;
        b.velocity.x = average + new_vb * b.elasticity;
    } else if !a.immovable {
        a.shift_x(-overlap);
        a.velocity.x = vb - va * a.elasticity;
    } else if !b.immovable {
        b.shift_x(overlap);
        b.velocity.x = va - vb * b.elasticity;
    }
}

fn exchange_y(a: &mut Body, b: &mut Body, overlap: f32) {
    let va = a.velocity.y;
    let vb = b.velocity.y;
    if !a.immovable && !b.immovable {
        let half = overlap * 0.5;
        a.shift_y(-half);
        b.shift_y(half);
        let mut new_va = exchanged_velocity(vb, b.mass, a.mass);
        let mut new_vb = exchanged_velocity(va, a.mass, b.mass);
        let average = (new_va + new_vb) * 0.5;
        new_va -= average;
        new_vb -= average;
        a.velocity.y = average + new_va * a.elasticity;
        b.velocity.y = average + new_vb * b.elasticity;
    } else if !a.immovable {
        a.shift_y(-overlap);
        a.velocity.y = vb - va * a.elasticity;
    } else if !b.immovable {
        b.shift_y(overlap);
        b.velocity.y = va - vb * b.elasticity;
    }
}

/// Separate two bodies on both axes, x first. Returns true if either axis
/// produced a separation.
pub fn separate(a: &mut Body, b: &mut Body, config: &ResolveConfig) -> bool {
    let separated_x = separate_x(a, b, config);
    let separated_y = separate_y(a, b, config);
    separated_x || separated_y
}

/// Separate two bodies on the x axis only.
pub fn separate_x(a: &mut Body, b: &mut Body, config: &ResolveConfig) -> bool {
    if a.immovable && b.immovable {
        return false;
    }

    let mut overlap = 0.0f32;
    if a.mask.delta_x() != b.mask.delta_x() && a.mask.hull_intersects_x(&b.mask) {
        let max_overlap = a.mask.delta_x_abs() + b.mask.delta_x_abs() + config.overlap_bias;
        if a.mask.delta_x() > b.mask.delta_x() {
            // A moved right relative to B.
            overlap = a.mask.right() - b.mask.x;
            if overlap > max_overlap
                || !a.allow_collisions.contains(Sides::RIGHT)
                || !b.allow_collisions.contains(Sides::LEFT)
            {
                overlap = 0.0;
            } else {
                a.touching |= Sides::RIGHT;
                b.touching |= Sides::LEFT;
            }
        } else {
            // A moved left relative to B; overlap is negative.
            overlap = a.mask.x - b.mask.width - b.mask.x;
            if -overlap > max_overlap
                || !a.allow_collisions.contains(Sides::LEFT)
                || !b.allow_collisions.contains(Sides::RIGHT)
            {
                overlap = 0.0;
            } else {
                a.touching |= Sides::LEFT;
                b.touching |= Sides::RIGHT;
            }
        }
    }

    if overlap != 0.0 {
        trace!(overlap, axis = "x", "separating body pair");
        exchange_x(a, b, overlap);
        true
    } else {
        false
    }
}

/// Separate two bodies on the y axis only.
pub fn separate_y(a: &mut Body, b: &mut Body, config: &ResolveConfig) -> bool {
    if a.immovable && b.immovable {
        return false;
    }

    let mut overlap = 0.0f32;
    if a.mask.delta_y() != b.mask.delta_y() && a.mask.hull_intersects_y(&b.mask) {
        let max_overlap = a.mask.delta_y_abs() + b.mask.delta_y_abs() + config.overlap_bias;
        if a.mask.delta_y() > b.mask.delta_y() {
            // A moved down relative to B.
            overlap = a.mask.bottom() - b.mask.y;
            if overlap > max_overlap
                || !a.allow_collisions.contains(Sides::DOWN)
                || !b.allow_collisions.contains(Sides::UP)
            {
                overlap = 0.0;
            } else {
                a.touching |= Sides::DOWN;
                b.touching |= Sides::UP;
            }
        } else {
            // A moved up relative to B; overlap is negative.
            overlap = a.mask.y - b.mask.height - b.mask.y;
            if -overlap > max_overlap
                || !a.allow_collisions.contains(Sides::UP)
                || !b.allow_collisions.contains(Sides::DOWN)
            {
                overlap = 0.0;
            } else {
                a.touching |= Sides::UP;
                b.touching |= Sides::DOWN;
            }
        }
    }

    if overlap != 0.0 {
        trace!(overlap, axis = "y", "separating body pair");
        exchange_y(a, b, overlap);
        true
    } else {
        false
    }
}

/// Resolve a body against a static tile, x axis first. `separate_x` and
/// `separate_y` select whether each axis repositions or only reports; either
/// way the return value says whether the body hit the tile on either axis.
pub fn separate_tile(
    body: &mut Body,
    tile: &Tile,
    separate_x: bool,
    separate_y: bool,
    config: &ResolveConfig,
) -> bool {
    let hit_x = separate_tile_x(body, tile, separate_x, config);
    let hit_y = separate_tile_y(body, tile, separate_y, config);
    hit_x || hit_y
}

/// X-axis body-vs-tile check. The swept hull catches cells the body passed
/// through inside a single step.
pub fn separate_tile_x(body: &mut Body, tile: &Tile, separate: bool, config: &ResolveConfig) -> bool {
    if body.immovable {
        return false;
    }

    let mut overlap = 0.0f32;
    if body.mask.delta_x() != 0.0
        && body
            .mask
            .hull_intersects_raw(tile.x, tile.right(), tile.y, tile.bottom())
    {
        let max_overlap = body.mask.delta_x_abs() + config.overlap_bias;
        if body.mask.delta_x() > 0.0 {
            // Moving right, hitting the tile's left face.
            overlap = body.mask.right() - tile.x;
            if overlap > max_overlap
                || !body.allow_collisions.contains(Sides::RIGHT)
                || !tile.collide_left
            {
                overlap = 0.0;
            } else {
                body.touching |= Sides::RIGHT;
            }
        } else {
            // Moving left, hitting the tile's right face; overlap is negative.
            overlap = body.mask.x - tile.right();
            if -overlap > max_overlap
                || !body.allow_collisions.contains(Sides::LEFT)
                || !tile.collide_right
            {
                overlap = 0.0;
            } else {
                body.touching |= Sides::LEFT;
            }
        }
    }

    if overlap != 0.0 {
        if separate {
            trace!(overlap, axis = "x", "separating body from tile");
            body.shift_x(-overlap);
            body.velocity.x = -(body.velocity.x * body.elasticity);
        }
        true
    } else {
        false
    }
}

/// Y-axis body-vs-tile check.
pub fn separate_tile_y(body: &mut Body, tile: &Tile, separate: bool, config: &ResolveConfig) -> bool {
    if body.immovable {
        return false;
    }

    let mut overlap = 0.0f32;
    if body.mask.delta_y() != 0.0
        && body
            .mask
            .hull_intersects_raw(tile.x, tile.right(), tile.y, tile.bottom())
    {
        let max_overlap = body.mask.delta_y_abs() + config.overlap_bias;
        if body.mask.delta_y() > 0.0 {
            // Moving down, hitting the tile's top face.
            overlap = body.mask.bottom() - tile.y;
            if overlap > max_overlap
                || !body.allow_collisions.contains(Sides::DOWN)
                || !tile.collide_up
            {
                overlap = 0.0;
            } else {
                body.touching |= Sides::DOWN;
            }
        } else {
            // Moving up, hitting the tile's bottom face; overlap is negative.
            overlap = body.mask.y - tile.bottom();
            if -overlap > max_overlap
                || !body.allow_collisions.contains(Sides::UP)
                || !tile.collide_down
            {
                overlap = 0.0;
            } else {
                body.touching |= Sides::UP;
            }
        }
    }

    if overlap != 0.0 {
        if separate {
            trace!(overlap, axis = "y", "separating body from tile");
            body.shift_y(-overlap);
            body.velocity.y = -(body.velocity.y * body.elasticity);
        }
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec2;

    // A body that just finished a step: previous position is where `new`
    // placed it, current position and velocity as given.
    fn stepped_body(prev: Vec2, current: Vec2, velocity: Vec2) -> Body {
        let mut body = Body::new(prev, 10.0, 10.0);
        body.position = current;
        body.velocity = velocity;
        body.update_mask();
        body
    }

    #[test]
    fn test_both_immovable_never_separate() {
        let config = ResolveConfig::default();
        let mut a = stepped_body(Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(6.0, 0.0));
        let mut b = stepped_body(Vec2::new(8.0, 0.0), Vec2::new(8.0, 0.0), Vec2::ZERO);
        a.immovable = true;
        b.immovable = true;
        assert!(!separate(&mut a, &mut b, &config));
        assert_relative_eq!(a.position.x, 6.0);
        assert_relative_eq!(b.position.x, 8.0);
    }

    #[test]
    fn test_equal_deltas_do_not_separate() {
        let config = ResolveConfig::default();
        // Overlapping but moving in lockstep.
        let mut a = stepped_body(Vec2::ZERO, Vec2::new(3.0, 0.0), Vec2::new(3.0, 0.0));
        let mut b = stepped_body(Vec2::new(5.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(3.0, 0.0));
        assert!(a.mask.intersects(&b.mask));
        assert!(!separate(&mut a, &mut b, &config));
        assert_relative_eq!(a.position.x, 3.0);
        assert_relative_eq!(b.position.x, 8.0);
    }

    #[test]
    fn test_elastic_equal_mass_pair_swaps_velocity() {
        let config = ResolveConfig::default();
        let mut a = stepped_body(Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(6.0, 0.0));
        let mut b = stepped_body(Vec2::new(15.0, 0.0), Vec2::new(15.0, 0.0), Vec2::ZERO);
        a.elasticity = 1.0;
        b.elasticity = 1.0;

        assert!(separate(&mut a, &mut b, &config));
        // Overlap of 1 split in half.
        assert_relative_eq!(a.position.x, 5.5);
        assert_relative_eq!(b.position.x, 15.5);
        // Fully elastic equal masses trade velocities.
        assert_relative_eq!(a.velocity.x, 0.0);
        assert_relative_eq!(b.velocity.x, 6.0);
        assert!(a.touching.contains(Sides::RIGHT));
        assert!(b.touching.contains(Sides::LEFT));
    }

    #[test]
    fn test_head_on_equal_mass_elastic_swap() {
        let config = ResolveConfig::default();
        let mut a = stepped_body(Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(6.0, 0.0));
        let mut b = stepped_body(Vec2::new(21.0, 0.0), Vec2::new(15.0, 0.0), Vec2::new(-6.0, 0.0));
        a.elasticity = 1.0;
        b.elasticity = 1.0;

        assert!(separate_x(&mut a, &mut b, &config));
        assert_relative_eq!(a.velocity.x, -6.0, epsilon = 1e-5);
        assert_relative_eq!(b.velocity.x, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_inelastic_pair_shares_momentum() {
        let config = ResolveConfig::default();
        let mut a = stepped_body(Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(6.0, 0.0));
        let mut b = stepped_body(Vec2::new(15.0, 0.0), Vec2::new(15.0, 0.0), Vec2::ZERO);

        assert!(separate_x(&mut a, &mut b, &config));
        // Zero elasticity collapses both onto the average.
        assert_relative_eq!(a.velocity.x, 3.0);
        assert_relative_eq!(b.velocity.x, 3.0);
    }

    #[test]
    fn test_immovable_wall_reflects() {
        let config = ResolveConfig::default();
        let mut a = stepped_body(Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(4.0, 0.0));
        let mut wall = stepped_body(Vec2::new(12.0, 0.0), Vec2::new(12.0, 0.0), Vec2::ZERO);
        a.elasticity = 0.5;
        wall.immovable = true;

        assert!(separate(&mut a, &mut wall, &config));
        // Full 2-unit correction lands on the movable body.
        assert_relative_eq!(a.position.x, 2.0);
        assert_relative_eq!(a.mask.x, 2.0);
        assert_relative_eq!(wall.position.x, 12.0);
        assert_relative_eq!(a.velocity.x, -2.0);
        assert!(a.touching.contains(Sides::RIGHT));
        assert!(wall.touching.contains(Sides::LEFT));
    }

    #[test]
    fn test_forbidden_side_skips_separation() {
        let config = ResolveConfig::default();
        let mut a = stepped_body(Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(6.0, 0.0));
        let mut b = stepped_body(Vec2::new(15.0, 0.0), Vec2::new(15.0, 0.0), Vec2::ZERO);
        // One-way platform style: B refuses contacts on its left.
        b.allow_collisions = Sides::RIGHT | Sides::UP | Sides::DOWN;

        assert!(!separate_x(&mut a, &mut b, &config));
        assert_relative_eq!(a.position.x, 6.0);
        assert!(a.touching.is_empty());
        assert!(b.touching.is_empty());
    }

    #[test]
    fn test_vertical_landing_sets_floor_flags() {
        let config = ResolveConfig::default();
        let mut faller = stepped_body(Vec2::ZERO, Vec2::new(0.0, 6.0), Vec2::new(0.0, 6.0));
        let mut ground = stepped_body(Vec2::new(0.0, 15.0), Vec2::new(0.0, 15.0), Vec2::ZERO);
        ground.immovable = true;

        assert!(separate(&mut faller, &mut ground, &config));
        assert_relative_eq!(faller.position.y, 5.0);
        assert_relative_eq!(faller.velocity.y, 0.0);
        assert!(faller.touching.contains(Sides::FLOOR));
        assert!(ground.touching.contains(Sides::CEILING));
    }

    #[test]
    fn test_tile_hit_repositions_and_reflects() {
        let config = ResolveConfig::default();
        let mut body = stepped_body(Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(6.0, 0.0));
        body.elasticity = 0.5;
        let tile = Tile::new(12.0, 0.0, 10.0, 10.0);

        assert!(separate_tile(&mut body, &tile, true, true, &config));
        // Right edge pushed back flush with the tile's left face.
        assert_relative_eq!(body.position.x, 2.0);
        assert_relative_eq!(body.mask.x, 2.0);
        assert_relative_eq!(body.velocity.x, -3.0);
        assert!(body.touching.contains(Sides::RIGHT));
    }

    #[test]
    fn test_tile_bias_clamp_discards_deep_overlap() {
        let config = ResolveConfig::default();
        // Moved 3 this step but already 10 deep: stale overlap, leave it.
        let mut body = stepped_body(Vec2::new(2.0, 0.0), Vec2::new(5.0, 0.0), Vec2::new(3.0, 0.0));
        let tile = Tile::new(5.0, 0.0, 10.0, 10.0);

        assert!(!separate_tile_x(&mut body, &tile, true, &config));
        assert_relative_eq!(body.position.x, 5.0);
        assert!(body.touching.is_empty());
    }

    #[test]
    fn test_tile_report_only_leaves_body_alone() {
        let config = ResolveConfig::default();
        let mut body = stepped_body(Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(6.0, 0.0));
        let tile = Tile::new(12.0, 0.0, 10.0, 10.0);

        assert!(separate_tile(&mut body, &tile, false, false, &config));
        assert_relative_eq!(body.position.x, 6.0);
        assert_relative_eq!(body.velocity.x, 6.0);
        assert!(body.touching.contains(Sides::RIGHT));
    }

    #[test]
    fn test_tile_edge_flags_respected() {
        let config = ResolveConfig::default();
        let mut body = stepped_body(Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(6.0, 0.0));
        let mut tile = Tile::new(12.0, 0.0, 10.0, 10.0);
        tile.collide_left = false;

        assert!(!separate_tile_x(&mut body, &tile, true, &config));
        assert_relative_eq!(body.position.x, 6.0);
    }

    #[test]
    fn test_tile_swept_hull_catches_tunneling() {
        let config = ResolveConfig::default();
        // Whole step jumps past the tile; the hull still registers it.
        let mut body = stepped_body(Vec2::ZERO, Vec2::new(30.0, 0.0), Vec2::new(30.0, 0.0));
        let tile = Tile::new(15.0, 0.0, 4.0, 10.0);

        assert!(separate_tile_x(&mut body, &tile, true, &config));
        // Overlap measured from the current right edge.
        assert_relative_eq!(body.position.x, 30.0 - (40.0 - 15.0));
    }

    #[test]
    fn test_pair_swept_hull_catches_tunneling() {
        let config = ResolveConfig::default();
        // A narrow body whose step carries it fully past a thin post: the
        // current boxes are disjoint but the x hulls overlap.
        let mut a = Body::new(Vec2::ZERO, 2.0, 10.0);
        a.position = Vec2::new(6.0, 0.0);
        a.velocity = Vec2::new(6.0, 0.0);
        a.update_mask();
        let mut post = Body::new(Vec2::new(3.0, 0.0), 2.0, 10.0);
        post.immovable = true;
        post.update_mask();
        assert!(!a.mask.intersects(&post.mask));

        assert!(separate_x(&mut a, &mut post, &config));
        // Pushed back flush against the post's left face.
        assert_relative_eq!(a.position.x, 1.0);
        assert_relative_eq!(a.velocity.x, 0.0);
        assert!(a.touching.contains(Sides::RIGHT));
        assert!(post.touching.contains(Sides::LEFT));
    }

    #[test]
    fn test_pair_hull_still_requires_shared_y_extent() {
        let config = ResolveConfig::default();
        // Same x sweep as above, but the bodies never share a y range.
        let mut a = Body::new(Vec2::ZERO, 2.0, 10.0);
        a.position = Vec2::new(6.0, 0.0);
        a.velocity = Vec2::new(6.0, 0.0);
        a.update_mask();
        let mut post = Body::new(Vec2::new(3.0, 20.0), 2.0, 10.0);
        post.immovable = true;
        post.update_mask();

        assert!(!separate_x(&mut a, &mut post, &config));
        assert_relative_eq!(a.position.x, 6.0);
        assert!(a.touching.is_empty());
    }

    #[test]
    fn test_separate_is_idempotent_after_resolution() {
        let config = ResolveConfig::default();
        let mut a = stepped_body(Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(6.0, 0.0));
        let mut b = stepped_body(Vec2::new(15.0, 0.0), Vec2::new(15.0, 0.0), Vec2::ZERO);

        assert!(separate(&mut a, &mut b, &config));
        let (ax, bx) = (a.position.x, b.position.x);
        // Deltas are unchanged within the step, but the boxes no longer
        // overlap, so a second pass does nothing.
        assert!(!separate(&mut a, &mut b, &config));
        assert_relative_eq!(a.position.x, ax);
        assert_relative_eq!(b.position.x, bx);
    }
}
