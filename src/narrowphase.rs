use glam::Vec2;

use crate::scratch::{Projection, ScratchPool};
use crate::shapes::{Circle, Polygon, Shape, right_perp};
use crate::types::Response;

/// Voronoi region of a point relative to a segment. Both the segment and the
/// point are taken relative to the segment's start.
///
/// ```text
///        |    Middle    |
/// Left  [0]------------[1]  Right
///        |    Middle    |
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Region {
    Left,
    Middle,
    Right,
}

fn voronoi_region(line: Vec2, point: Vec2) -> Region {
    let len2 = line.length_squared();
    let dp = point.dot(line);
    if dp < 0.0 {
        Region::Left
    } else if dp > len2 {
        Region::Right
    } else {
        Region::Middle
    }
}

/// Project points onto a unit axis, writing the min/max range into `out`.
fn flatten_points_on(points: &[Vec2], normal: Vec2, out: &mut Projection) {
    let mut min = f32::MAX;
    let mut max = -f32::MAX;
    for point in points {
        let dot = point.dot(normal);
        if dot < min {
            min = dot;
        }
        if dot > max {
            max = dot;
        }
    }
    out.min = min;
    out.max = max;
}

/// Test whether `axis` (a unit vector) separates the two point sets. When it
/// does not and a response is supplied, folds this axis's overlap into the
/// running minimum and falsifies containment flags the projections rule out.
fn is_separating_axis(
    pool: &ScratchPool,
    a_pos: Vec2,
    b_pos: Vec2,
    a_points: &[Vec2],
    b_points: &[Vec2],
    axis: Vec2,
    response: Option<&mut Response>,
) -> bool {
    let mut range_a = pool.range();
    let mut range_b = pool.range();
    let mut offset = pool.vector();
    *offset = b_pos - a_pos;
    let projected_offset = offset.dot(axis);

    flatten_points_on(a_points, axis, &mut range_a);
    flatten_points_on(b_points, axis, &mut range_b);
    // Move B's range to its position relative to A.
    range_b.min += projected_offset;
    range_b.max += projected_offset;

    if range_a.min > range_b.max || range_b.min > range_a.max {
        return true;
    }

    if let Some(response) = response {
        let overlap;
        if range_a.min < range_b.min {
            response.a_in_b = false;
            if range_a.max < range_b.max {
                // A ends before B does: pull A out of B.
                overlap = range_a.max - range_b.min;
                response.b_in_a = false;
            } else {
                // B is fully inside A: pick the shortest way out.
                let option1 = range_a.max - range_b.min;
                let option2 = range_b.max - range_a.min;
                overlap = if option1 < option2 { option1 } else { -option2 };
            }
        } else {
            response.b_in_a = false;
            if range_a.max > range_b.max {
                // B ends before A does: push A out of B.
                overlap = range_a.min - range_b.max;
                response.a_in_b = false;
            } else {
                // A is fully inside B: pick the shortest way out.
                let option1 = range_a.max - range_b.min;
                let option2 = range_b.max - range_a.min;
                overlap = if option1 < option2 { option1 } else { -option2 };
            }
        }
        let abs_overlap = overlap.abs();
        if abs_overlap < response.overlap {
            response.overlap = abs_overlap;
            response.overlap_n = if overlap < 0.0 { -axis } else { axis };
        }
    }
    false
}

/// Circle vs circle. Overlap iff the center distance is within the summed
/// radii; the response normal points from `a` toward `b`.
pub fn circle_circle(
    pool: &ScratchPool,
    a: &Circle,
    b: &Circle,
    response: Option<&mut Response>,
) -> bool {
    let mut difference = pool.vector();
    *difference = b.center - a.center;
    let total_radius = a.radius + b.radius;
    let distance_sq = difference.length_squared();

    if distance_sq > total_radius * total_radius {
        return false;
    }

    if let Some(response) = response {
        response.clear();
        let distance = distance_sq.sqrt();
        response.overlap = total_radius - distance;
        response.overlap_n = difference.normalize_or_zero();
        response.overlap_v = response.overlap_n * response.overlap;
        response.a_in_b = a.radius <= b.radius && distance <= b.radius - a.radius;
        response.b_in_a = b.radius <= a.radius && distance <= a.radius - b.radius;
    }
    true
}

/// Polygon vs circle via Voronoi-region classification of the circle center
/// against each edge. Rejects as soon as any edge proves separation; on
/// overlap the minimum-magnitude edge overlap becomes the response.
pub fn polygon_circle(
    pool: &ScratchPool,
    polygon: &Polygon,
    circle: &Circle,
    mut response: Option<&mut Response>,
) -> bool {
    if let Some(r) = response.as_deref_mut() {
        r.clear();
    }

    // Circle center relative to the polygon's position.
    let mut circle_pos = pool.vector();
    *circle_pos = circle.center - polygon.position;
    let radius = circle.radius;
    let radius2 = radius * radius;
    let points = polygon.points();
    let len = points.len();
    let mut edge = pool.vector();
    let mut point = pool.vector();

    for i in 0..len {
        let next = if i == len - 1 { 0 } else { i + 1 };
        let prev = if i == 0 { len - 1 } else { i - 1 };
        let mut overlap = 0.0f32;
        let mut overlap_n: Option<Vec2> = None;

        *edge = polygon.edges()[i];
        *point = *circle_pos - points[i];

        // Any vertex beyond the radius means the polygon cannot be fully
        // inside the circle.
        if response.is_some() && point.length_squared() > radius2 {
            if let Some(r) = response.as_deref_mut() {
                r.a_in_b = false;
            }
        }

        let mut region = voronoi_region(*edge, *point);
        if region == Region::Left {
            // Only the vertex is closest if we are also in the right region
            // of the previous edge.
            *edge = polygon.edges()[prev];
            let mut point2 = pool.vector();
            *point2 = *circle_pos - points[prev];
            region = voronoi_region(*edge, *point2);
            if region == Region::Right {
                let distance = point.length();
                if distance > radius {
                    return false;
                } else if let Some(r) = response.as_deref_mut() {
                    r.b_in_a = false;
                    overlap_n = Some(point.normalize_or_zero());
                    overlap = radius - distance;
                }
            }
        } else if region == Region::Right {
            // Mirror case: confirm against the left region of the next edge.
            *edge = polygon.edges()[next];
            *point = *circle_pos - points[next];
            region = voronoi_region(*edge, *point);
            if region == Region::Left {
                let distance = point.length();
                if distance > radius {
                    return false;
                } else if let Some(r) = response.as_deref_mut() {
                    r.b_in_a = false;
                    overlap_n = Some(point.normalize_or_zero());
                    overlap = radius - distance;
                }
            }
        } else {
            // Middle region: perpendicular distance from center to the edge.
            let normal = right_perp(*edge).normalize_or_zero();
            let distance = point.dot(normal);
            let distance_abs = distance.abs();
            if distance > 0.0 && distance_abs > radius {
                // Center is outside the edge and out of reach.
                return false;
            } else if let Some(r) = response.as_deref_mut() {
                overlap_n = Some(normal);
                overlap = radius - distance;
                // Center outside the edge, or circle poking past it: the
                // circle is not fully inside the polygon.
                if distance >= 0.0 || overlap < 2.0 * radius {
                    r.b_in_a = false;
                }
            }
        }

        if let Some(n) = overlap_n
            && let Some(r) = response.as_deref_mut()
            && overlap.abs() < r.overlap.abs()
        {
            r.overlap = overlap;
            r.overlap_n = n;
        }
    }

    if let Some(r) = response.as_deref_mut() {
        r.overlap_v = r.overlap_n * r.overlap;
    }
    true
}

/// Circle vs polygon. Runs `polygon_circle` and mirrors the response so it is
/// expressed from the circle's perspective.
pub fn circle_polygon(
    pool: &ScratchPool,
    circle: &Circle,
    polygon: &Polygon,
    mut response: Option<&mut Response>,
) -> bool {
    let result = polygon_circle(pool, polygon, circle, response.as_deref_mut());
    if result && let Some(r) = response {
        r.overlap_n = -r.overlap_n;
        r.overlap_v = -r.overlap_v;
        std::mem::swap(&mut r.a_in_b, &mut r.b_in_a);
    }
    result
}

/// Polygon vs polygon via the Separating Axis Theorem over both polygons'
/// edge normals. Any gap on any axis exits early with no collision.
pub fn polygon_polygon(
    pool: &ScratchPool,
    a: &Polygon,
    b: &Polygon,
    mut response: Option<&mut Response>,
) -> bool {
    if let Some(r) = response.as_deref_mut() {
        r.clear();
    }

    for normal in a.normals() {
        if is_separating_axis(
            pool,
            a.position,
            b.position,
            a.points(),
            b.points(),
            *normal,
            response.as_deref_mut(),
        ) {
            return false;
        }
    }
    for normal in b.normals() {
        if is_separating_axis(
            pool,
            a.position,
            b.position,
            a.points(),
            b.points(),
            *normal,
            response.as_deref_mut(),
        ) {
            return false;
        }
    }

    // No axis separates; the minimum overlap was tracked along the way.
    if let Some(r) = response {
        r.overlap_v = r.overlap_n * r.overlap;
    }
    true
}

/// Exhaustive narrowphase dispatch over the shape union. Broad-phase callers
/// go through here once per candidate pair.
pub fn test(pool: &ScratchPool, a: &Shape, b: &Shape, response: Option<&mut Response>) -> bool {
    match (a, b) {
        (Shape::Circle(ca), Shape::Circle(cb)) => circle_circle(pool, ca, cb, response),
        (Shape::Circle(c), Shape::Polygon(p)) => circle_polygon(pool, c, p, response),
        (Shape::Polygon(p), Shape::Circle(c)) => polygon_circle(pool, p, c, response),
        (Shape::Polygon(pa), Shape::Polygon(pb)) => polygon_polygon(pool, pa, pb, response),
    }
}
