//! Line, segment, ray, circle, and rectangle intersection queries.
//!
//! A [`Line`] is interpreted per query: as an infinite line through its two
//! points, as a finite segment, or as a ray anchored at `(x1, y1)` heading
//! through `(x2, y2)`. Point-producing queries return `Option<Vec2>`; pure
//! predicates return `bool`. Near-parallel inputs are a miss, not an error.

use glam::Vec2;

use crate::shapes::{Circle, Line, Rect};

/// Determinant threshold below which two directions count as parallel.
const EPS: f32 = 1e-6;

pub fn distance_squared(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx * dx + dy * dy
}

pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    distance_squared(x1, y1, x2, y2).sqrt()
}

/// Intersection point of two infinite lines.
pub fn line_line(line1: &Line, line2: &Line) -> Option<Vec2> {
    let denominator = (line1.x1 - line1.x2) * (line2.y1 - line2.y2)
        - (line1.y1 - line1.y2) * (line2.x1 - line2.x2);
    if denominator.abs() < EPS {
        return None;
    }
    let cross1 = line1.x1 * line1.y2 - line1.y1 * line1.x2;
    let cross2 = line2.x1 * line2.y2 - line2.y1 * line2.x2;
    let x = (cross1 * (line2.x1 - line2.x2) - (line1.x1 - line1.x2) * cross2) / denominator;
    let y = (cross1 * (line2.y1 - line2.y2) - (line1.y1 - line1.y2) * cross2) / denominator;
    Some(Vec2::new(x, y))
}

/// Intersection of an infinite line with a finite segment given by raw
/// endpoint coordinates. The hit must land within the segment's extent on
/// both axes (within `EPS`, so axis-aligned segments accept their own axis).
fn line_raw_segment(line: &Line, x1: f32, y1: f32, x2: f32, y2: f32) -> Option<Vec2> {
    let denominator = (line.x1 - line.x2) * (y1 - y2) - (line.y1 - line.y2) * (x1 - x2);
    if denominator.abs() < EPS {
        return None;
    }
    let cross_line = line.x1 * line.y2 - line.y1 * line.x2;
    let cross_seg = x1 * y2 - y1 * x2;
    let x = (cross_line * (x1 - x2) - (line.x1 - line.x2) * cross_seg) / denominator;
    let y = (cross_line * (y1 - y2) - (line.y1 - line.y2) * cross_seg) / denominator;
    let within_x = x >= x1.min(x2) - EPS && x <= x1.max(x2) + EPS;
    let within_y = y >= y1.min(y2) - EPS && y <= y1.max(y2) + EPS;
    if within_x && within_y {
        Some(Vec2::new(x, y))
    } else {
        None
    }
}

/// Intersection of an infinite line with a finite segment.
pub fn line_segment(line: &Line, seg: &Line) -> Option<Vec2> {
    line_raw_segment(line, seg.x1, seg.y1, seg.x2, seg.y2)
}

/// Intersection of an infinite line with a ray. The hit must not lie behind
/// the ray's origin on either axis of travel.
pub fn line_ray(line: &Line, ray: &Line) -> Option<Vec2> {
    let point = line_line(line, ray)?;
    if (ray.x2 > ray.x1 && point.x < ray.x1 - EPS)
        || (ray.x2 < ray.x1 && point.x > ray.x1 + EPS)
        || (ray.y2 > ray.y1 && point.y < ray.y1 - EPS)
        || (ray.y2 < ray.y1 && point.y > ray.y1 + EPS)
    {
        return None;
    }
    Some(point)
}

/// True if the infinite line passes within the circle's radius.
pub fn line_circle(line: &Line, circle: &Circle) -> bool {
    let start = line.start();
    let direction = line.end() - start;
    let length = direction.length();
    if length < EPS {
        // Degenerate line: fall back to point containment.
        return circle_contains_point(circle, start);
    }
    let to_center = circle.center - start;
    let perpendicular_distance = (direction.perp_dot(to_center)).abs() / length;
    perpendicular_distance <= circle.radius
}

/// First intersection of an infinite line with a rectangle's edges, walking
/// top, left, bottom, right.
pub fn line_rect(line: &Line, rect: &Rect) -> Option<Vec2> {
    line_raw_segment(line, rect.x, rect.y, rect.right(), rect.y)
        .or_else(|| line_raw_segment(line, rect.x, rect.y, rect.x, rect.bottom()))
        .or_else(|| line_raw_segment(line, rect.x, rect.bottom(), rect.right(), rect.bottom()))
        .or_else(|| line_raw_segment(line, rect.right(), rect.y, rect.right(), rect.bottom()))
}

/// Intersection of two finite segments.
pub fn segment_segment(seg1: &Line, seg2: &Line) -> Option<Vec2> {
    let point = line_segment(seg1, seg2)?;
    let within_x = point.x >= seg1.x1.min(seg1.x2) - EPS && point.x <= seg1.x1.max(seg1.x2) + EPS;
    let within_y = point.y >= seg1.y1.min(seg1.y2) - EPS && point.y <= seg1.y1.max(seg1.y2) + EPS;
    if within_x && within_y { Some(point) } else { None }
}

/// Intersection of a finite segment with a ray.
pub fn segment_ray(seg: &Line, ray: &Line) -> Option<Vec2> {
    let point = line_ray(seg, ray)?;
    let within_x = point.x >= seg.x1.min(seg.x2) - EPS && point.x <= seg.x1.max(seg.x2) + EPS;
    let within_y = point.y >= seg.y1.min(seg.y2) - EPS && point.y <= seg.y1.max(seg.y2) + EPS;
    if within_x && within_y { Some(point) } else { None }
}

/// True if the finite segment passes within the circle's radius. Uses the
/// closest point on the segment (parametric t clamped to [0, 1]).
pub fn segment_circle(seg: &Line, circle: &Circle) -> bool {
    let start = seg.start();
    let direction = seg.end() - start;
    let length_sq = direction.length_squared();
    if length_sq < EPS {
        return circle_contains_point(circle, start);
    }
    let t = ((circle.center - start).dot(direction) / length_sq).clamp(0.0, 1.0);
    let closest = start + direction * t;
    circle_contains_point(circle, closest)
}

/// True if the finite segment touches the rectangle, including the case
/// where the segment lies entirely inside it.
pub fn segment_rect(seg: &Line, rect: &Rect) -> bool {
    if rect.contains(seg.x1, seg.y1) && rect.contains(seg.x2, seg.y2) {
        return true;
    }
    let hit = segment_segment(seg, &Line::new(rect.x, rect.y, rect.right(), rect.y))
        .or_else(|| segment_segment(seg, &Line::new(rect.x, rect.y, rect.x, rect.bottom())))
        .or_else(|| {
            segment_segment(seg, &Line::new(rect.x, rect.bottom(), rect.right(), rect.bottom()))
        })
        .or_else(|| {
            segment_segment(seg, &Line::new(rect.right(), rect.y, rect.right(), rect.bottom()))
        });
    hit.is_some()
}

/// First intersection of a ray with a rectangle's edges. Walks the edges in
/// the same order as `line_rect`; the hit is the first edge crossed in that
/// order, not necessarily the nearest to the ray origin.
pub fn ray_rect(ray: &Line, rect: &Rect) -> Option<Vec2> {
    let edges = [
        Line::new(rect.x, rect.y, rect.right(), rect.y),
        Line::new(rect.x, rect.y, rect.x, rect.bottom()),
        Line::new(rect.x, rect.bottom(), rect.right(), rect.bottom()),
        Line::new(rect.right(), rect.y, rect.right(), rect.bottom()),
    ];
    for edge in &edges {
        if let Some(point) = segment_ray(edge, ray) {
            return Some(point);
        }
    }
    None
}

pub fn point_in_rect(point: Vec2, rect: &Rect) -> bool {
    rect.contains(point.x, point.y)
}

pub fn circle_contains_point(circle: &Circle, point: Vec2) -> bool {
    circle.radius * circle.radius
        >= distance_squared(circle.center.x, circle.center.y, point.x, point.y)
}

/// Boundary-inclusive circle overlap quick test.
pub fn circle_circle_overlaps(circle1: &Circle, circle2: &Circle) -> bool {
    let total = circle1.radius + circle2.radius;
    total * total
        >= distance_squared(
            circle1.center.x,
            circle1.center.y,
            circle2.center.x,
            circle2.center.y,
        )
}

/// Circle vs rectangle quick test: the rectangle inflated by the radius must
/// contain the center. Conservative at the corners.
pub fn circle_rect(circle: &Circle, rect: &Rect) -> bool {
    let inflated = Rect::new(
        rect.x - circle.radius,
        rect.y - circle.radius,
        rect.width + circle.radius * 2.0,
        rect.height + circle.radius * 2.0,
    );
    inflated.contains(circle.center.x, circle.center.y)
}

/// Overlapping region of two rectangles, if they overlap with positive area.
pub fn rect_rect(rect1: &Rect, rect2: &Rect) -> Option<Rect> {
    let left = rect1.x.max(rect2.x);
    let right = rect1.right().min(rect2.right());
    let top = rect1.y.max(rect2.y);
    let bottom = rect1.bottom().min(rect2.bottom());
    if right > left && bottom > top {
        Some(Rect::new(left, top, right - left, bottom - top))
    } else {
        None
    }
}
