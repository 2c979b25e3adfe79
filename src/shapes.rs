use glam::Vec2;

/// Right-hand (clockwise) perpendicular. With clockwise winding in y-down
/// coordinates this points out of the polygon.
pub(crate) fn right_perp(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Centered circle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Convex polygon: a world-space position plus an ordered list of local-space
/// points, with derived edge vectors and outward unit normals.
///
/// Points are expected in clockwise order (y-down convention). Edges and
/// normals are recomputed whenever the points change, so
/// `points.len() == edges.len() == normals.len()` always holds.
#[derive(Clone, Debug)]
pub struct Polygon {
    pub position: Vec2,
    points: Vec<Vec2>,
    edges: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Polygon {
    pub fn new(position: Vec2, points: Vec<Vec2>) -> Self {
        let mut polygon = Self {
            position,
            points: Vec::new(),
            edges: Vec::new(),
            normals: Vec::new(),
        };
        polygon.set_points(points);
        polygon
    }

    /// Replace the point list and recompute edges and normals.
    pub fn set_points(&mut self, points: Vec<Vec2>) {
        self.points = points;
        self.recalc();
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn edges(&self) -> &[Vec2] {
        &self.edges
    }

    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    fn recalc(&mut self) {
        let len = self.points.len();
        self.edges.clear();
        self.normals.clear();
        for i in 0..len {
            let next = if i == len - 1 { 0 } else { i + 1 };
            let edge = self.points[next] - self.points[i];
            self.edges.push(edge);
            self.normals.push(right_perp(edge).normalize_or_zero());
        }
    }
}

/// Axis-aligned rectangle (top-left corner plus extents).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Two endpoints interpreted as an infinite line, a finite segment, or a ray
/// starting at `(x1, y1)`, depending on the query it is passed to.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Line {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn start(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Vec2 {
        Vec2::new(self.x2, self.y2)
    }
}

/// Narrowphase shape kinds. Dispatch happens once over this tagged union, so
/// the pair-test selection is exhaustive and compiler-checked.
#[derive(Clone, Debug)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
}
