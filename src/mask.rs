use glam::Vec2;

/// Per-body axis-aligned bounding box that also tracks the signed distance
/// moved since the previous step.
///
/// `update` must run once per step, before any pair test in that step; the
/// stored delta is `current position - previous position` along each axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionMask {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    delta: Vec2,
}

impl CollisionMask {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            delta: Vec2::ZERO,
        }
    }

    /// Refresh the box from the owner's position, recording how far it moved
    /// since the previous update.
    pub fn update(&mut self, position: Vec2) {
        self.delta = position - Vec2::new(self.x, self.y);
        self.x = position.x;
        self.y = position.y;
    }

    pub fn delta_x(&self) -> f32 {
        self.delta.x
    }

    pub fn delta_y(&self) -> f32 {
        self.delta.y
    }

    pub fn delta_x_abs(&self) -> f32 {
        self.delta.x.abs()
    }

    pub fn delta_y_abs(&self) -> f32 {
        self.delta.y.abs()
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    // Swept hull: the current box extended backward over the step delta, so a
    // fast-moving body still registers the cells it passed through.

    pub fn hull_x(&self) -> f32 {
        self.x - self.delta.x.max(0.0)
    }

    pub fn hull_y(&self) -> f32 {
        self.y - self.delta.y.max(0.0)
    }

    pub fn hull_width(&self) -> f32 {
        self.width + self.delta.x.abs()
    }

    pub fn hull_height(&self) -> f32 {
        self.height + self.delta.y.abs()
    }

    /// Current-box overlap test against another mask (strict, edge-touching
    /// boxes do not intersect).
    pub fn intersects(&self, other: &CollisionMask) -> bool {
        self.right() > other.x
            && self.x < other.right()
            && self.bottom() > other.y
            && self.y < other.bottom()
    }

    /// X-swept overlap test against another mask: both boxes extended
    /// backward over their x deltas, each held at its pre-step y. Gates the
    /// x axis of pair separation so a fast relative mover cannot step
    /// clean past its partner.
    pub fn hull_intersects_x(&self, other: &CollisionMask) -> bool {
        let self_last_y = self.y - self.delta.y;
        let other_last_y = other.y - other.delta.y;
        self.hull_x() + self.hull_width() > other.hull_x()
            && self.hull_x() < other.hull_x() + other.hull_width()
            && self_last_y + self.height > other_last_y
            && self_last_y < other_last_y + other.height
    }

    /// Y-swept overlap test against another mask at the current x positions
    /// (x has already been resolved when the y axis runs).
    pub fn hull_intersects_y(&self, other: &CollisionMask) -> bool {
        self.right() > other.x
            && self.x < other.right()
            && self.hull_y() + self.hull_height() > other.hull_y()
            && self.hull_y() < other.hull_y() + other.hull_height()
    }

    /// Swept-hull overlap test against a raw rectangle given by its edges.
    pub fn hull_intersects_raw(&self, left: f32, right: f32, top: f32, bottom: f32) -> bool {
        self.hull_x() + self.hull_width() > left
            && self.hull_x() < right
            && self.hull_y() + self.hull_height() > top
            && self.hull_y() < bottom
    }
}
