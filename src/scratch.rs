use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use glam::Vec2;

/// One-dimensional min/max range produced by projecting points onto an axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Projection {
    pub min: f32,
    pub max: f32,
}

/// Vectors seeded into a fresh pool.
pub const VECTOR_POOL_SIZE: usize = 10;
/// Projection ranges seeded into a fresh pool.
pub const RANGE_POOL_SIZE: usize = 5;

/// Fixed-capacity pool of scratch vectors and projection ranges used by the
/// narrowphase to avoid per-query allocation.
///
/// The pool is seeded once and never grows: every `take_*` must be paired
/// with a `give_*`, including on early-return paths. Taking from an empty
/// pool panics, since an empty pool means a borrow leaked or the pool is
/// undersized for the workload. Prefer the [`ScratchPool::vector`] /
/// [`ScratchPool::range`] guards, which return their slot on drop.
///
/// Not thread-safe; the collision step is single-threaded.
pub struct ScratchPool {
    vectors: RefCell<Vec<Vec2>>,
    ranges: RefCell<Vec<Projection>>,
}

impl ScratchPool {
    pub fn new() -> Self {
        Self {
            vectors: RefCell::new(vec![Vec2::ZERO; VECTOR_POOL_SIZE]),
            ranges: RefCell::new(vec![Projection::default(); RANGE_POOL_SIZE]),
        }
    }

    /// Check out one scratch vector. Panics if the pool is exhausted.
    pub fn take_vector(&self) -> Vec2 {
        self.vectors
            .borrow_mut()
            .pop()
            .expect("scratch vector pool exhausted: a take was not paired with a give")
    }

    /// Return a previously taken scratch vector.
    pub fn give_vector(&self, v: Vec2) {
        self.vectors.borrow_mut().push(v);
    }

    /// Check out one projection range. Panics if the pool is exhausted.
    pub fn take_range(&self) -> Projection {
        self.ranges
            .borrow_mut()
            .pop()
            .expect("scratch range pool exhausted: a take was not paired with a give")
    }

    /// Return a previously taken projection range.
    pub fn give_range(&self, r: Projection) {
        self.ranges.borrow_mut().push(r);
    }

    /// Check out a scratch vector behind a guard that returns it on drop.
    pub fn vector(&self) -> VectorGuard<'_> {
        VectorGuard {
            pool: self,
            value: self.take_vector(),
        }
    }

    /// Check out a projection range behind a guard that returns it on drop.
    pub fn range(&self) -> RangeGuard<'_> {
        RangeGuard {
            pool: self,
            value: self.take_range(),
        }
    }

    /// Number of vectors currently available (for balance checks in tests).
    pub fn available_vectors(&self) -> usize {
        self.vectors.borrow().len()
    }

    /// Number of ranges currently available (for balance checks in tests).
    pub fn available_ranges(&self) -> usize {
        self.ranges.borrow().len()
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Scope guard for a pooled vector; gives the slot back when dropped.
pub struct VectorGuard<'a> {
    pool: &'a ScratchPool,
    value: Vec2,
}

impl Deref for VectorGuard<'_> {
    type Target = Vec2;

    fn deref(&self) -> &Vec2 {
        &self.value
    }
}

impl DerefMut for VectorGuard<'_> {
    fn deref_mut(&mut self) -> &mut Vec2 {
        &mut self.value
    }
}

impl Drop for VectorGuard<'_> {
    fn drop(&mut self) {
        self.pool.give_vector(self.value);
    }
}

/// Scope guard for a pooled projection range; gives the slot back when dropped.
pub struct RangeGuard<'a> {
    pool: &'a ScratchPool,
    value: Projection,
}

impl Deref for RangeGuard<'_> {
    type Target = Projection;

    fn deref(&self) -> &Projection {
        &self.value
    }
}

impl DerefMut for RangeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Projection {
        &mut self.value
    }
}

impl Drop for RangeGuard<'_> {
    fn drop(&mut self) {
        self.pool.give_range(self.value);
    }
}
