//! Pooled "dirty" array storage.
//!
//! The segment and index stacks keep their backing storage allocation-free
//! across frames by borrowing it from an [`ArrayCache`]: fixed-length arrays
//! are acquired at construction, widened (copy-grown) on overflow, and
//! returned on disposal *without being cleared*. Only the owning stack's
//! logical-length tracking defines which values are meaningful; recycled
//! arrays arrive full of stale garbage.
//!
//! A cache handle is cheaply clonable; clones share one free list. The
//! handle is single-threaded (`Rc`), matching the one-context-per-thread
//! ownership model. Moving a handle across threads is a compile error.

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(feature = "stats")]
use crate::stats::Histogram;

/// Widened arrays kept per cache before excess ones are dropped.
const MAX_CACHED_ARRAYS: usize = 8;

// ============================================================================
// ArrayCache
// ============================================================================

/// A free-list cache of dirty arrays of one element type.
///
/// Three independent instantiations back the stacks: `ArrayCache<f64>` for
/// coordinates, `ArrayCache<u8>` for segment tags, `ArrayCache<u32>` for
/// point indices.
pub struct ArrayCache<T> {
    inner: Rc<RefCell<CacheInner<T>>>,
}

struct CacheInner<T> {
    initial_size: usize,
    free: Vec<Vec<T>>,
    #[cfg(feature = "stats")]
    growth: Histogram,
}

impl<T: Copy + Default> ArrayCache<T> {
    /// A new cache whose [`acquire`](Self::acquire) hands out arrays of
    /// `initial_size` elements.
    pub fn new(initial_size: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CacheInner {
                initial_size,
                free: Vec::new(),
                #[cfg(feature = "stats")]
                growth: Histogram::new("array_cache.growth"),
            })),
        }
    }

    /// The array length handed out by [`acquire`](Self::acquire).
    pub fn initial_size(&self) -> usize {
        self.inner.borrow().initial_size
    }

    /// Obtain an initial-size working array, recycled dirty from the free
    /// list when one of exactly that length is available.
    pub fn acquire(&self) -> Vec<T> {
        self.inner.borrow_mut().take_initial()
    }

    /// Exchange `array` for one of at least `needed` elements, with
    /// `array[..used]` copied into the replacement. The old array returns to
    /// the free list dirty. Growth is by powers of two from the current
    /// length, so repeated widening is amortized.
    pub fn widen(&self, array: Vec<T>, used: usize, needed: usize) -> Vec<T> {
        let new_size = grow_size(array.len(), needed);
        let mut inner = self.inner.borrow_mut();
        let mut wide = inner.take_at_least(new_size);
        wide[..used].copy_from_slice(&array[..used]);
        log::trace!(
            "widening array: {} -> {} elements ({} in use)",
            array.len(),
            wide.len(),
            used
        );
        #[cfg(feature = "stats")]
        inner.growth.add(new_size);
        inner.put(array);
        wide
    }

    /// Return `array` to the free list and hand back an initial-size working
    /// array. An array that never grew past the initial size is kept as the
    /// working array unchanged; either way the contents stay dirty.
    pub fn release(&self, array: Vec<T>) -> Vec<T> {
        let mut inner = self.inner.borrow_mut();
        if array.len() <= inner.initial_size {
            return array;
        }
        inner.put(array);
        inner.take_initial()
    }

    /// Snapshot of the growth histogram.
    #[cfg(feature = "stats")]
    pub fn growth_stats(&self) -> Histogram {
        self.inner.borrow().growth.clone()
    }
}

impl<T> Clone for ArrayCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Copy + Default> CacheInner<T> {
    /// Pop a cached array of at least `size` elements, or allocate one.
    /// Cached arrays come back dirty; fresh ones happen to be zeroed, which
    /// callers must not rely on.
    fn take_at_least(&mut self, size: usize) -> Vec<T> {
        for i in 0..self.free.len() {
            if self.free[i].len() >= size {
                return self.free.swap_remove(i);
            }
        }
        vec![T::default(); size]
    }

    /// Pop a cached array of exactly the initial length, or allocate one.
    /// Larger cached arrays are left for [`Self::take_at_least`] so that
    /// widened storage keeps circulating at its grown size.
    fn take_initial(&mut self) -> Vec<T> {
        let initial = self.initial_size;
        for i in 0..self.free.len() {
            if self.free[i].len() == initial {
                return self.free.swap_remove(i);
            }
        }
        vec![T::default(); initial]
    }

    fn put(&mut self, array: Vec<T>) {
        if self.free.len() < MAX_CACHED_ARRAYS {
            self.free.push(array);
        }
    }
}

/// Smallest power-of-two multiple of `cur` that covers `needed`.
fn grow_size(cur: usize, needed: usize) -> usize {
    let mut size = cur.max(1);
    while size < needed {
        size <<= 1;
    }
    size
}

// ============================================================================
// Tests
// ============================================================================
