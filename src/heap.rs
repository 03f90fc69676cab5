//! d-ary max-heap.
//!
//! A dense, array-backed priority queue whose nodes have up to `D` children.
//! The node at index `i` keeps its children at `[i*D + 1, i*D + 1 + D)`, so the
//! tree is always complete and left-adjusted.
//!
//! # Choosing `D`
//!
//! A larger branching factor makes the tree shallower, which speeds up
//! [`DWayHeap::insert`] (bubble-up only compares against one parent per level).
//! [`DWayHeap::extract_max`] gets slower in exchange: push-down scans all `D`
//! children at every level. Values between 3 and 5 are usually a good
//! compromise.
//!
//! # Example
//!
//! ```rust
//! use dway::heap::DWayHeap;
//!
//! let mut heap = DWayHeap::new(3).unwrap();
//! heap.insert("low", 1.0);
//! heap.insert("high", 10.0);
//! heap.insert("mid", 5.0);
//!
//! assert_eq!(heap.peek(), Ok(&"high"));
//! assert_eq!(heap.extract_max(), Ok("high"));
//! assert_eq!(heap.extract_max(), Ok("mid"));
//! assert_eq!(heap.len(), 1);
//! ```

use std::cmp::Ordering;

use crate::error::{Error, Result};

/// Smallest accepted branching factor.
pub const MIN_BRANCHING_FACTOR: usize = 2;

/// A heap priority.
///
/// Priorities must be totally ordered. Floating point types use the IEEE 754
/// `totalOrder` predicate: a positive `NaN` sorts above every other value and
/// a negative `NaN` below, instead of breaking the heap.
pub trait Priority: Copy {
    /// Total ordering between two priorities.
    fn cmp_priority(&self, other: &Self) -> Ordering;
}

impl Priority for f64 {
    fn cmp_priority(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Priority for f32 {
    fn cmp_priority(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

macro_rules! impl_priority_for_ord {
    ($($t:ty),*) => {
        $(
            impl Priority for $t {
                fn cmp_priority(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

impl_priority_for_ord!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

#[inline]
pub(crate) fn higher<P: Priority>(a: &P, b: &P) -> bool {
    a.cmp_priority(b) == Ordering::Greater
}

pub(crate) fn check_branching_factor(branching_factor: usize) -> Result<()> {
    if branching_factor < MIN_BRANCHING_FACTOR {
        return Err(Error::InvalidConfig(branching_factor));
    }
    Ok(())
}

// Array-heap primitives shared by `DWayHeap` and `IndexedDWayHeap`.
//
// `moved(pairs, i)` is called for every slot whose pair changed, so an
// index-tracking heap can keep its position map in sync.

/// Index of the first leaf; every index below it is an internal node.
#[inline]
pub(crate) fn first_leaf_index(len: usize, d: usize) -> usize {
    match len {
        0 | 1 => 0,
        n => (n - 2) / d + 1,
    }
}

/// Highest-priority child of `index`, or `None` for a leaf.
///
/// Ties go to the leftmost child: a later child only wins if it is
/// strictly higher.
fn highest_priority_child_index<P: Priority, T>(pairs: &[(P, T)], d: usize, index: usize) -> Option<usize> {
    let first = index * d + 1;
    if first >= pairs.len() {
        return None;
    }
    let last = (first + d).min(pairs.len());

    let mut best = first;
    for child in first + 1..last {
        if higher(&pairs[child].0, &pairs[best].0) {
            best = child;
        }
    }
    Some(best)
}

pub(crate) fn bubble_up<P, T, F>(pairs: &mut [(P, T)], d: usize, mut index: usize, mut moved: F)
where
    P: Priority,
    F: FnMut(&[(P, T)], usize),
{
    while index > 0 {
        let parent = (index - 1) / d;
        if higher(&pairs[index].0, &pairs[parent].0) {
            pairs.swap(index, parent);
            moved(&*pairs, index);
            moved(&*pairs, parent);
            index = parent;
        } else {
            break;
        }
    }
}

pub(crate) fn push_down<P, T, F>(pairs: &mut [(P, T)], d: usize, mut index: usize, mut moved: F)
where
    P: Priority,
    F: FnMut(&[(P, T)], usize),
{
    while let Some(child) = highest_priority_child_index(pairs, d, index) {
        if higher(&pairs[child].0, &pairs[index].0) {
            pairs.swap(index, child);
            moved(&*pairs, index);
            moved(&*pairs, child);
            index = child;
        } else {
            break;
        }
    }
}

/// Full scan of the order invariant: no node has a higher-priority child.
pub(crate) fn is_heap<P: Priority, T>(pairs: &[(P, T)], d: usize) -> bool {
    (0..first_leaf_index(pairs.len(), d)).all(|index| {
        let first = index * d + 1;
        let last = (first + d).min(pairs.len());
        pairs[first..last]
            .iter()
            .all(|(child, _)| !higher(child, &pairs[index].0))
    })
}

fn untracked<P, T>(_: &[(P, T)], _: usize) {}

/// A max-priority queue backed by a d-ary heap.
///
/// Stores `(priority, element)` pairs and always surfaces the element with
/// the highest priority. When several children share the highest priority
/// during push-down, the leftmost one is promoted.
///
/// Elements are not looked up by value; see
/// [`IndexedDWayHeap`](crate::indexed::IndexedDWayHeap) for `contains`,
/// `remove` and `update_priority`.
#[derive(Debug, Clone)]
pub struct DWayHeap<T, P = f64> {
    pairs: Vec<(P, T)>,
    d: usize,
}

impl<T, P: Priority> DWayHeap<T, P> {
    /// Create an empty heap with the given branching factor.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if `branching_factor < 2`.
    pub fn new(branching_factor: usize) -> Result<Self> {
        Self::with_capacity(branching_factor, 0)
    }

    /// Create an empty heap with room for `capacity` pairs.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if `branching_factor < 2`.
    pub fn with_capacity(branching_factor: usize, capacity: usize) -> Result<Self> {
        check_branching_factor(branching_factor)?;
        Ok(Self {
            pairs: Vec::with_capacity(capacity),
            d: branching_factor,
        })
    }

    /// Build a heap from matching element and priority sequences in O(n).
    ///
    /// `elements[i]` is paired with `priorities[i]`. All pairs are stored as
    /// given, then every internal node is pushed down, starting from the last
    /// one and ending at the root.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if `branching_factor < 2`, or
    /// `Error::InvalidInput` if the two sequences differ in length.
    pub fn build(elements: Vec<T>, priorities: Vec<P>, branching_factor: usize) -> Result<Self> {
        check_branching_factor(branching_factor)?;
        if elements.len() != priorities.len() {
            return Err(Error::InvalidInput {
                elements: elements.len(),
                priorities: priorities.len(),
            });
        }

        let mut pairs: Vec<(P, T)> = priorities.into_iter().zip(elements).collect();
        for index in (0..first_leaf_index(pairs.len(), branching_factor)).rev() {
            push_down(&mut pairs, branching_factor, index, untracked);
        }
        Ok(Self {
            pairs,
            d: branching_factor,
        })
    }

    /// Branching factor of this heap.
    pub fn branching_factor(&self) -> usize {
        self.d
    }

    /// Number of elements in the heap.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Add an element with the given priority. O(log_D n).
    pub fn insert(&mut self, element: T, priority: P) {
        self.pairs.push((priority, element));
        let last = self.pairs.len() - 1;
        bubble_up(&mut self.pairs, self.d, last, untracked);
    }

    /// Highest-priority element, without removing it.
    ///
    /// # Errors
    /// Returns `Error::EmptyQueue` if the heap is empty.
    pub fn peek(&self) -> Result<&T> {
        self.peek_with_priority().map(|(_, element)| element)
    }

    /// Highest-priority element together with its priority.
    ///
    /// # Errors
    /// Returns `Error::EmptyQueue` if the heap is empty.
    pub fn peek_with_priority(&self) -> Result<(&P, &T)> {
        self.pairs
            .first()
            .map(|(priority, element)| (priority, element))
            .ok_or(Error::EmptyQueue)
    }

    /// Remove and return the highest-priority element. O(D log_D n).
    ///
    /// # Errors
    /// Returns `Error::EmptyQueue` if the heap is empty; the heap is left
    /// untouched.
    pub fn extract_max(&mut self) -> Result<T> {
        self.extract_max_with_priority().map(|(_, element)| element)
    }

    /// Remove and return the highest-priority element with its priority.
    ///
    /// # Errors
    /// Returns `Error::EmptyQueue` if the heap is empty.
    pub fn extract_max_with_priority(&mut self) -> Result<(P, T)> {
        let last = self.pairs.pop().ok_or(Error::EmptyQueue)?;
        if self.pairs.is_empty() {
            return Ok(last);
        }

        let top = std::mem::replace(&mut self.pairs[0], last);
        push_down(&mut self.pairs, self.d, 0, untracked);
        Ok(top)
    }

    /// Remove every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Iterate over the resident `(priority, element)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, &T)> {
        self.pairs.iter().map(|(priority, element)| (priority, element))
    }

    /// Consume the heap, returning its pairs in storage order.
    pub fn into_vec(self) -> Vec<(P, T)> {
        self.pairs
    }

    /// Check the order invariant: no node has a child with a higher priority.
    ///
    /// This is a full linear scan, meant for tests and fuzzing.
    pub fn is_valid(&self) -> bool {
        is_heap(&self.pairs, self.d)
    }
}


impl<T, P: Priority> Default for DWayHeap<T, P> {
    fn default() -> Self {
        Self {
            pairs: Vec::new(),
            d: MIN_BRANCHING_FACTOR,
        }
    }
}

impl<T, P: Priority> Extend<(T, P)> for DWayHeap<T, P> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (element, priority) in iter {
            self.insert(element, priority);
        }
    }
}
