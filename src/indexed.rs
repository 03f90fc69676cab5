//! d-ary max-heap with an element index.
//!
//! Same array layout and tie rule as [`DWayHeap`](crate::heap::DWayHeap), plus
//! a map from each element to its slot. The map turns `contains` into an O(1)
//! lookup and lets `remove` and `update_priority` work on any element, not
//! just the top, in O(D log_D n).
//!
//! Elements are keys: a heap never holds two equal elements.
//!
//! # Example
//!
//! ```rust
//! use dway::indexed::IndexedDWayHeap;
//!
//! let mut heap = IndexedDWayHeap::new(4).unwrap();
//! heap.insert("a", 1).unwrap();
//! heap.insert("b", 2).unwrap();
//! heap.insert("c", 3).unwrap();
//!
//! heap.update_priority(&"a", 10).unwrap();
//! heap.remove(&"c").unwrap();
//! assert!(!heap.contains(&"c"));
//! assert_eq!(heap.extract_max(), Ok("a"));
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::heap::{bubble_up, check_branching_factor, first_leaf_index, higher, is_heap, push_down, Priority};

/// Position callback that keeps `positions` pointing at each element's slot.
fn track<P, T: Hash + Eq>(positions: &mut HashMap<T, usize>) -> impl FnMut(&[(P, T)], usize) + '_ {
    move |pairs, index| {
        if let Some(slot) = positions.get_mut(&pairs[index].1) {
            *slot = index;
        }
    }
}

/// A d-ary max-heap that can find, reprioritize and remove elements by value.
#[derive(Debug, Clone)]
pub struct IndexedDWayHeap<T, P = f64> {
    pairs: Vec<(P, T)>,
    positions: HashMap<T, usize>,
    d: usize,
}

impl<T, P> IndexedDWayHeap<T, P>
where
    T: Hash + Eq + Clone,
    P: Priority,
{
    /// Create an empty heap with the given branching factor.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if `branching_factor < 2`.
    pub fn new(branching_factor: usize) -> Result<Self> {
        check_branching_factor(branching_factor)?;
        Ok(Self {
            pairs: Vec::new(),
            positions: HashMap::new(),
            d: branching_factor,
        })
    }

    /// Build a heap from matching element and priority sequences in O(n).
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if `branching_factor < 2`,
    /// `Error::InvalidInput` if the sequences differ in length, or
    /// `Error::DuplicateElement` if an element appears twice.
    pub fn build(elements: Vec<T>, priorities: Vec<P>, branching_factor: usize) -> Result<Self> {
        check_branching_factor(branching_factor)?;
        if elements.len() != priorities.len() {
            return Err(Error::InvalidInput {
                elements: elements.len(),
                priorities: priorities.len(),
            });
        }

        let mut positions = HashMap::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            if positions.insert(element.clone(), index).is_some() {
                return Err(Error::DuplicateElement);
            }
        }

        let mut heap = Self {
            pairs: priorities.into_iter().zip(elements).collect(),
            positions,
            d: branching_factor,
        };
        for index in (0..first_leaf_index(heap.pairs.len(), heap.d)).rev() {
            push_down(&mut heap.pairs, heap.d, index, track::<P, T>(&mut heap.positions));
        }
        Ok(heap)
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

    /// Returns true if `element` is in the heap. O(1).
    pub fn contains(&self, element: &T) -> bool {
        self.positions.contains_key(element)
    }

    /// Current priority of `element`.
    pub fn priority_of(&self, element: &T) -> Option<P> {
        self.positions.get(element).map(|&index| self.pairs[index].0)
    }

    /// Add an element with the given priority.
    ///
    /// # Errors
    /// Returns `Error::DuplicateElement` if an equal element is already
    /// stored; the heap is left untouched.
    pub fn insert(&mut self, element: T, priority: P) -> Result<()> {
        if self.positions.contains_key(&element) {
            return Err(Error::DuplicateElement);
        }
        let index = self.pairs.len();
        self.positions.insert(element.clone(), index);
        self.pairs.push((priority, element));
        bubble_up(&mut self.pairs, self.d, index, track::<P, T>(&mut self.positions));
        Ok(())
    }

    /// Highest-priority element, without removing it.
    ///
    /// # Errors
    /// Returns `Error::EmptyQueue` if the heap is empty.
    pub fn peek(&self) -> Result<&T> {
        self.pairs
            .first()
            .map(|(_, element)| element)
            .ok_or(Error::EmptyQueue)
    }

    /// Remove and return the highest-priority element.
    ///
    /// # Errors
    /// Returns `Error::EmptyQueue` if the heap is empty.
    pub fn extract_max(&mut self) -> Result<T> {
        self.extract_max_with_priority().map(|(_, element)| element)
    }

    /// Remove and return the highest-priority element with its priority.
    ///
    /// # Errors
    /// Returns `Error::EmptyQueue` if the heap is empty.
    pub fn extract_max_with_priority(&mut self) -> Result<(P, T)> {
        if self.pairs.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let top = self.pairs.swap_remove(0);
        self.positions.remove(&top.1);
        if !self.pairs.is_empty() {
            self.relocate(0);
        }
        Ok(top)
    }

    /// Remove `element` wherever it sits, returning its priority.
    ///
    /// The last pair fills the freed slot and then moves up or down,
    /// whichever direction restores the order.
    ///
    /// # Errors
    /// Returns `Error::ElementNotFound` if `element` is not in the heap.
    pub fn remove(&mut self, element: &T) -> Result<P> {
        let index = self.positions.remove(element).ok_or(Error::ElementNotFound)?;
        let (priority, _) = self.pairs.swap_remove(index);
        if index < self.pairs.len() {
            self.relocate(index);
        }
        Ok(priority)
    }

    /// Change the priority of `element`, returning the previous one.
    ///
    /// Works in both directions: a raised priority bubbles up, a lowered one
    /// is pushed down.
    ///
    /// # Errors
    /// Returns `Error::ElementNotFound` if `element` is not in the heap.
    pub fn update_priority(&mut self, element: &T, priority: P) -> Result<P> {
        let index = *self.positions.get(element).ok_or(Error::ElementNotFound)?;
        let previous = std::mem::replace(&mut self.pairs[index].0, priority);
        self.restore(index);
        Ok(previous)
    }

    /// Iterate over the resident `(priority, element)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, &T)> {
        self.pairs.iter().map(|(priority, element)| (priority, element))
    }

    /// Check the order invariant and that every element's recorded slot is
    /// the one it occupies.
    pub fn is_valid(&self) -> bool {
        is_heap(&self.pairs, self.d)
            && self.positions.len() == self.pairs.len()
            && self
                .pairs
                .iter()
                .enumerate()
                .all(|(index, (_, element))| self.positions.get(element) == Some(&index))
    }

    /// A pair was moved into `index` from elsewhere: record its new slot,
    /// then restore the order around it.
    fn relocate(&mut self, index: usize) {
        if let Some(slot) = self.positions.get_mut(&self.pairs[index].1) {
            *slot = index;
        }
        self.restore(index);
    }

    fn restore(&mut self, index: usize) {
        if index > 0 && higher(&self.pairs[index].0, &self.pairs[(index - 1) / self.d].0) {
            bubble_up(&mut self.pairs, self.d, index, track::<P, T>(&mut self.positions));
        } else {
            push_down(&mut self.pairs, self.d, index, track::<P, T>(&mut self.positions));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_config_and_input_errors() {
        assert_eq!(
            IndexedDWayHeap::<u8>::new(1).unwrap_err(),
            Error::InvalidConfig(1)
        );
        assert_eq!(
            IndexedDWayHeap::build(vec!['a', 'b'], vec![1.0], 2).unwrap_err(),
            Error::InvalidInput {
                elements: 2,
                priorities: 1
            }
        );
        assert_eq!(
            IndexedDWayHeap::build(vec!['a', 'b', 'a'], vec![1.0, 2.0, 3.0], 2).unwrap_err(),
            Error::DuplicateElement
        );
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut heap = IndexedDWayHeap::new(3).unwrap();
        heap.insert("x", 1).unwrap();
        assert_eq!(heap.insert("x", 5), Err(Error::DuplicateElement));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.priority_of(&"x"), Some(1));
    }

    #[test]
    fn test_missing_element() {
        let mut heap: IndexedDWayHeap<&str, i32> = IndexedDWayHeap::new(2).unwrap();
        assert!(!heap.contains(&"x"));
        assert_eq!(heap.remove(&"x"), Err(Error::ElementNotFound));
        assert_eq!(heap.update_priority(&"x", 1), Err(Error::ElementNotFound));
        assert_eq!(heap.extract_max(), Err(Error::EmptyQueue));
        assert_eq!(heap.peek(), Err(Error::EmptyQueue));
    }

    #[test]
    fn test_update_priority_both_directions() {
        let mut heap = IndexedDWayHeap::build(
            vec!["a", "b", "c", "d", "e"],
            vec![5, 4, 3, 2, 1],
            2,
        )
        .unwrap();

        assert_eq!(heap.update_priority(&"e", 10), Ok(1));
        assert_eq!(heap.peek(), Ok(&"e"));
        assert!(heap.is_valid());

        assert_eq!(heap.update_priority(&"e", 0), Ok(10));
        assert_eq!(heap.peek(), Ok(&"a"));
        assert!(heap.is_valid());

        let order: Vec<_> = std::iter::from_fn(|| heap.extract_max().ok()).collect();
        assert_eq!(order, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_remove_refills_slot_upwards() {
        // Removing a deep node in the left subtree moves the last leaf (from
        // the right subtree) into its slot; it must then bubble up.
        let mut heap = IndexedDWayHeap::build(
            vec![0, 1, 2, 3, 4, 5, 6],
            vec![100, 10, 90, 9, 8, 80, 70],
            2,
        )
        .unwrap();
        assert!(heap.is_valid());

        assert_eq!(heap.remove(&3), Ok(9));
        assert!(heap.is_valid());
        assert!(!heap.contains(&3));
        assert_eq!(heap.priority_of(&6), Some(70));

        let order: Vec<_> = std::iter::from_fn(|| heap.extract_max_with_priority().ok())
            .map(|(p, _)| p)
            .collect();
        assert_eq!(order, vec![100, 90, 80, 70, 10, 8]);
    }

    #[test]
    fn test_remove_last_and_only() {
        let mut heap = IndexedDWayHeap::new(2).unwrap();
        heap.insert('a', 2.0).unwrap();
        heap.insert('b', 1.0).unwrap();
        assert_eq!(heap.remove(&'b'), Ok(1.0));
        assert_eq!(heap.remove(&'a'), Ok(2.0));
        assert!(heap.is_empty());
        assert!(heap.is_valid());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8, i32),
        Extract,
        Remove(u8),
        Update(u8, i32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..32, -100i32..100).prop_map(|(e, p)| Op::Insert(e, p)),
            Just(Op::Extract),
            (0u8..32).prop_map(Op::Remove),
            (0u8..32, -100i32..100).prop_map(|(e, p)| Op::Update(e, p)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_random_ops_keep_index_in_sync(
            ops in prop::collection::vec(op(), 1..200),
            d in 2usize..7,
        ) {
            let mut heap = IndexedDWayHeap::new(d).unwrap();
            let mut model: HashMap<u8, i32> = HashMap::new();

            for op in ops {
                match op {
                    Op::Insert(e, p) => {
                        let result = heap.insert(e, p);
                        if model.contains_key(&e) {
                            prop_assert_eq!(result, Err(Error::DuplicateElement));
                        } else {
                            prop_assert_eq!(result, Ok(()));
                            model.insert(e, p);
                        }
                    }
                    Op::Extract => match heap.extract_max_with_priority() {
                        Ok((p, e)) => {
                            prop_assert_eq!(Some(&p), model.values().max());
                            prop_assert_eq!(model.remove(&e), Some(p));
                        }
                        Err(err) => {
                            prop_assert_eq!(err, Error::EmptyQueue);
                            prop_assert!(model.is_empty());
                        }
                    },
                    Op::Remove(e) => {
                        prop_assert_eq!(heap.remove(&e).ok(), model.remove(&e));
                    }
                    Op::Update(e, p) => {
                        let previous = model.get_mut(&e).map(|slot| std::mem::replace(slot, p));
                        prop_assert_eq!(heap.update_priority(&e, p).ok(), previous);
                    }
                }
                prop_assert!(heap.is_valid());
                prop_assert_eq!(heap.len(), model.len());
            }
        }
    }
}
