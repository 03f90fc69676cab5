//! # d-ary Heaps and Huffman Codes
//!
//! *A priority queue with tunable fan-out, and the prefix code it was built for.*
//!
//! ## Intuition First
//!
//! Imagine a tournament bracket where every match has `D` players instead of two.
//! The winner of each match moves up, and the champion sits at the top. Adding a
//! new player means challenging one opponent per round on the way up; replacing
//! the champion means the newcomer has to beat everyone it meets on the way down.
//! Wider brackets have fewer rounds, but every round on the way down gets longer.
//!
//! Huffman coding runs such a tournament in reverse: the two *least* frequent
//! symbol groups are always merged first, so rare symbols end up deep in the tree
//! (long codes) and common ones stay near the root (short codes).
//!
//! ## The Problem
//!
//! - **Priority queues**: binary heaps are the default, but insert-heavy
//!   workloads benefit from a shallower tree. A configurable branching factor
//!   lets the caller pick the trade-off.
//! - **Prefix codes**: given symbol frequencies, find a binary prefix-free code
//!   with the smallest expected length.
//!
//! ## Historical Context
//!
//! ```text
//! 1952  Huffman     Minimum-redundancy codes via greedy merging
//! 1964  Williams    Binary heaps (heapsort)
//! 1964  Floyd       O(n) bottom-up heap construction
//! 1975  Johnson     d-ary heaps for priority queues in graph algorithms
//! ```
//!
//! ## Mathematical Formulation
//!
//! For a node at index $i$ in a d-ary heap:
//!
//! ```text
//! children(i) = [i*D + 1, i*D + D]
//! parent(i)   = (i - 1) / D
//! ```
//!
//! Huffman's construction minimizes the expected code length
//! $\sum_s p_s \ell_s$ subject to the Kraft equality $\sum_s 2^{-\ell_s} = 1$.
//!
//! ## Complexity Analysis
//!
//! - **Heap insert**: $O(\log_D n)$ comparisons.
//! - **Heap extract**: $O(D \log_D n)$ comparisons.
//! - **Heapify**: $O(n)$.
//! - **Huffman tree**: $O(n \log n)$ for $n$ distinct symbols.
//!
//! ## Failure Modes
//!
//! 1. **Large D**: extraction scans every child per level; past `D = 5` or so
//!    extraction-heavy workloads slow down.
//! 2. **Skewed frequencies**: code lengths can reach $n - 1$ bits for
//!    Fibonacci-like distributions.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **[`DWayHeap`]**: a max-priority queue with leftmost tie-breaking.
//! - **[`IndexedDWayHeap`]**: the same heap plus an element index, for
//!   `contains`, `remove` and `update_priority` on any element.
//! - **[`FrequencyTable`]**: symbol counts over a stream.
//! - **[`HuffmanBuilder`]**: tree construction and code table extraction.
//!
//! The crate emits `tracing` events at `debug` and `trace` level; it never
//! installs a subscriber.
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Johnson, D. B. (1975). "Priority queues with update and finding minimum spanning trees."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod frequency;
pub mod heap;
pub mod huffman;
pub mod indexed;

pub use error::Error;
pub use frequency::FrequencyTable;
pub use heap::{DWayHeap, Priority};
pub use huffman::{create_encoding, CodeTable, HuffmanBuilder, HuffmanNode};
pub use indexed::IndexedDWayHeap;
