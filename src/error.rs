//! Error types for heap and Huffman operations.

use thiserror::Error;

/// Error variants for priority queue and Huffman coding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Branching factor below the minimum of 2.
    #[error("invalid branching factor: {0} (must be at least 2)")]
    InvalidConfig(usize),

    /// Element and priority sequences handed to a bulk build differ in length.
    #[error("length of elements ({elements}) does not match length of priorities ({priorities})")]
    InvalidInput {
        /// Number of elements supplied.
        elements: usize,
        /// Number of priorities supplied.
        priorities: usize,
    },

    /// `peek` or `extract_max` on a queue with no elements.
    #[error("operation on an empty queue")]
    EmptyQueue,

    /// Huffman construction from a frequency table with no symbols.
    #[error("empty frequency table")]
    EmptyInput,

    /// Insert of an element an indexed queue already holds.
    #[error("element already in the queue")]
    DuplicateElement,

    /// `remove` or `update_priority` for an element the queue does not hold.
    #[error("element not in the queue")]
    ElementNotFound,

    /// A symbol's count would exceed `u64::MAX`.
    #[error("symbol count exceeds u64::MAX")]
    CountOverflow,
}

/// A specialized Result type for heap and Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
