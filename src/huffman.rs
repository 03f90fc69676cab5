//! Huffman minimum-redundancy prefix codes.
//!
//! Builds a binary encoding tree by repeatedly merging the two least frequent
//! symbol groups, then labels every root-to-leaf path with `0` (left) and `1`
//! (right).
//!
//! # Historical Context
//!
//! David Huffman (1952) developed this algorithm as a term paper at MIT.
//! It was the first practical algorithm for constructing optimal prefix codes.
//!
//! # Priority queue
//!
//! Pending nodes live in a [`DWayHeap`] keyed by their *negated* weight, so the
//! max-heap hands back the lightest node first. The heap's branching factor
//! only affects speed: the merge tree is always binary and the code lengths
//! are the same for every `D`.
//!
//! # Example
//!
//! ```rust
//! use dway::huffman::create_encoding;
//!
//! let codes = create_encoding("abracadabra".chars(), 2).unwrap();
//! assert_eq!(codes.get(&'a').map(str::len), Some(1));
//! assert!(codes.is_prefix_free());
//! ```

use std::collections::btree_map;
use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::heap::{DWayHeap, MIN_BRANCHING_FACTOR};

/// Huffman tree node.
///
/// A leaf covers exactly one symbol. An internal node owns both children and
/// covers the concatenation of their symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanNode<S> {
    symbols: Vec<S>,
    // Sum of u64 leaf counts, so u128 cannot overflow.
    weight: u128,
    children: Option<Box<(HuffmanNode<S>, HuffmanNode<S>)>>,
}

impl<S> HuffmanNode<S> {
    /// A leaf for a single symbol.
    pub fn leaf(symbol: S, weight: u64) -> Self {
        Self {
            symbols: vec![symbol],
            weight: u128::from(weight),
            children: None,
        }
    }

    /// Merge two subtrees under a new internal node.
    pub fn merge(left: Self, right: Self) -> Self
    where
        S: Clone,
    {
        let mut symbols = Vec::with_capacity(left.symbols.len() + right.symbols.len());
        symbols.extend_from_slice(&left.symbols);
        symbols.extend_from_slice(&right.symbols);
        Self {
            symbols,
            weight: left.weight + right.weight,
            children: Some(Box::new((left, right))),
        }
    }

    /// Symbols covered by this subtree, left to right.
    pub fn symbols(&self) -> &[S] {
        &self.symbols
    }

    /// Sum of the counts of the covered symbols.
    pub fn weight(&self) -> u128 {
        self.weight
    }

    /// Left child, `None` for a leaf.
    pub fn left(&self) -> Option<&Self> {
        self.children.as_deref().map(|(left, _)| left)
    }

    /// Right child, `None` for a leaf.
    pub fn right(&self) -> Option<&Self> {
        self.children.as_deref().map(|(_, right)| right)
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Number of leaves, one per covered symbol.
    pub fn leaf_count(&self) -> usize {
        match self.children.as_deref() {
            None => 1,
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self.children.as_deref() {
            None => 0,
            Some((left, right)) => 1 + left.depth().max(right.depth()),
        }
    }

    /// Check the merge invariants over the whole subtree.
    ///
    /// Every internal node must weigh the sum of its children and cover their
    /// symbols concatenated left then right; every leaf covers one symbol.
    pub fn is_valid(&self) -> bool
    where
        S: PartialEq,
    {
        match self.children.as_deref() {
            None => self.symbols.len() == 1,
            Some((left, right)) => {
                let (head, tail) = self.symbols.split_at(left.symbols.len().min(self.symbols.len()));
                self.weight == left.weight + right.weight
                    && head == left.symbols.as_slice()
                    && tail == right.symbols.as_slice()
                    && left.is_valid()
                    && right.is_valid()
            }
        }
    }

    /// Derive the code table: `0` for every left branch, `1` for every right.
    ///
    /// A tree made of a single leaf maps its symbol to the empty string.
    pub fn code_table(&self) -> CodeTable<S>
    where
        S: Ord + Clone,
    {
        let mut codes = BTreeMap::new();
        Self::build_codes(self, String::new(), &mut codes);
        CodeTable { codes }
    }

    fn build_codes(node: &Self, prefix: String, codes: &mut BTreeMap<S, String>)
    where
        S: Ord + Clone,
    {
        match node.children.as_deref() {
            None => {
                if let [symbol] = node.symbols.as_slice() {
                    let previous = codes.insert(symbol.clone(), prefix);
                    debug_assert!(previous.is_none(), "symbol reached by two paths");
                }
            }
            Some((left, right)) => {
                let mut left_prefix = prefix.clone();
                left_prefix.push('0');
                Self::build_codes(left, left_prefix, codes);

                let mut right_prefix = prefix;
                right_prefix.push('1');
                Self::build_codes(right, right_prefix, codes);
            }
        }
    }
}

/// Huffman tree builder.
///
/// The only knob is the branching factor of the heap that orders pending
/// nodes; it defaults to 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanBuilder {
    branching_factor: usize,
}

impl HuffmanBuilder {
    /// Create a builder with a binary heap.
    pub fn new() -> Self {
        Self {
            branching_factor: MIN_BRANCHING_FACTOR,
        }
    }

    /// Use a heap with `branching_factor` children per node.
    ///
    /// Validated when a tree is built.
    pub fn with_branching_factor(mut self, branching_factor: usize) -> Self {
        self.branching_factor = branching_factor;
        self
    }

    /// Configured heap branching factor.
    pub fn branching_factor(&self) -> usize {
        self.branching_factor
    }

    /// Build the encoding tree for `frequencies`.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` for an empty table, or
    /// `Error::InvalidConfig` if the branching factor is below 2.
    pub fn build_tree<S: Ord + Clone>(&self, frequencies: &FrequencyTable<S>) -> Result<HuffmanNode<S>> {
        if frequencies.is_empty() {
            return Err(Error::EmptyInput);
        }
        debug!(
            symbols = frequencies.len(),
            branching_factor = self.branching_factor,
            "building huffman tree"
        );

        let (leaves, priorities): (Vec<_>, Vec<_>) = frequencies
            .iter()
            .map(|(symbol, &count)| (HuffmanNode::leaf(symbol.clone(), count), negated(count.into())))
            .unzip();
        let mut queue = DWayHeap::build(leaves, priorities, self.branching_factor)?;

        while queue.len() > 1 {
            let right = queue.extract_max()?;
            let left = queue.extract_max()?;
            trace!(left = left.weight, right = right.weight, "merging nodes");

            let node = HuffmanNode::merge(left, right);
            let priority = negated(node.weight);
            queue.insert(node, priority);
        }

        let root = queue.extract_max()?;
        debug!(weight = root.weight, depth = root.depth(), "huffman tree built");
        Ok(root)
    }

    /// Build the tree for `frequencies` and extract its code table.
    ///
    /// # Errors
    /// Same as [`HuffmanBuilder::build_tree`].
    pub fn build_codes<S: Ord + Clone>(&self, frequencies: &FrequencyTable<S>) -> Result<CodeTable<S>> {
        Ok(self.build_tree(frequencies)?.code_table())
    }
}

impl Default for HuffmanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Heap key for a node: lighter nodes get higher priority.
///
/// Integer keys keep distinct weights distinct at any magnitude.
#[inline]
fn negated(weight: u128) -> i128 {
    i128::try_from(weight).map_or(i128::MIN, |w| -w)
}

/// A mapping from symbol to its code, as a string of `'0'` and `'1'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S> {
    codes: BTreeMap<S, String>,
}

impl<S: Ord> CodeTable<S> {
    /// Code for `symbol`, if it is in the table.
    pub fn get(&self, symbol: &S) -> Option<&str> {
        self.codes.get(symbol).map(String::as_str)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if the table holds no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> btree_map::Iter<'_, S, String> {
        self.codes.iter()
    }

    /// Consume the table, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<S, String> {
        self.codes
    }

    /// Returns true if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // In lexicographic order, a code that prefixes others sorts directly
        // before one of them.
        let mut codes: Vec<&str> = self.codes.values().map(String::as_str).collect();
        codes.sort_unstable();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Kraft sum `Σ 2^-len(code)`; exactly 1.0 for a tree with two or more leaves.
    pub fn kraft_sum(&self) -> f64 {
        self.codes
            .values()
            .map(|code| 0.5f64.powi(code.len() as i32))
            .sum()
    }

    /// Total length in bits of a stream with the given symbol counts.
    ///
    /// Symbols missing from the table contribute nothing.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable<S>) -> u128 {
        frequencies
            .iter()
            .filter_map(|(symbol, &count)| self.get(symbol).map(|code| u128::from(count) * code.len() as u128))
            .sum()
    }
}

impl<'a, S> IntoIterator for &'a CodeTable<S> {
    type Item = (&'a S, &'a String);
    type IntoIter = btree_map::Iter<'a, S, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// Build a Huffman code for a symbol stream.
///
/// Counts the stream, builds the tree with a heap of the given branching
/// factor, and returns one code per distinct symbol.
///
/// # Errors
/// Returns `Error::EmptyInput` for an empty stream, or `Error::InvalidConfig`
/// if `branching_factor < 2`.
pub fn create_encoding<S, I>(symbols: I, branching_factor: usize) -> Result<CodeTable<S>>
where
    S: Ord + Clone,
    I: IntoIterator<Item = S>,
{
    let frequencies: FrequencyTable<S> = symbols.into_iter().collect();
    HuffmanBuilder::new()
        .with_branching_factor(branching_factor)
        .build_codes(&frequencies)
}
