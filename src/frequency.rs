//! Frequency analysis for symbol streams.
//!
//! Tallies how often each distinct symbol occurs. The table iterates in
//! ascending symbol order, so everything built from it (Huffman leaves, code
//! tables) is deterministic regardless of input order.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A mapping from symbol to occurrence count.
///
/// Per-symbol counts are `u64`. The total is kept as `u128`, which holds the
/// sum of any number of `u64` counts without overflowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S> {
    counts: BTreeMap<S, u64>,
    total: u128,
}

impl<S: Ord> FrequencyTable<S> {
    /// Create an empty frequency table.
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    ///
    /// Repeated symbols have their counts added up. Zero counts are kept: the
    /// symbol still gets a code.
    ///
    /// # Errors
    /// Returns `Error::CountOverflow` if a symbol's summed count exceeds
    /// `u64::MAX`.
    pub fn from_counts<I: IntoIterator<Item = (S, u64)>>(counts: I) -> Result<Self> {
        let mut table = Self::new();
        for (symbol, count) in counts {
            table.add(symbol, count)?;
        }
        Ok(table)
    }

    /// Tally every symbol in `symbols` into this table.
    ///
    /// One-at-a-time tallies saturate at `u64::MAX` per symbol.
    pub fn count<I: IntoIterator<Item = S>>(&mut self, symbols: I) {
        for symbol in symbols {
            let slot = self.counts.entry(symbol).or_insert(0);
            if *slot < u64::MAX {
                *slot += 1;
                self.total += 1;
            }
        }
    }

    /// Add `count` occurrences of `symbol`.
    ///
    /// # Errors
    /// Returns `Error::CountOverflow` if the symbol's count would exceed
    /// `u64::MAX`; the table is left unchanged.
    pub fn add(&mut self, symbol: S, count: u64) -> Result<()> {
        let slot = self.counts.entry(symbol).or_insert(0);
        *slot = slot.checked_add(count).ok_or(Error::CountOverflow)?;
        self.total += u128::from(count);
        Ok(())
    }

    /// Combine two tables by summing counts.
    ///
    /// The combine is associative and commutative, so tables counted over
    /// disjoint chunks merge into the same result as one sequential pass.
    ///
    /// # Errors
    /// Returns `Error::CountOverflow` if a merged count exceeds `u64::MAX`.
    pub fn merge(mut self, other: Self) -> Result<Self> {
        for (symbol, count) in other.counts {
            self.add(symbol, count)?;
        }
        Ok(self)
    }

    /// Count for `symbol`, 0 if it never occurred.
    pub fn get(&self, symbol: &S) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no symbol has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u128 {
        self.total
    }

    /// Iterate over `(symbol, count)` in ascending symbol order.
    pub fn iter(&self) -> btree_map::Iter<'_, S, u64> {
        self.counts.iter()
    }

    /// Shannon entropy of the distribution, in bits per symbol.
    ///
    /// Returns 0.0 for an empty table.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.counts
            .values()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let prob = c as f64 / total;
                -prob * prob.log2()
            })
            .sum()
    }
}

#[cfg(feature = "parallel")]
impl<S: Ord + Clone + Send + Sync> FrequencyTable<S> {
    /// Count `data` in parallel, `chunk_len` symbols per task.
    ///
    /// Produces exactly the table a sequential [`FrequencyTable::count`] would.
    ///
    /// # Errors
    /// Returns `Error::CountOverflow` if a combined count exceeds `u64::MAX`.
    ///
    /// # Panics
    /// Panics if `chunk_len` is 0.
    pub fn par_count(data: &[S], chunk_len: usize) -> Result<Self> {
        use rayon::prelude::*;

        data.par_chunks(chunk_len)
            .map(|chunk| Ok(chunk.iter().cloned().collect::<Self>()))
            .try_reduce(Self::new, Self::merge)
    }
}

impl<S: Ord> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Ord> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        table.count(iter);
        table
    }
}

impl<S: Ord> Extend<S> for FrequencyTable<S> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.count(iter);
    }
}

impl<'a, S> IntoIterator for &'a FrequencyTable<S> {
    type Item = (&'a S, &'a u64);
    type IntoIter = btree_map::Iter<'a, S, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
