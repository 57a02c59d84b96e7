//! Canonical category ordering
//!
//! Grouping by season or month is unordered. Presentation order is a
//! separate final step driven by a fixed enumeration, never by the grouping.

use crate::record::{Month, Season};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// A category with a fixed, externally defined presentation order
pub trait Canonical: Copy + Ord + Hash {
    /// Every category, in canonical order
    fn canonical_order() -> Vec<Self>;
}

impl Canonical for Season {
    fn canonical_order() -> Vec<Self> {
        Season::all().to_vec()
    }
}

impl Canonical for Month {
    fn canonical_order() -> Vec<Self> {
        Month::all().to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal<K> {
    pub category: K,
    pub total: u64,
}

/// Unordered per-category sums
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotals<K: Canonical> {
    totals: HashMap<K, u64>,
}

impl<K: Canonical> CategoryTotals<K> {
    pub fn new() -> Self {
        Self {
            totals: HashMap::new(),
        }
    }

    pub fn add(&mut self, category: K, count: u64) {
        *self.totals.entry(category).or_insert(0) += count;
    }

    /// Sum for `category`, 0 when no row matched it
    pub fn get(&self, category: K) -> u64 {
        self.totals.get(&category).copied().unwrap_or(0)
    }

    /// Number of categories present
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Present categories only, in canonical order
    pub fn ordered(&self) -> Vec<CategoryTotal<K>> {
        let mut out: Vec<CategoryTotal<K>> = self
            .totals
            .iter()
            .map(|(&category, &total)| CategoryTotal { category, total })
            .collect();
        out.sort_by_key(|c| c.category);
        out
    }

    /// The complete canonical set, absent categories reported as 0
    pub fn zero_filled(&self) -> Vec<CategoryTotal<K>> {
        K::canonical_order()
            .into_iter()
            .map(|category| CategoryTotal {
                category,
                total: self.get(category),
            })
            .collect()
    }

    /// `zero_filled` or `ordered` depending on the dashboard setting
    pub fn arrange(&self, zero_fill: bool) -> Vec<CategoryTotal<K>> {
        if zero_fill {
            self.zero_filled()
        } else {
            self.ordered()
        }
    }
}

impl<K: Canonical> Default for CategoryTotals<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Canonical> FromIterator<(K, u64)> for CategoryTotals<K> {
    fn from_iter<T: IntoIterator<Item = (K, u64)>>(iter: T) -> Self {
        let mut totals = Self::new();
        for (category, count) in iter {
            totals.add(category, count);
        }
        totals
    }
}
