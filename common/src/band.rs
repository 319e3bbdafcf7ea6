//! Categorical band scale.
//!
//! Maps each distinct category to a fixed-width interval of a continuous
//! range.  Categories keep first-seen order; lookups go through an explicit
//! index map, so an unknown category is `None` and never confused with a
//! band that starts at `0.0`.

use std::collections::HashMap;
use std::hash::Hash;

/// Padding used by both heatmap axes, as a fraction of one step.
pub const DEFAULT_PADDING: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct BandScale<K> {
    categories: Vec<K>,
    index: HashMap<K, usize>,
    start: f64,
    step: f64,
    bandwidth: f64,
    reversed: bool,
}

impl<K: Clone + Eq + Hash> BandScale<K> {
    /// Build a scale over `categories` (duplicates collapse onto the first
    /// occurrence) spanning `range = (from, to)`.
    ///
    /// `from > to` is a reversed range: the first category lands at the far
    /// end, as for a y axis growing upwards.
    pub fn new<I>(categories: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();
        for k in categories {
            if !index.contains_key(&k) {
                index.insert(k.clone(), ordered.len());
                ordered.push(k);
            }
        }

        let (from, to) = range;
        let reversed = to < from;
        let (lo, hi) = if reversed { (to, from) } else { (from, to) };
        let n = ordered.len() as f64;
        let span = hi - lo;
        let step = span / (n - padding + 2.0 * padding).max(1.0);
        let start = lo + (span - step * (n - padding)) * 0.5;

        BandScale {
            categories: ordered,
            index,
            start,
            step,
            bandwidth: step * (1.0 - padding),
            reversed,
        }
    }

    /// Index of `key` along the axis, in first-seen order.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Start of the band for `key`, or `None` for an unknown category.
    pub fn position(&self, key: &K) -> Option<f64> {
        let i = self.index_of(key)?;
        let slot = if self.reversed {
            self.categories.len() - 1 - i
        } else {
            i
        };
        Some(self.start + self.step * slot as f64)
    }

    /// Centre of the band for `key`.
    pub fn center(&self, key: &K) -> Option<f64> {
        self.position(key).map(|p| p + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn categories(&self) -> &[K] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
