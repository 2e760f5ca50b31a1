//! Bounded multiset of example values.
//!
//! Each distinct value carries its own occurrence count. Once `cap` distinct
//! values are held, a newly seen value evicts a pseudo-randomly chosen slot,
//! so the sample keeps moving without growing. The eviction is not a uniform
//! reservoir sample; it only guarantees the size bound.

use std::collections::HashMap;

use rand::Rng;

/// What happened to a value passed to [`ExampleSample::observe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Value already present; its count was incremented.
    Counted,
    /// Value added to a free slot.
    Added,
    /// Value replaced the evicted example.
    Replaced { evicted: String },
    /// Sampling is disabled (`cap == 0`) or the value was blank.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleSample {
    cap: usize,
    protected: usize,
    slots: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl ExampleSample {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            protected: 0,
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Keeps the first `protected` slots out of eviction. The last slot is
    /// always evictable so a full sample can still turn over.
    #[must_use]
    pub fn with_protected(mut self, protected: usize) -> Self {
        self.protected = protected;
        self
    }

    /// Records one occurrence of `value`.
    pub fn observe<R: Rng + ?Sized>(&mut self, value: &str, rng: &mut R) -> Observation {
        if self.cap == 0 || value.is_empty() {
            return Observation::Ignored;
        }
        if let Some(&slot) = self.index.get(value) {
            self.slots[slot].1 += 1;
            return Observation::Counted;
        }
        if self.slots.len() < self.cap {
            self.index.insert(value.to_string(), self.slots.len());
            self.slots.push((value.to_string(), 1));
            return Observation::Added;
        }
        let low = self.protected.min(self.slots.len() - 1);
        let slot = rng.gen_range(low..self.slots.len());
        let (evicted, _) = std::mem::replace(&mut self.slots[slot], (value.to_string(), 1));
        self.index.remove(&evicted);
        self.index.insert(value.to_string(), slot);
        Observation::Replaced { evicted }
    }

    /// Number of distinct values held.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn count_of(&self, value: &str) -> Option<u64> {
        self.index.get(value).map(|&slot| self.slots[slot].1)
    }

    /// Values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.slots.iter().map(|(value, count)| (value.as_str(), *count))
    }

    /// Values ordered by descending count, ties broken by value.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// Sum of per-value counts, skipping `excluded`.
    pub fn total_excluding(&self, excluded: &str) -> u64 {
        self.slots
            .iter()
            .filter(|(value, _)| value != excluded)
            .map(|(_, count)| count)
            .sum()
    }
}
