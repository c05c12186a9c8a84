//! Weighted outcome tables.
//!
//! A [`ChanceTable`] stores outcomes next to their relative weights and picks
//! one in proportion to its weight. [`ChanceTable::roll`] leaves the table
//! untouched (sampling with replacement); [`ChanceTable::draw`] removes the
//! exact entry it picked (sampling without replacement), so a deck of cards
//! can be modelled as a table of cards with weight 1 each.
//!
//! Outcomes may repeat, each with its own weight. Removal by value only ever
//! affects the first matching entry in insertion order; `draw` removes by
//! index and is unaffected by duplicates.
//!
//! Weights are expected to be strictly positive. Zero or negative weights are
//! not rejected, but sampling from a table containing them is undefined.

use crate::error::SamplingError;
use crate::random::RandomSource;

/// Outcomes with parallel weights and a running total.
#[derive(Debug, Clone, PartialEq)]
pub struct ChanceTable<T> {
    outcomes: Vec<T>,
    weights: Vec<f64>,
    total_weight: f64,
}

impl<T> Default for ChanceTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ChanceTable<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            weights: Vec::new(),
            total_weight: 0.0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
            weights: Vec::with_capacity(capacity),
            total_weight: 0.0,
        }
    }

    /// Append an outcome with its relative weight.
    pub fn add_outcome(&mut self, outcome: T, weight: f64) {
        self.outcomes.push(outcome);
        self.weights.push(weight);
        self.total_weight += weight;
    }

    /// Remove the entry at `index`, returning the outcome and its weight.
    ///
    /// Later entries shift down so insertion order is preserved.
    pub fn remove_at(&mut self, index: usize) -> Option<(T, f64)> {
        if index >= self.outcomes.len() {
            return None;
        }
        let outcome = self.outcomes.remove(index);
        let weight = self.weights.remove(index);
        self.total_weight -= weight;
        if self.weights.is_empty() {
            // Drop accumulated rounding once nothing is left.
            self.total_weight = 0.0;
        }
        Some((outcome, weight))
    }

    /// Pick an entry index in proportion to weight without removing it.
    ///
    /// Returns `None` for an empty table. If rounding keeps the running sum
    /// from exceeding the target, the last entry is chosen.
    pub fn roll_index(&self, rng: &mut impl RandomSource) -> Option<usize> {
        if self.weights.is_empty() {
            return None;
        }

        // Each entry owns a slice of [0, total_weight) as wide as its weight.
        let target = rng.uniform_f64(0.0, self.total_weight);
        let mut accumulator = 0.0;
        for (i, weight) in self.weights.iter().enumerate() {
            accumulator += weight;
            if target < accumulator {
                return Some(i);
            }
        }
        Some(self.weights.len() - 1)
    }

    /// Pick an outcome in proportion to weight, leaving the table unchanged.
    pub fn roll(&self, rng: &mut impl RandomSource) -> Option<&T> {
        self.roll_index(rng).map(|i| &self.outcomes[i])
    }

    /// Pick an outcome in proportion to weight and remove that exact entry.
    pub fn draw(&mut self, rng: &mut impl RandomSource) -> Option<T> {
        let index = self.roll_index(rng)?;
        self.remove_at(index).map(|(outcome, _)| outcome)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Weight of the entry at `index`.
    pub fn weight_at(&self, index: usize) -> Option<f64> {
        self.weights.get(index).copied()
    }

    pub fn outcome_at(&self, index: usize) -> Option<&T> {
        self.outcomes.get(index)
    }

    /// Fraction of the total weight held by the entry at `index`, in `[0, 1]`.
    pub fn share_of(&self, index: usize) -> Option<f64> {
        let weight = self.weights.get(index)?;
        if self.total_weight > 0.0 {
            Some(weight / self.total_weight)
        } else {
            Some(0.0)
        }
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.outcomes.iter().zip(self.weights.iter().copied())
    }

    pub fn clear(&mut self) {
        self.outcomes.clear();
        self.weights.clear();
        self.total_weight = 0.0;
    }
}

impl<T: PartialEq> ChanceTable<T> {
    /// Index of the first entry equal to `outcome`.
    pub fn position(&self, outcome: &T) -> Option<usize> {
        self.outcomes.iter().position(|o| o == outcome)
    }

    /// Remove the first entry equal to `outcome`, returning its weight.
    ///
    /// Fails with [`SamplingError::NotFound`] when nothing matches.
    pub fn remove_outcome(&mut self, outcome: &T) -> Result<f64, SamplingError> {
        let index = self.position(outcome).ok_or(SamplingError::NotFound)?;
        self.remove_at(index)
            .map(|(_, weight)| weight)
            .ok_or(SamplingError::NotFound)
    }

    pub fn contains(&self, outcome: &T) -> bool {
        self.position(outcome).is_some()
    }
}

impl<T> FromIterator<(T, f64)> for ChanceTable<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<T> Extend<(T, f64)> for ChanceTable<T> {
    fn extend<I: IntoIterator<Item = (T, f64)>>(&mut self, iter: I) {
        for (outcome, weight) in iter {
            self.add_outcome(outcome, weight);
        }
    }
}

/// Percentage share of every entry, e.g. `25.00%: -1,\t75.00%: 1,\t`.
impl<T: std::fmt::Display> std::fmt::Display for ChanceTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, outcome) in self.outcomes.iter().enumerate() {
            let share = self.share_of(i).unwrap_or(0.0);
            write!(f, "{:.2}%: {},\t", share * 100.0, outcome)?;
        }
        Ok(())
    }
}
