//! Fitness values and objectives
//!
//! Fitness is a tuple of real components, each with a fixed comparison
//! direction; comparison is lexicographic over direction-weighted
//! components.

pub mod objective;
pub mod regression;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Comparison direction for one fitness component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Smaller values are better
    Minimize,
    /// Larger values are better
    Maximize,
}

impl Direction {
    /// Weight applied to a component so that larger weighted values win
    pub fn weight(self) -> f64 {
        match self {
            Self::Minimize => -1.0,
            Self::Maximize => 1.0,
        }
    }
}

/// An evaluated fitness value
///
/// Holds the raw objective components alongside their directions; the raw
/// first component feeds statistics, the weighted components feed
/// comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    values: Vec<f64>,
    directions: Vec<Direction>,
}

impl Fitness {
    /// Create a fitness from raw component values and their directions
    pub fn new(values: Vec<f64>, directions: &[Direction]) -> Self {
        assert_eq!(
            values.len(),
            directions.len(),
            "fitness component count must match direction count"
        );
        assert!(!values.is_empty(), "fitness must have at least one component");
        Self {
            values,
            directions: directions.to_vec(),
        }
    }

    /// Get the raw component values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the raw first component
    pub fn first(&self) -> f64 {
        self.values[0]
    }

    /// Get the per-component directions
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    fn weighted(&self, index: usize) -> f64 {
        self.values[index] * self.directions[index].weight()
    }

    /// Lexicographic comparison over weighted components
    ///
    /// Strict: equal fitnesses are not better than each other, which gives
    /// first-seen/first-drawn tie behavior everywhere comparisons are used.
    pub fn is_better_than(&self, other: &Self) -> bool {
        let n = self.values.len().min(other.values.len());
        for i in 0..n {
            match self.weighted(i).partial_cmp(&other.weighted(i)) {
                Some(Ordering::Greater) => return true,
                Some(Ordering::Less) => return false,
                _ => {}
            }
        }
        false
    }
}

impl PartialOrd for Fitness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_better_than(other) {
            Some(Ordering::Greater)
        } else if other.is_better_than(self) {
            Some(Ordering::Less)
        } else {
            Some(Ordering::Equal)
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::objective::{FnObjective, Objective};
    pub use super::regression::LeastSquaresRegression;
    pub use super::{Direction, Fitness};
}
