//! Boundary to the external RNA folding engine.

use serde::{Deserialize, Serialize};

/// Physical conditions for a fold, passed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldConditions {
    pub temperature_celsius: f64,
    /// Monovalent salt in mol/L; `None` leaves the engine default.
    #[serde(default)]
    pub salt_molar: Option<f64>,
}

impl Default for FoldConditions {
    fn default() -> Self {
        Self {
            temperature_celsius: 37.0,
            salt_molar: None,
        }
    }
}

/// Symmetric base-pair probability matrix with 0-based indices.
#[derive(Debug, Clone, PartialEq)]
pub struct BasePairProbabilities {
    len: usize,
    values: Vec<f64>,
}

impl BasePairProbabilities {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            values: vec![0.0; len * len],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Probability that positions `i` and `j` pair; 0.0 outside the matrix.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i < self.len && j < self.len {
            self.values[i * self.len + j]
        } else {
            0.0
        }
    }

    /// Set both (i, j) and (j, i). Out-of-range indices are ignored.
    pub fn set(&mut self, i: usize, j: usize, p: f64) {
        if i < self.len && j < self.len {
            let p = p.clamp(0.0, 1.0);
            self.values[i * self.len + j] = p;
            self.values[j * self.len + i] = p;
        }
    }

    /// Count pairs (i, j) with i in `rows`, j in `cols` and probability above `threshold`.
    pub fn count_above(
        &self,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        threshold: f64,
    ) -> usize {
        rows.flat_map(|i| cols.clone().map(move |j| (i, j)))
            .filter(|&(i, j)| self.get(i, j) > threshold)
            .count()
    }
}

/// Output of one fold.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldResult {
    /// MFE structure in dot-bracket notation.
    pub structure: String,
    /// MFE in kcal/mol.
    pub energy: f64,
    pub probabilities: BasePairProbabilities,
}

/// An engine that folds an RNA sequence and reports base-pair probabilities.
pub trait FoldEngine {
    type Error;

    fn fold(&self, rna: &str, conditions: &FoldConditions) -> Result<FoldResult, Self::Error>;
}

impl<E: FoldEngine + ?Sized> FoldEngine for &E {
    type Error = E::Error;

    fn fold(&self, rna: &str, conditions: &FoldConditions) -> Result<FoldResult, Self::Error> {
        (**self).fold(rna, conditions)
    }
}
