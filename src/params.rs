//! Enumeration parameters
//!
//! Bundles the matrix size, field size and engine options, validated at
//! construction so that the engine never starts on unusable input.

use crate::error::{CirculantError, Result};
use crate::modular_arithmetic::validate_field_size;

/// How the engine decides whether a candidate's orbit is already represented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MembershipStrategy {
    /// Hash set keyed by the canonical form of every accepted orbit.
    /// O(m^2) per candidate.
    #[default]
    CanonicalIndex,

    /// Normalize each nontrivial rotation of the candidate and compare it
    /// against every accepted representative. O(target · m^2) per candidate;
    /// kept for cross-checking the indexed strategy.
    LinearScan,
}

/// Parameters for one enumeration run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerationParams {
    /// Matrix size m (length of every coefficient vector)
    pub matrix_size: usize,

    /// Field size q (prime)
    pub field_size: u64,

    /// Orbit membership test used by the engine
    pub strategy: MembershipStrategy,

    /// Optional cap on scanned candidates; the engine additionally enforces
    /// the hard bound q^{m-1}
    pub max_candidates: Option<u64>,
}

impl EnumerationParams {
    /// Creates validated parameters with the default strategy and no extra cap
    ///
    /// # Arguments
    /// * `matrix_size` - Matrix size m, at least 1
    /// * `field_size` - Field size q, prime
    ///
    /// # Returns
    /// * `Result<Self>` - Validated parameters or error
    pub fn new(matrix_size: usize, field_size: u64) -> Result<Self> {
        if matrix_size == 0 {
            return Err(CirculantError::InvalidMatrixSize { m: matrix_size });
        }
        validate_field_size(field_size)?;

        Ok(Self {
            matrix_size,
            field_size,
            strategy: MembershipStrategy::default(),
            max_candidates: None,
        })
    }

    pub fn with_strategy(mut self, strategy: MembershipStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: u64) -> Self {
        self.max_candidates = Some(max_candidates);
        self
    }

    /// Hard bound on scanned candidates: q^{m-1}, further limited by
    /// `max_candidates`. Saturates at `u64::MAX`.
    pub fn candidate_budget(&self) -> u64 {
        let exponent = (self.matrix_size.saturating_sub(1)).min(u32::MAX as usize) as u32;
        let hard_bound = self.field_size.checked_pow(exponent).unwrap_or(u64::MAX);
        match self.max_candidates {
            Some(cap) => hard_bound.min(cap),
            None => hard_bound,
        }
    }
}

impl Default for EnumerationParams {
    fn default() -> Self {
        Self {
            matrix_size: 2,
            field_size: 3,
            strategy: MembershipStrategy::default(),
            max_candidates: None,
        }
    }
}
