//! Independent checks of enumeration results
//!
//! [`brute_force_class_count`] partitions every nonzero vector of F_q^m into
//! orbits directly, which cross-checks the closed-form class count.
//! [`verify_representatives`] checks the structural guarantees of an
//! enumeration result.

use std::collections::HashMap;
use std::collections::HashSet;

use log::debug;
use rayon::prelude::*;

use crate::error::{CirculantError, Result};
use crate::modular_arithmetic::{validate_field_size, InverseTable};
use crate::normalizer::canonical_form;
use crate::polynomial::Polynomial;

/// Largest number of vectors the brute-force partition will visit.
pub const MAX_BRUTE_FORCE_VECTORS: u64 = 1 << 24;

/// Decodes `index` as a little-endian base-q vector of length m.
fn vector_from_index(mut index: u64, m: usize, q: u64) -> Polynomial {
    let mut coefficients = Vec::with_capacity(m);
    for _ in 0..m {
        coefficients.push(index % q);
        index /= q;
    }
    Polynomial::new(coefficients)
}

/// Counts orbits of nonzero length-m vectors over F_q by exhaustion
///
/// Canonical forms are computed in parallel over all q^m - 1 nonzero vectors
/// and the distinct forms are counted.
///
/// # Errors
/// * `InvalidMatrixSize` / `InvalidFieldSize` on invalid parameters
/// * `ArithmeticOverflow` if q^m exceeds [`MAX_BRUTE_FORCE_VECTORS`]
pub fn brute_force_class_count(m: usize, q: u64) -> Result<usize> {
    if m == 0 {
        return Err(CirculantError::InvalidMatrixSize { m });
    }
    validate_field_size(q)?;

    let total = u32::try_from(m)
        .ok()
        .and_then(|exp| q.checked_pow(exp))
        .filter(|&total| total <= MAX_BRUTE_FORCE_VECTORS)
        .ok_or_else(|| {
            CirculantError::ArithmeticOverflow(format!(
                "{}^{} vectors exceed the brute-force limit of {}",
                q, m, MAX_BRUTE_FORCE_VECTORS
            ))
        })?;

    let inverses = InverseTable::new(q)?;
    let forms: HashSet<Polynomial> = (1..total)
        .into_par_iter()
        .map(|index| canonical_form(&vector_from_index(index, m, q), &inverses))
        .collect::<Result<HashSet<_>>>()?;

    debug!(
        "brute force partition of {} vectors for m={}, q={}: {} orbits",
        total - 1,
        m,
        q,
        forms.len()
    );
    Ok(forms.len())
}

/// Checks that `representatives` is a valid set of class representatives
///
/// Every polynomial must have length m, coefficients in [0, q), last
/// coefficient 1, and no two may share an orbit. Completeness is not
/// checked; compare the length against the class count for that.
///
/// # Errors
/// * `InvalidDimension`, `CoefficientOutOfRange`, `NotMonic` or
///   `DuplicateOrbit` for the first violation found
pub fn verify_representatives(representatives: &[Polynomial], m: usize, q: u64) -> Result<()> {
    let inverses = InverseTable::new(q)?;
    let mut seen: HashMap<Polynomial, usize> = HashMap::with_capacity(representatives.len());

    for (index, poly) in representatives.iter().enumerate() {
        if poly.len() != m {
            return Err(CirculantError::InvalidDimension {
                expected: m,
                got: poly.len(),
            });
        }
        if let Some((position, &coefficient)) =
            poly.coefficients().iter().enumerate().find(|&(_, &c)| c >= q)
        {
            return Err(CirculantError::CoefficientOutOfRange {
                coefficient,
                modulus: q,
                position,
            });
        }
        if !poly.is_monic() {
            return Err(CirculantError::NotMonic { index });
        }

        let form = canonical_form(poly, &inverses)?;
        if let Some(&first) = seen.get(&form) {
            return Err(CirculantError::DuplicateOrbit {
                first,
                second: index,
            });
        }
        seen.insert(form, index);
    }
    Ok(())
}
