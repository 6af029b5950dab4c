/// Monic normalization and canonical orbit representatives
///
/// Rescaling a polynomial by a nonzero field element does not change its
/// class, so every nonzero polynomial has exactly one scalar multiple whose
/// coefficient at the true degree position is 1. Extending this over all
/// cyclic rotations gives a canonical form that identifies the whole orbit.

use crate::error::{CirculantError, Result};
use crate::modular_arithmetic::InverseTable;
use crate::polynomial::Polynomial;

/// Returns the scalar multiple of `poly` whose leading coefficient is 1
///
/// Let d be the true degree of `poly` and a_d its coefficient. Every
/// coefficient is multiplied by a_d^{-1} mod q. For a rotation of a monic
/// vector the degree position need not be m - 1.
///
/// # Errors
/// * `ZeroPolynomial` if every coefficient is zero
pub fn equivalent_monic(poly: &Polynomial, inverses: &InverseTable) -> Result<Polynomial> {
    let leading = poly
        .leading_coefficient()
        .ok_or(CirculantError::ZeroPolynomial)?;
    let factor = inverses
        .inverse(leading)
        .ok_or(CirculantError::ZeroPolynomial)?;
    Ok(poly.scale_mod(factor, inverses.modulus()))
}

/// Canonical representative of the orbit of `poly`
///
/// The lexicographically smallest coefficient vector among the monic
/// normalizations of all rotations of `poly`. Two nonzero polynomials of the
/// same length share an orbit exactly when their canonical forms agree.
///
/// # Errors
/// * `ZeroPolynomial` if every coefficient is zero
pub fn canonical_form(poly: &Polynomial, inverses: &InverseTable) -> Result<Polynomial> {
    let mut best = equivalent_monic(poly, inverses)?;
    let mut rotated = poly.clone();
    for _ in 1..poly.len() {
        rotated = rotated.cyclic_shift();
        let candidate = equivalent_monic(&rotated, inverses)?;
        if candidate < best {
            best = candidate;
        }
    }
    Ok(best)
}

/// Whether `a` and `b` lie in the same orbit.
///
/// # Errors
/// * `InvalidDimension` if the lengths differ
/// * `ZeroPolynomial` if either polynomial is zero
pub fn are_equivalent(a: &Polynomial, b: &Polynomial, inverses: &InverseTable) -> Result<bool> {
    if a.len() != b.len() {
        return Err(CirculantError::InvalidDimension {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(canonical_form(a, inverses)? == canonical_form(b, inverses)?)
}
