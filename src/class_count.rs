//! Closed-form count of defining-polynomial classes (Burnside / necklace count)
//!
//! The number of orbits of nonzero length-m vectors over F_q under cyclic
//! rotation combined with scalar rescaling is
//!
//! ```text
//!   N(m, q) = 1 / ((q - 1) m) * Σ_{d | m} φ(d) · (q^{m/d} - 1) · gcd(d, q - 1)
//! ```
//!
//! The group has order (q - 1) m; the `- 1` excludes the zero vector. The
//! sum is evaluated with arbitrary precision and the final division must be
//! exact; a remainder is reported as an error instead of being truncated.

use log::debug;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::error::{CirculantError, Result};
use crate::modular_arithmetic::{euler_phi, gcd, validate_field_size};

/// One summand of the divisor sum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DivisorTerm {
    /// Divisor d of m
    pub divisor: usize,
    /// φ(d)
    pub totient: u64,
    /// gcd(d, q - 1)
    pub scalar_fixed: u64,
    /// φ(d) · (q^{m/d} - 1) · gcd(d, q - 1)
    pub value: BigUint,
}

/// Divisors of `m` in ascending order (empty for m = 0).
pub fn divisors(m: usize) -> Vec<usize> {
    (1..=m).filter(|d| m % d == 0).collect()
}

/// Computes every term of the divisor sum for (m, q)
///
/// No validation is performed here; [`expected_class_count`] validates its
/// inputs before calling this.
pub fn class_count_terms(m: usize, q: u64) -> Vec<DivisorTerm> {
    let base = BigUint::from(q);
    divisors(m)
        .into_iter()
        .map(|d| {
            let totient = euler_phi(d as i64);
            let scalar_fixed = gcd(d as u64, q.saturating_sub(1));
            let exponent = (m / d) as u32;
            let nonzero = base.pow(exponent) - 1u32;
            let value = nonzero * totient * scalar_fixed;
            DivisorTerm {
                divisor: d,
                totient,
                scalar_fixed,
                value,
            }
        })
        .collect()
}

/// Divides `numerator` by `denominator`, failing unless the division is exact.
///
/// # Errors
/// * `ArithmeticInconsistency` on a nonzero remainder or a zero denominator
pub fn divide_exact(numerator: &BigUint, denominator: &BigUint) -> Result<BigUint> {
    if denominator.is_zero() || !(numerator % denominator).is_zero() {
        return Err(CirculantError::ArithmeticInconsistency {
            numerator: numerator.clone(),
            denominator: denominator.clone(),
        });
    }
    Ok(numerator / denominator)
}

/// Number of equivalence classes of defining polynomials for m×m circulant
/// matrices over F_q
///
/// # Arguments
/// * `m` - Matrix size, at least 1
/// * `q` - Field size, prime
///
/// # Returns
/// * `Result<usize>` - Exact class count
///
/// # Errors
/// * `InvalidMatrixSize` if m = 0
/// * `InvalidFieldSize` if q is not a supported prime
/// * `ArithmeticInconsistency` if the divisor sum is not a multiple of (q - 1) m
/// * `ArithmeticOverflow` if the count does not fit in `usize`
///
/// # Examples
/// ```
/// use circulant_polys::expected_class_count;
///
/// assert_eq!(expected_class_count(2, 3).unwrap(), 3);
/// assert_eq!(expected_class_count(4, 5).unwrap(), 44);
/// ```
pub fn expected_class_count(m: usize, q: u64) -> Result<usize> {
    if m == 0 {
        return Err(CirculantError::InvalidMatrixSize { m });
    }
    validate_field_size(q)?;

    let terms = class_count_terms(m, q);
    let mut sum = BigUint::zero();
    for term in &terms {
        debug!(
            "class count term d={}: phi={} gcd={} value={}",
            term.divisor, term.totient, term.scalar_fixed, term.value
        );
        sum += &term.value;
    }

    let group_order = BigUint::from(q - 1) * m;
    let count = divide_exact(&sum, &group_order)?;
    debug!("class count for m={}, q={}: {}", m, q, count);

    count.to_usize().ok_or_else(|| {
        CirculantError::ArithmeticOverflow(format!(
            "class count {} for m={}, q={} does not fit in usize",
            count, m, q
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::brute_force_class_count;
    use proptest::prelude::*;

    #[test]
    fn test_divisors() {
        assert_eq!(divisors(1), vec![1]);
        assert_eq!(divisors(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(divisors(13), vec![1, 13]);
        assert!(divisors(0).is_empty());
    }

    #[test]
    fn test_terms_for_m2_q3() {
        let terms = class_count_terms(2, 3);
        assert_eq!(terms.len(), 2);
        // d = 1: 1 * (9 - 1) * 1
        assert_eq!(terms[0].value, BigUint::from(8u32));
        // d = 2: 1 * (3 - 1) * gcd(2, 2)
        assert_eq!(terms[1].scalar_fixed, 2);
        assert_eq!(terms[1].value, BigUint::from(4u32));
    }

    #[test]
    fn test_known_counts() {
        let cases = [
            (1, 2, 1),
            (1, 7, 1),
            (2, 2, 2),
            (2, 3, 3),
            (2, 5, 4),
            (3, 2, 3),
            (3, 3, 5),
            (3, 5, 11),
            (4, 2, 5),
            (4, 3, 13),
            (4, 5, 44),
            (5, 3, 25),
            (6, 2, 13),
            (6, 3, 67),
            (6, 7, 3297),
        ];
        for (m, q, expected) in cases {
            assert_eq!(
                expected_class_count(m, q).unwrap(),
                expected,
                "m={}, q={}",
                m,
                q
            );
        }
    }

    #[test]
    fn test_binary_necklaces() {
        // Over F_2 the scalar group is trivial: nonzero binary necklaces
        let necklaces = [2usize, 3, 4, 6, 8, 14, 20, 36];
        for (i, &total) in necklaces.iter().enumerate() {
            let m = i + 1;
            assert_eq!(expected_class_count(m, 2).unwrap(), total - 1, "m={}", m);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            expected_class_count(0, 3),
            Err(CirculantError::InvalidMatrixSize { m: 0 })
        ));
        assert!(matches!(
            expected_class_count(3, 4),
            Err(CirculantError::InvalidFieldSize { q: 4, .. })
        ));
        assert!(matches!(
            expected_class_count(3, 1),
            Err(CirculantError::InvalidFieldSize { q: 1, .. })
        ));
    }

    #[test]
    fn test_divide_exact() {
        let twelve = BigUint::from(12u32);
        assert_eq!(
            divide_exact(&twelve, &BigUint::from(4u32)).unwrap(),
            BigUint::from(3u32)
        );
        assert!(matches!(
            divide_exact(&twelve, &BigUint::from(5u32)),
            Err(CirculantError::ArithmeticInconsistency { .. })
        ));
        assert!(divide_exact(&twelve, &BigUint::zero()).is_err());
    }

    #[test]
    fn test_large_inputs_do_not_overflow() {
        // q^m far beyond u64; the quotient still fits in usize
        let count = expected_class_count(12, 31).unwrap();
        assert!(count > 0);
        assert!(matches!(
            expected_class_count(40, 1009),
            Err(CirculantError::ArithmeticOverflow(_))
        ));
    }

    proptest! {
        #[test]
        fn test_oracle_matches_brute_force(
            m in 1usize..6,
            q in prop::sample::select(vec![2u64, 3, 5]),
        ) {
            prop_assert_eq!(
                expected_class_count(m, q).unwrap(),
                brute_force_class_count(m, q).unwrap()
            );
        }
    }
}
