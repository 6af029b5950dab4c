/// Prime field arithmetic for the defining-polynomial enumeration
///
/// This module provides the small amount of number theory the enumeration
/// needs: greatest common divisors, Euler's totient, a primality test for
/// validating the field size, and a precomputed table of multiplicative
/// inverses in F_q.
///
/// Field elements are stored as `u64` values in the standard representation
/// [0, q). Products are formed in `u128` so that no intermediate result can
/// overflow for any modulus accepted by [`InverseTable::new`].

use crate::error::{CirculantError, Result};

/// Largest field size for which an inverse table is built.
///
/// The table is dense (one entry per field element), so this bounds its
/// memory at 2^24 entries.
pub const MAX_FIELD_SIZE: u64 = 1 << 24;

/// Greatest common divisor by the iterative Euclidean algorithm
///
/// `gcd(a, 0) == a` and `gcd(0, 0) == 0`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Extended Euclidean algorithm for computing gcd and Bézout coefficients
///
/// # Arguments
/// * `a` - First integer
/// * `b` - Second integer
///
/// # Returns
/// * `(i128, i128, i128)` - Tuple (gcd, x, y) where gcd = ax + by
pub fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (gcd, x1, y1) = extended_gcd(b, a % b);
        (gcd, y1, x1 - (a / b) * y1)
    }
}

/// Euler's totient function by exhaustive search
///
/// Counts the integers k in [1, d) with gcd(k, d) = 1, where k = 1 is always
/// counted so that φ(1) = 1. Returns 0 for d ≤ 0.
///
/// This is the naive O(d) algorithm; it is only ever called on divisors of
/// the matrix size, which is small in practice.
pub fn euler_phi(d: i64) -> u64 {
    if d <= 0 {
        return 0;
    }
    let d = d as u64;
    let mut phi = 1;
    for k in 2..d {
        if gcd(k, d) == 1 {
            phi += 1;
        }
    }
    phi
}

/// Deterministic primality test by trial division up to √n.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor = 3u64;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Computes (a * b) mod q without intermediate overflow.
#[inline]
pub fn mul_mod(a: u64, b: u64, q: u64) -> u64 {
    ((a as u128 * b as u128) % q as u128) as u64
}

/// Checks that `q` is usable as the size of a prime field.
///
/// # Errors
/// * `InvalidFieldSize` if q < 2, q is composite, or q exceeds [`MAX_FIELD_SIZE`]
pub fn validate_field_size(q: u64) -> Result<()> {
    if q < 2 {
        return Err(CirculantError::InvalidFieldSize {
            q,
            reason: "field size must be at least 2",
        });
    }
    if q > MAX_FIELD_SIZE {
        return Err(CirculantError::InvalidFieldSize {
            q,
            reason: "field size exceeds the supported maximum",
        });
    }
    if !is_prime(q) {
        return Err(CirculantError::InvalidFieldSize {
            q,
            reason: "field size must be prime",
        });
    }
    Ok(())
}

/// Table of multiplicative inverses in F_q
///
/// Entry `a` holds a^{-1} mod q for every a in [1, q); entry 0 is `None`
/// since zero has no inverse. The table is built once per enumeration run and
/// never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InverseTable {
    /// Field size q (prime)
    modulus: u64,

    /// inverses[a] = a^{-1} mod q, `None` at index 0
    inverses: Vec<Option<u64>>,
}

impl InverseTable {
    /// Builds the inverse table for F_q
    ///
    /// # Arguments
    /// * `q` - Field size, must be prime and at most [`MAX_FIELD_SIZE`]
    ///
    /// # Returns
    /// * `Result<Self>` - Complete inverse table or error
    ///
    /// # Errors
    /// * `InvalidFieldSize` if q is not a supported prime. Validation happens
    ///   up front so a composite q never yields a partially filled table.
    pub fn new(q: u64) -> Result<Self> {
        validate_field_size(q)?;

        let modulus = q as i128;
        let mut inverses = Vec::with_capacity(q as usize);
        inverses.push(None);
        for a in 1..q {
            let (g, x, _) = extended_gcd(a as i128, modulus);
            if g != 1 {
                // Unreachable for a prime modulus, kept as a hard failure.
                return Err(CirculantError::InvalidFieldSize {
                    q,
                    reason: "element without multiplicative inverse",
                });
            }
            inverses.push(Some(x.rem_euclid(modulus) as u64));
        }

        Ok(Self {
            modulus: q,
            inverses,
        })
    }

    /// Returns a^{-1} mod q, or `None` if a ≡ 0 (mod q).
    pub fn inverse(&self, a: u64) -> Option<u64> {
        self.inverses[(a % self.modulus) as usize]
    }

    /// Returns the field size q.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Number of table entries (equal to q).
    pub fn len(&self) -> usize {
        self.inverses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inverses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(18, 12), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(17, 5), 1);
    }

    #[test]
    fn test_euler_phi() {
        // Non-positive inputs map to zero by convention
        assert_eq!(euler_phi(-3), 0);
        assert_eq!(euler_phi(0), 0);

        let expected = [1u64, 1, 2, 2, 4, 2, 6, 4, 6, 4, 10, 4];
        for (i, &phi) in expected.iter().enumerate() {
            assert_eq!(euler_phi(i as i64 + 1), phi, "phi({})", i + 1);
        }
        assert_eq!(euler_phi(97), 96);
        assert_eq!(euler_phi(100), 40);
    }

    #[test]
    fn test_is_prime() {
        let primes: Vec<u64> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
        assert!(is_prime(7919));
        assert!(!is_prime(7917));
        assert!(!is_prime(25));
    }

    #[test]
    fn test_inverse_table_small_fields() {
        let table = InverseTable::new(7).unwrap();
        assert_eq!(table.modulus(), 7);
        assert_eq!(table.len(), 7);
        assert_eq!(table.inverse(0), None);
        assert_eq!(table.inverse(1), Some(1));
        assert_eq!(table.inverse(2), Some(4));
        assert_eq!(table.inverse(3), Some(5));
        assert_eq!(table.inverse(6), Some(6));

        let table = InverseTable::new(2).unwrap();
        assert_eq!(table.inverse(1), Some(1));
    }

    #[test]
    fn test_inverse_table_rejects_invalid_fields() {
        for q in [0u64, 1, 4, 9, 15, 1 << 25] {
            assert!(
                matches!(
                    InverseTable::new(q),
                    Err(CirculantError::InvalidFieldSize { .. })
                ),
                "q = {} should be rejected",
                q
            );
        }
    }

    #[test]
    fn test_extended_gcd_bezout() {
        let (g, x, y) = extended_gcd(240, 46);
        assert_eq!(g, 2);
        assert_eq!(240 * x + 46 * y, 2);
    }

    proptest! {
        #[test]
        fn test_inverse_table_correctness(
            q in prop::sample::select(vec![2u64, 3, 5, 7, 11, 13, 101, 257, 1009])
        ) {
            let table = InverseTable::new(q).unwrap();
            for a in 1..q {
                let inv = table.inverse(a).unwrap();
                prop_assert!(inv > 0 && inv < q);
                prop_assert_eq!(mul_mod(a, inv, q), 1);
            }
        }

        #[test]
        fn test_gcd_divides_both(a in 0u64..100000, b in 0u64..100000) {
            let g = gcd(a, b);
            if g != 0 {
                prop_assert_eq!(a % g, 0);
                prop_assert_eq!(b % g, 0);
            }
            prop_assert_eq!(g, gcd(b, a));
        }

        #[test]
        fn test_euler_phi_of_prime(p in prop::sample::select(vec![2i64, 3, 5, 7, 11, 13, 31, 97])) {
            prop_assert_eq!(euler_phi(p), (p - 1) as u64);
        }
    }
}
