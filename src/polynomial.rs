/// Fixed-length coefficient vectors over F_q
///
/// A [`Polynomial`] of length m stores the coefficients c_0, ..., c_{m-1} of
/// p(x) = c_0 + c_1 x + ... + c_{m-1} x^{m-1}, lowest degree first. The
/// enumeration only ever works with vectors of one fixed length m, so the
/// length is part of the value: [1, 0] and [1, 0, 0] are different
/// polynomials here even though they describe the same function.
///
/// The operations in this module are the ones the enumeration needs:
/// - odometer-style successors (fixed-length, growing and monic variants)
/// - cyclic and consta-cyclic shifts (multiplication by x mod x^m - 1 / x^m - a)
/// - degree and evaluation
///
/// General polynomial arithmetic is deliberately absent.

use std::fmt::{Display, Formatter, Result as FmtResult};

use num_bigint::BigUint;
use num_traits::Zero;

use crate::modular_arithmetic::mul_mod;

/// Coefficient vector of a polynomial over F_q, lowest degree first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Polynomial {
    coefficients: Vec<u64>,
}

/// Adds one to a little-endian base-q digit string.
///
/// Returns `true` when the carry propagates out of the most significant
/// digit, i.e. every digit wrapped to zero. An empty slice always carries.
fn increment_digits(digits: &mut [u64], q: u64) -> bool {
    for digit in digits.iter_mut() {
        if *digit + 1 >= q {
            *digit = 0;
        } else {
            *digit += 1;
            return false;
        }
    }
    true
}

impl Polynomial {
    pub fn new(coefficients: Vec<u64>) -> Self {
        Self { coefficients }
    }

    /// The all-zero vector of the given length.
    pub fn zero(len: usize) -> Self {
        Self::new(vec![0; len])
    }

    /// The constant polynomial 1 as a length-`m` vector: [1, 0, ..., 0].
    ///
    /// This is the starting point of the monic scan cursor.
    pub fn seed(m: usize) -> Self {
        let mut coefficients = vec![0; m];
        if let Some(first) = coefficients.first_mut() {
            *first = 1;
        }
        Self::new(coefficients)
    }

    /// x^{m-1} as a length-`m` vector: [0, ..., 0, 1].
    ///
    /// The smallest monic vector of length m, and the monic member of the
    /// orbit of [`Polynomial::seed`].
    pub fn monic_start(m: usize) -> Self {
        let mut coefficients = vec![0; m];
        if let Some(last) = coefficients.last_mut() {
            *last = 1;
        }
        Self::new(coefficients)
    }

    pub fn coefficients(&self) -> &[u64] {
        &self.coefficients
    }

    pub fn into_coefficients(self) -> Vec<u64> {
        self.coefficients
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|&c| c == 0)
    }

    /// A polynomial is monic when its last coefficient (index m - 1) is 1.
    pub fn is_monic(&self) -> bool {
        self.coefficients.last() == Some(&1)
    }

    /// Index of the highest nonzero coefficient, `None` for the zero vector.
    ///
    /// # Examples
    /// ```
    /// use circulant_polys::Polynomial;
    ///
    /// assert_eq!(Polynomial::new(vec![1, 2, 1, 0, 0]).degree(), Some(2));
    /// assert_eq!(Polynomial::new(vec![0, 0, 0]).degree(), None);
    /// ```
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.iter().rposition(|&c| c != 0)
    }

    /// Coefficient at the true degree position, `None` for the zero vector.
    pub fn leading_coefficient(&self) -> Option<u64> {
        self.degree().map(|d| self.coefficients[d])
    }

    /// Next vector in lexicographic order, fixed length
    ///
    /// The lowest-degree coefficient varies fastest; a coefficient reaching q
    /// wraps to 0 and carries into the next one. A carry out of the top
    /// coefficient is dropped, so [q-1, ..., q-1] wraps to [0, ..., 0]. The
    /// empty vector is a fixed point.
    pub fn next_wrapping(&self, q: u64) -> Self {
        let mut next = self.clone();
        increment_digits(&mut next.coefficients, q);
        next
    }

    /// Next vector in lexicographic order, growing on overflow
    ///
    /// Same walk as [`Polynomial::next_wrapping`], except that a carry out of
    /// the top coefficient appends a new coefficient 1, raising the length by
    /// one: [2, 2] over F_3 becomes [0, 0, 1]. The empty vector is a fixed
    /// point.
    pub fn next_growing(&self, q: u64) -> Self {
        if self.is_empty() {
            return self.clone();
        }
        let mut next = self.clone();
        if increment_digits(&mut next.coefficients, q) {
            next.coefficients.push(1);
        }
        next
    }

    /// Advances in place to the next monic vector of the same length
    ///
    /// Only the low m - 1 coefficients take part in the odometer walk; the
    /// top coefficient is pinned to 1. Starting from any vector, q^{m-1}
    /// successive calls visit every monic vector of length m exactly once.
    ///
    /// # Returns
    /// * `bool` - `true` when the low coefficients wrapped around to all zeros
    pub fn advance_monic(&mut self, q: u64) -> bool {
        let Some((top, low)) = self.coefficients.split_last_mut() else {
            return false;
        };
        let wrapped = increment_digits(low, q);
        *top = 1;
        wrapped
    }

    /// Returns the next monic vector; see [`Polynomial::advance_monic`].
    pub fn next_monic(&self, q: u64) -> Self {
        let mut next = self.clone();
        next.advance_monic(q);
        next
    }

    /// Cyclic shift by one position
    ///
    /// [c_0, ..., c_{m-1}] becomes [c_{m-1}, c_0, ..., c_{m-2}], which is
    /// multiplication by x modulo x^m - 1.
    pub fn cyclic_shift(&self) -> Self {
        self.rotate(1)
    }

    /// Applies [`Polynomial::cyclic_shift`] `k` times.
    pub fn rotate(&self, k: usize) -> Self {
        let mut rotated = self.clone();
        if !rotated.is_empty() {
            let k = k % rotated.len();
            rotated.coefficients.rotate_right(k);
        }
        rotated
    }

    /// Consta-cyclic shift by one position
    ///
    /// Like [`Polynomial::cyclic_shift`], but the coefficient wrapping around
    /// to position 0 is multiplied by `a` mod q. This is multiplication by x
    /// modulo x^m - a.
    pub fn consta_cyclic_shift(&self, a: u64, q: u64) -> Self {
        let mut shifted = self.cyclic_shift();
        if let Some(first) = shifted.coefficients.first_mut() {
            *first = mul_mod(a, *first, q);
        }
        shifted
    }

    /// Multiplies every coefficient by `factor` mod q.
    pub fn scale_mod(&self, factor: u64, q: u64) -> Self {
        Self::new(
            self.coefficients
                .iter()
                .map(|&c| mul_mod(c, factor, q))
                .collect(),
        )
    }

    /// Evaluates p(x) over the integers by Horner's rule
    ///
    /// The result is not reduced mod q; use [`Polynomial::evaluate_mod`] for
    /// the field value. Arbitrary precision keeps the result exact.
    pub fn evaluate(&self, x: u64) -> BigUint {
        let x = BigUint::from(x);
        self.coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, &c| acc * &x + BigUint::from(c))
    }

    /// Evaluates p(x) in F_q.
    pub fn evaluate_mod(&self, x: u64, q: u64) -> u64 {
        let x = x % q;
        self.coefficients
            .iter()
            .rev()
            .fold(0u64, |acc, &c| (mul_mod(acc, x, q) + c % q) % q)
    }
}

impl From<Vec<u64>> for Polynomial {
    fn from(coefficients: Vec<u64>) -> Self {
        Self::new(coefficients)
    }
}

impl Display for Polynomial {
    /// Comma-separated coefficients, lowest degree first.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, c) in self.coefficients.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
