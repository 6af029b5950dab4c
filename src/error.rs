use num_bigint::BigUint;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CirculantError {
    #[error("Invalid field size q = {q}: {reason}")]
    InvalidFieldSize { q: u64, reason: &'static str },

    #[error("Invalid matrix size m = {m}: must be at least 1")]
    InvalidMatrixSize { m: usize },

    #[error("Class count sum {numerator} is not divisible by (q - 1) * m = {denominator}")]
    ArithmeticInconsistency {
        numerator: BigUint,
        denominator: BigUint,
    },

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Scan budget exhausted after {scanned} candidates: found {found} of {expected} classes")]
    ScanBudgetExhausted {
        scanned: u64,
        found: usize,
        expected: usize,
    },

    #[error("Cannot normalize the zero polynomial")]
    ZeroPolynomial,

    #[error("Invalid dimension: expected {expected}, got {got}")]
    InvalidDimension {
        expected: usize,
        got: usize,
    },

    #[error("Coefficient {coefficient} out of range [0, {modulus}) at position {position}")]
    CoefficientOutOfRange {
        coefficient: u64,
        modulus: u64,
        position: usize,
    },

    #[error("Representative {index} is not monic")]
    NotMonic { index: usize },

    #[error("Representatives {first} and {second} lie in the same orbit")]
    DuplicateOrbit { first: usize, second: usize },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CirculantError>;
