pub mod class_count;
pub mod enumeration;
pub mod error;
pub mod modular_arithmetic;
pub mod normalizer;
pub mod output;
pub mod params;
pub mod polynomial;
pub mod verification;

pub use class_count::{class_count_terms, divisors, expected_class_count, DivisorTerm};
pub use enumeration::{
    enumerate, enumerate_representatives, CanonicalIndex, Enumeration, EnumerationState,
    Enumerator, LinearScanIndex, OrbitIndex, StepOutcome,
};
pub use error::{CirculantError, Result};
pub use modular_arithmetic::{euler_phi, gcd, is_prime, InverseTable, MAX_FIELD_SIZE};
pub use normalizer::{are_equivalent, canonical_form, equivalent_monic};
pub use output::{
    load_from_file, read_representatives, save_to_file, write_representatives,
    StoredRepresentatives,
};
pub use params::{EnumerationParams, MembershipStrategy};
pub use polynomial::Polynomial;
pub use verification::{brute_force_class_count, verify_representatives};
