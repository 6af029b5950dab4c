/// Enumeration engine for non-equivalent defining polynomials
///
/// The engine walks the monic polynomials of length m in odometer order and
/// keeps one representative per orbit under cyclic rotation and scalar
/// rescaling. It knows in advance how many orbits exist (see
/// [`crate::class_count`]) and stops as soon as that many have been found.
///
/// # State Machine
/// ```text
///   Start --compute_target--> TargetComputed --step--> Scanning --step--> Done
/// ```
/// - `Start`: nothing computed yet
/// - `TargetComputed`: class count, inverse table and first representative ready
/// - `Scanning`: at least one candidate examined, target not yet reached
/// - `Done`: representative count equals the target
///
/// # Termination
/// Every monic vector of length m is visited once per q^{m-1} steps, so a
/// correct class count is always reached within q^{m-1} candidates. The engine
/// enforces that bound (and any caller-supplied cap) and fails with
/// `ScanBudgetExhausted` rather than looping forever.

use std::collections::HashSet;
use std::fmt::Debug;

use log::{debug, info, trace, warn};

use crate::class_count::expected_class_count;
use crate::error::{CirculantError, Result};
use crate::modular_arithmetic::InverseTable;
use crate::normalizer::{canonical_form, equivalent_monic};
use crate::params::{EnumerationParams, MembershipStrategy};
use crate::polynomial::Polynomial;

/// Membership test for orbits already represented
pub trait OrbitIndex: Debug {
    /// Whether some accepted representative lies in the orbit of `candidate`.
    fn contains_orbit(&self, candidate: &Polynomial, inverses: &InverseTable) -> Result<bool>;

    /// Records a newly accepted representative.
    fn insert(&mut self, representative: &Polynomial, inverses: &InverseTable) -> Result<()>;

    /// Number of orbits recorded.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Orbit index keyed by canonical form
#[derive(Clone, Debug, Default)]
pub struct CanonicalIndex {
    forms: HashSet<Polynomial>,
}

impl CanonicalIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrbitIndex for CanonicalIndex {
    fn contains_orbit(&self, candidate: &Polynomial, inverses: &InverseTable) -> Result<bool> {
        Ok(self.forms.contains(&canonical_form(candidate, inverses)?))
    }

    fn insert(&mut self, representative: &Polynomial, inverses: &InverseTable) -> Result<()> {
        self.forms.insert(canonical_form(representative, inverses)?);
        Ok(())
    }

    fn len(&self) -> usize {
        self.forms.len()
    }
}

/// Orbit index that scans the accepted representatives directly
///
/// The candidate is rotated one step at a time, m times in total (the last
/// rotation is the identity), and each rotation is normalized to monic form
/// and compared with every stored representative. Stored representatives
/// are already monic at their degree position, so a match means a shared
/// orbit.
#[derive(Clone, Debug, Default)]
pub struct LinearScanIndex {
    representatives: Vec<Polynomial>,
}

impl LinearScanIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrbitIndex for LinearScanIndex {
    fn contains_orbit(&self, candidate: &Polynomial, inverses: &InverseTable) -> Result<bool> {
        let mut rotated = candidate.clone();
        for _ in 0..candidate.len() {
            rotated = rotated.cyclic_shift();
            let monic = equivalent_monic(&rotated, inverses)?;
            if self.representatives.contains(&monic) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn insert(&mut self, representative: &Polynomial, inverses: &InverseTable) -> Result<()> {
        self.representatives
            .push(equivalent_monic(representative, inverses)?);
        Ok(())
    }

    fn len(&self) -> usize {
        self.representatives.len()
    }
}

fn new_index(strategy: MembershipStrategy) -> Box<dyn OrbitIndex> {
    match strategy {
        MembershipStrategy::CanonicalIndex => Box::new(CanonicalIndex::new()),
        MembershipStrategy::LinearScan => Box::new(LinearScanIndex::new()),
    }
}

/// Lifecycle of an [`Enumerator`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnumerationState {
    Start,
    TargetComputed,
    Scanning,
    Done,
}

/// Result of a single [`Enumerator::step`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The candidate opened a new orbit and was appended
    Accepted(Polynomial),
    /// The candidate's orbit was already represented
    Rejected,
    /// The target count has been reached; nothing was scanned
    Finished,
}

/// Outcome of a complete enumeration run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enumeration {
    /// Matrix size m
    pub matrix_size: usize,
    /// Field size q
    pub field_size: u64,
    /// Class count predicted by the oracle
    pub expected: usize,
    /// One monic representative per orbit, in discovery order
    pub representatives: Vec<Polynomial>,
    /// Number of cursor positions examined
    pub candidates_scanned: u64,
}

impl Enumeration {
    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.representatives.len() == self.expected
    }
}

/// Step-wise driver of the enumeration
#[derive(Debug)]
pub struct Enumerator {
    params: EnumerationParams,
    state: EnumerationState,
    target: usize,
    budget: u64,
    inverses: Option<InverseTable>,
    index: Box<dyn OrbitIndex>,
    representatives: Vec<Polynomial>,
    cursor: Polynomial,
    scanned: u64,
}

impl Enumerator {
    pub fn new(params: EnumerationParams) -> Self {
        let index = new_index(params.strategy);
        let cursor = Polynomial::seed(params.matrix_size);
        Self {
            params,
            state: EnumerationState::Start,
            target: 0,
            budget: 0,
            inverses: None,
            index,
            representatives: Vec::new(),
            cursor,
            scanned: 0,
        }
    }

    pub fn state(&self) -> EnumerationState {
        self.state
    }

    /// The predicted class count, once computed.
    pub fn target(&self) -> Option<usize> {
        match self.state {
            EnumerationState::Start => None,
            _ => Some(self.target),
        }
    }

    pub fn representatives(&self) -> &[Polynomial] {
        &self.representatives
    }

    pub fn candidates_scanned(&self) -> u64 {
        self.scanned
    }

    /// Computes the target count and sets up the scan
    ///
    /// Builds the inverse table, records the orbit of the constant polynomial
    /// by its monic member x^{m-1}, and places the cursor at [1, 0, ..., 0].
    /// Calling this again after the transition has no effect.
    ///
    /// # Errors
    /// * Any validation or arithmetic error from the class count oracle or
    ///   the inverse table
    pub fn compute_target(&mut self) -> Result<usize> {
        if self.state != EnumerationState::Start {
            return Ok(self.target);
        }

        let m = self.params.matrix_size;
        let q = self.params.field_size;
        let target = expected_class_count(m, q)?;
        let inverses = InverseTable::new(q)?;

        let first = Polynomial::monic_start(m);
        self.index.insert(&first, &inverses)?;
        self.representatives = vec![first];
        self.cursor = Polynomial::seed(m);

        self.target = target;
        self.budget = self.params.candidate_budget();
        self.inverses = Some(inverses);
        self.state = EnumerationState::TargetComputed;

        info!(
            "enumerating defining polynomials for m={}, q={}: expecting {} classes ({:?}, budget {})",
            m, q, target, self.params.strategy, self.budget
        );
        Ok(target)
    }

    /// Examines the next monic candidate
    ///
    /// Computes the target first when still in `Start`.
    ///
    /// # Errors
    /// * `ScanBudgetExhausted` if the candidate budget runs out before the
    ///   target count is reached
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.state == EnumerationState::Start {
            self.compute_target()?;
        }
        if self.representatives.len() >= self.target {
            self.state = EnumerationState::Done;
            return Ok(StepOutcome::Finished);
        }
        let Some(inverses) = self.inverses.as_ref() else {
            return Ok(StepOutcome::Finished);
        };

        if self.scanned >= self.budget {
            warn!(
                "scan budget of {} candidates exhausted with {} of {} classes found",
                self.budget,
                self.representatives.len(),
                self.target
            );
            return Err(CirculantError::ScanBudgetExhausted {
                scanned: self.scanned,
                found: self.representatives.len(),
                expected: self.target,
            });
        }

        self.state = EnumerationState::Scanning;
        self.cursor.advance_monic(self.params.field_size);
        self.scanned += 1;
        trace!("candidate {}: [{}]", self.scanned, self.cursor);

        if self.index.contains_orbit(&self.cursor, inverses)? {
            return Ok(StepOutcome::Rejected);
        }

        self.index.insert(&self.cursor, inverses)?;
        self.representatives.push(self.cursor.clone());
        debug!(
            "class {} of {}: [{}]",
            self.representatives.len(),
            self.target,
            self.cursor
        );

        if self.representatives.len() == self.target {
            self.state = EnumerationState::Done;
        }
        Ok(StepOutcome::Accepted(self.cursor.clone()))
    }

    /// Drives the machine to `Done` and returns the representatives.
    pub fn run(mut self) -> Result<Enumeration> {
        while self.step()? != StepOutcome::Finished {}

        info!(
            "found {} classes for m={}, q={} after {} candidates",
            self.representatives.len(),
            self.params.matrix_size,
            self.params.field_size,
            self.scanned
        );

        Ok(Enumeration {
            matrix_size: self.params.matrix_size,
            field_size: self.params.field_size,
            expected: self.target,
            representatives: self.representatives,
            candidates_scanned: self.scanned,
        })
    }
}

/// Runs a complete enumeration for the given parameters.
pub fn enumerate(params: &EnumerationParams) -> Result<Enumeration> {
    Enumerator::new(params.clone()).run()
}

/// Pairwise non-equivalent monic defining polynomials for m×m circulant
/// matrices over F_q
///
/// # Examples
/// ```
/// use circulant_polys::{enumerate_representatives, Polynomial};
///
/// let reps = enumerate_representatives(2, 3).unwrap();
/// assert_eq!(
///     reps,
///     vec![
///         Polynomial::new(vec![0, 1]),
///         Polynomial::new(vec![2, 1]),
///         Polynomial::new(vec![1, 1]),
///     ]
/// );
/// ```
pub fn enumerate_representatives(m: usize, q: u64) -> Result<Vec<Polynomial>> {
    let params = EnumerationParams::new(m, q)?;
    Ok(enumerate(&params)?.representatives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn polys(rows: &[&[u64]]) -> Vec<Polynomial> {
        rows.iter().map(|r| Polynomial::new(r.to_vec())).collect()
    }

    #[test]
    fn test_state_transitions() {
        let mut enumerator = Enumerator::new(EnumerationParams::new(2, 3).unwrap());
        assert_eq!(enumerator.state(), EnumerationState::Start);
        assert_eq!(enumerator.target(), None);

        assert_eq!(enumerator.compute_target().unwrap(), 3);
        assert_eq!(enumerator.state(), EnumerationState::TargetComputed);
        assert_eq!(enumerator.representatives(), &polys(&[&[0, 1]])[..]);

        assert_eq!(
            enumerator.step().unwrap(),
            StepOutcome::Accepted(Polynomial::new(vec![2, 1]))
        );
        assert_eq!(enumerator.state(), EnumerationState::Scanning);
        assert_eq!(enumerator.step().unwrap(), StepOutcome::Rejected);
        assert_eq!(
            enumerator.step().unwrap(),
            StepOutcome::Accepted(Polynomial::new(vec![1, 1]))
        );
        assert_eq!(enumerator.state(), EnumerationState::Done);
        assert_eq!(enumerator.step().unwrap(), StepOutcome::Finished);
        assert_eq!(enumerator.candidates_scanned(), 3);
    }

    #[test]
    fn test_discovery_order() {
        let cases: Vec<(usize, u64, Vec<Polynomial>, u64)> = vec![
            (1, 5, polys(&[&[1]]), 0),
            (2, 3, polys(&[&[0, 1], &[2, 1], &[1, 1]]), 3),
            (3, 2, polys(&[&[0, 0, 1], &[0, 1, 1], &[1, 1, 1]]), 2),
            (
                3,
                3,
                polys(&[&[0, 0, 1], &[2, 0, 1], &[0, 1, 1], &[1, 1, 1], &[2, 1, 1]]),
                4,
            ),
            (
                4,
                2,
                polys(&[
                    &[0, 0, 0, 1],
                    &[0, 1, 0, 1],
                    &[1, 1, 0, 1],
                    &[0, 0, 1, 1],
                    &[1, 1, 1, 1],
                ]),
                6,
            ),
        ];
        for (m, q, expected, scanned) in cases {
            let result = enumerate(&EnumerationParams::new(m, q).unwrap()).unwrap();
            assert_eq!(result.representatives, expected, "m={}, q={}", m, q);
            assert_eq!(result.candidates_scanned, scanned, "m={}, q={}", m, q);
            assert!(result.is_complete());
        }
    }

    #[test]
    fn test_budget_exhaustion() {
        let params = EnumerationParams::new(4, 3).unwrap().with_max_candidates(5);
        match enumerate(&params) {
            Err(CirculantError::ScanBudgetExhausted {
                scanned, expected, ..
            }) => {
                assert_eq!(scanned, 5);
                assert_eq!(expected, 13);
            }
            other => panic!("expected budget exhaustion, got {:?}", other),
        }

        // A cap at the exact number of needed candidates still succeeds
        let params = EnumerationParams::new(4, 3).unwrap().with_max_candidates(22);
        assert_eq!(enumerate(&params).unwrap().len(), 13);
    }

    #[test]
    fn test_linear_scan_index() {
        let table = InverseTable::new(3).unwrap();
        let mut index = LinearScanIndex::new();
        assert!(index.is_empty());
        index.insert(&Polynomial::new(vec![0, 1]), &table).unwrap();

        assert!(index.contains_orbit(&Polynomial::new(vec![0, 1]), &table).unwrap());
        assert!(index.contains_orbit(&Polynomial::new(vec![2, 0]), &table).unwrap());
        assert!(!index.contains_orbit(&Polynomial::new(vec![1, 1]), &table).unwrap());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_enumerate_representatives_rejects_invalid_input() {
        assert!(matches!(
            enumerate_representatives(0, 3),
            Err(CirculantError::InvalidMatrixSize { .. })
        ));
        assert!(matches!(
            enumerate_representatives(3, 9),
            Err(CirculantError::InvalidFieldSize { .. })
        ));
    }

    proptest! {
        #[test]
        fn test_strategies_agree(
            m in 1usize..6,
            q in prop::sample::select(vec![2u64, 3, 5]),
        ) {
            let params = EnumerationParams::new(m, q).unwrap();
            let indexed = enumerate(&params).unwrap();
            let scanned = enumerate(&params.clone().with_strategy(MembershipStrategy::LinearScan)).unwrap();
            prop_assert_eq!(&indexed, &scanned);
            prop_assert_eq!(indexed.len(), expected_class_count(m, q).unwrap());
            prop_assert!(indexed.candidates_scanned <= params.candidate_budget());
        }
    }
}
