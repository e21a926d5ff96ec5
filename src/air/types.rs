//! Core type definitions for the AIR layer.
//!
//! These containers carry the OOD frame, the Fiat–Shamir coefficient pairs and
//! the residues produced by the constraint evaluators. Constructors validate
//! shapes; the verifier re-checks every length against its parameters.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::field::prime_field::PrimeField;

/// Column identifier newtype used when reporting errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColIx(usize);

impl ColIx {
    /// Creates a new column index wrapper.
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the underlying index as `usize`.
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ColIx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Current and next trace rows evaluated at the OOD point (`z` and `g * z`).
///
/// Deserialisation goes through [`EvaluationFrame::new`], so decoded frames
/// carry the same width guarantees as constructed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "RawFrame<F>",
    bound(deserialize = "F: PrimeField + Deserialize<'de>")
)]
pub struct EvaluationFrame<F> {
    current: Vec<F>,
    next: Vec<F>,
}

#[derive(Deserialize)]
struct RawFrame<F> {
    current: Vec<F>,
    next: Vec<F>,
}

impl<F: PrimeField> TryFrom<RawFrame<F>> for EvaluationFrame<F> {
    type Error = AirError;

    fn try_from(raw: RawFrame<F>) -> Result<Self, Self::Error> {
        Self::new(raw.current, raw.next)
    }
}

impl<F: PrimeField> EvaluationFrame<F> {
    /// Creates a frame, requiring both rows to share the same non-zero width.
    pub fn new(current: Vec<F>, next: Vec<F>) -> Result<Self, AirError> {
        if current.is_empty() {
            return Err(AirError::SchemaMismatch {
                what: "frame width",
                expected: 1,
                actual: 0,
            });
        }
        if current.len() != next.len() {
            return Err(AirError::SchemaMismatch {
                what: "frame next-row width",
                expected: current.len(),
                actual: next.len(),
            });
        }
        Ok(Self { current, next })
    }

    /// Trace width covered by the frame.
    pub fn width(&self) -> usize {
        self.current.len()
    }

    /// Current-row values.
    pub fn current(&self) -> &[F] {
        &self.current
    }

    /// Next-row values.
    pub fn next(&self) -> &[F] {
        &self.next
    }
}

/// Fiat–Shamir weighting pair `(c0, c1)` for one constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoefficientPair<F> {
    pub c0: F,
    pub c1: F,
}

impl<F: PrimeField> CoefficientPair<F> {
    /// Creates a new coefficient pair.
    pub const fn new(c0: F, c1: F) -> Self {
        Self { c0, c1 }
    }

    /// Returns `c0 + c1 * adjustment`.
    pub fn weigh(&self, adjustment: F) -> F {
        self.c0.add(&self.c1.mul(&adjustment))
    }
}

/// Output of a [`TransitionEvaluator`](super::TransitionEvaluator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvaluation<F> {
    /// Constraint residue per trace column.
    pub residues: Vec<F>,
    /// Degree of each column's residue polynomial.
    pub degrees: Vec<usize>,
}

impl<F: PrimeField> TransitionEvaluation<F> {
    /// Pairs residues with degrees, requiring equal lengths.
    pub fn new(residues: Vec<F>, degrees: Vec<usize>) -> Result<Self, AirError> {
        if residues.len() != degrees.len() {
            return Err(AirError::SchemaMismatch {
                what: "transition degree count",
                expected: residues.len(),
                actual: degrees.len(),
            });
        }
        Ok(Self { residues, degrees })
    }

    /// Number of transition constraints.
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Returns `true` when no constraint was evaluated.
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// Residue of a single boundary assertion together with its divisor metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionEvaluation<F> {
    /// Assertion residue at the OOD point.
    pub residue: F,
    /// Degree of the assertion's divisor.
    pub divisor_degree: usize,
    /// Trace row the assertion is pinned to.
    pub step: usize,
}

/// Output of a [`BoundaryEvaluator`](super::BoundaryEvaluator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryEvaluation<F> {
    /// Assertions in canonical order.
    pub assertions: Vec<AssertionEvaluation<F>>,
}

impl<F: PrimeField> BoundaryEvaluation<F> {
    /// Creates an evaluation from already paired assertions.
    pub fn new(assertions: Vec<AssertionEvaluation<F>>) -> Self {
        Self { assertions }
    }

    /// Zips the three parallel arrays produced by array-oriented evaluators.
    pub fn from_parts(
        residues: Vec<F>,
        divisor_degrees: Vec<usize>,
        steps: Vec<usize>,
    ) -> Result<Self, AirError> {
        if divisor_degrees.len() != residues.len() {
            return Err(AirError::SchemaMismatch {
                what: "boundary divisor degree count",
                expected: residues.len(),
                actual: divisor_degrees.len(),
            });
        }
        if steps.len() != residues.len() {
            return Err(AirError::SchemaMismatch {
                what: "boundary step count",
                expected: residues.len(),
                actual: steps.len(),
            });
        }
        let assertions = residues
            .into_iter()
            .zip(divisor_degrees)
            .zip(steps)
            .map(|((residue, divisor_degree), step)| AssertionEvaluation {
                residue,
                divisor_degree,
                step,
            })
            .collect();
        Ok(Self { assertions })
    }

    /// Number of assertions.
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    /// Returns `true` when the AIR declares no assertions.
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }
}

/// Boundary assertion `column == value` pinned to a single trace row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion<F> {
    /// Asserted column.
    pub column: ColIx,
    /// Trace row the assertion holds on.
    pub step: usize,
    /// Expected value.
    pub value: F,
}

impl<F: PrimeField> Assertion<F> {
    /// Creates a new single-row assertion.
    pub const fn new(column: ColIx, step: usize, value: F) -> Self {
        Self {
            column,
            step,
            value,
        }
    }

    /// Residue `frame.current[column] - value` at the frame's point.
    pub fn residue(&self, frame: &EvaluationFrame<F>) -> Result<F, AirError> {
        let current = frame
            .current()
            .get(self.column.as_usize())
            .ok_or(AirError::SchemaMismatch {
                what: "assertion column index",
                expected: frame.width(),
                actual: self.column.as_usize(),
            })?;
        Ok(current.sub(&self.value))
    }
}

/// Error enumeration covering deterministic AIR failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirError {
    /// Layout mismatch (column count, row count, input count, etc.).
    SchemaMismatch {
        /// Description of the component that failed validation.
        what: &'static str,
        /// Expected cardinality.
        expected: usize,
        /// Actual cardinality encountered.
        actual: usize,
    },
    /// Transition relation failed between `step` and `step + 1`.
    InvalidTransition {
        /// Column identifier.
        column: ColIx,
        /// Step index.
        step: usize,
    },
    /// Boundary assertion does not hold on the trace.
    BoundaryViolation {
        /// Column where the violation occurred.
        column: ColIx,
        /// Row the assertion is pinned to.
        step: usize,
    },
    /// Requested evaluation domain does not exist in the field.
    DomainUnsupported {
        /// Requested domain size.
        size: u64,
    },
    /// General layout violation (e.g. invalid parameters).
    LayoutViolation(&'static str),
}

impl fmt::Display for AirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirError::SchemaMismatch {
                what,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "schema mismatch for {what}: expected {expected}, got {actual}"
                )
            }
            AirError::InvalidTransition { column, step } => {
                write!(f, "invalid transition at column {column} step {step}")
            }
            AirError::BoundaryViolation { column, step } => {
                write!(f, "boundary violation at column {column} row {step}")
            }
            AirError::DomainUnsupported { size } => {
                write!(f, "field has no multiplicative subgroup of size {size}")
            }
            AirError::LayoutViolation(detail) => write!(f, "layout violation: {detail}"),
        }
    }
}

impl std::error::Error for AirError {}
