//! Error taxonomy of the OOD consistency check.

use core::fmt;

use crate::air::AirError;
use crate::config::ParamsError;
use crate::field::ExponentOverflow;

/// Identifies which divisor degenerated or failed its re-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisorKind {
    /// `(z^n - 1) / (z - g^(n-1))`.
    Transition,
    /// `z - g^step` of one boundary assertion.
    Boundary {
        /// Assertion index in canonical order.
        assertion: usize,
        /// Row the assertion is pinned to.
        step: usize,
    },
}

impl fmt::Display for DivisorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DivisorKind::Transition => f.write_str("transition divisor"),
            DivisorKind::Boundary { assertion, step } => {
                write!(f, "boundary divisor of assertion {assertion} (step {step})")
            }
        }
    }
}

/// Failure outcomes of [`OodVerifier`](super::OodVerifier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OodError {
    /// Channel combination and constraint accumulation disagree.
    ConsistencyViolation {
        /// Canonical value folded from the channel evaluations.
        channel: u64,
        /// Canonical value of the final constraint accumulator.
        constraints: u64,
    },
    /// A divisor evaluates to zero at the OOD point.
    DegenerateDivisor {
        /// The divisor that vanished.
        divisor: DivisorKind,
    },
    /// An input vector does not match the configured layout.
    ShapeMismatch {
        /// Input that failed validation.
        what: &'static str,
        /// Length required by the parameters.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
    /// Degree metadata would push an adjustment exponent out of range.
    DegreeOutOfRange {
        /// Metadata kind.
        what: &'static str,
        /// Column or assertion index.
        index: usize,
        /// Declared degree.
        degree: usize,
        /// Largest admissible degree.
        max: u64,
    },
    /// A boundary assertion references a row outside the trace.
    AssertionStepOutOfRange {
        /// Assertion index in canonical order.
        assertion: usize,
        /// Declared row.
        step: usize,
        /// Number of trace rows.
        trace_length: usize,
    },
    /// A runtime exponent exceeded its declared bit width.
    ExponentOutOfRange {
        /// Requested exponent.
        exponent: u64,
        /// Declared bit width.
        bits: u32,
    },
    /// The multiplication re-check of an inverse-based quotient failed.
    QuotientMismatch {
        /// Divisor whose quotient failed the re-check.
        divisor: DivisorKind,
    },
    /// A constraint evaluator failed.
    Air(AirError),
    /// The verifier parameters are invalid.
    Params(ParamsError),
}

impl OodError {
    /// Returns `true` when the proof itself was rejected.
    pub fn is_rejection(&self) -> bool {
        matches!(self, OodError::ConsistencyViolation { .. })
    }

    /// Returns `true` when the OOD point fell on a divisor root.
    pub fn is_degenerate_point(&self) -> bool {
        matches!(self, OodError::DegenerateDivisor { .. })
    }
}

impl fmt::Display for OodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OodError::ConsistencyViolation {
                channel,
                constraints,
            } => write!(
                f,
                "ood consistency violated: channel {channel} != constraints {constraints}"
            ),
            OodError::DegenerateDivisor { divisor } => {
                write!(f, "{divisor} vanishes at the ood point")
            }
            OodError::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "shape mismatch for {what}: expected {expected}, got {actual}"
            ),
            OodError::DegreeOutOfRange {
                what,
                index,
                degree,
                max,
            } => write!(f, "{what} {index} has degree {degree} above {max}"),
            OodError::AssertionStepOutOfRange {
                assertion,
                step,
                trace_length,
            } => write!(
                f,
                "assertion {assertion} pinned to step {step} outside trace of length {trace_length}"
            ),
            OodError::ExponentOutOfRange { exponent, bits } => {
                write!(f, "exponent {exponent} does not fit in {bits} bits")
            }
            OodError::QuotientMismatch { divisor } => {
                write!(f, "quotient re-check failed for {divisor}")
            }
            OodError::Air(err) => write!(f, "air evaluation failed: {err}"),
            OodError::Params(err) => write!(f, "invalid verifier parameters: {err}"),
        }
    }
}

impl std::error::Error for OodError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OodError::Air(err) => Some(err),
            OodError::Params(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AirError> for OodError {
    fn from(err: AirError) -> Self {
        OodError::Air(err)
    }
}

impl From<ParamsError> for OodError {
    fn from(err: ParamsError) -> Self {
        OodError::Params(err)
    }
}

impl From<ExponentOverflow> for OodError {
    fn from(err: ExponentOverflow) -> Self {
        OodError::ExponentOutOfRange {
            exponent: err.exponent,
            bits: err.bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_split_rejection_from_degenerate_points() {
        let rejected = OodError::ConsistencyViolation {
            channel: 30,
            constraints: 31,
        };
        assert!(rejected.is_rejection());
        assert!(!rejected.is_degenerate_point());

        let degenerate = OodError::DegenerateDivisor {
            divisor: DivisorKind::Transition,
        };
        assert!(degenerate.is_degenerate_point());
        assert!(!degenerate.is_rejection());
    }

    #[test]
    fn conversions_keep_detail() {
        let err: OodError = ExponentOverflow {
            exponent: 9,
            bits: 3,
        }
        .into();
        assert_eq!(
            err,
            OodError::ExponentOutOfRange {
                exponent: 9,
                bits: 3
            }
        );
        let err: OodError = AirError::LayoutViolation("x").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
