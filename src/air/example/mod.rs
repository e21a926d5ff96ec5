//! Example AIR definitions used in documentation, tests and benchmarks.
//!
//! Every example pins its assertions to single rows, so each boundary
//! residue is divided by a single pole `z - g^step` of degree one.

pub mod cube;
pub mod fibonacci;
pub mod lfsr;

pub use self::cube::CubeAir;
pub use self::fibonacci::FibonacciAir;
pub use self::lfsr::LfsrAir;

use crate::air::types::{AirError, Assertion, BoundaryEvaluation, EvaluationFrame};
use crate::field::PrimeField;

/// Divisor degree declared for single-row assertions.
pub const SINGLE_POLE_DEGREE: usize = 1;

/// Validates the trace length shared by every example.
fn check_trace_length(trace_length: usize) -> Result<(), AirError> {
    if trace_length < 2 {
        return Err(AirError::LayoutViolation(
            "example trace length must contain at least two rows",
        ));
    }
    if !trace_length.is_power_of_two() {
        return Err(AirError::LayoutViolation(
            "example trace length must be a power of two",
        ));
    }
    Ok(())
}

/// Rejects public-input vectors of the wrong length.
fn check_public_inputs<F>(public_inputs: &[F], expected: usize) -> Result<(), AirError> {
    if public_inputs.len() != expected {
        return Err(AirError::SchemaMismatch {
            what: "public input count",
            expected,
            actual: public_inputs.len(),
        });
    }
    Ok(())
}

/// Evaluates single-pole assertions on the OOD frame.
fn single_pole_boundaries<F: PrimeField>(
    assertions: &[Assertion<F>],
    frame: &EvaluationFrame<F>,
) -> Result<BoundaryEvaluation<F>, AirError> {
    let mut evaluations = Vec::with_capacity(assertions.len());
    for assertion in assertions {
        evaluations.push(crate::air::types::AssertionEvaluation {
            residue: assertion.residue(frame)?,
            divisor_degree: SINGLE_POLE_DEGREE,
            step: assertion.step,
        });
    }
    Ok(BoundaryEvaluation::new(evaluations))
}
