//! Cubic recurrence example AIR.
//!
//! A single register evolves as `next = current^3 + BETA`. The transition
//! residue has degree `3 * (trace_length - 1)`, so the composition domain
//! needs a blowup factor of at least four for traces longer than two rows.

use crate::air::trace::TraceTable;
use crate::air::traits::{Air, BoundaryEvaluator, TransitionEvaluator};
use crate::air::types::{
    AirError, Assertion, BoundaryEvaluation, ColIx, EvaluationFrame, TransitionEvaluation,
};
use crate::field::{pow_fixed, PrimeField};

use super::{check_public_inputs, check_trace_length, single_pole_boundaries};

const STATE_COL: ColIx = ColIx::new(0);
const BETA: u64 = 11;
/// Algebraic degree of the recurrence.
const CONSTRAINT_DEGREE: usize = 3;

/// Single-register cubic recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeAir {
    trace_length: usize,
}

impl CubeAir {
    /// Identifier reported in logs.
    pub const ID: &'static str = "cube-v1";

    /// Creates the AIR for a trace of `trace_length` rows.
    pub fn new(trace_length: usize) -> Result<Self, AirError> {
        check_trace_length(trace_length)?;
        Ok(Self { trace_length })
    }

    /// Generates the trace starting from `seed`.
    pub fn generate_trace<F: PrimeField>(&self, seed: F) -> Result<TraceTable<F>, AirError> {
        let mut column = Vec::with_capacity(self.trace_length);
        let mut state = seed;
        for _ in 0..self.trace_length {
            column.push(state);
            state = next_state(state);
        }
        TraceTable::from_columns(vec![column])
    }

    /// Extracts `[seed, final]` from an honest trace.
    pub fn public_inputs<F: PrimeField>(&self, trace: &TraceTable<F>) -> Result<Vec<F>, AirError> {
        let first = trace.row(0)?;
        let last = trace.row(self.trace_length - 1)?;
        Ok(vec![first[0], last[0]])
    }

    /// Boundary assertions implied by the public inputs.
    pub fn assertions<F: PrimeField>(
        &self,
        public_inputs: &[F],
    ) -> Result<Vec<Assertion<F>>, AirError> {
        check_public_inputs(public_inputs, 2)?;
        Ok(vec![
            Assertion::new(STATE_COL, 0, public_inputs[0]),
            Assertion::new(STATE_COL, self.trace_length - 1, public_inputs[1]),
        ])
    }
}

fn next_state<F: PrimeField>(current: F) -> F {
    pow_fixed::<F, 3>(current).add(&F::from(BETA))
}

impl<F: PrimeField> TransitionEvaluator<F> for CubeAir {
    fn evaluate_transitions(
        &self,
        frame: &EvaluationFrame<F>,
    ) -> Result<TransitionEvaluation<F>, AirError> {
        if frame.width() != 1 {
            return Err(AirError::SchemaMismatch {
                what: "frame width",
                expected: 1,
                actual: frame.width(),
            });
        }
        let residue = frame.next()[0].sub(&next_state(frame.current()[0]));
        TransitionEvaluation::new(
            vec![residue],
            vec![CONSTRAINT_DEGREE * (self.trace_length - 1)],
        )
    }
}

impl<F: PrimeField> BoundaryEvaluator<F> for CubeAir {
    fn evaluate_boundaries(
        &self,
        frame: &EvaluationFrame<F>,
        public_inputs: &[F],
        _g_trace: F,
        _z: F,
    ) -> Result<BoundaryEvaluation<F>, AirError> {
        single_pole_boundaries(&self.assertions(public_inputs)?, frame)
    }
}

impl<F: PrimeField> Air<F> for CubeAir {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn trace_width(&self) -> usize {
        1
    }

    fn trace_length(&self) -> usize {
        self.trace_length
    }

    fn num_assertions(&self) -> usize {
        2
    }

    fn num_public_inputs(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type F97 = crate::field::Fp<97, 5>;

    #[test]
    fn trace_follows_cubic_recurrence() {
        let air = CubeAir::new(4).unwrap();
        let trace = air.generate_trace(F97::new(2)).unwrap();
        // 2 -> 19 -> 6870 mod 97 = 80 -> ...
        let column = trace.column(STATE_COL).unwrap();
        assert_eq!(column[1], F97::new(19));
        assert_eq!(column[2], F97::new(80));
        trace.validate_transitions(&air).unwrap();
    }

    #[test]
    fn declared_degree_tracks_trace_length() {
        let air = CubeAir::new(8).unwrap();
        let frame = EvaluationFrame::new(vec![F97::ONE], vec![F97::new(12)]).unwrap();
        let evaluation = air.evaluate_transitions(&frame).unwrap();
        assert_eq!(evaluation.residues, vec![F97::ZERO]);
        assert_eq!(evaluation.degrees, vec![21]);
    }
}
