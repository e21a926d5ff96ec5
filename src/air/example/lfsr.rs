//! Linear-feedback shift register example AIR.
//!
//! A single register evolves as `next = ALPHA * current + BETA`. The public
//! inputs are the seed (asserted on the first row) and the final state
//! (asserted on the last row). The transition residue is linear in the
//! trace polynomial, so its degree is `trace_length - 1`.

use crate::air::trace::TraceTable;
use crate::air::traits::{Air, BoundaryEvaluator, TransitionEvaluator};
use crate::air::types::{
    AirError, Assertion, BoundaryEvaluation, ColIx, EvaluationFrame, TransitionEvaluation,
};
use crate::field::PrimeField;

use super::{check_public_inputs, check_trace_length, single_pole_boundaries};

/// Column index used throughout the example.
const STATE_COL: ColIx = ColIx::new(0);
/// Multiplicative factor applied during the transition.
const ALPHA: u64 = 5;
/// Additive tweak applied during the transition.
const BETA: u64 = 7;
/// Public inputs: seed and final state.
const NUM_PUBLIC_INPUTS: usize = 2;

/// Single-register LFSR constraint system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LfsrAir {
    trace_length: usize,
}

impl LfsrAir {
    /// Creates the AIR for a trace of `trace_length` rows.
    pub fn new(trace_length: usize) -> Result<Self, AirError> {
        check_trace_length(trace_length)?;
        Ok(Self { trace_length })
    }

    /// Identifier reported in logs.
    pub const ID: &'static str = "lfsr-v1";

    /// Generates the deterministic trace starting from `seed`.
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
        let column = trace.column(STATE_COL)?;
        let last = self.trace_length - 1;
        match (column.first(), column.get(last)) {
            (Some(seed), Some(last)) => Ok(vec![*seed, *last]),
            _ => Err(AirError::SchemaMismatch {
                what: "trace row count",
                expected: self.trace_length,
                actual: column.len(),
            }),
        }
    }

    /// Boundary assertions implied by the public inputs.
    pub fn assertions<F: PrimeField>(
        &self,
        public_inputs: &[F],
    ) -> Result<Vec<Assertion<F>>, AirError> {
        check_public_inputs(public_inputs, NUM_PUBLIC_INPUTS)?;
        Ok(vec![
            Assertion::new(STATE_COL, 0, public_inputs[0]),
            Assertion::new(STATE_COL, self.trace_length - 1, public_inputs[1]),
        ])
    }
}

fn next_state<F: PrimeField>(current: F) -> F {
    F::from(ALPHA).mul(&current).add(&F::from(BETA))
}

impl<F: PrimeField> TransitionEvaluator<F> for LfsrAir {
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
        TransitionEvaluation::new(vec![residue], vec![self.trace_length - 1])
    }
}

impl<F: PrimeField> BoundaryEvaluator<F> for LfsrAir {
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

impl<F: PrimeField> Air<F> for LfsrAir {
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
        NUM_PUBLIC_INPUTS
    }
}
