//! Two-register Fibonacci example AIR.
//!
//! Registers `(a, b)` evolve as `a' = b`, `b' = a + b`, starting from
//! `(1, 1)`. The single public input is the value of `b` on the last row.

use crate::air::trace::TraceTable;
use crate::air::traits::{Air, BoundaryEvaluator, TransitionEvaluator};
use crate::air::types::{
    AirError, Assertion, BoundaryEvaluation, ColIx, EvaluationFrame, TransitionEvaluation,
};
use crate::field::PrimeField;

use super::{check_public_inputs, check_trace_length, single_pole_boundaries};

const A_COL: ColIx = ColIx::new(0);
const B_COL: ColIx = ColIx::new(1);
const WIDTH: usize = 2;

/// Fibonacci constraint system over two columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FibonacciAir {
    trace_length: usize,
}

impl FibonacciAir {
    /// Identifier reported in logs.
    pub const ID: &'static str = "fibonacci-v1";

    /// Creates the AIR for a trace of `trace_length` rows.
    pub fn new(trace_length: usize) -> Result<Self, AirError> {
        check_trace_length(trace_length)?;
        Ok(Self { trace_length })
    }

    /// Generates the trace starting from `(1, 1)`.
    pub fn generate_trace<F: PrimeField>(&self) -> Result<TraceTable<F>, AirError> {
        let mut a_col = Vec::with_capacity(self.trace_length);
        let mut b_col = Vec::with_capacity(self.trace_length);
        let (mut a, mut b) = (F::ONE, F::ONE);
        for _ in 0..self.trace_length {
            a_col.push(a);
            b_col.push(b);
            (a, b) = (b, a.add(&b));
        }
        TraceTable::from_columns(vec![a_col, b_col])
    }

    /// Extracts the claimed result (last `b`) from an honest trace.
    pub fn public_inputs<F: PrimeField>(&self, trace: &TraceTable<F>) -> Result<Vec<F>, AirError> {
        Ok(vec![trace.row(self.trace_length - 1)?[B_COL.as_usize()]])
    }

    /// Boundary assertions: `a_0 = 1`, `b_0 = 1`, `b_{n-1} = result`.
    pub fn assertions<F: PrimeField>(
        &self,
        public_inputs: &[F],
    ) -> Result<Vec<Assertion<F>>, AirError> {
        check_public_inputs(public_inputs, 1)?;
        Ok(vec![
            Assertion::new(A_COL, 0, F::ONE),
            Assertion::new(B_COL, 0, F::ONE),
            Assertion::new(B_COL, self.trace_length - 1, public_inputs[0]),
        ])
    }
}

impl<F: PrimeField> TransitionEvaluator<F> for FibonacciAir {
    fn evaluate_transitions(
        &self,
        frame: &EvaluationFrame<F>,
    ) -> Result<TransitionEvaluation<F>, AirError> {
        if frame.width() != WIDTH {
            return Err(AirError::SchemaMismatch {
                what: "frame width",
                expected: WIDTH,
                actual: frame.width(),
            });
        }
        let (cur, next) = (frame.current(), frame.next());
        let residues = vec![next[0].sub(&cur[1]), next[1].sub(&cur[0].add(&cur[1]))];
        TransitionEvaluation::new(residues, vec![self.trace_length - 1; WIDTH])
    }
}

impl<F: PrimeField> BoundaryEvaluator<F> for FibonacciAir {
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

impl<F: PrimeField> Air<F> for FibonacciAir {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn trace_width(&self) -> usize {
        WIDTH
    }

    fn trace_length(&self) -> usize {
        self.trace_length
    }

    fn num_assertions(&self) -> usize {
        3
    }

    fn num_public_inputs(&self) -> usize {
        1
    }
}
