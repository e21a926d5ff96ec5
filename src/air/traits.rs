//! Evaluator contracts between concrete AIR definitions and the OOD check.
//!
//! The verifier never inspects constraint formulas directly. It receives the
//! residues an AIR produces for the OOD frame together with the degree and
//! divisor metadata needed to normalise them. Implementations are selected at
//! configuration time by choosing which [`Air`] value to pass in.

use crate::config::{OodParams, OodParamsBuilder, ParamsError};
use crate::field::PrimeField;

use super::types::{AirError, BoundaryEvaluation, EvaluationFrame, TransitionEvaluation};

/// Produces per-column transition residues for a two-row frame.
pub trait TransitionEvaluator<F: PrimeField> {
    /// Evaluates every transition constraint on `frame`.
    ///
    /// The returned evaluation holds one residue and one degree per trace
    /// column, in column order.
    fn evaluate_transitions(
        &self,
        frame: &EvaluationFrame<F>,
    ) -> Result<TransitionEvaluation<F>, AirError>;
}

/// Produces per-assertion boundary residues.
pub trait BoundaryEvaluator<F: PrimeField> {
    /// Evaluates every boundary assertion on `frame`.
    ///
    /// `g_trace` and `z` are passed through for evaluators whose residues
    /// depend on the domain, such as assertions pinned relative to the last
    /// row.
    fn evaluate_boundaries(
        &self,
        frame: &EvaluationFrame<F>,
        public_inputs: &[F],
        g_trace: F,
        z: F,
    ) -> Result<BoundaryEvaluation<F>, AirError>;
}

/// A compiled constraint system: both evaluators plus its fixed layout.
pub trait Air<F: PrimeField>: TransitionEvaluator<F> + BoundaryEvaluator<F> {
    /// Stable identifier used in logs.
    fn id(&self) -> &'static str;

    /// Number of trace columns.
    fn trace_width(&self) -> usize;

    /// Number of trace rows.
    fn trace_length(&self) -> usize;

    /// Number of boundary assertions the evaluator emits.
    fn num_assertions(&self) -> usize;

    /// Number of public inputs the boundary evaluator consumes.
    fn num_public_inputs(&self) -> usize;

    /// Derives the verifier parameters matching this AIR's layout.
    fn ood_params(&self, ce_blowup_factor: usize) -> Result<OodParams, ParamsError> {
        OodParamsBuilder {
            trace_length: self.trace_length(),
            trace_width: self.trace_width(),
            num_assertions: self.num_assertions(),
            ce_blowup_factor,
            num_public_inputs: self.num_public_inputs(),
        }
        .build()
    }
}
