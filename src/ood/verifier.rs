//! Entry points of the OOD consistency check.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::air::{
    Air, BoundaryEvaluation, CoefficientPair, EvaluationFrame, TransitionEvaluation,
};
use crate::config::OodParams;
use crate::field::PrimeField;
use crate::utils::Execution;
use crate::OodResult;

use super::accumulator::{fold_boundaries, fold_transitions, FoldStrategy};
use super::channel::combine_channel_evaluations;
use super::check::check_consistency;
use super::degree::DegreeNormalizer;
use super::divisor::TransitionDivisor;
use super::errors::OodError;

/// Evaluated inputs of one OOD check.
///
/// Residues are taken as already produced by the AIR evaluators; use
/// [`OodVerifier::verify_with_air`] to run the evaluators on a frame first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OodInputs<F> {
    /// OOD evaluation point.
    pub z: F,
    /// Generator of the trace domain.
    pub g_trace: F,
    /// One weighting pair per trace column.
    pub transition_coeffs: Vec<CoefficientPair<F>>,
    /// One weighting pair per boundary assertion.
    pub boundary_coeffs: Vec<CoefficientPair<F>>,
    /// Transition residues and degrees at `z`.
    pub transition: TransitionEvaluation<F>,
    /// Boundary residues, divisor degrees and steps at `z`.
    pub boundary: BoundaryEvaluation<F>,
    /// Prover-claimed composition-column evaluations.
    pub channel_ood_evaluations: Vec<F>,
}

/// Raw inputs of one OOD check, before the AIR evaluators have run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "F: PrimeField + Deserialize<'de>"))]
pub struct FrameInputs<F> {
    /// OOD evaluation point.
    pub z: F,
    /// Generator of the trace domain.
    pub g_trace: F,
    /// Trace rows evaluated at `z` and `g * z`.
    pub frame: EvaluationFrame<F>,
    /// Values consumed by the boundary evaluator.
    pub public_inputs: Vec<F>,
    /// One weighting pair per trace column.
    pub transition_coeffs: Vec<CoefficientPair<F>>,
    /// One weighting pair per boundary assertion.
    pub boundary_coeffs: Vec<CoefficientPair<F>>,
    /// Prover-claimed composition-column evaluations.
    pub channel_ood_evaluations: Vec<F>,
}

/// Intermediate values of the constraint side of the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintAccumulation<F> {
    /// Transition fold divided by the transition divisor.
    pub transition_result: F,
    /// Accumulator after the last boundary assertion.
    pub final_value: F,
}

/// OOD consistency verifier bound to one parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OodVerifier {
    params: OodParams,
    strategy: FoldStrategy,
    execution: Execution,
}

impl OodVerifier {
    /// Creates a verifier using the sequential fold and the process-wide
    /// execution default.
    pub fn new(params: OodParams) -> Self {
        Self {
            params,
            strategy: FoldStrategy::default(),
            execution: Execution::from_default(),
        }
    }

    /// Selects the fold strategy.
    pub fn with_strategy(mut self, strategy: FoldStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Selects how reduction terms are scheduled.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Parameters the verifier checks against.
    pub fn params(&self) -> &OodParams {
        &self.params
    }

    /// Active fold strategy.
    pub fn strategy(&self) -> FoldStrategy {
        self.strategy
    }

    /// Execution mode of the reduction fold.
    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Runs both folds without consulting the channel evaluations.
    pub fn evaluate_constraints<F: PrimeField>(
        &self,
        inputs: &OodInputs<F>,
    ) -> Result<ConstraintAccumulation<F>, OodError> {
        self.accumulate(
            inputs.z,
            inputs.g_trace,
            &inputs.transition_coeffs,
            &inputs.boundary_coeffs,
            &inputs.transition,
            &inputs.boundary,
        )
    }

    /// Checks already evaluated residues against the channel evaluations.
    #[tracing::instrument(skip_all, name = "OodVerifier::verify")]
    pub fn verify<F: PrimeField>(&self, inputs: &OodInputs<F>) -> OodResult<()> {
        self.expect_len(
            "channel evaluations",
            self.params.trace_width(),
            inputs.channel_ood_evaluations.len(),
        )?;
        let accumulation = self.evaluate_constraints(inputs)?;
        self.finish(&inputs.channel_ood_evaluations, inputs.z, &accumulation)
    }

    /// Runs `air`'s evaluators on the frame and checks the result.
    #[tracing::instrument(skip_all, name = "OodVerifier::verify_with_air", fields(air = air.id()))]
    pub fn verify_with_air<F, A>(&self, air: &A, inputs: &FrameInputs<F>) -> OodResult<()>
    where
        F: PrimeField,
        A: Air<F> + ?Sized,
    {
        let params = &self.params;
        self.expect_len("air trace width", params.trace_width(), air.trace_width())?;
        self.expect_len("air trace length", params.trace_length(), air.trace_length())?;
        self.expect_len(
            "air assertion count",
            params.num_assertions(),
            air.num_assertions(),
        )?;
        self.expect_len(
            "air public input count",
            params.num_public_inputs(),
            air.num_public_inputs(),
        )?;
        self.expect_len("frame width", params.trace_width(), inputs.frame.width())?;
        self.expect_len(
            "public inputs",
            params.num_public_inputs(),
            inputs.public_inputs.len(),
        )?;
        self.expect_len(
            "channel evaluations",
            params.trace_width(),
            inputs.channel_ood_evaluations.len(),
        )?;

        let transition = air.evaluate_transitions(&inputs.frame)?;
        let boundary = air.evaluate_boundaries(
            &inputs.frame,
            &inputs.public_inputs,
            inputs.g_trace,
            inputs.z,
        )?;
        let accumulation = self.accumulate(
            inputs.z,
            inputs.g_trace,
            &inputs.transition_coeffs,
            &inputs.boundary_coeffs,
            &transition,
            &boundary,
        )?;
        self.finish(&inputs.channel_ood_evaluations, inputs.z, &accumulation)
    }

    pub(crate) fn accumulate<F: PrimeField>(
        &self,
        z: F,
        g_trace: F,
        transition_coeffs: &[CoefficientPair<F>],
        boundary_coeffs: &[CoefficientPair<F>],
        transition: &TransitionEvaluation<F>,
        boundary: &BoundaryEvaluation<F>,
    ) -> Result<ConstraintAccumulation<F>, OodError> {
        let width = self.params.trace_width();
        let assertions = self.params.num_assertions();
        self.expect_len("transition residues", width, transition.residues.len())?;
        self.expect_len("transition degrees", width, transition.degrees.len())?;
        self.expect_len("transition coefficients", width, transition_coeffs.len())?;
        self.expect_len("boundary assertions", assertions, boundary.len())?;
        self.expect_len("boundary coefficients", assertions, boundary_coeffs.len())?;
        debug!(
            width,
            assertions,
            strategy = ?self.strategy,
            execution = ?self.execution,
            "evaluating ood constraints"
        );

        let divisor = TransitionDivisor::evaluate(z, g_trace, &self.params).inspect_err(|err| {
            if err.is_degenerate_point() {
                warn!(%z, "ood point lies in the trace domain");
            }
        })?;
        let normalizer = DegreeNormalizer::new(z, self.params);
        let transition_result = fold_transitions(
            &normalizer,
            transition_coeffs,
            transition,
            &divisor,
            self.strategy,
            self.execution,
        )?;
        let final_value = fold_boundaries(
            &normalizer,
            g_trace,
            boundary_coeffs,
            boundary,
            transition_result,
            self.strategy,
            self.execution,
        )
        .inspect_err(|err| {
            if err.is_degenerate_point() {
                warn!(%z, "ood point coincides with a boundary pole");
            }
        })?;
        Ok(ConstraintAccumulation {
            transition_result,
            final_value,
        })
    }

    fn finish<F: PrimeField>(
        &self,
        channel_evaluations: &[F],
        z: F,
        accumulation: &ConstraintAccumulation<F>,
    ) -> Result<(), OodError> {
        let channel = combine_channel_evaluations(channel_evaluations, z);
        check_consistency(channel, accumulation.final_value)?;
        debug!(value = %channel, "ood consistency check passed");
        Ok(())
    }

    fn expect_len(&self, what: &'static str, expected: usize, actual: usize) -> Result<(), OodError> {
        if expected != actual {
            return Err(OodError::ShapeMismatch {
                what,
                expected,
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::air::AssertionEvaluation;
    use crate::config::OodParamsBuilder;

    type F97 = crate::field::Fp<97, 5>;

    fn worked_inputs(channel: u64) -> OodInputs<F97> {
        OodInputs {
            z: F97::new(5),
            g_trace: F97::new(96),
            transition_coeffs: vec![CoefficientPair::new(F97::new(2), F97::new(3))],
            boundary_coeffs: vec![CoefficientPair::new(F97::ONE, F97::ONE)],
            transition: TransitionEvaluation::new(vec![F97::new(10)], vec![1]).unwrap(),
            boundary: BoundaryEvaluation::new(vec![AssertionEvaluation {
                residue: F97::new(5),
                divisor_degree: 0,
                step: 0,
            }]),
            channel_ood_evaluations: vec![F97::new(channel)],
        }
    }

    fn verifier() -> OodVerifier {
        let params = OodParamsBuilder {
            trace_length: 2,
            trace_width: 1,
            num_assertions: 1,
            ce_blowup_factor: 2,
            num_public_inputs: 0,
        }
        .build()
        .unwrap();
        OodVerifier::new(params)
    }

    #[test]
    fn intermediate_values_match_hand_computation() {
        let accumulation = verifier().evaluate_constraints(&worked_inputs(0)).unwrap();
        assert_eq!(accumulation.transition_result, F97::new(47));
        assert_eq!(accumulation.final_value, F97::new(31));
    }

    #[test]
    fn channel_length_is_checked_first() {
        let mut inputs = worked_inputs(31);
        inputs.channel_ood_evaluations.clear();
        inputs.transition_coeffs.clear();
        assert_eq!(
            verifier().verify(&inputs).unwrap_err(),
            OodError::ShapeMismatch {
                what: "channel evaluations",
                expected: 1,
                actual: 0
            }
        );
    }

    fn decode_frame_inputs<F>(json: &str) -> serde_json::Result<FrameInputs<F>>
    where
        F: PrimeField + serde::de::DeserializeOwned,
    {
        serde_json::from_str(json)
    }

    #[test]
    fn frame_inputs_decode_through_validated_frame() {
        let inputs = FrameInputs {
            z: F97::new(5),
            g_trace: F97::new(96),
            frame: EvaluationFrame::new(vec![F97::new(3)], vec![F97::new(22)]).unwrap(),
            public_inputs: vec![F97::new(3), F97::new(10)],
            transition_coeffs: vec![CoefficientPair::new(F97::new(2), F97::new(3))],
            boundary_coeffs: vec![CoefficientPair::new(F97::ONE, F97::ONE)],
            channel_ood_evaluations: vec![F97::new(31)],
        };
        let json = serde_json::to_string(&inputs).unwrap();
        assert_eq!(decode_frame_inputs::<F97>(&json).unwrap(), inputs);

        let ragged = json.replace(r#""next":[22]"#, r#""next":[22,1]"#);
        assert_ne!(ragged, json);
        let err = decode_frame_inputs::<F97>(&ragged).unwrap_err();
        assert!(err.to_string().contains("frame next-row width"));
    }

    #[test]
    fn execution_mode_is_chosen_per_verifier() {
        let serial = verifier()
            .with_strategy(FoldStrategy::Reduction)
            .with_execution(Execution::Serial);
        let parallel = serial.with_execution(Execution::Parallel);
        assert_eq!(serial.execution(), Execution::Serial);
        assert_eq!(parallel.execution(), Execution::Parallel);
        assert_eq!(
            serial.evaluate_constraints(&worked_inputs(0)).unwrap(),
            parallel.evaluate_constraints(&worked_inputs(0)).unwrap()
        );
        assert!(parallel.verify(&worked_inputs(31)).is_ok());
    }

    #[test]
    fn shape_errors_precede_arithmetic() {
        let mut inputs = worked_inputs(31);
        inputs.z = F97::new(96);
        inputs.boundary_coeffs.push(CoefficientPair::new(F97::ONE, F97::ONE));
        assert_eq!(
            verifier().verify(&inputs).unwrap_err(),
            OodError::ShapeMismatch {
                what: "boundary coefficients",
                expected: 1,
                actual: 2
            }
        );
    }
}
