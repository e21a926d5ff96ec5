//! Reference composition of constraint evaluations.
//!
//! The composer produces the honest prover side of the OOD check. It runs the
//! verifier's constraint accumulation pointwise on a coset of the
//! composition domain, interpolates the resulting composition polynomial `C`
//! and splits it into trace-width columns with `C(x) = sum_i x^i C_i(x^W)`.
//! Evaluating each column at `z^W` yields channel evaluations that the
//! verifier accepts at any `z` outside the trace domain.

use core::fmt;

use crate::air::trace::TraceTable;
use crate::air::traits::Air;
use crate::air::types::{AirError, CoefficientPair};
use crate::config::OodParams;
use crate::field::{Polynomial, PrimeField};
use crate::ood::{OodError, OodVerifier};
use crate::utils::{try_map_indices, Execution};

/// Composition polynomial together with its column split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionPolynomial<F> {
    full: Polynomial<F>,
    columns: Vec<Polynomial<F>>,
}

impl<F: PrimeField> CompositionPolynomial<F> {
    /// The unsplit composition polynomial.
    pub fn polynomial(&self) -> &Polynomial<F> {
        &self.full
    }

    /// Column polynomials `C_i` in column order.
    pub fn columns(&self) -> &[Polynomial<F>] {
        &self.columns
    }

    /// Evaluates `C(z)` directly.
    pub fn evaluate(&self, z: F) -> F {
        self.full.evaluate(z)
    }

    /// Honest channel evaluations `C_i(z^W)`.
    pub fn channel_evaluations(&self, z: F) -> Vec<F> {
        let shifted = z.pow(self.columns.len() as u64);
        self.columns
            .iter()
            .map(|column| column.evaluate(shifted))
            .collect()
    }
}

/// Builds composition polynomials for a fixed parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceComposer {
    params: OodParams,
    execution: Execution,
}

impl ReferenceComposer {
    /// Creates a composer for `params` using the process-wide execution
    /// default.
    pub fn new(params: OodParams) -> Self {
        Self {
            params,
            execution: Execution::from_default(),
        }
    }

    /// Selects how coset points are evaluated.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Composes `air`'s constraints over `trace`.
    #[tracing::instrument(skip_all, name = "ReferenceComposer::compose", fields(air = air.id()))]
    pub fn compose<F, A>(
        &self,
        air: &A,
        trace: &TraceTable<F>,
        public_inputs: &[F],
        transition_coeffs: &[CoefficientPair<F>],
        boundary_coeffs: &[CoefficientPair<F>],
    ) -> Result<CompositionPolynomial<F>, CompositionError>
    where
        F: PrimeField,
        A: Air<F> + Sync + ?Sized,
    {
        let params = &self.params;
        if trace.num_columns() != params.trace_width() {
            return Err(AirError::SchemaMismatch {
                what: "trace column count",
                expected: params.trace_width(),
                actual: trace.num_columns(),
            }
            .into());
        }
        if trace.num_rows() != params.trace_length() {
            return Err(AirError::SchemaMismatch {
                what: "trace row count",
                expected: params.trace_length(),
                actual: trace.num_rows(),
            }
            .into());
        }

        let trace_polys = trace.interpolate()?;
        let g_trace = trace_polys.g_trace();
        let size = params.composition_domain_size();
        let root = F::root_of_unity(size).ok_or(CompositionError::DomainUnsupported { size })?;
        let shift = F::GENERATOR;
        let verifier = OodVerifier::new(*params).with_execution(Execution::Serial);

        let points = size as usize;
        let evaluate_at = |index: usize| -> Result<F, CompositionError> {
            let x = shift.mul(&root.pow(index as u64));
            let frame = trace_polys.frame_at(x)?;
            let transition = air.evaluate_transitions(&frame)?;
            let boundary = air.evaluate_boundaries(&frame, public_inputs, g_trace, x)?;
            let accumulation = verifier.accumulate(
                x,
                g_trace,
                transition_coeffs,
                boundary_coeffs,
                &transition,
                &boundary,
            )?;
            Ok(accumulation.final_value)
        };

        let values = try_map_indices(points, self.execution, evaluate_at)?;

        let full = Polynomial::interpolate_coset(&values, shift, root)
            .ok_or(CompositionError::DomainUnsupported { size })?;
        let columns = full.split_columns(params.trace_width());
        Ok(CompositionPolynomial { full, columns })
    }
}

/// Failures while composing an honest proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    /// The field has no subgroup of the composition domain's size.
    DomainUnsupported {
        /// Requested domain size.
        size: u64,
    },
    /// The AIR or the trace rejected the inputs.
    Air(AirError),
    /// Constraint accumulation failed at a domain point.
    Ood(OodError),
}

impl fmt::Display for CompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositionError::DomainUnsupported { size } => {
                write!(f, "no composition domain of size {size} in the field")
            }
            CompositionError::Air(err) => write!(f, "composition air failure: {err}"),
            CompositionError::Ood(err) => write!(f, "composition accumulation failure: {err}"),
        }
    }
}

impl std::error::Error for CompositionError {}

impl From<AirError> for CompositionError {
    fn from(err: AirError) -> Self {
        CompositionError::Air(err)
    }
}

impl From<OodError> for CompositionError {
    fn from(err: OodError) -> Self {
        CompositionError::Ood(err)
    }
}
