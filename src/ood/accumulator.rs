//! Transition and boundary folds sharing one running accumulator.
//!
//! The transition fold sums the weighted column residues and divides the sum
//! by the transition divisor. The boundary fold continues from that quotient
//! and adds each weighted assertion residue divided by its own pole.
//!
//! [`FoldStrategy::Sequential`] threads a [`RunningAccumulator`] through the
//! items in order and re-checks `(new - old) * divisor == product` at every
//! boundary step. [`FoldStrategy::Reduction`] computes every term first,
//! re-checking each boundary quotient on its own, and then sums the terms as
//! a balanced tree. With the `parallel` feature and [`Execution::Parallel`]
//! the terms and the reduction run on rayon. Field addition is associative
//! and commutative, so every combination agrees.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::air::{BoundaryEvaluation, CoefficientPair, TransitionEvaluation};
use crate::field::PrimeField;
use crate::utils::{try_map_indices, Execution};

use super::degree::DegreeNormalizer;
use super::divisor::{BoundaryDivisor, SinglePoleDivisor, TransitionDivisor};
use super::errors::OodError;

/// How the per-item terms are folded into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FoldStrategy {
    /// Left-to-right scan over a single running value.
    #[default]
    Sequential,
    /// Independent per-item terms summed as a balanced reduction.
    Reduction,
}

/// Running value threaded through both folds.
///
/// An empty accumulator takes the first absorbed product as its value; the
/// boundary fold starts from a seeded accumulator instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunningAccumulator<F> {
    value: Option<F>,
}

impl<F: PrimeField> RunningAccumulator<F> {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Creates an accumulator continuing from `seed`.
    pub fn seeded(seed: F) -> Self {
        Self { value: Some(seed) }
    }

    /// Current value (zero when nothing has been absorbed).
    pub fn value(&self) -> F {
        self.value.unwrap_or(F::ZERO)
    }

    /// Adds `product` to the running value.
    pub fn absorb(&mut self, product: F) {
        self.value = Some(match self.value {
            None => product,
            Some(previous) => previous.add(&product),
        });
    }

    /// Adds `product / divisor`, re-checking the step by multiplication.
    pub fn absorb_quotient<D>(&mut self, product: F, divisor: &D) -> Result<(), OodError>
    where
        D: BoundaryDivisor<F> + ?Sized,
    {
        let previous = self.value();
        let next = previous.add(&divisor.divide(product)?);
        if next.sub(&previous).mul(&divisor.value()) != product {
            return Err(OodError::QuotientMismatch {
                divisor: divisor.kind(),
            });
        }
        self.value = Some(next);
        Ok(())
    }
}

/// Folds every transition residue and divides the sum by `divisor`.
pub fn fold_transitions<F: PrimeField>(
    normalizer: &DegreeNormalizer<F>,
    coeffs: &[CoefficientPair<F>],
    evaluation: &TransitionEvaluation<F>,
    divisor: &TransitionDivisor<F>,
    strategy: FoldStrategy,
    execution: Execution,
) -> Result<F, OodError> {
    ensure_len("transition coefficients", evaluation.len(), coeffs.len())?;
    ensure_len(
        "transition degrees",
        evaluation.len(),
        evaluation.degrees.len(),
    )?;
    let term = |column: usize| {
        normalizer.transition_term(
            column,
            &coeffs[column],
            evaluation.residues[column],
            evaluation.degrees[column],
        )
    };

    let sum = match strategy {
        FoldStrategy::Sequential => {
            let mut acc = RunningAccumulator::new();
            for column in 0..evaluation.len() {
                acc.absorb(term(column)?);
                trace!(column, acc = %acc.value(), "transition fold step");
            }
            acc.value()
        }
        FoldStrategy::Reduction => {
            reduce_terms(try_map_indices(evaluation.len(), execution, term)?, execution)
        }
    };
    divisor.divide(sum)
}

/// Continues from `seed` and folds every boundary residue over its pole.
pub fn fold_boundaries<F: PrimeField>(
    normalizer: &DegreeNormalizer<F>,
    g_trace: F,
    coeffs: &[CoefficientPair<F>],
    evaluation: &BoundaryEvaluation<F>,
    seed: F,
    strategy: FoldStrategy,
    execution: Execution,
) -> Result<F, OodError> {
    ensure_len("boundary coefficients", evaluation.len(), coeffs.len())?;
    let pole = |assertion: usize| {
        let step = evaluation.assertions[assertion].step;
        SinglePoleDivisor::evaluate(
            normalizer.z(),
            g_trace,
            assertion,
            step,
            normalizer.params(),
        )
    };
    let product = |assertion: usize| {
        normalizer.boundary_term(
            assertion,
            &coeffs[assertion],
            &evaluation.assertions[assertion],
        )
    };

    match strategy {
        FoldStrategy::Sequential => {
            let mut acc = RunningAccumulator::seeded(seed);
            for assertion in 0..evaluation.len() {
                acc.absorb_quotient(product(assertion)?, &pole(assertion)?)?;
                trace!(assertion, acc = %acc.value(), "boundary fold step");
            }
            Ok(acc.value())
        }
        FoldStrategy::Reduction => {
            let quotients = try_map_indices(evaluation.len(), execution, |assertion| {
                let divisor = pole(assertion)?;
                let product = product(assertion)?;
                let quotient = divisor.divide(product)?;
                if quotient.mul(&divisor.value()) != product {
                    return Err(OodError::QuotientMismatch {
                        divisor: divisor.kind(),
                    });
                }
                Ok(quotient)
            })?;
            Ok(seed.add(&reduce_terms(quotients, execution)))
        }
    }
}

fn ensure_len(what: &'static str, expected: usize, actual: usize) -> Result<(), OodError> {
    if expected != actual {
        return Err(OodError::ShapeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

fn reduce_terms<F: PrimeField>(terms: Vec<F>, execution: Execution) -> F {
    #[cfg(feature = "parallel")]
    let sum = if execution.is_parallel() {
        use rayon::prelude::*;
        let chunk = crate::utils::preferred_chunk_size(terms.len());
        terms
            .par_iter()
            .with_min_len(chunk)
            .copied()
            .reduce(|| F::ZERO, |lhs, rhs| lhs.add(&rhs))
    } else {
        pairwise_sum(terms)
    };
    #[cfg(not(feature = "parallel"))]
    let sum = {
        let _ = execution;
        pairwise_sum(terms)
    };
    sum
}

fn pairwise_sum<F: PrimeField>(mut terms: Vec<F>) -> F {
    while terms.len() > 1 {
        terms = terms
            .chunks(2)
            .map(|pair| match pair {
                [lhs, rhs] => lhs.add(rhs),
                [single] => *single,
                _ => F::ZERO,
            })
            .collect();
    }
    terms.first().copied().unwrap_or(F::ZERO)
}
