//! Folding of the prover's composition-column evaluations.

use crate::field::PrimeField;

/// Returns `sum_i evaluations[i] * z^i`.
///
/// Column `i` of the composition polynomial is committed separately and
/// opened at `z^W`, so this recombines `C(z) = sum_i z^i * C_i(z^W)`.
pub fn combine_channel_evaluations<F: PrimeField>(evaluations: &[F], z: F) -> F {
    let mut power = F::ONE;
    let mut result = F::ZERO;
    for evaluation in evaluations {
        result = result.add(&evaluation.mul(&power));
        power = power.mul(&z);
    }
    result
}
