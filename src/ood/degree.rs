//! Degree normalisation of constraint residues.
//!
//! Each residue is lifted to the composition polynomial's maximum degree by
//! multiplying with `z^adj` and weighted with its Fiat–Shamir pair in one
//! step: `(c0 + c1 * z^adj) * residue`.

use crate::air::{AssertionEvaluation, CoefficientPair};
use crate::config::OodParams;
use crate::field::{pow_bounded, PrimeField};

use super::errors::OodError;

/// Computes adjustment exponents and weighted residues at a fixed OOD point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeNormalizer<F> {
    z: F,
    params: OodParams,
}

impl<F: PrimeField> DegreeNormalizer<F> {
    /// Binds the normaliser to `z` and the verifier parameters.
    pub fn new(z: F, params: OodParams) -> Self {
        Self { z, params }
    }

    /// OOD point.
    pub fn z(&self) -> F {
        self.z
    }

    /// Parameters the exponents are derived from.
    pub fn params(&self) -> &OodParams {
        &self.params
    }

    /// `maxDeg - degree` for transition column `column`.
    pub fn transition_exponent(&self, column: usize, degree: usize) -> Result<u64, OodError> {
        let max = self.params.max_degree();
        let degree_u64 = degree as u64;
        if degree_u64 > max {
            return Err(OodError::DegreeOutOfRange {
                what: "transition constraint",
                index: column,
                degree,
                max,
            });
        }
        Ok(max - degree_u64)
    }

    /// `maxDeg - (n - 1) + divisor_degree` for boundary assertion `assertion`.
    pub fn boundary_exponent(&self, assertion: usize, divisor_degree: usize) -> Result<u64, OodError> {
        let last_row = (self.params.trace_length() - 1) as u64;
        if divisor_degree as u64 > last_row {
            return Err(OodError::DegreeOutOfRange {
                what: "boundary divisor",
                index: assertion,
                degree: divisor_degree,
                max: last_row,
            });
        }
        Ok(self.params.max_degree() - last_row + divisor_degree as u64)
    }

    /// `z^exponent`, bounded by the bit width of `maxDeg`.
    pub fn adjustment(&self, exponent: u64) -> Result<F, OodError> {
        Ok(pow_bounded(self.z, exponent, self.params.degree_bits())?)
    }

    /// Weighted, degree-normalised transition residue of `column`.
    pub fn transition_term(
        &self,
        column: usize,
        coeffs: &CoefficientPair<F>,
        residue: F,
        degree: usize,
    ) -> Result<F, OodError> {
        let exponent = self.transition_exponent(column, degree)?;
        let weighted = coeffs.weigh(self.adjustment(exponent)?);
        Ok(weighted.mul(&residue))
    }

    /// Weighted, degree-normalised boundary residue of `assertion`.
    ///
    /// The result still has to be divided by the assertion's divisor.
    pub fn boundary_term(
        &self,
        assertion: usize,
        coeffs: &CoefficientPair<F>,
        evaluation: &AssertionEvaluation<F>,
    ) -> Result<F, OodError> {
        let exponent = self.boundary_exponent(assertion, evaluation.divisor_degree)?;
        let weighted = coeffs.weigh(self.adjustment(exponent)?);
        Ok(weighted.mul(&evaluation.residue))
    }
}
