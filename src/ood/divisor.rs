//! Vanishing-polynomial divisors evaluated at the OOD point.
//!
//! Every division goes through [`checked_quotient`]: the denominator is
//! inverted with an explicit zero branch and the quotient is re-checked by
//! multiplication before it is used.

use crate::config::OodParams;
use crate::field::{pow_bounded, PrimeField};

use super::errors::{DivisorKind, OodError};

/// Divides `numerator` by `divisor`, rejecting zero divisors.
///
/// The quotient must satisfy `quotient * divisor == numerator`; a failed
/// re-check surfaces as [`OodError::QuotientMismatch`].
pub fn checked_quotient<F: PrimeField>(
    numerator: F,
    divisor: F,
    kind: DivisorKind,
) -> Result<F, OodError> {
    let inverse = divisor
        .inv()
        .ok_or(OodError::DegenerateDivisor { divisor: kind })?;
    let quotient = numerator.mul(&inverse);
    if quotient.mul(&divisor) != numerator {
        return Err(OodError::QuotientMismatch { divisor: kind });
    }
    Ok(quotient)
}

/// `(z^n - 1) / (z - g^(n-1))`: vanishes on every trace row except the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionDivisor<F> {
    value: F,
}

impl<F: PrimeField> TransitionDivisor<F> {
    /// Evaluates the divisor at `z`.
    ///
    /// Fails with [`OodError::DegenerateDivisor`] when `z` lies in the trace
    /// domain: either the denominator vanishes (`z = g^(n-1)`) or the
    /// resulting divisor does (`z^n = 1`).
    pub fn evaluate(z: F, g_trace: F, params: &OodParams) -> Result<Self, OodError> {
        let n = params.trace_length() as u64;
        let bits = params.step_bits();
        let z_n = pow_bounded(z, n, bits)?;
        let g_last = pow_bounded(g_trace, n - 1, bits)?;
        let value = checked_quotient(
            z_n.sub(&F::ONE),
            z.sub(&g_last),
            DivisorKind::Transition,
        )?;
        if value.is_zero() {
            return Err(OodError::DegenerateDivisor {
                divisor: DivisorKind::Transition,
            });
        }
        Ok(Self { value })
    }

    /// Divisor value at the OOD point.
    pub fn value(&self) -> F {
        self.value
    }

    /// Divides the folded transition sum by the divisor.
    pub fn divide(&self, numerator: F) -> Result<F, OodError> {
        checked_quotient(numerator, self.value, DivisorKind::Transition)
    }
}

/// Divisor attached to one boundary assertion.
///
/// Only [`SinglePoleDivisor`] exists today; multi-row assertions would
/// implement this trait with a product of poles.
pub trait BoundaryDivisor<F: PrimeField> {
    /// Divisor value at the OOD point.
    fn value(&self) -> F;

    /// Identifies the divisor in errors.
    fn kind(&self) -> DivisorKind;

    /// Divides `numerator` by the divisor.
    fn divide(&self, numerator: F) -> Result<F, OodError> {
        checked_quotient(numerator, self.value(), self.kind())
    }
}

/// `z - g^step` for an assertion pinned to a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinglePoleDivisor<F> {
    assertion: usize,
    step: usize,
    value: F,
}

impl<F: PrimeField> SinglePoleDivisor<F> {
    /// Evaluates the pole of `assertion` at `z`.
    pub fn evaluate(
        z: F,
        g_trace: F,
        assertion: usize,
        step: usize,
        params: &OodParams,
    ) -> Result<Self, OodError> {
        if step >= params.trace_length() {
            return Err(OodError::AssertionStepOutOfRange {
                assertion,
                step,
                trace_length: params.trace_length(),
            });
        }
        let pole = pow_bounded(g_trace, step as u64, params.step_bits())?;
        Ok(Self {
            assertion,
            step,
            value: z.sub(&pole),
        })
    }

    /// Row the pole sits on.
    pub fn step(&self) -> usize {
        self.step
    }
}

impl<F: PrimeField> BoundaryDivisor<F> for SinglePoleDivisor<F> {
    fn value(&self) -> F {
        self.value
    }

    fn kind(&self) -> DivisorKind {
        DivisorKind::Boundary {
            assertion: self.assertion,
            step: self.step,
        }
    }
}
