//! Modular exponentiation.
//!
//! Two forms are exposed: [`pow_fixed`] for exponents known at compile time
//! and [`pow_bounded`] for runtime exponents whose bit width is fixed by the
//! verifier parameters. Both walk the exponent from the most significant bit
//! with a constant iteration count equal to the declared width.

use core::fmt;

use super::prime_field::PrimeField;

/// Runtime exponent did not fit the declared bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentOverflow {
    /// Exponent that was requested.
    pub exponent: u64,
    /// Declared bit width.
    pub bits: u32,
}

impl fmt::Display for ExponentOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exponent {} does not fit in {} bits",
            self.exponent, self.bits
        )
    }
}

impl std::error::Error for ExponentOverflow {}

/// Number of bits needed to represent `value` (`0` for zero).
pub const fn bit_width(value: u64) -> u32 {
    u64::BITS - value.leading_zeros()
}

/// Computes `base^E` for an exponent fixed at compile time.
pub fn pow_fixed<F: PrimeField, const E: u64>(base: F) -> F {
    square_and_multiply(base, E, bit_width(E))
}

/// Computes `base^exponent` where `exponent` is bounded by `bits`.
///
/// Returns [`ExponentOverflow`] when the exponent has a set bit at or above
/// position `bits`.
pub fn pow_bounded<F: PrimeField>(base: F, exponent: u64, bits: u32) -> Result<F, ExponentOverflow> {
    if bits > u64::BITS {
        return Err(ExponentOverflow { exponent, bits });
    }
    if bits < u64::BITS && exponent >> bits != 0 {
        return Err(ExponentOverflow { exponent, bits });
    }
    Ok(square_and_multiply(base, exponent, bits))
}

pub(crate) fn square_and_multiply<F: PrimeField>(base: F, exponent: u64, bits: u32) -> F {
    let mut result = F::ONE;
    for position in (0..bits).rev() {
        result = result.square();
        if (exponent >> position) & 1 == 1 {
            result = result.mul(&base);
        }
    }
    result
}
