//! Field arithmetic primitives for the `rpp-ood` consistency check.
//! Contains the prime field implementation, exponentiation and polynomial
//! utilities.

pub mod exp;
pub mod polynomial;
pub mod prime_field;

pub use exp::{bit_width, pow_bounded, pow_fixed, ExponentOverflow};
pub use polynomial::Polynomial;
pub use prime_field::{
    FieldDeserializeError, FieldElement, FieldElementOps, Fp, PrimeField, GOLDILOCKS_GENERATOR,
    GOLDILOCKS_MODULUS,
};

#[cfg(test)]
pub mod tests;
