//! Prime field implementation shared by every quantity in the OOD check.
//!
//! Elements are stored as canonical `u64` residues. The modulus and a
//! generator of the full multiplicative group are const parameters, so the
//! default Goldilocks field and small test fields share one implementation.

use core::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::exp::square_and_multiply;

/// Goldilocks modulus `2^64 - 2^32 + 1`.
pub const GOLDILOCKS_MODULUS: u64 = 0xffff_ffff_0000_0001;

/// Generator of the Goldilocks multiplicative group.
pub const GOLDILOCKS_GENERATOR: u64 = 7;

/// Field element represented as a canonical value modulo `MODULUS`.
///
/// # Representation
///
/// * The wrapped integer is always within `[0, MODULUS)`. Every constructor
///   reduces, and deserialisation rejects non-canonical inputs.
/// * `GENERATOR` must generate the multiplicative group of the field; it is
///   used to derive roots of unity and coset shifts.
/// * Serde encodes the element as its canonical `u64`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fp<const MODULUS: u64, const GENERATOR: u64>(u64);

/// Default field used across the crate.
pub type FieldElement = Fp<GOLDILOCKS_MODULUS, GOLDILOCKS_GENERATOR>;

impl<const M: u64, const G: u64> Fp<M, G> {
    /// Creates an element, reducing `value` modulo the field prime.
    pub const fn new(value: u64) -> Self {
        Self(value % M)
    }

    /// Creates an element from a value that must already be canonical.
    pub const fn from_canonical(value: u64) -> Option<Self> {
        if value < M {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the canonical integer representative.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl<const M: u64, const G: u64> fmt::Debug for Fp<M, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fp").field(&self.0).finish()
    }
}

impl<const M: u64, const G: u64> fmt::Display for Fp<M, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<const M: u64, const G: u64> From<u64> for Fp<M, G> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

/// Trait describing the high-level arithmetic contract for field elements.
pub trait FieldElementOps: Sized {
    /// Adds two canonical field elements, returning the canonical representative.
    fn add(&self, rhs: &Self) -> Self;
    /// Subtracts `rhs` from `self` in canonical form.
    fn sub(&self, rhs: &Self) -> Self;
    /// Computes the additive inverse of `self`.
    fn neg(&self) -> Self;
    /// Multiplies two field elements.
    fn mul(&self, rhs: &Self) -> Self;
    /// Squares the field element.
    fn square(&self) -> Self;
    /// Computes the multiplicative inverse, returning `None` for zero.
    fn inv(&self) -> Option<Self>;
}

impl<const M: u64, const G: u64> FieldElementOps for Fp<M, G> {
    fn add(&self, rhs: &Self) -> Self {
        let sum = self.0 as u128 + rhs.0 as u128;
        Self((sum % M as u128) as u64)
    }

    fn sub(&self, rhs: &Self) -> Self {
        if self.0 >= rhs.0 {
            Self(self.0 - rhs.0)
        } else {
            Self(M - (rhs.0 - self.0))
        }
    }

    fn neg(&self) -> Self {
        if self.0 == 0 {
            *self
        } else {
            Self(M - self.0)
        }
    }

    fn mul(&self, rhs: &Self) -> Self {
        let product = self.0 as u128 * rhs.0 as u128;
        Self((product % M as u128) as u64)
    }

    fn square(&self) -> Self {
        self.mul(self)
    }

    fn inv(&self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }
        // Fermat: a^(p-2) = a^-1 for prime p.
        Some(square_and_multiply(*self, M - 2, u64::BITS))
    }
}

/// Prime field contract consumed by the AIR and OOD layers.
pub trait PrimeField:
    FieldElementOps
    + Copy
    + Eq
    + fmt::Debug
    + fmt::Display
    + From<u64>
    + Send
    + Sync
    + 'static
{
    /// Prime modulus of the field.
    const MODULUS: u64;
    /// Generator of the multiplicative group.
    const GENERATOR: Self;
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;

    /// Returns the canonical integer representative.
    fn as_u64(&self) -> u64;

    /// Returns `true` for the additive identity.
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Raises `self` to an arbitrary 64-bit exponent.
    fn pow(&self, exponent: u64) -> Self {
        square_and_multiply(*self, exponent, u64::BITS)
    }

    /// Returns a primitive root of unity of the requested order, if the order
    /// divides `MODULUS - 1`.
    fn root_of_unity(order: u64) -> Option<Self> {
        if order == 0 || (Self::MODULUS - 1) % order != 0 {
            return None;
        }
        Some(Self::GENERATOR.pow((Self::MODULUS - 1) / order))
    }
}

impl<const M: u64, const G: u64> PrimeField for Fp<M, G> {
    const MODULUS: u64 = M;
    const GENERATOR: Self = Self(G % M);
    const ZERO: Self = Self(0);
    const ONE: Self = Self(1 % M);

    fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Errors surfaced when decoding field elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDeserializeError {
    /// The encoded integer was not below the modulus.
    FieldDeserializeNonCanonical,
}

impl fmt::Display for FieldDeserializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDeserializeError::FieldDeserializeNonCanonical => {
                f.write_str("field element deserialization failed: non-canonical input")
            }
        }
    }
}

impl std::error::Error for FieldDeserializeError {}

impl<const M: u64, const G: u64> Serialize for Fp<M, G> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de, const M: u64, const G: u64> Deserialize<'de> for Fp<M, G> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u64::deserialize(deserializer)?;
        Self::from_canonical(raw)
            .ok_or_else(|| de::Error::custom(FieldDeserializeError::FieldDeserializeNonCanonical))
    }
}
