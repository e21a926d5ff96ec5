//! Verifier parameters for the OOD consistency check.
//!
//! The parameters describe the compiled circuit the check runs against:
//! trace length and width, the number of boundary assertions and public
//! inputs, and the composition blowup factor. They are validated once at
//! construction; every later shape check compares against these values.
//!
//! # Parameter digest
//!
//! [`OodParams::param_digest`] hashes [`PARAM_DIGEST_DOMAIN_TAG`] followed by
//! the fields in declaration order, each encoded as a little-endian `u64`,
//! with BLAKE3. Reordering or adding fields changes the digest and therefore
//! requires a new tag.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::field::bit_width;

/// Domain separator prepended to the canonical parameter encoding.
pub const PARAM_DIGEST_DOMAIN_TAG: &[u8; 17] = b"RPP-OOD-PARAMS-V1";

/// Validated verifier parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OodParamsBuilder")]
pub struct OodParams {
    trace_length: usize,
    trace_width: usize,
    num_assertions: usize,
    ce_blowup_factor: usize,
    num_public_inputs: usize,
}

impl OodParams {
    /// Number of rows in the execution trace.
    pub const fn trace_length(&self) -> usize {
        self.trace_length
    }

    /// Number of trace columns (and transition constraints and channel columns).
    pub const fn trace_width(&self) -> usize {
        self.trace_width
    }

    /// Number of boundary assertions.
    pub const fn num_assertions(&self) -> usize {
        self.num_assertions
    }

    /// Blowup factor of the constraint-evaluation domain.
    pub const fn ce_blowup_factor(&self) -> usize {
        self.ce_blowup_factor
    }

    /// Number of public inputs consumed by the boundary evaluator.
    pub const fn num_public_inputs(&self) -> usize {
        self.num_public_inputs
    }

    /// Maximum degree the composition polynomial may reach.
    pub const fn max_degree(&self) -> u64 {
        (self.trace_length as u64) * (self.ce_blowup_factor as u64) - 1
    }

    /// Size of the constraint-evaluation domain.
    pub const fn composition_domain_size(&self) -> u64 {
        self.max_degree() + 1
    }

    /// Bit width bounding every degree-adjustment exponent.
    pub const fn degree_bits(&self) -> u32 {
        bit_width(self.max_degree())
    }

    /// Bit width bounding exponents derived from trace rows.
    pub const fn step_bits(&self) -> u32 {
        bit_width(self.trace_length as u64)
    }

    /// Computes the canonical BLAKE3 digest of the parameter set.
    pub fn param_digest(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(PARAM_DIGEST_DOMAIN_TAG);
        for field in [
            self.trace_length,
            self.trace_width,
            self.num_assertions,
            self.ce_blowup_factor,
            self.num_public_inputs,
        ] {
            hasher.update(&(field as u64).to_le_bytes());
        }
        *hasher.finalize().as_bytes()
    }

    /// Parses and validates a JSON parameter document.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let raw: OodParamsBuilder =
            serde_json::from_str(json).map_err(|err| ParamsError::Json(err.to_string()))?;
        raw.build()
    }

    /// Serialises the parameters to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ParamsError> {
        serde_json::to_string_pretty(self).map_err(|err| ParamsError::Json(err.to_string()))
    }

    fn validate(&self) -> Result<(), ParamsError> {
        if self.trace_length < 2 {
            return Err(ParamsError::TraceTooShort {
                min: 2,
                got: self.trace_length,
            });
        }
        if !self.trace_length.is_power_of_two() {
            return Err(ParamsError::TraceLengthNotPowerOfTwo {
                got: self.trace_length,
            });
        }
        if self.trace_width == 0 {
            return Err(ParamsError::TraceWidthZero);
        }
        if self.ce_blowup_factor == 0 || !self.ce_blowup_factor.is_power_of_two() {
            return Err(ParamsError::InvalidBlowup {
                got: self.ce_blowup_factor,
            });
        }
        if (self.trace_length as u64)
            .checked_mul(self.ce_blowup_factor as u64)
            .is_none()
        {
            return Err(ParamsError::DomainOverflow {
                trace_length: self.trace_length,
                ce_blowup_factor: self.ce_blowup_factor,
            });
        }
        Ok(())
    }
}

/// Builder used to assemble [`OodParams`] with validation.
///
/// | Field | Default |
/// |-------|---------|
/// | `trace_length` | `8` |
/// | `trace_width` | `1` |
/// | `num_assertions` | `2` |
/// | `ce_blowup_factor` | `2` |
/// | `num_public_inputs` | `2` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OodParamsBuilder {
    pub trace_length: usize,
    pub trace_width: usize,
    pub num_assertions: usize,
    pub ce_blowup_factor: usize,
    pub num_public_inputs: usize,
}

impl OodParamsBuilder {
    /// Returns a builder initialised with the single-register defaults.
    pub fn new() -> Self {
        Self {
            trace_length: 8,
            trace_width: 1,
            num_assertions: 2,
            ce_blowup_factor: 2,
            num_public_inputs: 2,
        }
    }

    /// Validates the builder fields and emits an [`OodParams`] instance.
    pub fn build(&self) -> Result<OodParams, ParamsError> {
        let params = OodParams {
            trace_length: self.trace_length,
            trace_width: self.trace_width,
            num_assertions: self.num_assertions,
            ce_blowup_factor: self.ce_blowup_factor,
            num_public_inputs: self.num_public_inputs,
        };
        params.validate()?;
        Ok(params)
    }
}

impl Default for OodParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<OodParamsBuilder> for OodParams {
    type Error = ParamsError;

    fn try_from(builder: OodParamsBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<OodParams> for OodParamsBuilder {
    fn from(params: OodParams) -> Self {
        Self {
            trace_length: params.trace_length,
            trace_width: params.trace_width,
            num_assertions: params.num_assertions,
            ce_blowup_factor: params.ce_blowup_factor,
            num_public_inputs: params.num_public_inputs,
        }
    }
}

/// Error enumeration for parameter validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// Trace must contain at least `min` rows.
    TraceTooShort { min: usize, got: usize },
    /// Trace length must be a power of two.
    TraceLengthNotPowerOfTwo { got: usize },
    /// Trace must contain at least one column.
    TraceWidthZero,
    /// Blowup factor must be a non-zero power of two.
    InvalidBlowup { got: usize },
    /// `trace_length * ce_blowup_factor` does not fit in 64 bits.
    DomainOverflow {
        trace_length: usize,
        ce_blowup_factor: usize,
    },
    /// JSON document failed to parse.
    Json(String),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::TraceTooShort { min, got } => {
                write!(f, "trace length {got} is below the minimum of {min}")
            }
            ParamsError::TraceLengthNotPowerOfTwo { got } => {
                write!(f, "trace length {got} is not a power of two")
            }
            ParamsError::TraceWidthZero => f.write_str("trace width must be positive"),
            ParamsError::InvalidBlowup { got } => {
                write!(f, "blowup factor {got} is not a non-zero power of two")
            }
            ParamsError::DomainOverflow {
                trace_length,
                ce_blowup_factor,
            } => write!(
                f,
                "evaluation domain {trace_length} x {ce_blowup_factor} overflows 64 bits"
            ),
            ParamsError::Json(detail) => write!(f, "invalid parameter document: {detail}"),
        }
    }
}

impl std::error::Error for ParamsError {}
