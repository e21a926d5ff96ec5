//! Out-of-domain consistency check.
//!
//! The verifier recomputes the composition polynomial's value at the OOD
//! point `z` from the AIR residues and compares it with the value folded
//! from the prover's composition-column evaluations:
//!
//! ```text
//! div(z)   = (z^n - 1) / (z - g^(n-1))
//! acc_T    = sum_i (c0_i + c1_i * z^(maxDeg - deg_i)) * r_i / div(z)
//! acc      = acc_T + sum_j (b0_j + b1_j * z^(maxDeg - (n-1) + dd_j)) * a_j / (z - g^step_j)
//! channel  = sum_i ch_i * z^i
//! ```
//!
//! The check accepts iff `channel == acc`. Divisors that vanish at `z` are
//! reported as [`OodError::DegenerateDivisor`], never folded as zero.

pub mod accumulator;
pub mod channel;
pub mod check;
pub mod degree;
pub mod divisor;
pub mod errors;
pub mod verifier;

pub use accumulator::{FoldStrategy, RunningAccumulator};
pub use errors::{DivisorKind, OodError};
pub use verifier::{ConstraintAccumulation, FrameInputs, OodInputs, OodVerifier};
