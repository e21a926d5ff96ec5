//! Out-of-domain (OOD) consistency check of a STARK verifier.
//!
//! The crate recomputes the composition polynomial's value at a random point
//! `z` from AIR constraint residues and compares it with the value implied by
//! the prover's composition-column evaluations. A mismatch rejects the proof;
//! a point on a divisor root is reported separately.
//!
//! * [`field`] provides the prime field, bounded exponentiation and
//!   polynomial helpers.
//! * [`config`] holds the validated verifier parameters.
//! * [`air`] defines the evaluator contracts, trace tables, example AIRs and
//!   the reference composer.
//! * [`ood`] implements the divisors, degree normalisation, folds and the
//!   final check.
//! * [`utils`] holds the execution modes of the `parallel` feature.
//!
//! ```
//! use rpp_ood::air::{AssertionEvaluation, BoundaryEvaluation, CoefficientPair, TransitionEvaluation};
//! use rpp_ood::config::OodParamsBuilder;
//! use rpp_ood::field::Fp;
//! use rpp_ood::ood::{OodInputs, OodVerifier};
//!
//! type F97 = Fp<97, 5>;
//!
//! let params = OodParamsBuilder {
//!     trace_length: 2,
//!     trace_width: 1,
//!     num_assertions: 1,
//!     ce_blowup_factor: 2,
//!     num_public_inputs: 0,
//! }
//! .build()?;
//! let inputs = OodInputs {
//!     z: F97::new(5),
//!     g_trace: F97::new(96),
//!     transition_coeffs: vec![CoefficientPair::new(F97::new(2), F97::new(3))],
//!     boundary_coeffs: vec![CoefficientPair::new(F97::new(1), F97::new(1))],
//!     transition: TransitionEvaluation::new(vec![F97::new(10)], vec![1])?,
//!     boundary: BoundaryEvaluation::new(vec![AssertionEvaluation {
//!         residue: F97::new(5),
//!         divisor_degree: 0,
//!         step: 0,
//!     }]),
//!     channel_ood_evaluations: vec![F97::new(31)],
//! };
//! OodVerifier::new(params).verify(&inputs)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod air;
pub mod config;
pub mod field;
pub mod ood;
pub mod utils;

pub use ood::{OodError, OodVerifier};

/// Result type used throughout the library to surface verifier outcomes.
pub type OodResult<T> = core::result::Result<T, OodError>;
