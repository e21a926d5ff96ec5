//! # Algebraic Intermediate Representation (AIR)
//!
//! An AIR is the constraint system a trace must satisfy: transition
//! constraints relating consecutive rows and boundary assertions pinning
//! single cells. The OOD check consumes an AIR only through the two evaluator
//! traits in [`traits`]; concrete systems live in [`example`].
//!
//! * [`types`] holds the frame, coefficient and residue containers plus
//!   [`AirError`].
//! * [`trace`] stores execution traces and interpolates them into trace
//!   polynomials.
//! * [`composition`] builds honest composition polynomials for tests and
//!   benchmarks.
//!
//! ## Ordering
//!
//! Residues, degrees and coefficient pairs are indexed by trace column;
//! assertions keep the order their AIR emits them in. The verifier pairs
//! inputs purely by position.

pub mod composition;
pub mod example;
pub mod trace;
pub mod traits;
pub mod types;

pub use composition::{CompositionError, CompositionPolynomial, ReferenceComposer};
pub use trace::{TracePolynomials, TraceTable};
pub use traits::{Air, BoundaryEvaluator, TransitionEvaluator};
pub use types::{
    AirError, Assertion, AssertionEvaluation, BoundaryEvaluation, CoefficientPair, ColIx,
    EvaluationFrame, TransitionEvaluation,
};
