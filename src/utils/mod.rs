//! Utility helpers shared by the verifier and the reference composer.

pub mod parallel;

pub(crate) use parallel::try_map_indices;
pub use parallel::{
    parallelism_enabled, preferred_chunk_size, set_parallelism, Execution, ParallelismGuard,
};
