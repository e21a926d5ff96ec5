//! Execution mode for the optional rayon code paths.
//!
//! Verifiers and composers carry their own [`Execution`], taken from the
//! process-wide default when they are built. Changing the default with
//! [`set_parallelism`] affects only values constructed afterwards. With the
//! `parallel` feature disabled every mode runs serially.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
static PARALLEL_DEFAULT: AtomicBool = AtomicBool::new(true);

const DEFAULT_CHUNK_SIZE: usize = 64;

/// How independent per-item work is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Execution {
    /// Items run in index order on the calling thread.
    Serial,
    /// Items run on the rayon pool when the `parallel` feature is enabled.
    Parallel,
}

impl Execution {
    /// Mode matching the current process-wide default.
    pub fn from_default() -> Self {
        if parallelism_enabled() {
            Execution::Parallel
        } else {
            Execution::Serial
        }
    }

    /// Returns `true` when rayon will actually be used.
    pub fn is_parallel(self) -> bool {
        cfg!(feature = "parallel") && self == Execution::Parallel
    }
}

impl Default for Execution {
    fn default() -> Self {
        Self::from_default()
    }
}

/// Minimum number of items a rayon task handles.
pub fn preferred_chunk_size(total_items: usize) -> usize {
    DEFAULT_CHUNK_SIZE.min(total_items.max(1))
}

/// Applies `f` to every index in `0..count`, collecting results in index
/// order and stopping at the first error.
pub(crate) fn try_map_indices<T, E, G>(
    count: usize,
    execution: Execution,
    f: G,
) -> Result<Vec<T>, E>
where
    T: Send,
    E: Send,
    G: Fn(usize) -> Result<T, E> + Sync,
{
    #[cfg(feature = "parallel")]
    let mapped: Result<Vec<T>, E> = if execution.is_parallel() {
        use rayon::prelude::*;
        (0..count)
            .into_par_iter()
            .with_min_len(preferred_chunk_size(count))
            .map(&f)
            .collect()
    } else {
        (0..count).map(&f).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let mapped: Result<Vec<T>, E> = {
        let _ = execution;
        (0..count).map(&f).collect()
    };
    mapped
}

#[cfg(feature = "parallel")]
pub fn parallelism_enabled() -> bool {
    PARALLEL_DEFAULT.load(Ordering::SeqCst)
}

#[cfg(not(feature = "parallel"))]
pub fn parallelism_enabled() -> bool {
    false
}

/// Sets the process-wide default until the returned guard is dropped.
#[cfg(feature = "parallel")]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    let previous = PARALLEL_DEFAULT.swap(enabled, Ordering::SeqCst);
    ParallelismGuard { previous }
}

#[cfg(not(feature = "parallel"))]
pub fn set_parallelism(_enabled: bool) -> ParallelismGuard {
    ParallelismGuard {}
}

/// Restores the previous default on drop.
pub struct ParallelismGuard {
    #[cfg(feature = "parallel")]
    previous: bool,
}

#[cfg(feature = "parallel")]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        PARALLEL_DEFAULT.store(self.previous, Ordering::SeqCst);
    }
}
