//! Final equality between the channel and the constraint accumulator.

use tracing::warn;

use crate::field::PrimeField;

use super::errors::OodError;

/// Accepts iff `channel == constraints`.
pub fn check_consistency<F: PrimeField>(channel: F, constraints: F) -> Result<(), OodError> {
    if channel != constraints {
        warn!(%channel, %constraints, "ood consistency check failed");
        return Err(OodError::ConsistencyViolation {
            channel: channel.as_u64(),
            constraints: constraints.as_u64(),
        });
    }
    Ok(())
}
