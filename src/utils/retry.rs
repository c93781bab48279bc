//! Retry utilities: backoff builders and retryable error classification.
//!
//! Uses `backon` for the role-availability poll. The poll runs at a fixed
//! interval rather than backing off, since the role loader finishes on its
//! own schedule and a late role should be picked up promptly.

use backon::ConstantBuilder;

use crate::config::RoleWaitConfig;
use crate::error::FeeError;

/// Constant-delay backoff for polling the user's role.
///
/// - Delay: `poll_interval` (default 100ms)
/// - Max attempts: as many intervals as fit in `timeout`
/// - No jitter
pub fn role_poll_backoff(config: &RoleWaitConfig) -> ConstantBuilder {
    ConstantBuilder::default()
        .with_delay(config.poll_interval())
        .with_max_times(config.max_retries())
}

/// Determines if a role lookup failure is worth another poll.
///
/// Retryable:
/// - `RoleUnavailable`: the loader has not published a role yet
///
/// Non-retryable:
/// - `RoleProvider`: the role source itself failed and will not recover.
pub fn is_retryable_role_error(err: &FeeError) -> bool {
    err.is_retryable()
}
