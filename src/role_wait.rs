//! Waiting for the requesting user's role.
//!
//! The user profile is loaded asynchronously, so a fee figure can be asked
//! for before the role is known. [`wait_for_role`] polls a [`RoleProvider`]
//! at a fixed interval and gives up with
//! [`FeeError::RoleResolutionTimeout`] once the configured timeout elapses.
//! Dropping the returned future cancels the wait.

use std::time::Duration;

use async_trait::async_trait;
use backon::Retryable;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::RoleWaitConfig;
use crate::error::{FeeError, Result};
use crate::fees::compute_net_fee;
use crate::record::OperationRecord;
use crate::role::UserRole;
use crate::utils::retry::{is_retryable_role_error, role_poll_backoff};

/// Source of the current user's role.
#[async_trait]
pub trait RoleProvider: Send + Sync {
    /// The role if it has been resolved, `None` while it is still loading.
    async fn current_role(&self) -> Result<Option<UserRole>>;
}

/// Provider with a fixed answer.
#[derive(Debug, Clone, Default)]
pub struct StaticRoleProvider {
    role: Option<UserRole>,
}

impl StaticRoleProvider {
    pub fn new(role: Option<UserRole>) -> Self {
        Self { role }
    }
}

#[async_trait]
impl RoleProvider for StaticRoleProvider {
    async fn current_role(&self) -> Result<Option<UserRole>> {
        Ok(self.role.clone())
    }
}

/// Publishing half of a role channel, held by the profile loader.
#[derive(Debug)]
pub struct RoleSender {
    tx: watch::Sender<Option<UserRole>>,
}

impl RoleSender {
    /// Publish a resolved role.
    pub fn publish(&self, role: UserRole) {
        self.tx.send_replace(Some(role));
    }

    /// Forget the role (e.g. on sign-out).
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }
}

/// Provider backed by a `tokio::sync::watch` channel.
#[derive(Debug, Clone)]
pub struct WatchRoleProvider {
    rx: watch::Receiver<Option<UserRole>>,
}

/// Create a connected role sender and provider, initially empty.
pub fn role_channel() -> (RoleSender, WatchRoleProvider) {
    let (tx, rx) = watch::channel(None);
    (RoleSender { tx }, WatchRoleProvider { rx })
}

#[async_trait]
impl RoleProvider for WatchRoleProvider {
    async fn current_role(&self) -> Result<Option<UserRole>> {
        let role = self.rx.borrow().clone();
        if role.is_none() && self.rx.has_changed().is_err() {
            return Err(FeeError::RoleProvider(
                "role source closed before a role was published".to_string(),
            ));
        }
        Ok(role)
    }
}

/// Wait until `provider` yields a role.
///
/// Polls every `poll_interval`; returns `RoleResolutionTimeout` when
/// `timeout` elapses first. Provider failures are returned immediately.
pub async fn wait_for_role(
    provider: &dyn RoleProvider,
    config: &RoleWaitConfig,
) -> Result<UserRole> {
    let timeout = config.timeout();

    let lookup = move || async move {
        provider
            .current_role()
            .await?
            .ok_or(FeeError::RoleUnavailable)
    };

    let polling = lookup
        .retry(role_poll_backoff(config))
        .when(is_retryable_role_error)
        .notify(|err: &FeeError, delay: Duration| {
            debug!(error = %err, delay = ?delay, "Role not resolved yet, polling again");
        });

    match tokio::time::timeout(timeout, polling).await {
        Ok(Ok(role)) => {
            debug!(role = %role, "Role resolved");
            Ok(role)
        }
        Ok(Err(FeeError::RoleUnavailable)) | Err(_) => {
            warn!(waited = ?timeout, "Gave up waiting for user role");
            Err(FeeError::RoleResolutionTimeout { waited: timeout })
        }
        Ok(Err(e)) => Err(e),
    }
}

/// Net fee for the current user once their role is known.
pub async fn net_fee_when_role_ready(
    provider: &dyn RoleProvider,
    op: &OperationRecord,
    config: &RoleWaitConfig,
) -> Result<Decimal> {
    let role = wait_for_role(provider, config).await?;
    Ok(compute_net_fee(op, &role))
}
