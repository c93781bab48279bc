//! TrackPro - commission and fee allocation for real-estate operations
//!
//! Computes what each party earns from a property operation (advisor,
//! broker/team lead, referrer, co-broker) and aggregates closed operations
//! for dashboards.
//!
//! # Usage
//!
//! ```
//! use rust_decimal::Decimal;
//! use trackpro::{compute_net_fee, normalize_operation, RawOperation, UserRole};
//!
//! let raw: RawOperation = serde_json::from_str(
//!     r#"{"valor_reserva": "100000", "porcentaje_honorarios_broker": 6,
//!         "punta_compradora": true, "punta_vendedora": true}"#,
//! )
//! .unwrap();
//!
//! let op = normalize_operation(&raw);
//! assert_eq!(compute_net_fee(&op, &UserRole::Broker), Decimal::from(6000));
//! ```

pub mod config;
pub mod error;
pub mod fees;
pub mod normalize;
pub mod record;
pub mod reporting;
pub mod role;
pub mod role_wait;
pub mod utils;

pub use config::{Config, ConfigError, RoleWaitConfig};
pub use error::{FeeError, Result};
pub use fees::{allocate, compute_net_fee, try_compute_net_fee, FeeAllocation, GrossFees};
pub use normalize::normalize_operation;
pub use record::{OperationRecord, OperationStatus, RawOperation};
pub use reporting::{monthly_net_fees, summarize, OperationSummary};
pub use role::{FeePool, UserRole};
pub use role_wait::{
    net_fee_when_role_ready, role_channel, wait_for_role, RoleProvider, RoleSender,
    StaticRoleProvider, WatchRoleProvider,
};
