//! Aggregates over closed operations for dashboards and exports.
//!
//! This is the only place the dual-agent split is applied: when totals are
//! computed for one agent, each operation contributes
//! [`OperationRecord::agent_share`] of its pools. Brokerage-wide totals
//! (no agent filter) count each operation once, unsplit.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::fees::{allocate, scaled, summed};
use crate::record::OperationRecord;
use crate::role::UserRole;

/// Totals over a set of closed operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperationSummary {
    /// Closed operations counted. Shared operations count once per agent.
    pub operations: usize,
    /// Sum of `valor_reserva`, scaled by agent share.
    pub volume: Decimal,
    /// Sum of gross advisor fees, scaled by agent share.
    pub gross_asesor: Decimal,
    /// Sum of gross broker fees, scaled by agent share.
    pub gross_broker: Decimal,
    /// Sum of net fees for the requested role, scaled by agent share.
    pub net_fee: Decimal,
}

/// Share of `op` credited to the optional agent filter.
fn share_for(op: &OperationRecord, agent_uid: Option<&str>) -> Decimal {
    match agent_uid {
        Some(uid) => op.agent_share(uid),
        None => Decimal::ONE,
    }
}

/// Closed operations visible to the optional agent, with their share.
fn closed_shares<'a>(
    operations: &'a [OperationRecord],
    agent_uid: Option<&'a str>,
) -> impl Iterator<Item = (&'a OperationRecord, Decimal)> + 'a {
    operations
        .iter()
        .filter(|op| op.is_closed())
        .map(move |op| (op, share_for(op, agent_uid)))
        .filter(|(_, share)| !share.is_zero())
}

/// Summarize closed operations for `role`, optionally for a single agent.
pub fn summarize(
    operations: &[OperationRecord],
    role: &UserRole,
    agent_uid: Option<&str>,
) -> OperationSummary {
    let mut summary = OperationSummary::default();

    for (op, share) in closed_shares(operations, agent_uid) {
        let allocation = allocate(op);
        summary.operations += 1;
        summary.volume = summed(summary.volume, scaled(op.valor_reserva, share));
        summary.gross_asesor = summed(summary.gross_asesor, scaled(allocation.gross.asesor, share));
        summary.gross_broker = summed(summary.gross_broker, scaled(allocation.gross.broker, share));
        summary.net_fee = summed(summary.net_fee, scaled(allocation.for_role(role), share));
    }

    debug!(
        role = %role,
        agent = agent_uid.unwrap_or("*"),
        operations = summary.operations,
        net_fee = %summary.net_fee,
        "Summarized closed operations"
    );

    summary
}

/// Net fees per month (1-12) of `year` for `role`.
///
/// Operations without a date are skipped. Months with no closed operations
/// are absent from the map.
pub fn monthly_net_fees(
    operations: &[OperationRecord],
    role: &UserRole,
    agent_uid: Option<&str>,
    year: i32,
) -> BTreeMap<u32, Decimal> {
    let mut months = BTreeMap::new();

    for (op, share) in closed_shares(operations, agent_uid) {
        let Some(date) = op.fecha_operacion else {
            continue;
        };
        if date.year() != year {
            continue;
        }
        let fee = scaled(allocate(op).for_role(role), share);
        let month = months.entry(date.month()).or_insert(Decimal::ZERO);
        *month = summed(*month, fee);
    }

    months
}
