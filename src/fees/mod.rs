//! Fee allocation for a single operation.
//!
//! Pure, deterministic arithmetic over an [`OperationRecord`]:
//!
//! 1. Gross pools: `valor_reserva * porcentaje / 100` for advisor and broker.
//! 2. Referral and co-broker cuts are taken from the broker pool, both
//!    against the same gross base (never compounded).
//! 3. The tip multiplier scales both pools: 1 for a double-ended deal, the
//!    represented side's percentage for a single side, 0 for neither.
//!
//! The dual-agent 50/50 split is not applied here. Pools returned by this
//! module are per operation; [`crate::reporting`] credits each agent its
//! share exactly once.

use rust_decimal::Decimal;

use crate::error::{FeeError, Result};
use crate::record::OperationRecord;
use crate::role::{FeePool, UserRole};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Apply a 0-100 percentage to an amount.
///
/// Saturates instead of overflowing on absurd inputs.
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount
        .checked_mul(percent)
        .and_then(|v| v.checked_div(ONE_HUNDRED))
        .unwrap_or_else(|| saturated(amount, percent))
}

pub(crate) fn saturated(amount: Decimal, percent: Decimal) -> Decimal {
    if amount.is_sign_negative() != percent.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

pub(crate) fn scaled(amount: Decimal, factor: Decimal) -> Decimal {
    amount
        .checked_mul(factor)
        .unwrap_or_else(|| saturated(amount, factor))
}

/// `total + amount`, pinned to the bound it ran past.
pub(crate) fn summed(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(if amount.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

pub(crate) fn deducted(amount: Decimal, cut: Decimal) -> Decimal {
    amount.checked_sub(cut).unwrap_or(if cut.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

/// Commission pools before any deduction or tip adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrossFees {
    /// Advisor's gross fee (`honorarios_asesor`).
    pub asesor: Decimal,
    /// Broker's gross fee (`honorarios_broker`).
    pub broker: Decimal,
}

/// Gross advisor and broker fees of an operation.
pub fn gross_fees(op: &OperationRecord) -> GrossFees {
    GrossFees {
        asesor: percent_of(op.valor_reserva, op.porcentaje_honorarios_asesor),
        broker: percent_of(op.valor_reserva, op.porcentaje_honorarios_broker),
    }
}

/// Fraction of the pools earned given which sides were represented.
pub fn tip_multiplier(op: &OperationRecord) -> Decimal {
    match (op.punta_compradora, op.punta_vendedora) {
        (true, true) => Decimal::ONE,
        (true, false) => percent_of(Decimal::ONE, op.porcentaje_punta_compradora),
        (false, true) => percent_of(Decimal::ONE, op.porcentaje_punta_vendedora),
        (false, false) => Decimal::ZERO,
    }
}

/// Every amount derived from one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeAllocation {
    pub gross: GrossFees,
    pub tip_multiplier: Decimal,
    /// Referrer's cut, measured against the gross broker pool.
    pub referral_fee: Decimal,
    /// Co-broker's cut, measured against the gross broker pool.
    pub co_broker_fee: Decimal,
    /// Advisor pool after the tip multiplier.
    pub net_asesor: Decimal,
    /// Broker pool after cuts and the tip multiplier ("team lead net fee").
    pub net_team_lead: Decimal,
}

impl FeeAllocation {
    /// Net amount for a fee pool.
    pub fn pool(&self, pool: FeePool) -> Decimal {
        match pool {
            FeePool::Advisor => self.net_asesor,
            FeePool::TeamLead => self.net_team_lead,
        }
    }

    /// Net amount returned to a role.
    pub fn for_role(&self, role: &UserRole) -> Decimal {
        self.pool(role.fee_pool())
    }
}

/// Compute the full allocation of an operation.
pub fn allocate(op: &OperationRecord) -> FeeAllocation {
    let gross = gross_fees(op);
    let multiplier = tip_multiplier(op);

    let referral_fee = if op.has_referral() {
        percent_of(gross.broker, op.porcentaje_referido)
    } else {
        Decimal::ZERO
    };
    let co_broker_fee = if op.has_co_broker() {
        percent_of(gross.broker, op.porcentaje_compartido)
    } else {
        Decimal::ZERO
    };

    let broker_pool = deducted(deducted(gross.broker, referral_fee), co_broker_fee);

    FeeAllocation {
        gross,
        tip_multiplier: multiplier,
        referral_fee,
        co_broker_fee,
        net_asesor: scaled(gross.asesor, multiplier),
        net_team_lead: scaled(broker_pool, multiplier),
    }
}

/// Net fee owed to `role` for one operation, before any dual-agent split.
pub fn compute_net_fee(op: &OperationRecord, role: &UserRole) -> Decimal {
    allocate(op).for_role(role)
}

/// Like [`compute_net_fee`], for callers whose role may not be loaded yet.
///
/// Returns [`FeeError::RoleUnavailable`] when `role` is `None`. To wait for
/// the role instead, see [`crate::role_wait::net_fee_when_role_ready`].
pub fn try_compute_net_fee(op: &OperationRecord, role: Option<&UserRole>) -> Result<Decimal> {
    let role = role.ok_or(FeeError::RoleUnavailable)?;
    Ok(compute_net_fee(op, role))
}

#[cfg(test)]
mod tests;
