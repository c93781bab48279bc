//! Operation records: the loose form document and its normalized form.
//!
//! [`RawOperation`] mirrors what the operation form stores, where numeric
//! fields may be numbers, numeric strings, blanks or absent. The fee engine
//! only ever sees [`OperationRecord`], produced by
//! [`crate::normalize::normalize_operation`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationStatus {
    #[default]
    Abierta,
    Cerrada,
}

/// A property operation with every amount already coerced to a decimal.
///
/// Percentages are expressed on a 0-100 scale and are not range-checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationRecord {
    /// Gross reservation or sale value.
    pub valor_reserva: Decimal,
    pub porcentaje_honorarios_asesor: Decimal,
    pub porcentaje_honorarios_broker: Decimal,
    /// Buyer side represented.
    pub punta_compradora: bool,
    /// Seller side represented.
    pub punta_vendedora: bool,
    pub porcentaje_punta_compradora: Decimal,
    pub porcentaje_punta_vendedora: Decimal,
    /// Referring party, if any.
    pub referido: Option<String>,
    pub porcentaje_referido: Decimal,
    /// Co-broker sharing the deal, if any.
    pub compartido: Option<String>,
    pub porcentaje_compartido: Decimal,
    /// Primary agent.
    pub user_uid: Option<String>,
    /// Secondary agent on a shared operation.
    pub user_uid_adicional: Option<String>,
    pub estado: OperationStatus,
    pub fecha_operacion: Option<NaiveDate>,
}

fn is_set(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl OperationRecord {
    /// A referral is recorded (non-blank `referido`).
    pub fn has_referral(&self) -> bool {
        is_set(&self.referido)
    }

    /// A co-broker is recorded (non-blank `compartido`).
    pub fn has_co_broker(&self) -> bool {
        is_set(&self.compartido)
    }

    /// Only closed operations count towards aggregates.
    pub fn is_closed(&self) -> bool {
        self.estado == OperationStatus::Cerrada
    }

    /// Two different agents share this operation.
    pub fn is_dual_agent(&self) -> bool {
        match (self.user_uid.as_deref(), self.user_uid_adicional.as_deref()) {
            (Some(primary), Some(secondary)) => {
                let (primary, secondary) = (primary.trim(), secondary.trim());
                !primary.is_empty() && !secondary.is_empty() && primary != secondary
            }
            _ => false,
        }
    }

    /// Whether `uid` is one of the agents on this operation.
    pub fn involves_agent(&self, uid: &str) -> bool {
        let uid = uid.trim();
        [&self.user_uid, &self.user_uid_adicional]
            .into_iter()
            .any(|field| field.as_deref().map(str::trim) == Some(uid))
    }

    /// Fraction of this operation's pools credited to `uid`.
    ///
    /// 1 for a sole agent, 0.5 for each agent of a dual-agent operation,
    /// 0 when the agent is not on the record.
    pub fn agent_share(&self, uid: &str) -> Decimal {
        if !self.involves_agent(uid) {
            Decimal::ZERO
        } else if self.is_dual_agent() {
            Decimal::new(5, 1)
        } else {
            Decimal::ONE
        }
    }
}

/// A numeric form field as stored: number, text, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl From<f64> for LooseNumber {
    fn from(value: f64) -> Self {
        LooseNumber::Number(value)
    }
}

impl From<&str> for LooseNumber {
    fn from(value: &str) -> Self {
        LooseNumber::Text(value.to_string())
    }
}

/// A checkbox field as stored: boolean, text, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseFlag {
    Flag(bool),
    Text(String),
    #[default]
    Missing,
}

impl From<bool> for LooseFlag {
    fn from(value: bool) -> Self {
        LooseFlag::Flag(value)
    }
}

/// Operation document as written by the operation form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawOperation {
    pub valor_reserva: LooseNumber,
    pub porcentaje_honorarios_asesor: LooseNumber,
    pub porcentaje_honorarios_broker: LooseNumber,
    pub punta_compradora: LooseFlag,
    pub punta_vendedora: LooseFlag,
    pub porcentaje_punta_compradora: LooseNumber,
    pub porcentaje_punta_vendedora: LooseNumber,
    pub referido: Option<String>,
    pub porcentaje_referido: LooseNumber,
    pub compartido: Option<String>,
    pub porcentaje_compartido: LooseNumber,
    pub user_uid: Option<String>,
    pub user_uid_adicional: Option<String>,
    pub estado: Option<String>,
    pub fecha_operacion: Option<String>,
}
