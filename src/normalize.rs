//! Coercion of loose form input into an [`OperationRecord`].
//!
//! Form fields arrive as numbers, numeric strings or blanks. Anything that
//! does not parse becomes zero here, so the arithmetic in [`crate::fees`]
//! never sees a non-finite or missing value.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::record::{LooseFlag, LooseNumber, OperationRecord, OperationStatus, RawOperation};

/// Convert a float to a decimal. NaN and infinities become zero.
pub fn decimal_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Parse free-text numeric input. Blank or unparsable text is zero.
///
/// Accepts a leading `$`, a trailing `%`, and `,` either as thousands
/// separator (`1,250,000`) or as decimal separator when it is the only
/// separator and is followed by one or two digits (`4,5`).
pub fn parse_loose_decimal(input: &str) -> Decimal {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let canonical = canonical_separators(trimmed);
    Decimal::from_str(&canonical)
        .or_else(|_| Decimal::from_scientific(&canonical))
        .unwrap_or(Decimal::ZERO)
}

fn canonical_separators(text: &str) -> String {
    let commas = text.matches(',').count();
    if commas == 1 && !text.contains('.') {
        if let Some((_, decimals)) = text.split_once(',') {
            if (1..=2).contains(&decimals.len()) && decimals.bytes().all(|b| b.is_ascii_digit()) {
                return text.replacen(',', ".", 1);
            }
        }
    }
    text.replace(',', "")
}

/// Resolve a loose numeric field.
pub fn loose_decimal(field: &LooseNumber) -> Decimal {
    match field {
        LooseNumber::Number(v) => decimal_from_f64(*v),
        LooseNumber::Text(s) => parse_loose_decimal(s),
        LooseNumber::Missing => Decimal::ZERO,
    }
}

/// Resolve a loose checkbox field. Unrecognized text is false.
pub fn loose_flag(field: &LooseFlag) -> bool {
    match field {
        LooseFlag::Flag(v) => *v,
        LooseFlag::Text(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "si" | "sí" | "yes" | "on"
        ),
        LooseFlag::Missing => false,
    }
}

/// Resolve a status label. Anything other than "Cerrada" is open.
pub fn parse_status(label: Option<&str>) -> OperationStatus {
    match label.map(|s| s.trim().to_ascii_lowercase()) {
        Some(s) if s == "cerrada" => OperationStatus::Cerrada,
        _ => OperationStatus::Abierta,
    }
}

/// Parse an operation date. Accepts `YYYY-MM-DD` with an optional time suffix.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn optional_text(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn coerced(name: &'static str, field: &LooseNumber) -> Decimal {
    let value = loose_decimal(field);
    if value.is_zero() {
        if let LooseNumber::Text(text) = field {
            if !text.trim().is_empty() {
                debug!(field = name, input = %text, "Form input resolved to zero");
            }
        }
    }
    value
}

/// Normalize a form document into the record the fee engine consumes.
pub fn normalize_operation(raw: &RawOperation) -> OperationRecord {
    OperationRecord {
        valor_reserva: coerced("valor_reserva", &raw.valor_reserva),
        porcentaje_honorarios_asesor: coerced(
            "porcentaje_honorarios_asesor",
            &raw.porcentaje_honorarios_asesor,
        ),
        porcentaje_honorarios_broker: coerced(
            "porcentaje_honorarios_broker",
            &raw.porcentaje_honorarios_broker,
        ),
        punta_compradora: loose_flag(&raw.punta_compradora),
        punta_vendedora: loose_flag(&raw.punta_vendedora),
        porcentaje_punta_compradora: coerced(
            "porcentaje_punta_compradora",
            &raw.porcentaje_punta_compradora,
        ),
        porcentaje_punta_vendedora: coerced(
            "porcentaje_punta_vendedora",
            &raw.porcentaje_punta_vendedora,
        ),
        referido: optional_text(&raw.referido),
        porcentaje_referido: coerced("porcentaje_referido", &raw.porcentaje_referido),
        compartido: optional_text(&raw.compartido),
        porcentaje_compartido: coerced("porcentaje_compartido", &raw.porcentaje_compartido),
        user_uid: optional_text(&raw.user_uid),
        user_uid_adicional: optional_text(&raw.user_uid_adicional),
        estado: parse_status(raw.estado.as_deref()),
        fecha_operacion: parse_date(raw.fecha_operacion.as_deref()),
    }
}
