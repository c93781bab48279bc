use proptest::prelude::*;
use rust_decimal_macros::dec;

use super::*;
use crate::normalize::normalize_operation;
use crate::record::{LooseFlag, LooseNumber, RawOperation};

/// 100,000 sale, 6% broker, 3% advisor, both sides represented.
fn sale() -> OperationRecord {
    OperationRecord {
        valor_reserva: dec!(100000),
        porcentaje_honorarios_broker: dec!(6),
        porcentaje_honorarios_asesor: dec!(3),
        punta_compradora: true,
        punta_vendedora: true,
        ..Default::default()
    }
}

#[test]
fn test_gross_fees() {
    let gross = gross_fees(&sale());
    assert_eq!(gross.broker, dec!(6000));
    assert_eq!(gross.asesor, dec!(3000));
}

#[test]
fn test_double_ended_full_fee() {
    assert_eq!(tip_multiplier(&sale()), Decimal::ONE);
    assert_eq!(compute_net_fee(&sale(), &UserRole::Broker), dec!(6000));
}

#[test]
fn test_single_buyer_side() {
    let op = OperationRecord {
        punta_vendedora: false,
        porcentaje_punta_compradora: dec!(50),
        ..sale()
    };
    assert_eq!(tip_multiplier(&op), dec!(0.5));
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), dec!(3000));
}

#[test]
fn test_single_seller_side_uses_seller_percent() {
    let op = OperationRecord {
        punta_compradora: false,
        porcentaje_punta_compradora: dec!(50),
        porcentaje_punta_vendedora: dec!(25),
        ..sale()
    };
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), dec!(1500));
    assert_eq!(compute_net_fee(&op, &UserRole::Asesor), dec!(750));
}

#[test]
fn test_single_side_without_percent_earns_nothing() {
    let op = OperationRecord {
        punta_vendedora: false,
        ..sale()
    };
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), Decimal::ZERO);
}

#[test]
fn test_neither_tip_is_zero() {
    let op = OperationRecord {
        punta_compradora: false,
        punta_vendedora: false,
        porcentaje_punta_compradora: dec!(50),
        porcentaje_punta_vendedora: dec!(50),
        ..sale()
    };
    let allocation = allocate(&op);
    assert_eq!(allocation.tip_multiplier, Decimal::ZERO);
    assert_eq!(allocation.net_asesor, Decimal::ZERO);
    assert_eq!(allocation.net_team_lead, Decimal::ZERO);
}

#[test]
fn test_zero_value_is_zero() {
    let op = OperationRecord {
        valor_reserva: Decimal::ZERO,
        referido: Some("Jane".to_string()),
        porcentaje_referido: dec!(10),
        ..sale()
    };
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), Decimal::ZERO);
    assert_eq!(compute_net_fee(&op, &UserRole::Asesor), Decimal::ZERO);
}

#[test]
fn test_referral_deduction() {
    let op = OperationRecord {
        referido: Some("Jane".to_string()),
        porcentaje_referido: dec!(10),
        ..sale()
    };
    let allocation = allocate(&op);
    assert_eq!(allocation.referral_fee, dec!(600));
    assert_eq!(allocation.net_team_lead, dec!(5400));
}

#[test]
fn test_referral_without_percent_deducts_nothing() {
    let op = OperationRecord {
        referido: Some("Jane".to_string()),
        ..sale()
    };
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), dec!(6000));
}

#[test]
fn test_percent_without_referral_is_ignored() {
    let op = OperationRecord {
        porcentaje_referido: dec!(10),
        porcentaje_compartido: dec!(20),
        ..sale()
    };
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), dec!(6000));
}

#[test]
fn test_referral_and_co_broker_share_the_same_base() {
    let op = OperationRecord {
        referido: Some("Jane".to_string()),
        porcentaje_referido: dec!(10),
        compartido: Some("Other Realty".to_string()),
        porcentaje_compartido: dec!(20),
        ..sale()
    };
    let allocation = allocate(&op);
    assert_eq!(allocation.referral_fee, dec!(600));
    assert_eq!(allocation.co_broker_fee, dec!(1200));
    assert_eq!(allocation.net_team_lead, dec!(4200));
}

#[test]
fn test_deductions_then_tip_multiplier() {
    let op = OperationRecord {
        punta_vendedora: false,
        porcentaje_punta_compradora: dec!(50),
        referido: Some("Jane".to_string()),
        porcentaje_referido: dec!(10),
        compartido: Some("Other Realty".to_string()),
        porcentaje_compartido: dec!(20),
        ..sale()
    };
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), dec!(2100));
}

#[test]
fn test_deductions_do_not_touch_advisor_pool() {
    let op = OperationRecord {
        referido: Some("Jane".to_string()),
        porcentaje_referido: dec!(10),
        compartido: Some("Other Realty".to_string()),
        porcentaje_compartido: dec!(20),
        ..sale()
    };
    assert_eq!(compute_net_fee(&op, &UserRole::Asesor), dec!(3000));
}

#[test]
fn test_missing_parties_equal_zero_percent() {
    let omitted = sale();
    let explicit = OperationRecord {
        referido: Some("Jane".to_string()),
        porcentaje_referido: Decimal::ZERO,
        compartido: Some("Other Realty".to_string()),
        porcentaje_compartido: Decimal::ZERO,
        ..sale()
    };
    assert_eq!(allocate(&omitted).net_team_lead, allocate(&explicit).net_team_lead);
    assert_eq!(allocate(&omitted).net_asesor, allocate(&explicit).net_asesor);
}

#[test]
fn test_role_selects_pool() {
    let op = sale();
    assert_eq!(compute_net_fee(&op, &UserRole::Asesor), dec!(3000));
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), dec!(6000));
    assert_eq!(compute_net_fee(&op, &UserRole::TeamLeaderBroker), dec!(6000));
    assert_eq!(
        compute_net_fee(&op, &UserRole::Other("viewer".to_string())),
        dec!(3000)
    );
}

#[test]
fn test_dual_agent_pool_is_not_halved_here() {
    let op = OperationRecord {
        user_uid: Some("agent-a".to_string()),
        user_uid_adicional: Some("agent-b".to_string()),
        ..sale()
    };
    assert!(op.is_dual_agent());
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), dec!(6000));
}

#[test]
fn test_engine_ignores_status() {
    let closed = OperationRecord {
        estado: crate::record::OperationStatus::Cerrada,
        ..sale()
    };
    assert_eq!(allocate(&closed), allocate(&sale()));
}

#[test]
fn test_out_of_range_percent_does_not_panic() {
    let op = OperationRecord {
        porcentaje_honorarios_broker: dec!(250),
        referido: Some("Jane".to_string()),
        porcentaje_referido: dec!(-40),
        ..sale()
    };
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), dec!(350000));
}

#[test]
fn test_huge_values_saturate() {
    let op = OperationRecord {
        valor_reserva: Decimal::MAX,
        porcentaje_honorarios_broker: dec!(100000),
        ..sale()
    };
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), Decimal::MAX);
}

#[test]
fn test_negative_cut_on_huge_pool_saturates_upward() {
    let op = OperationRecord {
        valor_reserva: Decimal::MAX,
        porcentaje_honorarios_broker: dec!(100000),
        referido: Some("Jane".to_string()),
        porcentaje_referido: dec!(-50),
        ..sale()
    };
    let allocation = allocate(&op);
    assert_eq!(allocation.referral_fee, Decimal::MIN);
    assert_eq!(allocation.net_team_lead, Decimal::MAX);
}

#[test]
fn test_deducted_saturates_by_cut_sign() {
    assert_eq!(deducted(Decimal::MAX, dec!(-1)), Decimal::MAX);
    assert_eq!(deducted(Decimal::MIN, dec!(1)), Decimal::MIN);
    assert_eq!(deducted(dec!(6000), dec!(600)), dec!(5400));
}

#[test]
fn test_summed_saturates_by_addend_sign() {
    assert_eq!(summed(Decimal::MAX, dec!(1)), Decimal::MAX);
    assert_eq!(summed(Decimal::MIN, dec!(-1)), Decimal::MIN);
    assert_eq!(summed(dec!(5400), dec!(2500)), dec!(7900));
}

#[test]
fn test_empty_string_percent_is_finite() {
    let raw = RawOperation {
        valor_reserva: LooseNumber::from("100000"),
        porcentaje_honorarios_broker: LooseNumber::from(""),
        porcentaje_honorarios_asesor: LooseNumber::from("3"),
        punta_compradora: LooseFlag::from(true),
        punta_vendedora: LooseFlag::from(true),
        referido: Some("Jane".to_string()),
        porcentaje_referido: LooseNumber::from(" "),
        ..Default::default()
    };
    let op = normalize_operation(&raw);
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), Decimal::ZERO);
    assert_eq!(compute_net_fee(&op, &UserRole::Asesor), dec!(3000));
}

#[test]
fn test_nan_input_is_finite() {
    let raw = RawOperation {
        valor_reserva: LooseNumber::from(f64::NAN),
        porcentaje_honorarios_broker: LooseNumber::from(6.0),
        punta_compradora: LooseFlag::from(true),
        punta_vendedora: LooseFlag::from(true),
        ..Default::default()
    };
    let op = normalize_operation(&raw);
    assert_eq!(compute_net_fee(&op, &UserRole::Broker), Decimal::ZERO);
}

#[test]
fn test_try_compute_without_role() {
    let err = try_compute_net_fee(&sale(), None).unwrap_err();
    assert!(matches!(err, FeeError::RoleUnavailable));
}

#[test]
fn test_try_compute_with_role() {
    let fee = try_compute_net_fee(&sale(), Some(&UserRole::Broker)).unwrap();
    assert_eq!(fee, dec!(6000));
}

fn percent() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000).prop_map(|bp| Decimal::new(bp as i64, 2))
}

fn arb_operation() -> impl Strategy<Value = OperationRecord> {
    (
        (0u64..1_000_000_000, percent(), percent()),
        (any::<bool>(), any::<bool>(), percent(), percent()),
        (any::<bool>(), percent(), any::<bool>(), percent()),
    )
        .prop_map(
            |(
                (valor, asesor, broker),
                (compradora, vendedora, pct_compradora, pct_vendedora),
                (has_ref, pct_ref, has_co, pct_co),
            )| OperationRecord {
                valor_reserva: Decimal::from(valor),
                porcentaje_honorarios_asesor: asesor,
                porcentaje_honorarios_broker: broker,
                punta_compradora: compradora,
                punta_vendedora: vendedora,
                porcentaje_punta_compradora: pct_compradora,
                porcentaje_punta_vendedora: pct_vendedora,
                referido: has_ref.then(|| "ref".to_string()),
                porcentaje_referido: pct_ref,
                compartido: has_co.then(|| "co".to_string()),
                porcentaje_compartido: pct_co,
                ..Default::default()
            },
        )
}

proptest! {
    #[test]
    fn prop_deterministic(op in arb_operation()) {
        let first = allocate(&op);
        for _ in 0..3 {
            prop_assert_eq!(allocate(&op), first);
        }
    }

    #[test]
    fn prop_zero_value_yields_zero(op in arb_operation()) {
        let op = OperationRecord { valor_reserva: Decimal::ZERO, ..op };
        prop_assert_eq!(compute_net_fee(&op, &UserRole::Asesor), Decimal::ZERO);
        prop_assert_eq!(compute_net_fee(&op, &UserRole::Broker), Decimal::ZERO);
    }

    #[test]
    fn prop_neither_tip_yields_zero(op in arb_operation()) {
        let op = OperationRecord { punta_compradora: false, punta_vendedora: false, ..op };
        prop_assert_eq!(compute_net_fee(&op, &UserRole::Asesor), Decimal::ZERO);
        prop_assert_eq!(compute_net_fee(&op, &UserRole::TeamLeaderBroker), Decimal::ZERO);
    }

    #[test]
    fn prop_cuts_use_gross_base(op in arb_operation()) {
        let allocation = allocate(&op);
        let expected = (allocation.gross.broker - allocation.referral_fee - allocation.co_broker_fee)
            * allocation.tip_multiplier;
        prop_assert_eq!(allocation.net_team_lead, expected);
    }

    #[test]
    fn prop_loose_text_never_panics(text in ".*") {
        let raw = RawOperation {
            valor_reserva: LooseNumber::Text(text.clone()),
            porcentaje_honorarios_broker: LooseNumber::Text(text),
            punta_compradora: LooseFlag::from(true),
            punta_vendedora: LooseFlag::from(true),
            ..Default::default()
        };
        let _ = compute_net_fee(&normalize_operation(&raw), &UserRole::Broker);
    }
}
