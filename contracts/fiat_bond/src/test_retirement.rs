#![cfg(test)]

use crate::test_helpers::*;
use crate::types::{Asset, BondState, Price};
use bond_errors::ContractError;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

/// Payoff owed for 100 whole units at `PAYOFF`.
const HUNDRED_UNITS: i128 = 100 * PAYOFF;

#[test]
fn test_issuer_buyback_clears_every_holder() {
    let s = Setup::new();
    s.distributed(100);
    let issuer_cash = s.cash(&s.issuer);
    let alice_cash = s.cash(&s.alice);

    s.client
        .retire(&s.issuer, &s.bond_id, &s.payment(3 * HUNDRED_UNITS));

    for holder in [&s.alice, &s.bob, &s.counterparty] {
        assert_eq!(s.units(holder), 0);
    }
    assert_eq!(s.units(&s.issuer), MAX_SUPPLY);
    assert_eq!(s.state(), BondState::ExpiredPaidOff);
    assert_eq!(s.cash(&s.issuer), issuer_cash - 3 * HUNDRED_UNITS);
    assert_eq!(s.cash(&s.alice), alice_cash + HUNDRED_UNITS);
    assert_eq!(s.cash(&s.contract_id), 0);
}

#[test]
fn test_surplus_payment_refunded_to_issuer() {
    let s = Setup::new();
    s.distributed(100);
    let issuer_cash = s.cash(&s.issuer);

    s.client
        .retire(&s.issuer, &s.bond_id, &s.payment(3 * HUNDRED_UNITS + 12_345));

    assert_eq!(s.cash(&s.issuer), issuer_cash - 3 * HUNDRED_UNITS);
    assert_eq!(s.cash(&s.contract_id), 0);
}

#[test]
fn test_insufficient_payment_changes_nothing() {
    let s = Setup::new();
    s.distributed(100);
    let issuer_cash = s.cash(&s.issuer);

    assert_eq!(
        s.client
            .try_retire(&s.issuer, &s.bond_id, &s.payment(2 * HUNDRED_UNITS)),
        Err(Ok(ContractError::InsufficientFunds))
    );

    for holder in [&s.alice, &s.bob, &s.counterparty] {
        assert_eq!(s.units(holder), 100);
    }
    assert_eq!(s.units(&s.issuer), 700);
    assert_eq!(s.cash(&s.issuer), issuer_cash);
    assert_eq!(s.state(), BondState::Circulating);
}

#[test]
fn test_payment_must_be_in_payoff_token() {
    let s = Setup::new();
    s.distributed(100);
    let other = s
        .e
        .register_stellar_asset_contract_v2(s.admin.clone())
        .address();

    assert_eq!(
        s.client.try_retire(
            &s.issuer,
            &s.bond_id,
            &Price {
                token: other,
                amount: 3 * HUNDRED_UNITS,
            }
        ),
        Err(Ok(ContractError::WrongAsset))
    );
    assert_eq!(
        s.client.try_retire(&s.issuer, &s.bond_id, &s.payment(-1)),
        Err(Ok(ContractError::InvalidAmount))
    );
}

#[test]
fn test_only_issuer_or_agent_may_retire() {
    let s = Setup::new();
    s.distributed(100);
    let stranger = Address::generate(&s.e);

    assert_eq!(
        s.client.try_retire(&stranger, &s.bond_id, &s.payment(0)),
        Err(Ok(ContractError::NotRetirementParty))
    );
    assert_eq!(
        s.client.try_retire(&s.alice, &s.bond_id, &s.payment(0)),
        Err(Ok(ContractError::NotRetirementParty))
    );
}

#[test]
fn test_role_requires_matching_state() {
    let s = Setup::new();
    s.signed();
    assert_eq!(
        s.client.try_retire(&s.issuer, &s.bond_id, &s.payment(0)),
        Err(Ok(ContractError::InvalidState))
    );

    s.client.issue(&s.issuer, &s.bond_id);
    assert_eq!(
        s.client.try_retire(&s.agent, &s.bond_id, &s.payment(1_000)),
        Err(Ok(ContractError::InvalidState))
    );
}

#[test]
fn test_issuer_cannot_retire_after_default() {
    let s = Setup::new();
    s.distributed(100);
    s.set_time(START_TIME + ONE_YEAR);
    s.client.refresh(&s.bond_id);
    assert_eq!(s.state(), BondState::ExpiredTechDefaulted);

    assert_eq!(
        s.client
            .try_retire(&s.issuer, &s.bond_id, &s.payment(3 * HUNDRED_UNITS)),
        Err(Ok(ContractError::InvalidState))
    );
}

#[test]
fn test_liquidation_forwards_payment_to_counterparty() {
    let s = Setup::new();
    s.distributed(100);
    s.set_time(START_TIME + ONE_YEAR);
    s.client.refresh(&s.bond_id);

    let agent_cash = s.cash(&s.agent);
    let cp_cash = s.cash(&s.counterparty);
    s.client
        .retire(&s.agent, &s.bond_id, &s.payment(500_000));

    assert_eq!(s.state(), BondState::ExpiredPaidOff);
    assert_eq!(s.cash(&s.agent), agent_cash - 500_000);
    assert_eq!(s.cash(&s.counterparty), cp_cash + 500_000);
    assert_eq!(s.cash(&s.contract_id), 0);

    // Reaching the final state consolidated every outside holder.
    for holder in [&s.alice, &s.bob, &s.counterparty] {
        assert_eq!(s.units(holder), 0);
    }
    assert_eq!(s.units(&s.contract_id), 300);
    assert_eq!(s.units(&s.issuer), 700);
}

#[test]
fn test_retired_bond_is_final() {
    let s = Setup::new();
    s.distributed(100);
    s.client
        .retire(&s.issuer, &s.bond_id, &s.payment(3 * HUNDRED_UNITS));

    assert_eq!(
        s.client
            .try_retire(&s.issuer, &s.bond_id, &s.payment(3 * HUNDRED_UNITS)),
        Err(Ok(ContractError::InvalidState))
    );
    s.set_time(START_TIME + 2 * ONE_YEAR);
    s.client.refresh(&s.bond_id);
    assert_eq!(s.state(), BondState::ExpiredPaidOff);
}

#[test]
fn test_buyback_waits_for_open_orders() {
    let s = Setup::new();
    s.distributed(100);
    s.client.commit(
        &s.alice,
        &s.bond_id,
        &s.alice,
        &s.counterparty,
        &Asset::Units(s.bond_id.clone(), 10),
        &true,
    );
    let issuer_cash = s.cash(&s.issuer);
    let alice_cash = s.cash(&s.alice);

    assert_eq!(
        s.client
            .try_retire(&s.issuer, &s.bond_id, &s.payment(3 * HUNDRED_UNITS)),
        Err(Ok(ContractError::OpenOrders))
    );
    assert_eq!(s.state(), BondState::Circulating);
    assert_eq!(s.units(&s.alice), 90);
    assert_eq!(s.units(&s.contract_id), 10);
    assert_eq!(s.cash(&s.issuer), issuer_cash);

    s.client
        .cancel_order(&s.alice, &s.bond_id, &s.alice, &s.counterparty);
    s.client
        .retire(&s.issuer, &s.bond_id, &s.payment(3 * HUNDRED_UNITS));

    assert_eq!(s.units(&s.alice), 0);
    assert_eq!(s.units(&s.contract_id), 0);
    assert_eq!(s.units(&s.issuer), MAX_SUPPLY);
    assert_eq!(s.cash(&s.alice), alice_cash + HUNDRED_UNITS);
}

#[test]
fn test_stranger_rejected_before_payment_checks() {
    let s = Setup::new();
    s.distributed(100);
    let stranger = Address::generate(&s.e);
    let other = s
        .e
        .register_stellar_asset_contract_v2(s.admin.clone())
        .address();

    assert_eq!(
        s.client.try_retire(
            &stranger,
            &s.bond_id,
            &Price {
                token: other,
                amount: HUNDRED_UNITS,
            }
        ),
        Err(Ok(ContractError::NotRetirementParty))
    );
    assert_eq!(
        s.client.try_retire(&stranger, &s.bond_id, &s.payment(-1)),
        Err(Ok(ContractError::NotRetirementParty))
    );
}

#[test]
fn test_buyback_uses_unit_scale() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.unit_decimals = 2;
    s.client.initiate(&d);
    s.client.verify(&s.verifier, &s.bond_id);
    s.client.issue(&s.issuer, &s.bond_id);
    s.client
        .transfer(&s.issuer, &s.alice, &s.bond_id, &150);
    let alice_cash = s.cash(&s.alice);

    // 1.50 units at 10000 per unit.
    s.client
        .retire(&s.issuer, &s.bond_id, &s.payment(15_000));

    assert_eq!(s.cash(&s.alice), alice_cash + 15_000);
    assert_eq!(s.units(&s.issuer), MAX_SUPPLY);
}
