#![cfg(test)]

use crate::parameters::DEFAULT_MAX_HOLDERS;
use crate::test_helpers::*;
use crate::types::{BondDescriptor, BondState};
use bond_errors::ContractError;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address};

fn verify_with(s: &Setup, descriptor: &BondDescriptor) -> Result<(), ContractError> {
    s.client.initiate(descriptor);
    match s.client.try_verify(&descriptor.verifier, &s.bond_id) {
        Ok(_) => Ok(()),
        Err(Ok(err)) => Err(err),
        Err(Err(_)) => panic!("verify aborted without a contract error"),
    }
}

#[test]
fn test_default_descriptor_passes() {
    let s = Setup::new();
    assert_eq!(verify_with(&s, &s.descriptor()), Ok(()));
    assert_eq!(s.state(), BondState::AgreementSigned);
}

#[test]
fn test_unknown_verifier() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.verifier = Address::generate(&s.e);
    assert_eq!(verify_with(&s, &d), Err(ContractError::VerifierUnknown));
    assert_eq!(s.state(), BondState::Created);
}

#[test]
fn test_holder_list_too_short() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.holders = vec![&s.e, s.issuer.clone(), s.contract_id.clone()];
    assert_eq!(verify_with(&s, &d), Err(ContractError::HolderCountOutOfRange));
}

#[test]
fn test_holder_list_bound_is_exclusive() {
    let s = Setup::new();
    let mut d = s.descriptor();
    while d.holders.len() < DEFAULT_MAX_HOLDERS {
        let extra = Address::generate(&s.e);
        s.client.register_account(&s.admin, &extra);
        d.holders.push_back(extra);
    }
    assert_eq!(verify_with(&s, &d), Err(ContractError::HolderCountOutOfRange));

    s.client
        .set_max_holders(&s.admin, &(DEFAULT_MAX_HOLDERS + 1));
    s.client.verify(&s.verifier, &s.bond_id);
    assert_eq!(s.state(), BondState::AgreementSigned);
}

#[test]
fn test_unregistered_holder() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.holders.push_back(Address::generate(&s.e));
    assert_eq!(verify_with(&s, &d), Err(ContractError::HolderUnknown));
}

#[test]
fn test_issuer_must_be_holder() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.holders = vec![
        &s.e,
        s.contract_id.clone(),
        s.counterparty.clone(),
        s.alice.clone(),
    ];
    assert_eq!(verify_with(&s, &d), Err(ContractError::IssuerNotHolder));
}

#[test]
fn test_custodian_must_be_holder() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.holders = vec![
        &s.e,
        s.issuer.clone(),
        s.counterparty.clone(),
        s.alice.clone(),
    ];
    assert_eq!(verify_with(&s, &d), Err(ContractError::CustodianNotHolder));
}

#[test]
fn test_maturity_within_grace_of_now() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.maturity_time = START_TIME + ONE_WEEK - 1;
    d.collateral.maturity_time = d.maturity_time;
    d.retire_time = d.maturity_time + 2 * ONE_WEEK;
    assert_eq!(verify_with(&s, &d), Err(ContractError::MaturityTooSoon));
}

#[test]
fn test_maturity_exactly_one_grace_ahead() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.maturity_time = START_TIME + ONE_WEEK;
    d.collateral.maturity_time = d.maturity_time;
    d.retire_time = d.maturity_time + ONE_WEEK;
    assert_eq!(verify_with(&s, &d), Ok(()));
}

#[test]
fn test_collateral_matures_beyond_grace() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.collateral.maturity_time = d.maturity_time + ONE_WEEK + 1;
    d.retire_time = d.collateral.maturity_time + ONE_WEEK;
    assert_eq!(verify_with(&s, &d), Err(ContractError::MaturityTooEarly));
}

#[test]
fn test_collateral_matures_before_bond() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.collateral.maturity_time = d.maturity_time - 1;
    assert_eq!(
        verify_with(&s, &d),
        Err(ContractError::MaturityAfterCollateral)
    );
}

#[test]
fn test_retire_time_needs_grace_after_collateral() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.retire_time = d.collateral.maturity_time + ONE_WEEK - 1;
    assert_eq!(verify_with(&s, &d), Err(ContractError::RetireTooSoon));
}

#[test]
fn test_zero_payoff_rejected() {
    let s = Setup::new();
    let mut d = s.descriptor();
    d.payoff_price.amount = 0;
    assert_eq!(verify_with(&s, &d), Err(ContractError::InvalidAmount));
}

#[test]
fn test_zero_grace_period() {
    let s = Setup::new();
    s.client.set_grace_period(&s.admin, &0);

    let mut d = s.descriptor();
    d.maturity_time = START_TIME;
    d.collateral.maturity_time = START_TIME;
    d.retire_time = START_TIME;
    assert_eq!(verify_with(&s, &d), Ok(()));
}
