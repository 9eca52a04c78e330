//! Retirement, liquidation and the final-state holder sweep.

use bond_errors::ContractError;
use soroban_sdk::{Address, Env, Symbol};

use crate::lifecycle::transition;
use crate::types::{BondDescriptor, BondState, Price};
use crate::{events, ledger, math, orders, registry};

/// Distinct holders other than the issuer and the custodial account.
fn outside_holders<'a>(
    e: &'a Env,
    d: &'a BondDescriptor,
) -> impl Iterator<Item = Address> + 'a {
    let custodian = ledger::custodian(e);
    d.holders
        .iter()
        .enumerate()
        .filter(move |(i, holder)| {
            d.holders.first_index_of(holder) == Some(*i as u32)
                && *holder != d.issuer
                && *holder != custodian
        })
        .map(|(_, holder)| holder)
}

/// Payoff owed for `units` base units, rounded down.
fn buyback_cost(d: &BondDescriptor, units: i128, scale: i128) -> Result<i128, ContractError> {
    math::div_i128(math::mul_i128(units, d.payoff_price.amount)?, scale)
}

/// Payment must be in the payoff token and non-negative.
fn check_payment(d: &BondDescriptor, payment: &Price) -> Result<(), ContractError> {
    if payment.token != d.payoff_price.token {
        return Err(ContractError::WrongAsset);
    }
    if payment.amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

/// Retire `bond_id` with `payment`.
///
/// The issuer buys every outstanding unit back at the payoff price while the
/// bond circulates; the payment must cover all holders or nothing moves, and
/// no order may hold units in escrow. After a technical default the
/// liquidation agent's payment goes to the counterparty as a whole.
pub fn retire(
    e: &Env,
    caller: &Address,
    bond_id: &Symbol,
    payment: &Price,
) -> Result<(), ContractError> {
    caller.require_auth();
    let mut record = registry::load(e, bond_id)?;
    let d = record.descriptor.clone();

    if *caller == d.issuer {
        check_payment(&d, payment)?;
        if record.state != BondState::Circulating {
            return Err(ContractError::InvalidState);
        }
        if orders::has_open_orders(e, bond_id) {
            return Err(ContractError::OpenOrders);
        }
        let scale = math::unit_scale(d.unit_decimals)?;

        let mut remainder = payment.amount;
        for holder in outside_holders(e, &d) {
            let units = ledger::balance_of(e, &holder, bond_id);
            remainder = math::sub_i128(remainder, buyback_cost(&d, units, scale)?)?;
            if remainder < 0 {
                return Err(ContractError::InsufficientFunds);
            }
        }

        ledger::collect(e, &payment.token, caller, payment.amount);
        for holder in outside_holders(e, &d) {
            let units = ledger::balance_of(e, &holder, bond_id);
            ledger::move_units(e, bond_id, &holder, &d.issuer, units)?;
            ledger::pay(e, &payment.token, &holder, buyback_cost(&d, units, scale)?);
        }
        ledger::pay(e, &payment.token, caller, remainder);

        events::emit_bond_retired(e, bond_id, caller, payment.amount, remainder);
        transition(e, &mut record, BondState::ExpiredPaidOff)
    } else if *caller == d.liquidation_agent {
        check_payment(&d, payment)?;
        if record.state != BondState::ExpiredTechDefaulted {
            return Err(ContractError::InvalidState);
        }
        ledger::collect(e, &payment.token, caller, payment.amount);
        ledger::pay(e, &payment.token, &d.counterparty, payment.amount);

        events::emit_bond_retired(e, bond_id, caller, payment.amount, 0);
        transition(e, &mut record, BondState::ExpiredPaidOff)
    } else {
        Err(ContractError::NotRetirementParty)
    }
}

/// Consolidate every outside holder's balance at the custodial account.
pub fn sweep_holders(e: &Env, d: &BondDescriptor) -> Result<(), ContractError> {
    let custodian = ledger::custodian(e);
    for holder in outside_holders(e, d) {
        let units = ledger::balance_of(e, &holder, &d.bond_id);
        if units > 0 {
            ledger::move_units(e, &d.bond_id, &holder, &custodian, units)?;
            events::emit_holder_swept(e, &d.bond_id, &holder, units);
        }
    }
    Ok(())
}
