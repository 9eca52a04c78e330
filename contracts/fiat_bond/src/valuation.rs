//! Time-decayed valuation and the maturity-driven state updates.
//!
//! ```text
//! price = ceil(payoff * 10000 * YEAR / (10000 * YEAR + apr * T))
//! ```
//!
//! where `T` is the number of seconds left to maturity. At or after maturity
//! the price is the payoff amount itself.

use bond_errors::ContractError;
use soroban_sdk::{Env, Symbol};

use crate::lifecycle::transition;
use crate::math;
use crate::parameters::SECONDS_PER_YEAR;
use crate::types::{BondRecord, BondState};
use crate::{events, ledger, registry};

/// Basis-point denominator of the APR field (1000 = 10%).
pub const APR_DENOMINATOR: i128 = 10_000;

/// Discounted price of `payoff` with `secs_to_maturity` seconds left.
pub fn compute_price(payoff: i128, apr: u32, secs_to_maturity: i128) -> Result<i128, ContractError> {
    if secs_to_maturity <= 0 {
        return Ok(payoff);
    }
    let year = SECONDS_PER_YEAR as i128;
    let numerator = math::mul_i128(math::mul_i128(payoff, APR_DENOMINATOR)?, year)?;
    let denominator = math::add_i128(
        math::mul_i128(APR_DENOMINATOR, year)?,
        math::mul_i128(apr as i128, secs_to_maturity)?,
    )?;
    math::ceil_div(numerator, denominator)
}

/// Reprice `bond_id` and apply any deadline-driven transition.
pub fn refresh(e: &Env, bond_id: &Symbol) -> Result<BondRecord, ContractError> {
    let mut record = registry::load(e, bond_id)?;
    refresh_record(e, &mut record)?;
    Ok(record)
}

pub fn refresh_record(e: &Env, record: &mut BondRecord) -> Result<(), ContractError> {
    if !record.state.is_issued() {
        return Err(ContractError::InvalidState);
    }

    let now = e.ledger().timestamp();
    let d = &record.descriptor;
    let remaining = d.maturity_time as i128 - now as i128;
    let price = compute_price(d.payoff_price.amount, d.apr, remaining)?;

    record.current_price.amount = price;
    if record.initial_price.is_none() {
        record.initial_price = Some(price);
        record.initial_time = now;
    }
    registry::save(e, record);
    events::emit_price_updated(e, &record.descriptor.bond_id, price, now);

    let retire_time = record.descriptor.retire_time;
    let maturity_time = record.descriptor.maturity_time;

    if now >= retire_time && record.state == BondState::ExpiredTechDefaulted {
        return transition(e, record, BondState::ExpiredDefaulted);
    }
    if now >= maturity_time && record.state == BondState::Circulating {
        let bond_id = record.descriptor.bond_id.clone();
        let bought_back = ledger::balance_of(e, &record.descriptor.issuer, &bond_id)
            == ledger::total_supply(e, &bond_id)?;
        let next = if bought_back {
            BondState::ExpiredPaidOff
        } else {
            BondState::ExpiredTechDefaulted
        };
        return transition(e, record, next);
    }
    Ok(())
}
