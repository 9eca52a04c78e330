//! Bond registry: descriptor storage, role checks and the sign-off flow.
//!
//! Records are stored per issuer and keyed by bond id. The unit series for a
//! bond id remembers its issuer, which is how a record is located from the id
//! alone.

use bond_errors::ContractError;
use soroban_sdk::{Address, Env, Symbol};

use crate::lifecycle::transition;
use crate::parameters::{self, MAX_UNIT_DECIMALS, MIN_HOLDERS};
use crate::types::{BondDescriptor, BondRecord, BondState, DataKey};
use crate::{events, ledger, math, orders, valuation};

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

fn record_key(issuer: &Address, bond_id: &Symbol) -> DataKey {
    DataKey::Bond(issuer.clone(), bond_id.clone())
}

// ─── Storage ───────────────────────────────────────────────────────────────

pub fn load(e: &Env, bond_id: &Symbol) -> Result<BondRecord, ContractError> {
    let series = ledger::load_series(e, bond_id)?;
    let key = record_key(&series.issuer, bond_id);
    let record: BondRecord = e
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::BondNotFound)?;
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    Ok(record)
}

pub fn save(e: &Env, record: &BondRecord) {
    let key = record_key(&record.descriptor.issuer, &record.descriptor.bond_id);
    e.storage().persistent().set(&key, record);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

/// Whether `account` appears in the descriptor's holder list.
#[must_use]
pub fn is_holder(descriptor: &BondDescriptor, account: &Address) -> bool {
    descriptor.holders.contains(account)
}

// ─── Sign-off flow ─────────────────────────────────────────────────────────

/// Record a new descriptor, or overwrite one that has not been verified yet.
pub fn initiate(e: &Env, descriptor: BondDescriptor) -> Result<(), ContractError> {
    descriptor.issuer.require_auth();

    if descriptor.max_supply <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    if descriptor.unit_decimals > MAX_UNIT_DECIMALS {
        return Err(ContractError::InvalidDecimals);
    }

    if ledger::find_series(e, &descriptor.bond_id).is_some() {
        let existing = load(e, &descriptor.bond_id)?;
        if existing.state != BondState::Created || existing.descriptor.issuer != descriptor.issuer
        {
            return Err(ContractError::BondAlreadyCommitted);
        }
    }

    ledger::create_series(
        e,
        &descriptor.bond_id,
        &descriptor.issuer,
        descriptor.max_supply,
    )?;

    let record = BondRecord {
        current_price: descriptor.payoff_price.clone(),
        descriptor,
        state: BondState::Created,
        initial_time: 0,
        initial_price: None,
        confirmed_by_counterparty: false,
    };
    save(e, &record);

    let d = &record.descriptor;
    events::emit_bond_initiated(e, &d.bond_id, &d.issuer, d.max_supply);
    Ok(())
}

/// Verifier sign-off. Freezes the descriptor.
pub fn verify(e: &Env, verifier: &Address, bond_id: &Symbol) -> Result<(), ContractError> {
    verifier.require_auth();
    let mut record = load(e, bond_id)?;
    if *verifier != record.descriptor.verifier {
        return Err(ContractError::NotVerifier);
    }
    if record.state != BondState::Created {
        return Err(ContractError::InvalidState);
    }

    check_sanity(e, &record.descriptor)?;
    transition(e, &mut record, BondState::AgreementSigned)?;
    events::emit_bond_verified(e, bond_id, verifier);
    Ok(())
}

/// Mint the full supply to the issuer and start circulation.
pub fn issue(e: &Env, issuer: &Address, bond_id: &Symbol) -> Result<(), ContractError> {
    issuer.require_auth();
    let mut record = load(e, bond_id)?;
    if *issuer != record.descriptor.issuer {
        return Err(ContractError::NotIssuer);
    }
    if record.state != BondState::AgreementSigned {
        return Err(ContractError::InvalidState);
    }

    let supply = record.descriptor.max_supply;
    ledger::mint(e, bond_id, supply)?;
    transition(e, &mut record, BondState::Circulating)?;
    events::emit_bond_issued(e, bond_id, issuer, supply);

    valuation::refresh_record(e, &mut record)
}

/// Counterparty acknowledgement. Informational and write-once.
pub fn confirm(e: &Env, counterparty: &Address, bond_id: &Symbol) -> Result<(), ContractError> {
    counterparty.require_auth();
    let mut record = load(e, bond_id)?;
    if *counterparty != record.descriptor.counterparty {
        return Err(ContractError::NotCounterparty);
    }
    if record.state < BondState::AgreementSigned {
        return Err(ContractError::InvalidState);
    }
    if record.confirmed_by_counterparty {
        return Err(ContractError::AlreadyConfirmed);
    }

    record.confirmed_by_counterparty = true;
    save(e, &record);
    events::emit_bond_confirmed(e, bond_id, counterparty);
    Ok(())
}

/// Erase every piece of per-bond state.
///
/// The controller may always delete; the issuer only before issue. In both
/// cases the whole supply must already sit at the custodial account and no
/// order may hold escrow.
pub fn delete(e: &Env, caller: &Address, bond_id: &Symbol) -> Result<(), ContractError> {
    caller.require_auth();
    let record = load(e, bond_id)?;
    let d = &record.descriptor;

    let is_admin = parameters::admin(e).is_some_and(|a| a == *caller);
    if !is_admin {
        if *caller != d.issuer {
            return Err(ContractError::NotIssuer);
        }
        if record.state.is_issued() {
            return Err(ContractError::BondAlreadyIssued);
        }
    }

    if orders::has_open_orders(e, bond_id) {
        return Err(ContractError::OpenOrders);
    }
    let supply = ledger::total_supply(e, bond_id)?;
    if ledger::balance_of(e, &ledger::custodian(e), bond_id) != supply {
        return Err(ContractError::SupplyNotConsolidated);
    }

    e.storage().persistent().remove(&record_key(&d.issuer, bond_id));
    orders::clear_peers(e, bond_id);
    ledger::erase_series(e, bond_id);

    events::emit_bond_deleted(e, bond_id, caller);
    Ok(())
}

// ─── Holder transfers ──────────────────────────────────────────────────────

/// Move units between holder-list accounts. Once the bond is final, units may
/// only flow into the custodial account.
pub fn transfer(
    e: &Env,
    from: &Address,
    to: &Address,
    bond_id: &Symbol,
    amount: i128,
) -> Result<(), ContractError> {
    from.require_auth();
    if from == to {
        return Err(ContractError::SelfTransfer);
    }
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }

    let record = load(e, bond_id)?;
    if !is_holder(&record.descriptor, to) {
        return Err(ContractError::RecipientNotHolder);
    }
    if record.state.is_final() && *to != ledger::custodian(e) {
        return Err(ContractError::BondFinal);
    }

    ledger::move_units(e, bond_id, from, to, amount)?;
    events::emit_units_transferred(e, bond_id, from, to, amount);
    Ok(())
}

// ─── Sanity ────────────────────────────────────────────────────────────────

/// Descriptor checks that must pass before the agreement is signed.
pub fn check_sanity(e: &Env, d: &BondDescriptor) -> Result<(), ContractError> {
    if !ledger::account_exists(e, &d.verifier) {
        return Err(ContractError::VerifierUnknown);
    }

    let count = d.holders.len();
    if count < MIN_HOLDERS || count >= parameters::get_max_holders(e) {
        return Err(ContractError::HolderCountOutOfRange);
    }
    for holder in d.holders.iter() {
        if !ledger::account_exists(e, &holder) {
            return Err(ContractError::HolderUnknown);
        }
    }
    if !is_holder(d, &d.issuer) {
        return Err(ContractError::IssuerNotHolder);
    }
    if !is_holder(d, &ledger::custodian(e)) {
        return Err(ContractError::CustodianNotHolder);
    }

    let grace = parameters::get_grace_period(e);
    let now = e.ledger().timestamp();
    let collateral_maturity = d.collateral.maturity_time;

    if d.maturity_time < math::add_u64(now, grace)? {
        return Err(ContractError::MaturityTooSoon);
    }
    if math::add_u64(d.maturity_time, grace)? < collateral_maturity {
        return Err(ContractError::MaturityTooEarly);
    }
    if d.maturity_time > collateral_maturity {
        return Err(ContractError::MaturityAfterCollateral);
    }
    if d.retire_time < math::add_u64(collateral_maturity, grace)? {
        return Err(ContractError::RetireTooSoon);
    }
    if d.payoff_price.amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}
