//! Bond-unit ledger and payment movement.
//!
//! Unit balances, supply accounting and the account directory live in
//! `persistent()` storage with per-entry TTL bumps. Payments in external
//! tokens go through the token contract, using this contract's own address
//! as the custodial account.

use bond_errors::ContractError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env, Symbol};

use crate::math;
use crate::types::{DataKey, SupplyStats};

/// Minimum ledger sequence TTL before a bump is requested (~1 day at 5 s/ledger).
const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
const BUMP_TARGET: u32 = 518_400;

fn bump(e: &Env, key: &DataKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, BUMP_THRESHOLD, BUMP_TARGET);
}

/// The custodial account: the contract itself.
#[must_use]
pub fn custodian(e: &Env) -> Address {
    e.current_contract_address()
}

// ─── Account directory ─────────────────────────────────────────────────────

pub fn register_account(e: &Env, account: &Address) {
    let key = DataKey::Account(account.clone());
    e.storage().persistent().set(&key, &true);
    bump(e, &key);
}

/// Whether `account` is known to the ledger. The custodial account always is.
#[must_use]
pub fn account_exists(e: &Env, account: &Address) -> bool {
    *account == custodian(e)
        || e.storage()
            .persistent()
            .has(&DataKey::Account(account.clone()))
}

// ─── Supply ────────────────────────────────────────────────────────────────

/// Create the unit series for `bond_id`, or rewrite it while nothing is minted.
pub fn create_series(
    e: &Env,
    bond_id: &Symbol,
    issuer: &Address,
    max_supply: i128,
) -> Result<(), ContractError> {
    if max_supply <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let key = DataKey::Supply(bond_id.clone());
    let supply = match e.storage().persistent().get::<_, SupplyStats>(&key) {
        Some(existing) if existing.supply != 0 => return Err(ContractError::BondAlreadyCommitted),
        _ => 0,
    };
    let stats = SupplyStats {
        supply,
        max_supply,
        issuer: issuer.clone(),
    };
    e.storage().persistent().set(&key, &stats);
    bump(e, &key);
    Ok(())
}

pub fn find_series(e: &Env, bond_id: &Symbol) -> Option<SupplyStats> {
    let key = DataKey::Supply(bond_id.clone());
    let stats: SupplyStats = e.storage().persistent().get(&key)?;
    bump(e, &key);
    Some(stats)
}

pub fn load_series(e: &Env, bond_id: &Symbol) -> Result<SupplyStats, ContractError> {
    find_series(e, bond_id).ok_or(ContractError::BondNotFound)
}

pub fn total_supply(e: &Env, bond_id: &Symbol) -> Result<i128, ContractError> {
    Ok(load_series(e, bond_id)?.supply)
}

pub fn max_supply(e: &Env, bond_id: &Symbol) -> Result<i128, ContractError> {
    Ok(load_series(e, bond_id)?.max_supply)
}

/// Mint `amount` units to the series issuer.
pub fn mint(e: &Env, bond_id: &Symbol, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let mut stats = load_series(e, bond_id)?;
    let available = math::sub_i128(stats.max_supply, stats.supply)?;
    if amount > available {
        return Err(ContractError::SupplyExceeded);
    }
    stats.supply = math::add_i128(stats.supply, amount)?;

    let key = DataKey::Supply(bond_id.clone());
    e.storage().persistent().set(&key, &stats);
    bump(e, &key);

    credit(e, &stats.issuer, bond_id, amount)
}

/// Drop the series and the custodial balance. Other balances must be empty.
pub fn erase_series(e: &Env, bond_id: &Symbol) {
    e.storage()
        .persistent()
        .remove(&DataKey::Supply(bond_id.clone()));
    e.storage()
        .persistent()
        .remove(&DataKey::Balance(custodian(e), bond_id.clone()));
}

// ─── Balances ──────────────────────────────────────────────────────────────

#[must_use]
pub fn balance_of(e: &Env, account: &Address, bond_id: &Symbol) -> i128 {
    e.storage()
        .persistent()
        .get(&DataKey::Balance(account.clone(), bond_id.clone()))
        .unwrap_or(0)
}

/// Subtract `amount` from `account`. Empty entries are removed.
pub fn debit(
    e: &Env,
    account: &Address,
    bond_id: &Symbol,
    amount: i128,
) -> Result<(), ContractError> {
    let key = DataKey::Balance(account.clone(), bond_id.clone());
    let balance: i128 = e
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::BalanceNotFound)?;
    if balance < amount {
        return Err(ContractError::InsufficientBalance);
    }
    let remaining = math::sub_i128(balance, amount)?;
    if remaining == 0 {
        e.storage().persistent().remove(&key);
    } else {
        e.storage().persistent().set(&key, &remaining);
        bump(e, &key);
    }
    Ok(())
}

/// Add `amount` to `account`, creating the entry if needed.
pub fn credit(
    e: &Env,
    account: &Address,
    bond_id: &Symbol,
    amount: i128,
) -> Result<(), ContractError> {
    let key = DataKey::Balance(account.clone(), bond_id.clone());
    let balance: i128 = e.storage().persistent().get(&key).unwrap_or(0);
    let updated = math::add_i128(balance, amount)?;
    e.storage().persistent().set(&key, &updated);
    bump(e, &key);
    Ok(())
}

/// Move units between accounts. A zero amount moves nothing.
pub fn move_units(
    e: &Env,
    bond_id: &Symbol,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    debit(e, from, bond_id, amount)?;
    credit(e, to, bond_id, amount)
}

// ─── Payments ──────────────────────────────────────────────────────────────

/// Pull `amount` of `token` from `from` into custody.
pub fn collect(e: &Env, token: &Address, from: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    let contract = custodian(e);
    TokenClient::new(e, token).transfer(from, &contract, &amount);
}

/// Pay `amount` of `token` out of custody to `to`.
pub fn pay(e: &Env, token: &Address, to: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    let contract = custodian(e);
    TokenClient::new(e, token).transfer(&contract, to, &amount);
}
