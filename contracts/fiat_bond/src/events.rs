use soroban_sdk::{Address, Env, Symbol};

use crate::types::{BondState, Settlement};

/// Emitted when a descriptor is recorded or rewritten by its issuer.
///
/// # Topics
/// * `Symbol` - "bond_initiated"
/// * `Symbol` - The bond id
///
/// # Data
/// * `Address` - The issuer
/// * `i128` - The maximum supply
pub fn emit_bond_initiated(e: &Env, bond_id: &Symbol, issuer: &Address, max_supply: i128) {
    let topics = (Symbol::new(e, "bond_initiated"), bond_id.clone());
    e.events().publish(topics, (issuer.clone(), max_supply));
}

/// Emitted on every lifecycle transition.
///
/// # Data
/// * `BondState` - The previous state
/// * `BondState` - The new state
pub fn emit_state_changed(e: &Env, bond_id: &Symbol, old: BondState, new: BondState) {
    let topics = (Symbol::new(e, "state_changed"), bond_id.clone());
    e.events().publish(topics, (old, new));
}

pub fn emit_bond_verified(e: &Env, bond_id: &Symbol, verifier: &Address) {
    let topics = (Symbol::new(e, "bond_verified"), bond_id.clone());
    e.events().publish(topics, verifier.clone());
}

/// Emitted once the full supply is minted to the issuer.
///
/// # Data
/// * `Address` - The issuer
/// * `i128` - The minted supply
pub fn emit_bond_issued(e: &Env, bond_id: &Symbol, issuer: &Address, supply: i128) {
    let topics = (Symbol::new(e, "bond_issued"), bond_id.clone());
    e.events().publish(topics, (issuer.clone(), supply));
}

pub fn emit_bond_confirmed(e: &Env, bond_id: &Symbol, counterparty: &Address) {
    let topics = (Symbol::new(e, "bond_confirmed"), bond_id.clone());
    e.events().publish(topics, counterparty.clone());
}

/// Emitted after each valuation refresh.
///
/// # Data
/// * `i128` - The current price
/// * `u64` - The ledger timestamp of the refresh
pub fn emit_price_updated(e: &Env, bond_id: &Symbol, price: i128, timestamp: u64) {
    let topics = (Symbol::new(e, "price_updated"), bond_id.clone());
    e.events().publish(topics, (price, timestamp));
}

/// Notification that `party` should inspect a new pending order.
///
/// # Topics
/// * `Symbol` - "order_pending"
/// * `Symbol` - The bond id
/// * `Address` - The party whose leg is awaited
///
/// # Data
/// * `Address` - The seller
/// * `Address` - The buyer
pub fn emit_order_pending(
    e: &Env,
    bond_id: &Symbol,
    party: &Address,
    seller: &Address,
    buyer: &Address,
) {
    let topics = (
        Symbol::new(e, "order_pending"),
        bond_id.clone(),
        party.clone(),
    );
    e.events().publish(topics, (seller.clone(), buyer.clone()));
}

pub fn emit_trade_matched(
    e: &Env,
    bond_id: &Symbol,
    seller: &Address,
    buyer: &Address,
    settlement: &Settlement,
) {
    let topics = (Symbol::new(e, "trade_matched"), bond_id.clone());
    e.events().publish(
        topics,
        (
            seller.clone(),
            buyer.clone(),
            settlement.trade_value,
            settlement.trade_quantity,
        ),
    );
}

pub fn emit_order_cancelled(e: &Env, bond_id: &Symbol, seller: &Address, buyer: &Address) {
    let topics = (Symbol::new(e, "order_cancelled"), bond_id.clone());
    e.events().publish(topics, (seller.clone(), buyer.clone()));
}

/// Emitted when a bond is retired.
///
/// # Data
/// * `Address` - The issuer or liquidation agent that retired it
/// * `i128` - The payment supplied
/// * `i128` - The remainder refunded to the caller
pub fn emit_bond_retired(e: &Env, bond_id: &Symbol, caller: &Address, paid: i128, refund: i128) {
    let topics = (Symbol::new(e, "bond_retired"), bond_id.clone());
    e.events().publish(topics, (caller.clone(), paid, refund));
}

pub fn emit_holder_swept(e: &Env, bond_id: &Symbol, holder: &Address, amount: i128) {
    let topics = (Symbol::new(e, "holder_swept"), bond_id.clone(), holder.clone());
    e.events().publish(topics, amount);
}

pub fn emit_units_transferred(
    e: &Env,
    bond_id: &Symbol,
    from: &Address,
    to: &Address,
    amount: i128,
) {
    let topics = (Symbol::new(e, "units_transferred"), bond_id.clone());
    e.events().publish(topics, (from.clone(), to.clone(), amount));
}

pub fn emit_bond_deleted(e: &Env, bond_id: &Symbol, caller: &Address) {
    let topics = (Symbol::new(e, "bond_deleted"), bond_id.clone());
    e.events().publish(topics, caller.clone());
}

pub fn emit_account_registered(e: &Env, account: &Address) {
    e.events()
        .publish((Symbol::new(e, "account_registered"),), account.clone());
}
