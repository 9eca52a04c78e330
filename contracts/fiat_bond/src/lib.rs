//! Fiat-Collateralized Bond Contract
//!
//! Issues and manages a tokenized claim on an off-chain fiat bond. A bond is
//! described by its issuer, signed off by a verifier, minted in full to the
//! issuer and then circulates among a fixed list of permitted holders until
//! maturity.
//!
//! ## Components
//!
//! - **Registry** (`registry`): descriptor storage, role checks, sanity rules.
//! - **Lifecycle** (`lifecycle`): explicit transition graph; reaching a final
//!   state consolidates holder balances at the contract.
//! - **Valuation** (`valuation`): APR-discounted price, refreshed on demand,
//!   drives the maturity and retirement deadlines.
//! - **Orders** (`orders`): two-leg escrow between a seller and a buyer, one
//!   of whom must be the bond's counterparty.
//! - **Retirement** (`retirement`): issuer buy-back or liquidation after a
//!   technical default.
//! - **Ledger** (`ledger`): bond-unit balances and supply; payments move
//!   through external token contracts.
//!
//! Every mutating entry point takes the acting address explicitly and calls
//! `require_auth()` on it before comparing it to the role it claims.

#![no_std]

mod events;
mod ledger;
mod lifecycle;
pub mod math;
pub mod parameters;
mod orders;
mod registry;
mod retirement;
pub mod types;
pub mod valuation;

pub use bond_errors::ContractError;
pub use types::{
    Asset, BondDescriptor, BondRecord, BondState, CollateralBond, CommitResult, OrderPeer, Price,
    Settlement, TradeOrder,
};

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Vec};


#[cfg(test)]
mod test_retirement;
#[cfg(test)]
mod test_sanity;

#[contract]
pub struct FiatBond;

#[contractimpl]
impl FiatBond {
    // ── Controller ─────────────────────────────────────────────────────────

    /// One-time initialization. Stores the registry controller.
    pub fn initialize(e: Env, admin: Address) -> Result<(), ContractError> {
        parameters::initialize(&e, &admin)
    }

    /// Add `account` to the account directory consulted by the sanity check.
    pub fn register_account(e: Env, admin: Address, account: Address) -> Result<(), ContractError> {
        parameters::require_admin(&e, &admin)?;
        ledger::register_account(&e, &account);
        events::emit_account_registered(&e, &account);
        Ok(())
    }

    pub fn set_grace_period(e: Env, admin: Address, value: u64) -> Result<(), ContractError> {
        parameters::set_grace_period(&e, &admin, value)
    }

    pub fn set_max_holders(e: Env, admin: Address, value: u32) -> Result<(), ContractError> {
        parameters::set_max_holders(&e, &admin, value)
    }

    // ── Registry ───────────────────────────────────────────────────────────

    /// Record `descriptor` in `Created`, or overwrite it while still unverified.
    /// Requires auth from `descriptor.issuer`.
    pub fn initiate(e: Env, descriptor: BondDescriptor) -> Result<(), ContractError> {
        registry::initiate(&e, descriptor)
    }

    /// Verifier sign-off: sanity check, then `AgreementSigned`.
    pub fn verify(e: Env, verifier: Address, bond_id: Symbol) -> Result<(), ContractError> {
        registry::verify(&e, &verifier, &bond_id)
    }

    /// Mint the full supply to the issuer and start circulation.
    pub fn issue(e: Env, issuer: Address, bond_id: Symbol) -> Result<(), ContractError> {
        registry::issue(&e, &issuer, &bond_id)
    }

    pub fn confirm(e: Env, counterparty: Address, bond_id: Symbol) -> Result<(), ContractError> {
        registry::confirm(&e, &counterparty, &bond_id)
    }

    /// Erase the bond. The controller may always delete; the issuer only
    /// before issue. The full supply must sit at this contract.
    pub fn delete(e: Env, caller: Address, bond_id: Symbol) -> Result<(), ContractError> {
        registry::delete(&e, &caller, &bond_id)
    }

    /// Move units to another address on the holder list.
    pub fn transfer(
        e: Env,
        from: Address,
        to: Address,
        bond_id: Symbol,
        amount: i128,
    ) -> Result<(), ContractError> {
        registry::transfer(&e, &from, &to, &bond_id, amount)
    }

    // ── Valuation ──────────────────────────────────────────────────────────

    /// Reprice the bond and apply maturity/retirement transitions. Open to anyone.
    pub fn refresh(e: Env, bond_id: Symbol) -> Result<Price, ContractError> {
        let record = valuation::refresh(&e, &bond_id)?;
        Ok(record.current_price)
    }

    // ── Orders ─────────────────────────────────────────────────────────────

    /// Escrow one leg of the (seller, buyer) order. `caller` must be the
    /// seller for a sell leg and the buyer for a buy leg.
    pub fn commit(
        e: Env,
        caller: Address,
        bond_id: Symbol,
        seller: Address,
        buyer: Address,
        asset: Asset,
        is_sell: bool,
    ) -> Result<CommitResult, ContractError> {
        orders::commit(&e, &caller, &bond_id, &seller, &buyer, &asset, is_sell)
    }

    pub fn cancel_order(
        e: Env,
        caller: Address,
        bond_id: Symbol,
        seller: Address,
        buyer: Address,
    ) -> Result<TradeOrder, ContractError> {
        orders::cancel(&e, &caller, &bond_id, &seller, &buyer)
    }

    // ── Retirement ─────────────────────────────────────────────────────────

    /// Issuer buy-back while circulating, or liquidation-agent payoff after a
    /// technical default. Both end in `ExpiredPaidOff`.
    pub fn retire(
        e: Env,
        caller: Address,
        bond_id: Symbol,
        payment: Price,
    ) -> Result<(), ContractError> {
        retirement::retire(&e, &caller, &bond_id, &payment)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn get_bond(e: Env, bond_id: Symbol) -> Result<BondRecord, ContractError> {
        registry::load(&e, &bond_id)
    }

    pub fn get_state(e: Env, bond_id: Symbol) -> Result<BondState, ContractError> {
        Ok(registry::load(&e, &bond_id)?.state)
    }

    /// Price as of the last refresh.
    pub fn get_price(e: Env, bond_id: Symbol) -> Result<Price, ContractError> {
        Ok(registry::load(&e, &bond_id)?.current_price)
    }

    pub fn is_final(e: Env, bond_id: Symbol) -> Result<bool, ContractError> {
        Ok(registry::load(&e, &bond_id)?.state.is_final())
    }

    pub fn get_order(
        e: Env,
        bond_id: Symbol,
        seller: Address,
        buyer: Address,
    ) -> Option<TradeOrder> {
        orders::load_order(&e, &bond_id, &seller, &buyer)
    }

    pub fn get_open_orders(e: Env, bond_id: Symbol) -> Vec<OrderPeer> {
        orders::open_orders(&e, &bond_id)
    }

    pub fn balance_of(e: Env, account: Address, bond_id: Symbol) -> i128 {
        ledger::balance_of(&e, &account, &bond_id)
    }

    pub fn total_supply(e: Env, bond_id: Symbol) -> Result<i128, ContractError> {
        ledger::total_supply(&e, &bond_id)
    }

    pub fn max_supply(e: Env, bond_id: Symbol) -> Result<i128, ContractError> {
        ledger::max_supply(&e, &bond_id)
    }

    pub fn is_account(e: Env, account: Address) -> bool {
        ledger::account_exists(&e, &account)
    }

    pub fn get_admin(e: Env) -> Option<Address> {
        parameters::admin(&e)
    }

    pub fn get_grace_period(e: Env) -> u64 {
        parameters::get_grace_period(&e)
    }

    pub fn get_max_holders(e: Env) -> u32 {
        parameters::get_max_holders(&e)
    }
}
