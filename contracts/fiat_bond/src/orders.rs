//! Bilateral escrowed orders.
//!
//! A seller escrows bond units and a buyer escrows payment, each naming the
//! other party. The first leg opens the order; the second leg settles it at the
//! reference price captured when the order was opened.

use bond_errors::ContractError;
use soroban_sdk::{Address, Env, Symbol, Vec};

use crate::types::{
    Asset, BondDescriptor, BondState, CommitResult, DataKey, OrderPeer, Price, Settlement,
    TradeOrder,
};
use crate::{events, ledger, math, registry, valuation};

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

fn order_key(bond_id: &Symbol, seller: &Address, buyer: &Address) -> DataKey {
    DataKey::Order(bond_id.clone(), seller.clone(), buyer.clone())
}

// ─── Storage ───────────────────────────────────────────────────────────────

pub fn load_order(
    e: &Env,
    bond_id: &Symbol,
    seller: &Address,
    buyer: &Address,
) -> Option<TradeOrder> {
    e.storage()
        .persistent()
        .get(&order_key(bond_id, seller, buyer))
}

fn save_order(e: &Env, bond_id: &Symbol, order: &TradeOrder) {
    let key = order_key(bond_id, &order.seller, &order.buyer);
    e.storage().persistent().set(&key, order);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

fn remove_order(e: &Env, bond_id: &Symbol, seller: &Address, buyer: &Address) {
    e.storage()
        .persistent()
        .remove(&order_key(bond_id, seller, buyer));

    let mut peers = open_orders(e, bond_id);
    let peer = OrderPeer {
        seller: seller.clone(),
        buyer: buyer.clone(),
    };
    if let Some(index) = peers.first_index_of(&peer) {
        peers.remove(index);
    }
    save_peers(e, bond_id, &peers);
}

// ─── Peer index ────────────────────────────────────────────────────────────

/// (seller, buyer) pairs with an open order on `bond_id`.
#[must_use]
pub fn open_orders(e: &Env, bond_id: &Symbol) -> Vec<OrderPeer> {
    e.storage()
        .persistent()
        .get(&DataKey::OrderPeers(bond_id.clone()))
        .unwrap_or_else(|| Vec::new(e))
}

#[must_use]
pub fn has_open_orders(e: &Env, bond_id: &Symbol) -> bool {
    !open_orders(e, bond_id).is_empty()
}

fn save_peers(e: &Env, bond_id: &Symbol, peers: &Vec<OrderPeer>) {
    let key = DataKey::OrderPeers(bond_id.clone());
    if peers.is_empty() {
        e.storage().persistent().remove(&key);
    } else {
        e.storage().persistent().set(&key, peers);
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    }
}

pub fn clear_peers(e: &Env, bond_id: &Symbol) {
    e.storage()
        .persistent()
        .remove(&DataKey::OrderPeers(bond_id.clone()));
}

// ─── Commit ────────────────────────────────────────────────────────────────

/// Escrow one leg of the (seller, buyer) order on `bond_id`.
///
/// Exactly one of the two parties must be the bond's counterparty and both
/// must be on the holder list. A sell leg is denominated in the bond's own
/// units, a buy leg in the token of the current reference price.
pub fn commit(
    e: &Env,
    caller: &Address,
    bond_id: &Symbol,
    seller: &Address,
    buyer: &Address,
    asset: &Asset,
    is_sell: bool,
) -> Result<CommitResult, ContractError> {
    caller.require_auth();
    let party = if is_sell { seller } else { buyer };
    if caller != party {
        return Err(ContractError::NotOrderParty);
    }
    if seller == buyer {
        return Err(ContractError::SelfTrade);
    }

    let record = valuation::refresh(e, bond_id)?;
    if record.state != BondState::Circulating {
        return Err(ContractError::InvalidState);
    }
    let d = &record.descriptor;
    if *seller != d.counterparty && *buyer != d.counterparty {
        return Err(ContractError::CounterpartyNotInTrade);
    }
    if !registry::is_holder(d, seller) || !registry::is_holder(d, buyer) {
        return Err(ContractError::RecipientNotHolder);
    }

    let amount = match (asset, is_sell) {
        (Asset::Units(id, amount), true) if id == bond_id => *amount,
        (Asset::Payment(token, amount), false) if *token == record.current_price.token => *amount,
        _ => return Err(ContractError::WrongAsset),
    };
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }

    match load_order(e, bond_id, seller, buyer) {
        None => {
            let order = TradeOrder {
                seller: seller.clone(),
                buyer: buyer.clone(),
                received_quantity: if is_sell { amount } else { 0 },
                received_payment: Price {
                    token: record.current_price.token.clone(),
                    amount: if is_sell { 0 } else { amount },
                },
                price: record.current_price.clone(),
            };
            escrow(e, bond_id, &order, is_sell, amount)?;
            save_order(e, bond_id, &order);

            let mut peers = open_orders(e, bond_id);
            peers.push_back(OrderPeer {
                seller: seller.clone(),
                buyer: buyer.clone(),
            });
            save_peers(e, bond_id, &peers);

            let awaited = if is_sell { buyer } else { seller };
            events::emit_order_pending(e, bond_id, awaited, seller, buyer);
            Ok(CommitResult::Pending(order))
        }
        Some(mut order) => {
            if is_sell {
                if order.received_quantity != 0 {
                    return Err(ContractError::DuplicateOrder);
                }
                order.received_quantity = amount;
            } else {
                if order.received_payment.amount != 0 {
                    return Err(ContractError::DuplicateOrder);
                }
                order.received_payment.amount = amount;
            }
            escrow(e, bond_id, &order, is_sell, amount)?;
            let settlement = settle(e, d, &order)?;
            Ok(CommitResult::Settled(settlement))
        }
    }
}

fn escrow(
    e: &Env,
    bond_id: &Symbol,
    order: &TradeOrder,
    is_sell: bool,
    amount: i128,
) -> Result<(), ContractError> {
    if is_sell {
        ledger::move_units(e, bond_id, &order.seller, &ledger::custodian(e), amount)
    } else {
        ledger::collect(e, &order.received_payment.token, &order.buyer, amount);
        Ok(())
    }
}

// ─── Settlement ────────────────────────────────────────────────────────────

/// Split both escrowed legs between the parties.
///
/// ```text
/// reference      = round(price * quantity / scale)
/// trade_value    = min(payment, reference)
/// trade_quantity = min(round(trade_value * scale / price), quantity)
/// ```
///
/// Surpluses go back to whoever escrowed them. Nothing moves for a zero amount.
pub fn settle(
    e: &Env,
    d: &BondDescriptor,
    order: &TradeOrder,
) -> Result<Settlement, ContractError> {
    let bond_id = &d.bond_id;
    remove_order(e, bond_id, &order.seller, &order.buyer);

    let scale = math::unit_scale(d.unit_decimals)?;
    let price = order.price.amount;
    let quantity = order.received_quantity;
    let payment = order.received_payment.amount;

    let reference = math::round_div(math::mul_i128(price, quantity)?, scale)?;
    let trade_value = payment.min(reference);
    let payment_refund = math::sub_i128(payment, trade_value)?;
    let trade_quantity = math::round_div(math::mul_i128(trade_value, scale)?, price)?.min(quantity);
    let quantity_refund = math::sub_i128(quantity, trade_quantity)?;

    if trade_quantity > 0 && !registry::is_holder(d, &order.buyer) {
        return Err(ContractError::RecipientNotHolder);
    }

    let token = &order.received_payment.token;
    let custodian = ledger::custodian(e);
    ledger::pay(e, token, &order.seller, trade_value);
    ledger::pay(e, token, &order.buyer, payment_refund);
    ledger::move_units(e, bond_id, &custodian, &order.buyer, trade_quantity)?;
    ledger::move_units(e, bond_id, &custodian, &order.seller, quantity_refund)?;

    let settlement = Settlement {
        trade_value,
        trade_quantity,
        payment_refund,
        quantity_refund,
    };
    events::emit_trade_matched(e, bond_id, &order.seller, &order.buyer, &settlement);
    Ok(settlement)
}

// ─── Cancel ────────────────────────────────────────────────────────────────

/// Withdraw a half-filled order and return its escrow.
///
/// A unit leg stays at the custodial account when the bond is already final.
pub fn cancel(
    e: &Env,
    caller: &Address,
    bond_id: &Symbol,
    seller: &Address,
    buyer: &Address,
) -> Result<TradeOrder, ContractError> {
    caller.require_auth();
    if caller != seller && caller != buyer {
        return Err(ContractError::NotOrderParty);
    }
    let record = registry::load(e, bond_id)?;
    let order = load_order(e, bond_id, seller, buyer).ok_or(ContractError::OrderNotFound)?;
    remove_order(e, bond_id, seller, buyer);

    ledger::pay(
        e,
        &order.received_payment.token,
        buyer,
        order.received_payment.amount,
    );
    if !record.state.is_final() {
        ledger::move_units(
            e,
            bond_id,
            &ledger::custodian(e),
            seller,
            order.received_quantity,
        )?;
    }

    events::emit_order_cancelled(e, bond_id, seller, buyer);
    Ok(order)
}
