use soroban_sdk::{contracttype, Address, String, Symbol, Vec};

// ─── Lifecycle ─────────────────────────────────────────────────────────────

/// Lifecycle state of a bond. Discriminants follow the normal progression.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum BondState {
    Created = 0,
    AgreementSigned = 1,
    Circulating = 2,
    /// Final. Supply sits at the issuer and the custodial account only.
    ExpiredPaidOff = 3,
    ExpiredTechDefaulted = 4,
    /// Final.
    ExpiredDefaulted = 5,
}

// ─── Money ─────────────────────────────────────────────────────────────────

/// An amount of an external payment token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Price {
    /// Token contract the amount is denominated in.
    pub token: Address,
    pub amount: i128,
}

/// One escrow leg as committed by a trade party.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asset {
    /// Bond units of the given bond id, kept on this contract's ledger.
    Units(Symbol, i128),
    /// Payment in an external token.
    Payment(Address, i128),
}

// ─── Descriptor ────────────────────────────────────────────────────────────

/// The off-chain fiat bond pledged as collateral.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralBond {
    pub isin: String,
    pub name: String,
    pub currency: String,
    pub country: String,
    pub description_url: String,
    pub maturity_time: u64,
}

/// Everything the issuer declares about a bond. Frozen once verified.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondDescriptor {
    pub bond_id: Symbol,
    pub issuer: Address,
    /// Total issuable quantity, in base units.
    pub max_supply: i128,
    /// Precision of bond units; one whole unit is `10^unit_decimals` base units.
    pub unit_decimals: u32,
    /// Amount owed per whole unit at maturity.
    pub payoff_price: Price,
    pub maturity_time: u64,
    /// Grace deadline after which a technical default becomes a default.
    pub retire_time: u64,
    /// Annualized rate, 1000 = 10%.
    pub apr: u32,
    pub verifier: Address,
    pub counterparty: Address,
    pub liquidation_agent: Address,
    /// Accounts permitted to hold units.
    pub holders: Vec<Address>,
    pub collateral: CollateralBond,
    pub escrow_contract_link: String,
    pub additional_info: String,
    pub fungible: bool,
}

/// Per-bond record: the descriptor plus its mutable lifecycle data.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondRecord {
    pub descriptor: BondDescriptor,
    pub state: BondState,
    /// Ledger timestamp of the first valuation after issue (0 until then).
    pub initial_time: u64,
    /// Price at the first valuation after issue.
    pub initial_price: Option<i128>,
    pub current_price: Price,
    pub confirmed_by_counterparty: bool,
}

// ─── Ledger ────────────────────────────────────────────────────────────────

/// Supply accounting for one bond's unit series.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupplyStats {
    pub supply: i128,
    pub max_supply: i128,
    pub issuer: Address,
}

// ─── Orders ────────────────────────────────────────────────────────────────

/// A bilateral escrowed trade awaiting one of its legs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TradeOrder {
    pub seller: Address,
    pub buyer: Address,
    /// Units escrowed by the seller (0 while pending).
    pub received_quantity: i128,
    /// Payment escrowed by the buyer (amount 0 while pending).
    pub received_payment: Price,
    /// Reference price snapshot taken when the order was opened.
    pub price: Price,
}

/// Entry of the per-bond peer index.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderPeer {
    pub seller: Address,
    pub buyer: Address,
}

/// Amounts moved when both legs of an order were filled.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settlement {
    /// Payment sent to the seller.
    pub trade_value: i128,
    /// Units sent to the buyer.
    pub trade_quantity: i128,
    /// Payment returned to the buyer.
    pub payment_refund: i128,
    /// Units returned to the seller.
    pub quantity_refund: i128,
}

/// Result of committing an escrow leg.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CommitResult {
    /// First leg recorded; waiting for the other party.
    Pending(TradeOrder),
    /// Second leg arrived and the trade settled.
    Settled(Settlement),
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Registry controller.
    Admin,
    /// Account directory entry.
    Account(Address),
    /// Unit series supply, scoped by bond id.
    Supply(Symbol),
    /// Bond record, scoped by issuer and keyed by bond id.
    Bond(Address, Symbol),
    /// Unit balance, scoped by account and keyed by bond id.
    Balance(Address, Symbol),
    /// Trade order, scoped by bond id and keyed by (seller, buyer).
    Order(Symbol, Address, Address),
    /// Peer index of open orders for a bond.
    OrderPeers(Symbol),
}
