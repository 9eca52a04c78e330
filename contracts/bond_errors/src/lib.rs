#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by failure class for monitoring and client handling.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Wrong caller for the role an operation requires (codes 100-199).
    Authorization,
    /// Operation invoked in the wrong lifecycle state (codes 200-299).
    State,
    /// Descriptor sanity and argument violations (codes 300-399).
    Validation,
    /// A payment or escrow leg cannot cover its obligation (codes 400-499).
    InsufficientFunds,
    /// Second commitment on an already pending escrow leg (codes 500-599).
    DuplicateOrder,
    /// Missing bond, order or balance (codes 600-699).
    NotFound,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by the bond contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : State
///   300 - 399 : Validation
///   400 - 499 : InsufficientFunds
///   500 - 599 : DuplicateOrder
///   600 - 699 : NotFound
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the registry controller.
    NotAdmin = 100,

    /// Caller is not the bond issuer.
    NotIssuer = 101,

    /// Caller is not the bond verifier.
    NotVerifier = 102,

    /// Caller is not the designated counterparty.
    NotCounterparty = 103,

    /// Caller is neither the issuer nor the liquidation agent.
    NotRetirementParty = 104,

    /// Caller is not the party owning the escrow leg it acts on.
    NotOrderParty = 105,

    // --- State (200-299) ---
    /// Bond is not in the lifecycle state the operation requires.
    InvalidState = 200,

    /// Requested state change is not an edge of the lifecycle graph.
    InvalidTransition = 201,

    /// Descriptor can no longer be rewritten (bond left CREATED or belongs
    /// to another issuer).
    BondAlreadyCommitted = 202,

    /// Counterparty confirmation was already recorded.
    AlreadyConfirmed = 203,

    /// Issuer tried to delete a bond that already circulates.
    BondAlreadyIssued = 204,

    /// Bond still has pending escrow orders.
    OpenOrders = 205,

    /// Bond is final; units may only move to the custodial account.
    BondFinal = 206,

    /// Full supply is not yet consolidated at the custodial account.
    SupplyNotConsolidated = 207,

    // --- Validation (300-399) ---
    /// Verifier account is not known to the ledger.
    VerifierUnknown = 300,

    /// A holder-list entry is not known to the ledger.
    HolderUnknown = 301,

    /// Holder list size is outside `[3, max_holders)`.
    HolderCountOutOfRange = 302,

    /// Issuer is missing from the holder list.
    IssuerNotHolder = 303,

    /// Custodial account is missing from the holder list.
    CustodianNotHolder = 304,

    /// Maturity is less than one grace period away.
    MaturityTooSoon = 305,

    /// Bond matures after its collateral bond.
    MaturityAfterCollateral = 306,

    /// Bond matures more than one grace period before its collateral bond.
    MaturityTooEarly = 307,

    /// Retirement deadline is less than one grace period after collateral maturity.
    RetireTooSoon = 308,

    /// Amount must be strictly positive.
    InvalidAmount = 309,

    /// Neither trade side is the designated counterparty.
    CounterpartyNotInTrade = 310,

    /// Seller and buyer are the same account.
    SelfTrade = 311,

    /// Committed asset is not denominated in the expected unit.
    WrongAsset = 312,

    /// Recipient of bond units is not on the holder list.
    RecipientNotHolder = 313,

    /// Protocol parameter outside its bounds.
    ParameterOutOfRange = 314,

    /// Sender and recipient are the same account.
    SelfTransfer = 315,

    /// Unit precision is too large to scale safely.
    InvalidDecimals = 316,

    // --- InsufficientFunds (400-499) ---
    /// Supplied payment does not cover the required payout.
    InsufficientFunds = 400,

    /// Account balance is lower than the requested debit.
    InsufficientBalance = 401,

    /// Mint would exceed the declared maximum supply.
    SupplyExceeded = 402,

    // --- DuplicateOrder (500-599) ---
    /// The escrow leg of this order is already pending.
    DuplicateOrder = 500,

    // --- NotFound (600-699) ---
    /// No bond exists for the given id.
    BondNotFound = 600,

    /// No order exists for the given (bond, seller, buyer) triple.
    OrderNotFound = 601,

    /// No balance entry exists for the given account.
    BalanceNotFound = 602,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,

    /// Integer underflow detected during a checked arithmetic operation.
    Underflow = 701,

    /// Division by zero in a checked arithmetic operation.
    DivisionByZero = 702,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match *self as u32 {
            1..=99 => ErrorCategory::Initialization,
            100..=199 => ErrorCategory::Authorization,
            200..=299 => ErrorCategory::State,
            300..=399 => ErrorCategory::Validation,
            400..=499 => ErrorCategory::InsufficientFunds,
            500..=599 => ErrorCategory::DuplicateOrder,
            600..=699 => ErrorCategory::NotFound,
            _ => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::NotAdmin => "Caller is not the registry controller",
            ContractError::NotIssuer => "Caller is not the bond issuer",
            ContractError::NotVerifier => "Caller is not the bond verifier",
            ContractError::NotCounterparty => "Caller is not the bond counterparty",
            ContractError::NotRetirementParty => {
                "Caller must be the issuer or the liquidation agent"
            }
            ContractError::NotOrderParty => "Caller does not own this escrow leg",
            ContractError::InvalidState => "Bond is not in the required lifecycle state",
            ContractError::InvalidTransition => "Lifecycle transition is not allowed",
            ContractError::BondAlreadyCommitted => "Cannot modify an already-committed bond",
            ContractError::AlreadyConfirmed => "Bond is already confirmed by counterparty",
            ContractError::BondAlreadyIssued => "Issuer can delete a bond only before issue",
            ContractError::OpenOrders => "Bond still has pending escrow orders",
            ContractError::BondFinal => "Bond is final; units may only go to custody",
            ContractError::SupplyNotConsolidated => {
                "Can erase only if all units are at the custodial account"
            }
            ContractError::VerifierUnknown => "Verifier account does not exist",
            ContractError::HolderUnknown => "Holder account does not exist",
            ContractError::HolderCountOutOfRange => "Holder list size is out of range",
            ContractError::IssuerNotHolder => "Issuer must be on the holder list",
            ContractError::CustodianNotHolder => "Custodial account must be on the holder list",
            ContractError::MaturityTooSoon => "Maturity is too close to the current time",
            ContractError::MaturityAfterCollateral => {
                "Maturity must not be later than collateral maturity"
            }
            ContractError::MaturityTooEarly => "Maturity is too far from collateral maturity",
            ContractError::RetireTooSoon => {
                "Retire time must be a grace period after collateral maturity"
            }
            ContractError::InvalidAmount => "Amount must be strictly positive (> 0)",
            ContractError::CounterpartyNotInTrade => "Counterparty must participate in the trade",
            ContractError::SelfTrade => "Cannot trade with yourself",
            ContractError::WrongAsset => "Asset is not denominated in the expected unit",
            ContractError::RecipientNotHolder => "Recipient is not on the holder list",
            ContractError::ParameterOutOfRange => "Parameter value is out of bounds",
            ContractError::SelfTransfer => "Cannot transfer to self",
            ContractError::InvalidDecimals => "Unit decimals are out of range",
            ContractError::InsufficientFunds => "Not enough funds to cover the payout",
            ContractError::InsufficientBalance => "Overdrawn balance",
            ContractError::SupplyExceeded => "Quantity exceeds available supply",
            ContractError::DuplicateOrder => "Only one order at a time allowed",
            ContractError::BondNotFound => "Bond not found",
            ContractError::OrderNotFound => "No order for this bond, seller and buyer",
            ContractError::BalanceNotFound => "No balance object found",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
            ContractError::Underflow => "Integer underflow in checked arithmetic",
            ContractError::DivisionByZero => "Division by zero in checked arithmetic",
        }
    }
}
