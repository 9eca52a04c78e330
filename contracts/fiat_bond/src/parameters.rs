//! Protocol Parameters Module
//!
//! Controller-owned configuration for the bond registry. Every parameter has a
//! default and enforced min/max bounds.
//!
//! ## Parameters
//! 1. **Grace period** - minimum distance (seconds) between "now", maturity,
//!    collateral maturity and the retirement deadline.
//! 2. **Max holders** - exclusive upper bound on the holder-list size.
//!
//! ## Governance Control
//! Updates are restricted to the registry controller set by `initialize`.
//! Every successful update emits `parameter_changed`.

use bond_errors::ContractError;
use soroban_sdk::{contracttype, Address, Env, String, Symbol};

use crate::types::DataKey;

// ============================================================================
// Parameter Bounds Constants
// ============================================================================

/// Minimum grace period in seconds.
pub const MIN_GRACE_PERIOD_SECS: u64 = 0;
/// Maximum grace period in seconds (90 days).
pub const MAX_GRACE_PERIOD_SECS: u64 = 7_776_000;
/// Default grace period in seconds (one week).
pub const DEFAULT_GRACE_PERIOD_SECS: u64 = 604_800;

/// Smallest allowed holder-list bound; lists need at least 3 entries.
pub const MIN_MAX_HOLDERS: u32 = 4;
/// Largest allowed holder-list bound.
pub const MAX_MAX_HOLDERS: u32 = 64;
/// Default holder-list bound.
pub const DEFAULT_MAX_HOLDERS: u32 = 10;

/// Minimum holder-list size: issuer, custodial account and one more party.
pub const MIN_HOLDERS: u32 = 3;

/// Seconds in the 365-day year used for APR accrual.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Largest unit precision accepted in a descriptor.
pub const MAX_UNIT_DECIMALS: u32 = 18;

// ============================================================================
// Storage Keys
// ============================================================================

#[contracttype]
#[derive(Clone, Debug)]
pub enum ParameterKey {
    GracePeriodSecs,
    MaxHolders,
}

// ============================================================================
// Controller
// ============================================================================

/// Store the registry controller. Fails if one is already set.
pub fn initialize(e: &Env, admin: &Address) -> Result<(), ContractError> {
    admin.require_auth();
    if e.storage().instance().has(&DataKey::Admin) {
        return Err(ContractError::AlreadyInitialized);
    }
    e.storage().instance().set(&DataKey::Admin, admin);
    Ok(())
}

/// The registry controller, if the contract was initialized.
#[must_use]
pub fn admin(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::Admin)
}

/// Require `caller` to be the controller and to have authorized the call.
pub fn require_admin(e: &Env, caller: &Address) -> Result<(), ContractError> {
    let stored = admin(e).ok_or(ContractError::NotInitialized)?;
    caller.require_auth();
    if *caller != stored {
        return Err(ContractError::NotAdmin);
    }
    Ok(())
}

// ============================================================================
// Parameter Getters
// ============================================================================

/// Current grace period in seconds. Returns default if not set.
#[must_use]
pub fn get_grace_period(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&ParameterKey::GracePeriodSecs)
        .unwrap_or(DEFAULT_GRACE_PERIOD_SECS)
}

/// Current exclusive bound on holder-list size. Returns default if not set.
#[must_use]
pub fn get_max_holders(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&ParameterKey::MaxHolders)
        .unwrap_or(DEFAULT_MAX_HOLDERS)
}

// ============================================================================
// Parameter Setters (Controller-Only)
// ============================================================================

/// Set the grace period.
///
/// # Bounds
/// `MIN_GRACE_PERIOD_SECS..=MAX_GRACE_PERIOD_SECS`
///
/// # Errors
/// - `NotAdmin` if caller is not the controller
/// - `ParameterOutOfRange` if the value is out of bounds
pub fn set_grace_period(e: &Env, admin: &Address, value: u64) -> Result<(), ContractError> {
    require_admin(e, admin)?;

    if !(MIN_GRACE_PERIOD_SECS..=MAX_GRACE_PERIOD_SECS).contains(&value) {
        return Err(ContractError::ParameterOutOfRange);
    }

    let old_value = get_grace_period(e);
    e.storage()
        .instance()
        .set(&ParameterKey::GracePeriodSecs, &value);

    emit_parameter_changed(e, "grace_period_secs", old_value as i128, value as i128, admin);
    Ok(())
}

/// Set the holder-list bound. Only affects bonds verified afterwards.
///
/// # Bounds
/// `MIN_MAX_HOLDERS..=MAX_MAX_HOLDERS`
pub fn set_max_holders(e: &Env, admin: &Address, value: u32) -> Result<(), ContractError> {
    require_admin(e, admin)?;

    if !(MIN_MAX_HOLDERS..=MAX_MAX_HOLDERS).contains(&value) {
        return Err(ContractError::ParameterOutOfRange);
    }

    let old_value = get_max_holders(e);
    e.storage().instance().set(&ParameterKey::MaxHolders, &value);

    emit_parameter_changed(e, "max_holders", old_value as i128, value as i128, admin);
    Ok(())
}

// ============================================================================
// Internal Helpers
// ============================================================================

fn emit_parameter_changed(
    e: &Env,
    parameter: &str,
    old_value: i128,
    new_value: i128,
    updated_by: &Address,
) {
    let timestamp = e.ledger().timestamp();
    e.events().publish(
        (Symbol::new(e, "parameter_changed"),),
        (
            String::from_str(e, parameter),
            old_value,
            new_value,
            updated_by.clone(),
            timestamp,
        ),
    );
}
