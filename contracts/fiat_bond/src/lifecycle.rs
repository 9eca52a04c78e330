//! Lifecycle state machine.
//!
//! Transitions are validated against an explicit graph rather than the
//! numeric order of the discriminants:
//!
//! ```text
//! Created -> AgreementSigned -> Circulating -> ExpiredPaidOff
//!                                           \-> ExpiredTechDefaulted -> ExpiredDefaulted
//!                                                                    \-> ExpiredPaidOff
//! ```
//!
//! Entering a final state consolidates every holder balance at the custodial
//! account as part of the same invocation.

use bond_errors::ContractError;
use soroban_sdk::Env;

use crate::types::{BondRecord, BondState};
use crate::{events, registry, retirement};

impl BondState {
    /// No transition leaves a final state.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, BondState::ExpiredPaidOff | BondState::ExpiredDefaulted)
    }

    /// Units have been minted.
    #[must_use]
    pub fn is_issued(self) -> bool {
        self >= BondState::Circulating
    }

    #[must_use]
    pub fn can_transition_to(self, next: BondState) -> bool {
        use BondState::*;
        matches!(
            (self, next),
            (Created, AgreementSigned)
                | (AgreementSigned, Circulating)
                | (Circulating, ExpiredPaidOff)
                | (Circulating, ExpiredTechDefaulted)
                | (ExpiredTechDefaulted, ExpiredDefaulted)
                | (ExpiredTechDefaulted, ExpiredPaidOff)
        )
    }
}

/// Move `record` to `next`, persist it and run the final-state sweep.
pub fn transition(e: &Env, record: &mut BondRecord, next: BondState) -> Result<(), ContractError> {
    let old = record.state;
    if !old.can_transition_to(next) {
        return Err(ContractError::InvalidTransition);
    }
    record.state = next;
    registry::save(e, record);
    events::emit_state_changed(e, &record.descriptor.bond_id, old, next);

    if next.is_final() {
        retirement::sweep_holders(e, &record.descriptor)?;
    }
    Ok(())
}
