//! Engine for RPS Arena
//!
//! Two-player Rock Paper Scissors wagering on top of a fungible-token
//! ledger: players deposit value, receive internal units, queue at one of
//! three stake tiers and are paired with the next player choosing the same
//! tier. This crate is compiled to:
//! - Native (for the on-chain program and host-side services)
//! - WASM (for frontend resolution previews)

mod amount;
mod config;
mod engine;
mod error;
mod events;
mod game;
mod ledger;
mod symbol;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{
    BidValues, EngineConfig, DEFAULT_HIGH_BID, DEFAULT_LOW_BID, DEFAULT_MEDIUM_BID,
    DEFAULT_MINIMUM_DEPOSIT, DEFAULT_VALUE_TO_UNIT_RATIO, UNIT,
};
pub use engine::{Engine, JoinOutcome, PlayerRecord, QueueEntry, QueueSlot};
pub use error::{EngineError, LedgerError};
pub use events::Event;
pub use game::{resolve, settle_balances, MatchResult, Outcome};
pub use ledger::{Address, Ledger, TokenLedger, TOKEN_DECIMALS, TOKEN_NAME, TOKEN_SYMBOL};
pub use symbol::{Symbol, Tier};

/// Resolve a match from raw wire indices
pub fn resolve_indices(symbol_1: u8, symbol_2: u8) -> Result<Outcome, EngineError> {
    Ok(resolve(Symbol::try_from(symbol_1)?, Symbol::try_from(symbol_2)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_indices() {
        assert_eq!(resolve_indices(0, 1).unwrap(), Outcome::Player2Wins);
        assert_eq!(resolve_indices(0, 2).unwrap(), Outcome::Player1Wins);
        assert_eq!(resolve_indices(2, 2).unwrap(), Outcome::Draw);
        assert_eq!(resolve_indices(3, 0), Err(EngineError::InvalidSymbol(3)));
    }
}
