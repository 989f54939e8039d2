//! Error taxonomy for the ledger and the engine
//!
//! Every rejection is synchronous and leaves state untouched. Messages are
//! stable and meant to be shown to players verbatim.

use thiserror::Error;

/// Rejections raised by the unit-of-account ledger
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("RPS_Token: caller is not the RPS game")]
    Unauthorized,

    #[error("RPS_Token: amount exceeds balance (balance={balance}, requested={requested})")]
    InsufficientBalance { balance: u128, requested: u128 },

    #[error("RPS_Token: arithmetic overflow")]
    Overflow,
}

/// Rejections raised by the matchmaking and settlement engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Minimal value to deposit is 0.0001 ETH!")]
    BelowMinimumDeposit { value: u128, minimum: u128 },

    #[error("You dont have enough funds to join game with this bid!")]
    InsufficientFunds { available: u128, required: u128 },

    #[error("You cant wait for 2 games at the same time! Quite queue or wait for match!")]
    AlreadyQueued,

    #[error("You cant quite queue, if you arent in it!")]
    NotQueued,

    #[error("You dont have funds deposited in this contract!")]
    NoFundsToWithdraw,

    #[error("To withdraw money, you cant be waiting for game. Please quite game!")]
    CannotWithdrawWhileQueued,

    #[error("Ownable: caller is not the owner")]
    Unauthorized,

    #[error("Symbol must be 0 (Rock), 1 (Paper) or 2 (Scissors), got {0}")]
    InvalidSymbol(u8),

    #[error("Bid tier must be 0 (low), 1 (medium) or 2 (high), got {0}")]
    InvalidTier(u8),

    #[error("Bid value must be greater than zero")]
    InvalidBidValue,

    #[error("Value to unit ratio must be greater than zero")]
    InvalidRatio,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl EngineError {
    /// Human-readable reason, identical to the `Display` output
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Stable numeric code, shared with the on-chain program's error codes
    pub fn code(&self) -> u32 {
        match self {
            EngineError::BelowMinimumDeposit { .. } => 6000,
            EngineError::InsufficientFunds { .. } => 6001,
            EngineError::AlreadyQueued => 6002,
            EngineError::NotQueued => 6003,
            EngineError::NoFundsToWithdraw => 6004,
            EngineError::CannotWithdrawWhileQueued => 6005,
            EngineError::Unauthorized => 6006,
            EngineError::InvalidSymbol(_) => 6007,
            EngineError::InvalidTier(_) => 6008,
            EngineError::InvalidBidValue => 6009,
            EngineError::InvalidRatio => 6010,
            EngineError::Overflow => 6011,
            EngineError::Ledger(LedgerError::Unauthorized) => 6012,
            EngineError::Ledger(LedgerError::InsufficientBalance { .. }) => 6013,
            EngineError::Ledger(LedgerError::Overflow) => 6011,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_matches_display() {
        let err = EngineError::AlreadyQueued;
        assert_eq!(err.reason(), err.to_string());
        assert_eq!(
            err.reason(),
            "You cant wait for 2 games at the same time! Quite queue or wait for match!"
        );
    }

    #[test]
    fn test_ledger_error_is_transparent() {
        let err: EngineError = LedgerError::Unauthorized.into();
        assert_eq!(err.reason(), "RPS_Token: caller is not the RPS game");
        assert_eq!(err.code(), 6012);
    }

    #[test]
    fn test_codes_are_distinct_for_engine_variants() {
        let codes = [
            EngineError::BelowMinimumDeposit { value: 0, minimum: 1 }.code(),
            EngineError::InsufficientFunds { available: 0, required: 1 }.code(),
            EngineError::AlreadyQueued.code(),
            EngineError::NotQueued.code(),
            EngineError::NoFundsToWithdraw.code(),
            EngineError::CannotWithdrawWhileQueued.code(),
            EngineError::Unauthorized.code(),
            EngineError::InvalidSymbol(3).code(),
            EngineError::InvalidTier(3).code(),
            EngineError::InvalidBidValue.code(),
            EngineError::InvalidRatio.code(),
            EngineError::Overflow.code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
