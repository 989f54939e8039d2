//! Custom error codes, aligned with `rps_engine::EngineError::code`

use anchor_lang::prelude::*;
use rps_engine::{EngineError, LedgerError};

#[error_code]
pub enum GameError {
    #[msg("Minimal value to deposit is 0.0001 SOL!")]
    BelowMinimumDeposit = 6000,

    #[msg("You dont have enough funds to join game with this bid!")]
    InsufficientFunds = 6001,

    #[msg("You cant wait for 2 games at the same time! Quite queue or wait for match!")]
    AlreadyQueued = 6002,

    #[msg("You cant quite queue, if you arent in it!")]
    NotQueued = 6003,

    #[msg("You dont have funds deposited in this contract!")]
    NoFundsToWithdraw = 6004,

    #[msg("To withdraw money, you cant be waiting for game. Please quite game!")]
    CannotWithdrawWhileQueued = 6005,

    #[msg("Ownable: caller is not the owner")]
    Unauthorized = 6006,

    #[msg("Symbol must be 0 (Rock), 1 (Paper) or 2 (Scissors)")]
    InvalidSymbol = 6007,

    #[msg("Bid tier must be 0 (low), 1 (medium) or 2 (high)")]
    InvalidTier = 6008,

    #[msg("Bid value must be greater than zero")]
    InvalidBidValue = 6009,

    #[msg("Value to unit ratio must be greater than zero")]
    InvalidRatio = 6010,

    #[msg("Arithmetic overflow")]
    Overflow = 6011,

    #[msg("RPS_Token: caller is not the RPS game")]
    LedgerUnauthorized = 6012,

    #[msg("RPS_Token: amount exceeds balance")]
    InsufficientBalance = 6013,

    #[msg("Waiting player's accounts missing or invalid in remaining_accounts")]
    InvalidOpponentAccount = 6014,
}

impl From<EngineError> for GameError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::BelowMinimumDeposit { .. } => GameError::BelowMinimumDeposit,
            EngineError::InsufficientFunds { .. } => GameError::InsufficientFunds,
            EngineError::AlreadyQueued => GameError::AlreadyQueued,
            EngineError::NotQueued => GameError::NotQueued,
            EngineError::NoFundsToWithdraw => GameError::NoFundsToWithdraw,
            EngineError::CannotWithdrawWhileQueued => GameError::CannotWithdrawWhileQueued,
            EngineError::Unauthorized => GameError::Unauthorized,
            EngineError::InvalidSymbol(_) => GameError::InvalidSymbol,
            EngineError::InvalidTier(_) => GameError::InvalidTier,
            EngineError::InvalidBidValue => GameError::InvalidBidValue,
            EngineError::InvalidRatio => GameError::InvalidRatio,
            EngineError::Overflow => GameError::Overflow,
            EngineError::Ledger(LedgerError::Unauthorized) => GameError::LedgerUnauthorized,
            EngineError::Ledger(LedgerError::InsufficientBalance { .. }) => GameError::InsufficientBalance,
            EngineError::Ledger(LedgerError::Overflow) => GameError::Overflow,
        }
    }
}
