//! Auditable records emitted through program logs

use anchor_lang::prelude::*;

#[event]
pub struct FundsDeposited {
    pub account: Pubkey,
    pub amount_in_lamports: u64,
    pub amount_in_units: u64,
}

#[event]
pub struct FundsWithdrawn {
    pub account: Pubkey,
    pub amount_in_lamports: u64,
    pub amount_in_units: u64,
}

#[event]
pub struct JoinedQueue {
    pub player: Pubkey,
    pub symbol: u8,
    pub tier: u8,
}

#[event]
pub struct LeftQueue {
    pub player: Pubkey,
    pub tier: u8,
}

#[event]
pub struct MatchEnded {
    pub player_1: Pubkey,
    pub symbol_1: u8,
    pub player_2: Pubkey,
    pub symbol_2: u8,
    pub tier: u8,
    pub bid_value: u64,
    /// "Draw", "Winner: player1" or "Winner: player2"
    pub match_result: String,
}

#[event]
pub struct BidValueUpdated {
    pub tier: u8,
    pub old_value: u64,
    pub new_value: u64,
}

#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}
