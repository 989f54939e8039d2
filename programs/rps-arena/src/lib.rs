//! RPS Arena - staked Rock Paper Scissors
//!
//! A Solana program where players deposit SOL for RPS units, queue at one
//! of three stake tiers and are settled against the next player choosing
//! the same tier. Resolution and unit conversion come from `rps-engine`.

use anchor_lang::prelude::*;

mod error;
mod events;
mod instructions;
mod ledger;
mod state;

use instructions::*;
pub use error::GameError;
pub use state::{Config, Holding, Ledger, PlayerAccount, QueueSlot};

declare_id!("RPSArena11111111111111111111111111111111111");

#[program]
pub mod rps_arena {
    use super::*;

    /// Create the token ledger (step 1 of the bootstrap)
    pub fn initialize_ledger(ctx: Context<InitializeLedger>) -> Result<()> {
        instructions::admin::initialize_ledger(ctx)
    }

    /// Create the game bound to the ledger (step 2)
    pub fn initialize_game(
        ctx: Context<InitializeGame>,
        params: InitializeGameParams,
    ) -> Result<()> {
        instructions::admin::initialize_game(ctx, params)
    }

    /// Register the game as the ledger's privileged caller (step 3, owner only)
    pub fn set_engine(ctx: Context<SetEngine>) -> Result<()> {
        instructions::admin::set_engine(ctx)
    }

    /// Update a tier's stake by index (owner only)
    pub fn update_bid_value(ctx: Context<UpdateBidValue>, tier: u8, new_value: u64) -> Result<()> {
        instructions::admin::update_bid_value(ctx, tier, new_value)
    }

    pub fn update_low_bid_value(ctx: Context<UpdateBidValue>, new_value: u64) -> Result<()> {
        instructions::admin::update_bid_value(ctx, 0, new_value)
    }

    pub fn update_medium_bid_value(ctx: Context<UpdateBidValue>, new_value: u64) -> Result<()> {
        instructions::admin::update_bid_value(ctx, 1, new_value)
    }

    pub fn update_high_bid_value(ctx: Context<UpdateBidValue>, new_value: u64) -> Result<()> {
        instructions::admin::update_bid_value(ctx, 2, new_value)
    }

    /// Hand the game to a new owner (owner only)
    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
        instructions::admin::transfer_ownership(ctx, new_owner)
    }

    /// Deposit lamports for RPS units
    pub fn deposit_funds(ctx: Context<DepositFunds>, value: u64) -> Result<()> {
        instructions::player::deposit_funds(ctx, value)
    }

    /// Burn all RPS units and get the lamports back (not while queued)
    pub fn withdraw_funds(ctx: Context<WithdrawFunds>) -> Result<()> {
        instructions::player::withdraw_funds(ctx)
    }

    /// Queue for a tier or settle against the waiting player
    pub fn join_game<'info>(
        ctx: Context<'_, '_, '_, 'info, JoinGame<'info>>,
        symbol: u8,
        tier: u8,
    ) -> Result<()> {
        instructions::player::join_game(ctx, symbol, tier)
    }

    /// Leave the queue before being paired
    pub fn quit_queue(ctx: Context<QuitQueue>) -> Result<()> {
        instructions::player::quit_queue(ctx)
    }
}
