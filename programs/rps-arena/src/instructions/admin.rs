//! Deployment and owner instructions

use anchor_lang::prelude::*;
use rps_engine::Tier;
use crate::error::GameError;
use crate::events::{BidValueUpdated, OwnershipTransferred};
use crate::state::{
    Config, Ledger, QueueSlot, DEFAULT_BIDS, DEFAULT_UNITS_PER_LAMPORT, MIN_DEPOSIT_LAMPORTS,
};

#[derive(AnchorSerialize, AnchorDeserialize, Default)]
pub struct InitializeGameParams {
    pub units_per_lamport: Option<u64>,
    pub min_deposit: Option<u64>,
    pub bids: Option<[u64; 3]>,
}

/// Step 1: create the ledger with no privileged caller
#[derive(Accounts)]
pub struct InitializeLedger<'info> {
    #[account(
        init,
        payer = owner,
        space = Ledger::LEN,
        seeds = [b"ledger"],
        bump
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_ledger(ctx: Context<InitializeLedger>) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;

    ledger.owner = ctx.accounts.owner.key();
    ledger.engine = Pubkey::default();
    ledger.total_supply = 0;
    ledger.total_minted = 0;
    ledger.total_burned = 0;
    ledger.bump = ctx.bumps.ledger;

    msg!("Ledger initialized by {}", ledger.owner);
    Ok(())
}

/// Step 2: create the game referencing the ledger
#[derive(Accounts)]
pub struct InitializeGame<'info> {
    #[account(
        init,
        payer = owner,
        space = Config::LEN,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_game(ctx: Context<InitializeGame>, params: InitializeGameParams) -> Result<()> {
    let InitializeGameParams {
        units_per_lamport,
        min_deposit,
        bids,
    } = params;

    let config = &mut ctx.accounts.config;

    config.owner = ctx.accounts.owner.key();
    config.ledger = ctx.accounts.ledger.key();
    config.units_per_lamport = units_per_lamport.unwrap_or(DEFAULT_UNITS_PER_LAMPORT);
    config.min_deposit = min_deposit.unwrap_or(MIN_DEPOSIT_LAMPORTS);
    config.bids = bids.unwrap_or(DEFAULT_BIDS);
    config.slots = [QueueSlot::default(); 3];
    config.escrowed_lamports = 0;
    config.bump = ctx.bumps.config;

    config.engine_config().validate().map_err(GameError::from)?;

    msg!(
        "Game initialized by {}, ratio = {}, bids = {:?}",
        config.owner,
        config.units_per_lamport,
        config.bids
    );
    Ok(())
}

/// Step 3: bind the game as the ledger's privileged caller
#[derive(Accounts)]
pub struct SetEngine<'info> {
    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump,
        has_one = owner @ GameError::Unauthorized
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
        has_one = ledger
    )]
    pub config: Account<'info, Config>,

    pub owner: Signer<'info>,
}

pub fn set_engine(ctx: Context<SetEngine>) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;
    ledger.engine = ctx.accounts.config.key();

    msg!("Ledger engine bound to {}", ledger.engine);
    Ok(())
}

/// Update one tier's stake
#[derive(Accounts)]
pub struct UpdateBidValue<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = owner @ GameError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    pub owner: Signer<'info>,
}

pub fn update_bid_value(ctx: Context<UpdateBidValue>, tier: u8, new_value: u64) -> Result<()> {
    let tier = Tier::try_from(tier).map_err(GameError::from)?;
    require!(new_value > 0, GameError::InvalidBidValue);

    let config = &mut ctx.accounts.config;
    let old_value = config.bid(tier);
    config.bids[tier.index() as usize] = new_value;

    emit!(BidValueUpdated {
        tier: tier.index(),
        old_value,
        new_value,
    });
    msg!("{} bid value updated: {} -> {}", tier, old_value, new_value);
    Ok(())
}

/// Hand ownership of the game to someone else
#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = owner @ GameError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    pub owner: Signer<'info>,
}

pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let previous = config.owner;
    config.owner = new_owner;

    emit!(OwnershipTransferred {
        previous_owner: previous,
        new_owner,
    });
    msg!("Ownership transferred from {} to {}", previous, new_owner);
    Ok(())
}
