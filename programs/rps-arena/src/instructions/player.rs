//! Player instructions

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use rps_engine::{resolve, settle_balances, Outcome, Symbol, Tier};
use crate::error::GameError;
use crate::events::{FundsDeposited, FundsWithdrawn, JoinedQueue, LeftQueue, MatchEnded};
use crate::ledger;
use crate::state::{Config, Holding, Ledger, PlayerAccount, QueueSlot};

/// Deposit lamports and receive RPS units
#[derive(Accounts)]
pub struct DepositFunds<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = ledger
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(
        init_if_needed,
        payer = player,
        space = Holding::LEN,
        seeds = [b"holding", player.key().as_ref()],
        bump
    )]
    pub holding: Account<'info, Holding>,

    #[account(
        init_if_needed,
        payer = player,
        space = PlayerAccount::LEN,
        seeds = [b"player", player.key().as_ref()],
        bump
    )]
    pub player_account: Account<'info, PlayerAccount>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn deposit_funds(ctx: Context<DepositFunds>, value: u64) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let ledger = &mut ctx.accounts.ledger;
    let holding = &mut ctx.accounts.holding;
    let player_account = &mut ctx.accounts.player_account;
    let player = &ctx.accounts.player;

    require!(value >= config.min_deposit, GameError::BelowMinimumDeposit);

    let units = config
        .engine_config()
        .to_units(value as u128)
        .map_err(GameError::from)?;
    let units = u64::try_from(units).map_err(|_| GameError::Overflow)?;

    // First deposit creates both accounts at zero
    if holding.holder == Pubkey::default() {
        holding.holder = player.key();
        holding.balance = 0;
        holding.bump = ctx.bumps.holding;
    }
    if player_account.player == Pubkey::default() {
        player_account.player = player.key();
        player_account.deposited_funds = 0;
        player_account.dequeue();
        player_account.bump = ctx.bumps.player_account;
    }

    let deposited_funds = player_account.deposited_funds
        .checked_add(units)
        .ok_or(GameError::Overflow)?;
    let escrowed_lamports = config.escrowed_lamports
        .checked_add(value)
        .ok_or(GameError::Overflow)?;

    ledger::mint(ledger, &config.key(), holding, units)?;

    // Escrow the lamports in the config account
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: player.to_account_info(),
                to: config.to_account_info(),
            },
        ),
        value,
    )?;

    player_account.deposited_funds = deposited_funds;
    config.escrowed_lamports = escrowed_lamports;

    emit!(FundsDeposited {
        account: player.key(),
        amount_in_lamports: value,
        amount_in_units: units,
    });
    msg!("Player {} deposited {} lamports for {} units", player.key(), value, units);

    Ok(())
}

/// Burn all RPS units and return the lamports
#[derive(Accounts)]
pub struct WithdrawFunds<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = ledger
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(
        mut,
        seeds = [b"holding", player.key().as_ref()],
        bump = holding.bump,
        constraint = holding.holder == player.key() @ GameError::Unauthorized
    )]
    pub holding: Account<'info, Holding>,

    #[account(
        mut,
        seeds = [b"player", player.key().as_ref()],
        bump = player_account.bump,
        has_one = player
    )]
    pub player_account: Account<'info, PlayerAccount>,

    #[account(mut)]
    pub player: Signer<'info>,
}

pub fn withdraw_funds(ctx: Context<WithdrawFunds>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let ledger = &mut ctx.accounts.ledger;
    let holding = &mut ctx.accounts.holding;
    let player_account = &mut ctx.accounts.player_account;
    let player = &ctx.accounts.player;

    require!(player_account.deposited_funds > 0, GameError::NoFundsToWithdraw);
    require!(!player_account.in_queue, GameError::CannotWithdrawWhileQueued);

    let units = player_account.deposited_funds;
    // Truncates toward zero
    let lamports = config.engine_config().to_value(units as u128);
    let lamports = u64::try_from(lamports).map_err(|_| GameError::Overflow)?;
    let escrowed_lamports = config.escrowed_lamports
        .checked_sub(lamports)
        .ok_or(GameError::Overflow)?;

    ledger::burn(ledger, &config.key(), holding, units)?;

    player_account.deposited_funds = 0;
    config.escrowed_lamports = escrowed_lamports;

    **config.to_account_info().try_borrow_mut_lamports()? -= lamports;
    **player.try_borrow_mut_lamports()? += lamports;

    emit!(FundsWithdrawn {
        account: player.key(),
        amount_in_lamports: lamports,
        amount_in_units: units,
    });
    msg!("Player {} withdrew {} units as {} lamports", player.key(), units, lamports);

    Ok(())
}

/// Queue for a tier, or settle against the player waiting there.
///
/// When the tier's slot is occupied, the waiting player's PlayerAccount and
/// Holding must be passed as writable remaining accounts.
#[derive(Accounts)]
pub struct JoinGame<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = ledger
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [b"ledger"],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, Ledger>,

    #[account(
        mut,
        seeds = [b"holding", player.key().as_ref()],
        bump = holding.bump,
        constraint = holding.holder == player.key() @ GameError::Unauthorized
    )]
    pub holding: Account<'info, Holding>,

    #[account(
        mut,
        seeds = [b"player", player.key().as_ref()],
        bump = player_account.bump,
        has_one = player
    )]
    pub player_account: Account<'info, PlayerAccount>,

    pub player: Signer<'info>,
    // Waiting player's PlayerAccount + Holding passed via remaining_accounts
}

pub fn join_game<'info>(
    ctx: Context<'_, '_, '_, 'info, JoinGame<'info>>,
    symbol: u8,
    tier: u8,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let ledger = &ctx.accounts.ledger;
    let holding = &mut ctx.accounts.holding;
    let player_account = &mut ctx.accounts.player_account;
    let player = &ctx.accounts.player;

    let symbol = Symbol::try_from(symbol).map_err(GameError::from)?;
    let tier = Tier::try_from(tier).map_err(GameError::from)?;

    require!(!player_account.in_queue, GameError::AlreadyQueued);

    let bid_value = config.bid(tier);
    require!(
        player_account.deposited_funds >= bid_value,
        GameError::InsufficientFunds
    );

    let waiting = *config.slot(tier);
    if !waiting.occupied {
        *config.slot_mut(tier) = QueueSlot {
            occupied: true,
            occupant: player.key(),
            symbol: symbol.index(),
        };
        player_account.enqueue(symbol, tier);

        emit!(JoinedQueue {
            player: player.key(),
            symbol: symbol.index(),
            tier: tier.index(),
        });
        msg!("Player {} joined the {} queue", player.key(), tier);

        return Ok(());
    }

    // Pair with the waiting player
    let remaining_accounts = ctx.remaining_accounts;
    let opponent_info = find_account(remaining_accounts, b"player", &waiting.occupant)?;
    let opponent_holding_info = find_account(remaining_accounts, b"holding", &waiting.occupant)?;

    let mut opponent = {
        let data = opponent_info.try_borrow_data()?;
        deserialize_account::<PlayerAccount>(&data)?
    };
    let mut opponent_holding = {
        let data = opponent_holding_info.try_borrow_data()?;
        deserialize_account::<Holding>(&data)?
    };

    require!(
        waiting.is_waiting_player(tier, &opponent, &opponent_holding),
        GameError::InvalidOpponentAccount
    );

    let opponent_symbol = Symbol::try_from(waiting.symbol).map_err(GameError::from)?;
    let outcome = resolve(opponent_symbol, symbol);

    let (funds_1, funds_2) = settle_balances(
        outcome,
        bid_value as u128,
        opponent.deposited_funds as u128,
        player_account.deposited_funds as u128,
    )
    .map_err(GameError::from)?;
    let funds_1 = u64::try_from(funds_1).map_err(|_| GameError::Overflow)?;
    let funds_2 = u64::try_from(funds_2).map_err(|_| GameError::Overflow)?;

    match outcome {
        Outcome::Draw => {}
        Outcome::Player1Wins => {
            ledger::move_balance(ledger, &config.key(), holding, &mut opponent_holding, bid_value)?;
        }
        Outcome::Player2Wins => {
            ledger::move_balance(ledger, &config.key(), &mut opponent_holding, holding, bid_value)?;
        }
    }

    opponent.deposited_funds = funds_1;
    player_account.deposited_funds = funds_2;
    opponent.dequeue();
    *config.slot_mut(tier) = QueueSlot::default();

    // Write back
    let mut opponent_data = opponent_info.try_borrow_mut_data()?;
    serialize_account(&opponent, &mut opponent_data)?;
    drop(opponent_data);
    let mut opponent_holding_data = opponent_holding_info.try_borrow_mut_data()?;
    serialize_account(&opponent_holding, &mut opponent_holding_data)?;
    drop(opponent_holding_data);

    emit!(MatchEnded {
        player_1: waiting.occupant,
        symbol_1: opponent_symbol.index(),
        player_2: player.key(),
        symbol_2: symbol.index(),
        tier: tier.index(),
        bid_value,
        match_result: outcome.label().to_string(),
    });
    msg!(
        "Match on {} tier: {} ({}) vs {} ({}) -> {}",
        tier,
        waiting.occupant,
        opponent_symbol,
        player.key(),
        symbol,
        outcome
    );

    Ok(())
}

/// Leave the tier slot while still unpaired
#[derive(Accounts)]
pub struct QuitQueue<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"player", player.key().as_ref()],
        bump = player_account.bump,
        has_one = player
    )]
    pub player_account: Account<'info, PlayerAccount>,

    pub player: Signer<'info>,
}

pub fn quit_queue(ctx: Context<QuitQueue>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let player_account = &mut ctx.accounts.player_account;
    let player = &ctx.accounts.player;

    require!(player_account.in_queue, GameError::NotQueued);

    let tier = Tier::try_from(player_account.tier).map_err(GameError::from)?;
    let slot = config.slot_mut(tier);
    require!(
        slot.occupied && slot.occupant == player.key(),
        GameError::NotQueued
    );
    *slot = QueueSlot::default();
    player_account.dequeue();

    emit!(LeftQueue {
        player: player.key(),
        tier: tier.index(),
    });
    msg!("Player {} left the {} queue", player.key(), tier);

    Ok(())
}

/// Helper to find a program-owned PDA `[seed, owner]` in remaining_accounts
fn find_account<'info>(
    remaining_accounts: &[AccountInfo<'info>],
    seed: &[u8],
    owner: &Pubkey,
) -> Result<AccountInfo<'info>> {
    let expected_pda = opponent_address(seed, owner);

    for account in remaining_accounts {
        if is_opponent_account(account.key, account.owner, account.is_writable, &expected_pda) {
            return Ok(account.clone());
        }
    }

    Err(GameError::InvalidOpponentAccount.into())
}

fn opponent_address(seed: &[u8], owner: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[seed, owner.as_ref()], &crate::ID).0
}

fn is_opponent_account(key: &Pubkey, owner: &Pubkey, is_writable: bool, expected: &Pubkey) -> bool {
    key == expected && owner == &crate::ID && is_writable
}

fn deserialize_account<T: AccountDeserialize>(data: &[u8]) -> Result<T> {
    if data.len() < 8 {
        return Err(GameError::InvalidOpponentAccount.into());
    }
    T::try_deserialize(&mut &data[..])
        .map_err(|_| GameError::InvalidOpponentAccount.into())
}

fn serialize_account<T: AccountSerialize>(account: &T, data: &mut [u8]) -> Result<()> {
    let mut writer = &mut data[..];
    account.try_serialize(&mut writer)
        .map_err(|_| GameError::InvalidOpponentAccount.into())
}
