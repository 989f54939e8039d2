//! Ledger mutations
//!
//! Each entry point checks that the caller is the engine bound on the
//! Ledger account before touching any balance.

use anchor_lang::prelude::*;
use crate::error::GameError;
use crate::state::{Holding, Ledger};

fn authorize(ledger: &Ledger, caller: &Pubkey) -> Result<()> {
    require!(
        ledger.engine != Pubkey::default() && ledger.engine == *caller,
        GameError::LedgerUnauthorized
    );
    Ok(())
}

pub fn mint(ledger: &mut Ledger, caller: &Pubkey, holding: &mut Holding, amount: u64) -> Result<()> {
    authorize(ledger, caller)?;

    let balance = holding.balance.checked_add(amount).ok_or(GameError::Overflow)?;
    let total_supply = ledger.total_supply.checked_add(amount).ok_or(GameError::Overflow)?;
    let total_minted = ledger.total_minted.checked_add(amount).ok_or(GameError::Overflow)?;

    holding.balance = balance;
    ledger.total_supply = total_supply;
    ledger.total_minted = total_minted;
    Ok(())
}

pub fn burn(ledger: &mut Ledger, caller: &Pubkey, holding: &mut Holding, amount: u64) -> Result<()> {
    authorize(ledger, caller)?;

    let balance = holding.balance.checked_sub(amount).ok_or(GameError::InsufficientBalance)?;
    let total_supply = ledger.total_supply.checked_sub(amount).ok_or(GameError::Overflow)?;
    let total_burned = ledger.total_burned.checked_add(amount).ok_or(GameError::Overflow)?;

    holding.balance = balance;
    ledger.total_supply = total_supply;
    ledger.total_burned = total_burned;
    Ok(())
}

/// Atomic decrease-then-increase between two distinct holders
pub fn move_balance(
    ledger: &Ledger,
    caller: &Pubkey,
    from: &mut Holding,
    to: &mut Holding,
    amount: u64,
) -> Result<()> {
    authorize(ledger, caller)?;

    let from_balance = from.balance.checked_sub(amount).ok_or(GameError::InsufficientBalance)?;
    let to_balance = to.balance.checked_add(amount).ok_or(GameError::Overflow)?;

    from.balance = from_balance;
    to.balance = to_balance;
    Ok(())
}
