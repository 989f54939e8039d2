//! Unit-of-account ledger
//!
//! Balances in the internal unit, mutated only through mint, burn and the
//! privileged move used for settlement. Every mutating entry point is
//! restricted to a single privileged caller: the engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};
use crate::error::LedgerError;

pub const TOKEN_NAME: &str = "RPS Token";
pub const TOKEN_SYMBOL: &str = "RPS";
pub const TOKEN_DECIMALS: u8 = 18;

/// Identity of a holder, player, owner or engine
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    pub const ZERO: Address = Address([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Address whose bytes are all `byte`. Handy for fixtures.
    pub fn from_byte(byte: u8) -> Self {
        Self([byte; 32])
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 4 bytes are enough to tell fixtures apart in test output
        write!(f, "Address(0x{:02x}{:02x}{:02x}{:02x}..)", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

/// Operations the engine needs from its ledger collaborator.
///
/// `caller` is the identity invoking the operation; implementations reject
/// anyone other than the bound engine with `LedgerError::Unauthorized`.
pub trait Ledger {
    fn mint(&mut self, caller: &Address, holder: &Address, amount: u128) -> Result<(), LedgerError>;

    fn burn(&mut self, caller: &Address, holder: &Address, amount: u128) -> Result<(), LedgerError>;

    /// Atomic decrease-then-increase. Nothing changes unless `from` covers `amount`.
    fn move_balance(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), LedgerError>;

    fn balance_of(&self, holder: &Address) -> u128;

    fn total_supply(&self) -> u128;
}

/// In-memory token ledger
///
/// Constructed standalone; the owner then binds the engine as privileged
/// caller with [`TokenLedger::set_engine`]. Until then every mutation fails.
#[derive(Clone, Debug)]
pub struct TokenLedger {
    owner: Address,
    engine: Option<Address>,
    balances: BTreeMap<Address, u128>,
    total_supply: u128,
    total_minted: u128,
    total_burned: u128,
}

impl TokenLedger {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            engine: None,
            balances: BTreeMap::new(),
            total_supply: 0,
            total_minted: 0,
            total_burned: 0,
        }
    }

    /// Bind (or re-bind) the privileged caller. Owner only.
    pub fn set_engine(&mut self, caller: &Address, engine: Address) -> Result<(), LedgerError> {
        if *caller != self.owner {
            warn!(caller = %caller, "rejected set_engine from non-owner");
            return Err(LedgerError::Unauthorized);
        }
        self.engine = Some(engine);
        debug!(engine = %engine, "ledger engine bound");
        Ok(())
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn engine(&self) -> Option<Address> {
        self.engine
    }

    pub fn name(&self) -> &'static str {
        TOKEN_NAME
    }

    pub fn symbol(&self) -> &'static str {
        TOKEN_SYMBOL
    }

    pub fn decimals(&self) -> u8 {
        TOKEN_DECIMALS
    }

    pub fn total_minted(&self) -> u128 {
        self.total_minted
    }

    pub fn total_burned(&self) -> u128 {
        self.total_burned
    }

    /// Holders with a non-zero balance
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &u128)> + '_ {
        self.balances.iter().filter(|(_, balance)| **balance > 0)
    }

    fn authorize(&self, caller: &Address) -> Result<(), LedgerError> {
        match self.engine {
            Some(engine) if engine == *caller => Ok(()),
            _ => {
                warn!(caller = %caller, "rejected ledger call from non-engine caller");
                Err(LedgerError::Unauthorized)
            }
        }
    }

    fn set_balance(&mut self, holder: &Address, balance: u128) {
        if balance == 0 {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, balance);
        }
    }
}

impl Ledger for TokenLedger {
    fn mint(&mut self, caller: &Address, holder: &Address, amount: u128) -> Result<(), LedgerError> {
        self.authorize(caller)?;

        let balance = self.balance_of(holder)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let total_supply = self.total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let total_minted = self.total_minted
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(holder, balance);
        self.total_supply = total_supply;
        self.total_minted = total_minted;

        debug!(holder = %holder, amount, "minted");
        Ok(())
    }

    fn burn(&mut self, caller: &Address, holder: &Address, amount: u128) -> Result<(), LedgerError> {
        self.authorize(caller)?;

        let balance = self.balance_of(holder);
        if amount > balance {
            return Err(LedgerError::InsufficientBalance { balance, requested: amount });
        }
        let total_burned = self.total_burned
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(holder, balance - amount);
        // Supply always covers any single balance
        self.total_supply -= amount;
        self.total_burned = total_burned;

        debug!(holder = %holder, amount, "burned");
        Ok(())
    }

    fn move_balance(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.authorize(caller)?;

        let from_balance = self.balance_of(from);
        if amount > from_balance {
            return Err(LedgerError::InsufficientBalance { balance: from_balance, requested: amount });
        }
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(from, from_balance - amount);
        self.set_balance(to, to_balance);

        debug!(from = %from, to = %to, amount, "moved");
        Ok(())
    }

    fn balance_of(&self, holder: &Address) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> u128 {
        self.total_supply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound_ledger() -> (TokenLedger, Address, Address) {
        let owner = Address::from_byte(0xAA);
        let engine = Address::from_byte(0xEE);
        let mut ledger = TokenLedger::new(owner);
        ledger.set_engine(&owner, engine).unwrap();
        (ledger, owner, engine)
    }

    fn sum_of_balances(ledger: &TokenLedger) -> u128 {
        ledger.holders().map(|(_, balance)| *balance).sum()
    }

    #[test]
    fn test_metadata() {
        let ledger = TokenLedger::new(Address::from_byte(1));
        assert_eq!(ledger.name(), "RPS Token");
        assert_eq!(ledger.symbol(), "RPS");
        assert_eq!(ledger.decimals(), 18);
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn test_unbound_ledger_rejects_everyone() {
        let owner = Address::from_byte(0xAA);
        let mut ledger = TokenLedger::new(owner);
        let holder = Address::from_byte(1);

        assert_eq!(ledger.mint(&owner, &holder, 10), Err(LedgerError::Unauthorized));
        assert_eq!(ledger.balance_of(&holder), 0);
    }

    #[test]
    fn test_set_engine_owner_only() {
        let owner = Address::from_byte(0xAA);
        let stranger = Address::from_byte(0x01);
        let mut ledger = TokenLedger::new(owner);

        assert_eq!(
            ledger.set_engine(&stranger, stranger),
            Err(LedgerError::Unauthorized)
        );
        assert_eq!(ledger.engine(), None);

        ledger.set_engine(&owner, Address::from_byte(0xEE)).unwrap();
        assert_eq!(ledger.engine(), Some(Address::from_byte(0xEE)));
    }

    #[test]
    fn test_mint_only_by_engine() {
        let (mut ledger, owner, engine) = bound_ledger();
        let holder = Address::from_byte(1);

        assert_eq!(ledger.mint(&owner, &holder, 5), Err(LedgerError::Unauthorized));
        ledger.mint(&engine, &holder, 5).unwrap();
        assert_eq!(ledger.balance_of(&holder), 5);
        assert_eq!(ledger.total_supply(), 5);
        assert_eq!(ledger.total_minted(), 5);
    }

    #[test]
    fn test_burn_insufficient_balance() {
        let (mut ledger, _, engine) = bound_ledger();
        let holder = Address::from_byte(1);
        ledger.mint(&engine, &holder, 5).unwrap();

        assert_eq!(
            ledger.burn(&engine, &holder, 6),
            Err(LedgerError::InsufficientBalance { balance: 5, requested: 6 })
        );
        assert_eq!(ledger.balance_of(&holder), 5);

        ledger.burn(&engine, &holder, 5).unwrap();
        assert_eq!(ledger.balance_of(&holder), 0);
        assert_eq!(ledger.total_supply(), 0);
        assert_eq!(ledger.total_burned(), 5);
    }

    #[test]
    fn test_move_is_all_or_nothing() {
        let (mut ledger, _, engine) = bound_ledger();
        let a = Address::from_byte(1);
        let b = Address::from_byte(2);
        ledger.mint(&engine, &a, 10).unwrap();
        ledger.mint(&engine, &b, 3).unwrap();

        assert!(ledger.move_balance(&engine, &b, &a, 4).is_err());
        assert_eq!(ledger.balance_of(&a), 10);
        assert_eq!(ledger.balance_of(&b), 3);

        ledger.move_balance(&engine, &a, &b, 4).unwrap();
        assert_eq!(ledger.balance_of(&a), 6);
        assert_eq!(ledger.balance_of(&b), 7);
        assert_eq!(ledger.total_supply(), 13);
    }

    #[test]
    fn test_move_to_self_is_noop() {
        let (mut ledger, _, engine) = bound_ledger();
        let a = Address::from_byte(1);
        ledger.mint(&engine, &a, 10).unwrap();
        ledger.move_balance(&engine, &a, &a, 10).unwrap();
        assert_eq!(ledger.balance_of(&a), 10);
    }

    #[test]
    fn test_conservation() {
        let (mut ledger, _, engine) = bound_ledger();
        let a = Address::from_byte(1);
        let b = Address::from_byte(2);
        ledger.mint(&engine, &a, 100).unwrap();
        ledger.mint(&engine, &b, 50).unwrap();
        ledger.move_balance(&engine, &a, &b, 30).unwrap();
        ledger.burn(&engine, &b, 20).unwrap();

        assert_eq!(sum_of_balances(&ledger), ledger.total_supply());
        assert_eq!(ledger.total_supply(), ledger.total_minted() - ledger.total_burned());
    }

    #[test]
    fn test_mint_overflow_rejected() {
        let (mut ledger, _, engine) = bound_ledger();
        let a = Address::from_byte(1);
        ledger.mint(&engine, &a, u128::MAX).unwrap();
        assert_eq!(ledger.mint(&engine, &a, 1), Err(LedgerError::Overflow));
        assert_eq!(ledger.balance_of(&a), u128::MAX);
    }

    #[test]
    fn test_address_display() {
        let addr = Address::from_byte(0xab);
        let shown = addr.to_string();
        assert!(shown.starts_with("0xabab"));
        assert_eq!(shown.len(), 2 + 64);
    }
}
