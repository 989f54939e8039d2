//! Matchmaking and settlement engine
//!
//! A serially-executed state machine over deposited funds, the three tier
//! slots and the ledger. Every mutating entry point takes `&mut self` and
//! runs to completion, so calls never interleave.
//!
//! Each operation validates everything up front, computes the new values
//! with checked arithmetic, performs the single fallible ledger call, and
//! only then commits engine state. A rejected call therefore leaves the
//! ledger, the player records and the slots exactly as they were.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::events::Event;
use crate::game::{resolve, settle_balances, MatchResult};
use crate::ledger::{Address, Ledger};
use crate::symbol::{Symbol, Tier};

/// What a queued player picked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub symbol: Symbol,
    pub tier: Tier,
}

/// Per-player bookkeeping held by the engine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Internal units staked on the player's behalf, mirrored by their ledger balance
    pub deposited_funds: u128,
    /// Present only while the player waits in a tier slot
    pub queue: Option<QueueEntry>,
}

impl PlayerRecord {
    pub fn in_queue(&self) -> bool {
        self.queue.is_some()
    }
}

/// The single waiting player of a tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSlot {
    pub occupant: Address,
    pub symbol: Symbol,
}

/// Result of a successful `join_game`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The tier was empty; the caller now waits in its slot
    Queued,
    /// The caller completed a pairing and the match settled
    Matched(MatchResult),
}

pub struct Engine<L: Ledger> {
    /// Identity the ledger recognises as its privileged caller
    address: Address,
    owner: Address,
    ledger: L,
    config: EngineConfig,
    players: BTreeMap<Address, PlayerRecord>,
    slots: [Option<QueueSlot>; 3],
    /// External value held on behalf of depositors
    escrowed_value: u128,
    events: Vec<Event>,
}

impl<L: Ledger> Engine<L> {
    /// Create an engine bound to `ledger`.
    ///
    /// The ledger must afterwards be told to accept `address` as its
    /// privileged caller; until then deposits fail with `Unauthorized`.
    pub fn new(
        address: Address,
        owner: Address,
        ledger: L,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        debug!(engine = %address, owner = %owner, "engine created");
        Ok(Self {
            address,
            owner,
            ledger,
            config,
            players: BTreeMap::new(),
            slots: [None; 3],
            escrowed_value: 0,
            events: Vec::new(),
        })
    }


    /// Credit `value * ratio` units to the caller. Returns the units credited.
    pub fn deposit_funds(&mut self, caller: &Address, value: u128) -> Result<u128, EngineError> {
        let minimum = self.config.minimum_deposit;
        if value < minimum {
            return Err(EngineError::BelowMinimumDeposit { value, minimum });
        }

        let units = self.config.to_units(value)?;
        let record = self.record(caller);
        let deposited_funds = record.deposited_funds
            .checked_add(units)
            .ok_or(EngineError::Overflow)?;
        let escrowed_value = self.escrowed_value
            .checked_add(value)
            .ok_or(EngineError::Overflow)?;

        self.ledger.mint(&self.address, caller, units)?;

        self.players.entry(*caller).or_default().deposited_funds = deposited_funds;
        self.escrowed_value = escrowed_value;

        debug!(player = %caller, value, units, "funds deposited");
        self.events.push(Event::FundsDeposited {
            account: *caller,
            amount_in_value: value,
            amount_in_units: units,
        });

        Ok(units)
    }

    /// Burn the caller's whole balance and return the equivalent external
    /// value (`units / ratio`, truncated).
    pub fn withdraw_funds(&mut self, caller: &Address) -> Result<u128, EngineError> {
        let record = self.record(caller);
        if record.deposited_funds == 0 {
            return Err(EngineError::NoFundsToWithdraw);
        }
        if record.in_queue() {
            return Err(EngineError::CannotWithdrawWhileQueued);
        }

        let units = record.deposited_funds;
        let value = self.config.to_value(units);
        let escrowed_value = self.escrowed_value
            .checked_sub(value)
            .ok_or(EngineError::Overflow)?;

        self.ledger.burn(&self.address, caller, units)?;

        if let Some(record) = self.players.get_mut(caller) {
            record.deposited_funds = 0;
        }
        self.escrowed_value = escrowed_value;

        debug!(player = %caller, value, units, "funds withdrawn");
        self.events.push(Event::FundsWithdrawn {
            account: *caller,
            amount_in_value: value,
            amount_in_units: units,
        });

        Ok(value)
    }

    /// Queue for `tier`, or settle immediately against the player already
    /// waiting there.
    pub fn join_game(
        &mut self,
        caller: &Address,
        symbol: Symbol,
        tier: Tier,
    ) -> Result<JoinOutcome, EngineError> {
        let record = self.record(caller);
        if record.in_queue() {
            return Err(EngineError::AlreadyQueued);
        }

        let bid_value = self.config.bids.get(tier);
        if record.deposited_funds < bid_value {
            return Err(EngineError::InsufficientFunds {
                available: record.deposited_funds,
                required: bid_value,
            });
        }

        match self.slots[tier.index() as usize] {
            None => {
                self.slots[tier.index() as usize] = Some(QueueSlot { occupant: *caller, symbol });
                self.players.entry(*caller).or_default().queue = Some(QueueEntry { symbol, tier });

                debug!(player = %caller, %symbol, %tier, "joined queue");
                self.events.push(Event::JoinedQueue { player: *caller, symbol, tier });

                Ok(JoinOutcome::Queued)
            }
            Some(waiting) => {
                let result = MatchResult {
                    player_1: waiting.occupant,
                    symbol_1: waiting.symbol,
                    player_2: *caller,
                    symbol_2: symbol,
                    tier,
                    bid_value,
                    outcome: resolve(waiting.symbol, symbol),
                };
                self.settle(&result)?;
                Ok(JoinOutcome::Matched(result))
            }
        }
    }

    /// Leave the tier slot the caller is waiting in. Returns that tier.
    pub fn quit_queue(&mut self, caller: &Address) -> Result<Tier, EngineError> {
        let entry = self
            .players
            .get(caller)
            .and_then(|record| record.queue)
            .ok_or(EngineError::NotQueued)?;

        self.slots[entry.tier.index() as usize] = None;
        if let Some(record) = self.players.get_mut(caller) {
            record.queue = None;
        }

        debug!(player = %caller, tier = %entry.tier, "quit queue");
        self.events.push(Event::LeftQueue { player: *caller, tier: entry.tier });

        Ok(entry.tier)
    }

    /// Move the stake from loser to winner, then clear the waiting player
    /// and the slot. The joiner was never queued, so only player 1 has
    /// queue state to clear.
    fn settle(&mut self, result: &MatchResult) -> Result<(), EngineError> {
        let mut record_1 = self.record(&result.player_1);
        let mut record_2 = self.record(&result.player_2);

        let (funds_1, funds_2) = settle_balances(
            result.outcome,
            result.bid_value,
            record_1.deposited_funds,
            record_2.deposited_funds,
        )?;
        record_1.deposited_funds = funds_1;
        record_2.deposited_funds = funds_2;
        record_1.queue = None;

        if let Some((winner, loser)) = result.winner_and_loser() {
            self.ledger.move_balance(&self.address, &loser, &winner, result.bid_value)?;
        }

        self.players.insert(result.player_1, record_1);
        self.players.insert(result.player_2, record_2);
        self.slots[result.tier.index() as usize] = None;

        info!(
            player_1 = %result.player_1,
            player_2 = %result.player_2,
            tier = %result.tier,
            bid_value = result.bid_value,
            outcome = result.outcome.label(),
            "match settled"
        );
        self.events.push(Event::MatchEnded(result.clone()));

        Ok(())
    }


    pub fn update_bid_value(
        &mut self,
        caller: &Address,
        tier: Tier,
        new_value: u128,
    ) -> Result<(), EngineError> {
        self.only_owner(caller)?;
        if new_value == 0 {
            return Err(EngineError::InvalidBidValue);
        }

        let old_value = self.config.bids.get(tier);
        self.config.bids.set(tier, new_value);

        debug!(%tier, old_value, new_value, "bid value updated");
        self.events.push(Event::BidValueUpdated { tier, old_value, new_value });
        Ok(())
    }

    pub fn update_low_bid_value(&mut self, caller: &Address, new_value: u128) -> Result<(), EngineError> {
        self.update_bid_value(caller, Tier::Low, new_value)
    }

    pub fn update_medium_bid_value(&mut self, caller: &Address, new_value: u128) -> Result<(), EngineError> {
        self.update_bid_value(caller, Tier::Medium, new_value)
    }

    pub fn update_high_bid_value(&mut self, caller: &Address, new_value: u128) -> Result<(), EngineError> {
        self.update_bid_value(caller, Tier::High, new_value)
    }

    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> Result<(), EngineError> {
        self.only_owner(caller)?;
        let previous_owner = self.owner;
        self.owner = new_owner;

        info!(previous = %previous_owner, new = %new_owner, "ownership transferred");
        self.events.push(Event::OwnershipTransferred { previous_owner, new_owner });
        Ok(())
    }

    fn only_owner(&self, caller: &Address) -> Result<(), EngineError> {
        if *caller != self.owner {
            warn!(caller = %caller, "rejected owner-only call");
            return Err(EngineError::Unauthorized);
        }
        Ok(())
    }


    pub fn deposited_funds_value(&self, player: &Address) -> u128 {
        self.record(player).deposited_funds
    }

    pub fn is_player_in_queue(&self, player: &Address) -> bool {
        self.record(player).in_queue()
    }

    pub fn player(&self, player: &Address) -> Option<&PlayerRecord> {
        self.players.get(player)
    }

    pub fn queue_slot(&self, tier: Tier) -> Option<&QueueSlot> {
        self.slots[tier.index() as usize].as_ref()
    }

    pub fn low_bid_value(&self) -> u128 {
        self.config.bids.low
    }

    pub fn medium_bid_value(&self) -> u128 {
        self.config.bids.medium
    }

    pub fn high_bid_value(&self) -> u128 {
        self.config.bids.high
    }

    /// Bid value by raw tier index (0 = low, 1 = medium, 2 = high)
    pub fn link_bid_with_value(&self, tier_index: u8) -> Result<u128, EngineError> {
        let tier = Tier::try_from(tier_index)?;
        Ok(self.config.bids.get(tier))
    }

    pub fn value_to_unit_ratio(&self) -> u128 {
        self.config.value_to_unit_ratio
    }

    pub fn minimum_deposit(&self) -> u128 {
        self.config.minimum_deposit
    }

    pub fn escrowed_value(&self) -> u128 {
        self.escrowed_value
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable ledger access for the owner's bootstrap step (binding the
    /// engine as privileged caller). The ledger enforces its own checks.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drain emitted records
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn record(&self, player: &Address) -> PlayerRecord {
        self.players.get(player).copied().unwrap_or_default()
    }
}
