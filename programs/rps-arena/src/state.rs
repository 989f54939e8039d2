//! Account state definitions

use anchor_lang::prelude::*;
use rps_engine::{EngineConfig, Symbol, Tier};

/// One whole RPS token in base units (9 decimals, like SOL)
pub const TOKEN_UNIT: u64 = 1_000_000_000;

/// RPS base units credited per deposited lamport
pub const DEFAULT_UNITS_PER_LAMPORT: u64 = 100;

/// Minimal deposit: 0.0001 SOL
pub const MIN_DEPOSIT_LAMPORTS: u64 = 100_000;

/// Default stake per tier (low, medium, high)
pub const DEFAULT_BIDS: [u64; 3] = [TOKEN_UNIT, 5 * TOKEN_UNIT, 10 * TOKEN_UNIT];

/// Sentinel for "no symbol / no tier" in player accounts
pub const NONE: u8 = u8::MAX;

/// Token ledger. Only `engine` may mint, burn or move balances.
#[account]
#[derive(Default)]
pub struct Ledger {
    /// Deployer; the only one allowed to bind the engine
    pub owner: Pubkey,
    /// Privileged caller (the game Config PDA). Default until bound.
    pub engine: Pubkey,
    pub total_supply: u64,
    pub total_minted: u64,
    pub total_burned: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl Ledger {
    pub const LEN: usize = 8 + // discriminator
        32 +  // owner
        32 +  // engine
        8 +   // total_supply
        8 +   // total_minted
        8 +   // total_burned
        1 +   // bump
        16;   // padding
}

/// Ledger balance of one holder, created at zero on first deposit
#[account]
#[derive(Default)]
pub struct Holding {
    pub holder: Pubkey,
    pub balance: u64,
    pub bump: u8,
}

impl Holding {
    pub const LEN: usize = 8 + // discriminator
        32 +  // holder
        8 +   // balance
        1 +   // bump
        8;    // padding
}

/// The single waiting player of a tier
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueueSlot {
    pub occupied: bool,
    pub occupant: Pubkey,
    pub symbol: u8,
}

impl QueueSlot {
    pub const LEN: usize = 1 + 32 + 1;

    /// True when `player` and `holding` belong to this slot's occupant and
    /// the occupant is still queued on `tier`
    pub fn is_waiting_player(&self, tier: Tier, player: &PlayerAccount, holding: &Holding) -> bool {
        self.occupied
            && player.player == self.occupant
            && player.in_queue
            && player.tier == tier.index()
            && holding.holder == self.occupant
    }
}

/// Global game configuration; also escrows deposited lamports
#[account]
#[derive(Default)]
pub struct Config {
    /// Owner who can update bid values
    pub owner: Pubkey,
    /// Ledger this game mints into
    pub ledger: Pubkey,
    /// RPS base units per lamport
    pub units_per_lamport: u64,
    /// Minimal deposit in lamports
    pub min_deposit: u64,
    /// Stake per tier in RPS base units, indexed by tier
    pub bids: [u64; 3],
    /// One waiting slot per tier
    pub slots: [QueueSlot; 3],
    /// Lamports held on behalf of depositors
    pub escrowed_lamports: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    pub const LEN: usize = 8 + // discriminator
        32 +  // owner
        32 +  // ledger
        8 +   // units_per_lamport
        8 +   // min_deposit
        8 * 3 +  // bids
        QueueSlot::LEN * 3 + // slots
        8 +   // escrowed_lamports
        1 +   // bump
        32;   // padding

    /// Same settings expressed for the shared engine crate, so conversion
    /// and validation match the host-side engine exactly.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig {
            value_to_unit_ratio: self.units_per_lamport as u128,
            minimum_deposit: self.min_deposit as u128,
            ..EngineConfig::default()
        };
        for tier in Tier::ALL {
            config.bids.set(tier, self.bids[tier.index() as usize] as u128);
        }
        config
    }

    pub fn bid(&self, tier: Tier) -> u64 {
        self.bids[tier.index() as usize]
    }

    pub fn slot(&self, tier: Tier) -> &QueueSlot {
        &self.slots[tier.index() as usize]
    }

    pub fn slot_mut(&mut self, tier: Tier) -> &mut QueueSlot {
        &mut self.slots[tier.index() as usize]
    }
}

/// Per-player bookkeeping
#[account]
#[derive(Default)]
pub struct PlayerAccount {
    pub player: Pubkey,
    /// RPS base units staked on the player's behalf (mirrors their Holding)
    pub deposited_funds: u64,
    pub in_queue: bool,
    /// Chosen symbol while queued, NONE otherwise
    pub symbol: u8,
    /// Chosen tier while queued, NONE otherwise
    pub tier: u8,
    /// PDA bump seed
    pub bump: u8,
}

impl PlayerAccount {
    pub const LEN: usize = 8 + // discriminator
        32 +  // player
        8 +   // deposited_funds
        1 +   // in_queue
        1 +   // symbol
        1 +   // tier
        1 +   // bump
        16;   // padding

    pub fn enqueue(&mut self, symbol: Symbol, tier: Tier) {
        self.in_queue = true;
        self.symbol = symbol.index();
        self.tier = tier.index();
    }

    pub fn dequeue(&mut self) {
        self.in_queue = false;
        self.symbol = NONE;
        self.tier = NONE;
    }
}
