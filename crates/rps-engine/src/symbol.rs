//! Hand symbols and stake tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::error::EngineError;

/// A hand in Rock Paper Scissors
///
/// Discriminants are the wire values players submit. The successor of a
/// symbol modulo 3 beats it: Paper beats Rock, Scissors beats Paper,
/// Rock beats Scissors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Symbol {
    pub const ALL: [Symbol; 3] = [Symbol::Rock, Symbol::Paper, Symbol::Scissors];

    /// Map a u8 index (0–2) to the corresponding Symbol variant.
    pub fn from_index(index: u8) -> Option<Symbol> {
        match index {
            0 => Some(Symbol::Rock),
            1 => Some(Symbol::Paper),
            2 => Some(Symbol::Scissors),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// The symbol that beats this one
    pub fn successor(self) -> Symbol {
        Symbol::ALL[((self.index() + 1) % 3) as usize]
    }

    pub fn beats(self, other: Symbol) -> bool {
        other.successor() == self
    }
}

impl TryFrom<u8> for Symbol {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Symbol::from_index(value).ok_or(EngineError::InvalidSymbol(value))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Symbol::Rock => "Rock",
            Symbol::Paper => "Paper",
            Symbol::Scissors => "Scissors",
        };
        f.write_str(name)
    }
}

/// Stake tier. Each tier has exactly one waiting slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    /// Map a u8 index (0–2) to the corresponding Tier variant.
    pub fn from_index(index: u8) -> Option<Tier> {
        match index {
            0 => Some(Tier::Low),
            1 => Some(Tier::Medium),
            2 => Some(Tier::High),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Tier {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Tier::from_index(value).ok_or(EngineError::InvalidTier(value))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        };
        f.write_str(name)
    }
}
