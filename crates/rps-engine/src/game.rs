//! Match resolution

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::error::EngineError;
use crate::ledger::Address;
use crate::symbol::{Symbol, Tier};

/// Outcome of a single match, from the queue's point of view: player 1 is
/// the one who was waiting in the slot, player 2 completed the pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Draw,
    Player1Wins,
    Player2Wins,
}

impl Outcome {
    /// Label carried by the match record
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Draw => "Draw",
            Outcome::Player1Wins => "Winner: player1",
            Outcome::Player2Wins => "Winner: player2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolve a match. Pure function of the two symbols.
pub fn resolve(symbol_1: Symbol, symbol_2: Symbol) -> Outcome {
    if symbol_1 == symbol_2 {
        Outcome::Draw
    } else if symbol_1.beats(symbol_2) {
        Outcome::Player1Wins
    } else {
        Outcome::Player2Wins
    }
}

/// Deposited funds of (player 1, player 2) after the loser pays
/// `bid_value` to the winner. Fails without side effects when the loser
/// cannot cover the stake or the winner's balance would overflow.
pub fn settle_balances(
    outcome: Outcome,
    bid_value: u128,
    funds_1: u128,
    funds_2: u128,
) -> Result<(u128, u128), EngineError> {
    match outcome {
        Outcome::Draw => Ok((funds_1, funds_2)),
        Outcome::Player1Wins => {
            let (winner, loser) = transfer(funds_1, funds_2, bid_value)?;
            Ok((winner, loser))
        }
        Outcome::Player2Wins => {
            let (winner, loser) = transfer(funds_2, funds_1, bid_value)?;
            Ok((loser, winner))
        }
    }
}

fn transfer(winner: u128, loser: u128, amount: u128) -> Result<(u128, u128), EngineError> {
    let loser = loser.checked_sub(amount).ok_or(EngineError::InsufficientFunds {
        available: loser,
        required: amount,
    })?;
    let winner = winner.checked_add(amount).ok_or(EngineError::Overflow)?;
    Ok((winner, loser))
}

/// Auditable record of a settled match. Emitted, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub player_1: Address,
    pub symbol_1: Symbol,
    pub player_2: Address,
    pub symbol_2: Symbol,
    pub tier: Tier,
    /// Stake moved from loser to winner (nothing moves on a draw)
    #[serde(with = "crate::amount")]
    pub bid_value: u128,
    pub outcome: Outcome,
}

impl MatchResult {
    /// (winner, loser), or `None` on a draw
    pub fn winner_and_loser(&self) -> Option<(Address, Address)> {
        match self.outcome {
            Outcome::Draw => None,
            Outcome::Player1Wins => Some((self.player_1, self.player_2)),
            Outcome::Player2Wins => Some((self.player_2, self.player_1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_table() {
        use Symbol::*;
        let table = [
            (Rock, Rock, Outcome::Draw),
            (Rock, Paper, Outcome::Player2Wins),
            (Rock, Scissors, Outcome::Player1Wins),
            (Paper, Rock, Outcome::Player1Wins),
            (Paper, Paper, Outcome::Draw),
            (Paper, Scissors, Outcome::Player2Wins),
            (Scissors, Rock, Outcome::Player2Wins),
            (Scissors, Paper, Outcome::Player1Wins),
            (Scissors, Scissors, Outcome::Draw),
        ];
        for (a, b, expected) in table {
            assert_eq!(resolve(a, b), expected, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_resolution_is_antisymmetric() {
        for a in Symbol::ALL {
            for b in Symbol::ALL {
                let forward = resolve(a, b);
                let reverse = resolve(b, a);
                match forward {
                    Outcome::Draw => assert_eq!(reverse, Outcome::Draw),
                    Outcome::Player1Wins => assert_eq!(reverse, Outcome::Player2Wins),
                    Outcome::Player2Wins => assert_eq!(reverse, Outcome::Player1Wins),
                }
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Outcome::Draw.label(), "Draw");
        assert_eq!(Outcome::Player1Wins.to_string(), "Winner: player1");
        assert_eq!(Outcome::Player2Wins.to_string(), "Winner: player2");
    }

    #[test]
    fn test_settle_balances() {
        assert_eq!(settle_balances(Outcome::Draw, 5, 7, 3), Ok((7, 3)));
        assert_eq!(settle_balances(Outcome::Player1Wins, 5, 7, 5), Ok((12, 0)));
        assert_eq!(settle_balances(Outcome::Player2Wins, 5, 7, 5), Ok((2, 10)));
    }

    #[test]
    fn test_settle_balances_loser_short() {
        assert_eq!(
            settle_balances(Outcome::Player1Wins, 5, 7, 4),
            Err(EngineError::InsufficientFunds { available: 4, required: 5 })
        );
        assert_eq!(
            settle_balances(Outcome::Player2Wins, 8, 7, 100),
            Err(EngineError::InsufficientFunds { available: 7, required: 8 })
        );
        // A draw never needs the stake
        assert_eq!(settle_balances(Outcome::Draw, 8, 0, 0), Ok((0, 0)));
    }

    #[test]
    fn test_settle_balances_huge_stake() {
        assert_eq!(
            settle_balances(Outcome::Player1Wins, u128::MAX, 1, u128::MAX),
            Err(EngineError::Overflow)
        );
        assert_eq!(
            settle_balances(Outcome::Player1Wins, u128::MAX, 0, u128::MAX),
            Ok((u128::MAX, 0))
        );
    }

    #[test]
    fn test_winner_and_loser() {
        let a = Address::from_byte(1);
        let b = Address::from_byte(2);
        let mut result = MatchResult {
            player_1: a,
            symbol_1: Symbol::Rock,
            player_2: b,
            symbol_2: Symbol::Paper,
            tier: Tier::Low,
            bid_value: 10,
            outcome: Outcome::Player2Wins,
        };
        assert_eq!(result.winner_and_loser(), Some((b, a)));

        result.outcome = Outcome::Draw;
        assert_eq!(result.winner_and_loser(), None);
    }
}
