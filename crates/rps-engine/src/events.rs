//! Records emitted by the engine

use serde::{Deserialize, Serialize};
use crate::game::MatchResult;
use crate::ledger::Address;
use crate::symbol::{Symbol, Tier};

/// Amounts serialize as decimal strings; the variant name goes under `"event"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    FundsDeposited {
        account: Address,
        #[serde(with = "crate::amount")]
        amount_in_value: u128,
        #[serde(with = "crate::amount")]
        amount_in_units: u128,
    },
    FundsWithdrawn {
        account: Address,
        #[serde(with = "crate::amount")]
        amount_in_value: u128,
        #[serde(with = "crate::amount")]
        amount_in_units: u128,
    },
    JoinedQueue {
        player: Address,
        symbol: Symbol,
        tier: Tier,
    },
    LeftQueue {
        player: Address,
        tier: Tier,
    },
    MatchEnded(MatchResult),
    BidValueUpdated {
        tier: Tier,
        #[serde(with = "crate::amount")]
        old_value: u128,
        #[serde(with = "crate::amount")]
        new_value: u128,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}
