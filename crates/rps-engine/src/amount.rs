//! Unit amounts on the wire as decimal strings.
//!
//! 18-decimal amounts overflow both JSON's u64 range and JS numbers, so
//! records carry them as `"100000000000000000000"`.

use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

pub fn serialize<S>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&amount.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(|_| D::Error::custom(format!("invalid amount: {s}")))
}
