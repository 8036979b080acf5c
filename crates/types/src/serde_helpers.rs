use std::str::FromStr;

use alloy_primitives::U256;
use serde::{de, Deserialize, Deserializer};

// Aggregators are loose about numeric encoding: plain JSON numbers, decimal strings and
// 0x-prefixed hex strings all show up for the same field.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Unsigned(u64),
    Signed(i64),
    String(String),
}

fn parse_u64(s: &str) -> Result<u64, String> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).map_err(|e| e.to_string()),
        None => s.parse::<u64>().map_err(|e| e.to_string()),
    }
}

pub(crate) mod u256_lenient {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Unsigned(n) => Ok(U256::from(n)),
            NumberOrString::Signed(n) => Err(de::Error::custom(format!("negative amount {n}"))),
            NumberOrString::String(s) => U256::from_str(s.trim()).map_err(de::Error::custom),
        }
    }
}

pub(crate) mod u64_lenient_opt {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_u64(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Unsigned(n)) => Ok(Some(n)),
            Some(NumberOrString::Signed(n)) => Err(de::Error::custom(format!("negative value {n}"))),
            Some(NumberOrString::String(s)) => parse_u64(&s).map(Some).map_err(de::Error::custom),
        }
    }
}

pub(crate) mod i64_lenient {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Unsigned(n) => i64::try_from(n).map_err(de::Error::custom),
            NumberOrString::Signed(n) => Ok(n),
            NumberOrString::String(s) => s.trim().parse::<i64>().map_err(de::Error::custom),
        }
    }
}
