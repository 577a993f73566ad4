//! Shared conversion helpers between DB column types and domain types.
//!
//! Decimals and enums are stored as TEXT; timestamps as naive UTC. A value
//! that no longer parses is surfaced as an internal database error rather
//! than silently dropped.

use chrono::{DateTime, NaiveDateTime, Utc};
use markethub_core::errors::Error;
use markethub_market_data::AssetKind;
use rust_decimal::Decimal;

use crate::errors::StorageError;

pub fn to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(naive, Utc)
}

pub fn to_naive(utc: DateTime<Utc>) -> NaiveDateTime {
    utc.naive_utc()
}

pub fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, Error> {
    raw.parse::<Decimal>().map_err(|_| {
        StorageError::CorruptValue(format!("{}: not a decimal: {}", column, raw)).into()
    })
}

pub fn parse_kind(raw: &str) -> Result<AssetKind, Error> {
    match raw {
        "stock" => Ok(AssetKind::Stock),
        "crypto" => Ok(AssetKind::Crypto),
        "forex" => Ok(AssetKind::Forex),
        other => {
            Err(StorageError::CorruptValue(format!("kind: unknown variant: {}", other)).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimal_round_trips_through_text() {
        let value = dec!(1.085);
        assert_eq!(parse_decimal("price", &value.to_string()).unwrap(), value);
        assert!(parse_decimal("price", "not-a-number").is_err());
    }

    #[test]
    fn kind_matches_serde_casing() {
        for kind in [AssetKind::Stock, AssetKind::Crypto, AssetKind::Forex] {
            assert_eq!(parse_kind(kind.as_str()).unwrap(), kind);
        }
        assert!(parse_kind("bond").is_err());
    }
}
