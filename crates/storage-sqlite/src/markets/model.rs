//! Database models for market assets.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{parse_decimal, parse_kind, to_naive, to_utc};
use markethub_core::markets::{MarketAsset, NewMarketAsset};
use markethub_core::Result;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::market_assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MarketAssetDB {
    pub id: String,
    pub symbol: String,
    pub kind: String,
    pub name: String,
    pub price: Option<String>,
    pub change_percent: Option<String>,
    pub price_updated_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::market_assets)]
pub struct NewMarketAssetDB {
    pub id: String,
    pub symbol: String,
    pub kind: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl MarketAssetDB {
    pub fn into_domain(self) -> Result<MarketAsset> {
        let price = self
            .price
            .as_deref()
            .map(|raw| parse_decimal("price", raw))
            .transpose()?;
        let change_percent = self
            .change_percent
            .as_deref()
            .map(|raw| parse_decimal("change_percent", raw))
            .transpose()?;

        Ok(MarketAsset {
            id: self.id,
            symbol: self.symbol,
            kind: parse_kind(&self.kind)?,
            name: self.name,
            price,
            change_percent,
            price_updated_at: self.price_updated_at.map(to_utc),
            created_at: to_utc(self.created_at),
        })
    }
}

impl NewMarketAssetDB {
    pub fn from_domain(domain: NewMarketAsset) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: domain.symbol,
            kind: domain.kind.as_str().to_string(),
            name: domain.name,
            created_at: to_naive(chrono::Utc::now()),
        }
    }
}
