use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use markethub_core::markets::{MarketAsset, MarketAssetRepositoryTrait, NewMarketAsset};
use markethub_core::pagination::{Page, PageRequest};
use markethub_core::Result;
use markethub_market_data::AssetKind;

use super::model::{MarketAssetDB, NewMarketAssetDB};
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::market_assets;
use crate::utils::to_naive;

pub struct MarketAssetRepository {
    pool: Arc<DbPool>,
}

impl MarketAssetRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn into_domain_vec(rows: Vec<MarketAssetDB>) -> Result<Vec<MarketAsset>> {
        rows.into_iter().map(MarketAssetDB::into_domain).collect()
    }
}

#[async_trait]
impl MarketAssetRepositoryTrait for MarketAssetRepository {
    fn find_by_id(&self, asset_id: &str) -> Result<MarketAsset> {
        let mut conn = get_connection(&self.pool)?;
        let db = market_assets::table
            .find(asset_id)
            .first::<MarketAssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        db.into_domain()
    }

    fn find_by_symbol(&self, symbol: &str, kind: AssetKind) -> Result<MarketAsset> {
        let mut conn = get_connection(&self.pool)?;
        let db = market_assets::table
            .filter(market_assets::symbol.eq(symbol))
            .filter(market_assets::kind.eq(kind.as_str()))
            .first::<MarketAssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        db.into_domain()
    }

    fn list(&self, page: PageRequest) -> Result<Page<MarketAsset>> {
        let mut conn = get_connection(&self.pool)?;
        let total = market_assets::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let rows = market_assets::table
            .order(market_assets::symbol.asc())
            .limit(page.limit)
            .offset(page.offset)
            .load::<MarketAssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Page::new(Self::into_domain_vec(rows)?, total))
    }

    fn list_all(&self) -> Result<Vec<MarketAsset>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = market_assets::table
            .order(market_assets::symbol.asc())
            .load::<MarketAssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::into_domain_vec(rows)
    }

    fn search(&self, query: &str, page: PageRequest) -> Result<Page<MarketAsset>> {
        let mut conn = get_connection(&self.pool)?;
        let pattern = format!("%{}%", query);
        let matcher = market_assets::symbol
            .like(pattern.clone())
            .or(market_assets::name.like(pattern));

        let total = market_assets::table
            .filter(matcher.clone())
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let rows = market_assets::table
            .filter(matcher)
            .order(market_assets::symbol.asc())
            .limit(page.limit)
            .offset(page.offset)
            .load::<MarketAssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Page::new(Self::into_domain_vec(rows)?, total))
    }

    async fn create(&self, new_asset: NewMarketAsset) -> Result<MarketAsset> {
        let mut conn = get_connection(&self.pool)?;
        let new_db = NewMarketAssetDB::from_domain(new_asset);
        let db: MarketAssetDB = diesel::insert_into(market_assets::table)
            .values(&new_db)
            .returning(MarketAssetDB::as_returning())
            .get_result(&mut conn)
            .map_err(StorageError::from)?;
        db.into_domain()
    }

    async fn delete(&self, asset_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::delete(market_assets::table.find(asset_id))
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(affected)
    }

    async fn save_quote(
        &self,
        asset_id: &str,
        price: Decimal,
        change_percent: Decimal,
        as_of: DateTime<Utc>,
    ) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::update(market_assets::table.find(asset_id))
            .set((
                market_assets::price.eq(price.to_string()),
                market_assets::change_percent.eq(change_percent.to_string()),
                market_assets::price_updated_at.eq(to_naive(as_of)),
            ))
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(())
    }
}
