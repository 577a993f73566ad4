use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use markethub_core::news::{NewNewsArticle, NewsArticle, NewsRepositoryTrait};
use markethub_core::pagination::{Page, PageRequest};
use markethub_core::Result;

use super::model::{NewNewsArticleDB, NewsArticleDB};
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::news_articles;

pub struct NewsRepository {
    pool: Arc<DbPool>,
}

impl NewsRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepositoryTrait for NewsRepository {
    fn find_by_id(&self, article_id: &str) -> Result<NewsArticle> {
        let mut conn = get_connection(&self.pool)?;
        let db = news_articles::table
            .find(article_id)
            .first::<NewsArticleDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(db.into())
    }

    fn find_by_url(&self, url: &str) -> Result<NewsArticle> {
        let mut conn = get_connection(&self.pool)?;
        let db = news_articles::table
            .filter(news_articles::url.eq(url))
            .first::<NewsArticleDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(db.into())
    }

    fn list(&self, page: PageRequest) -> Result<Page<NewsArticle>> {
        let mut conn = get_connection(&self.pool)?;
        let total = news_articles::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let rows = news_articles::table
            .order(news_articles::published_at.desc())
            .limit(page.limit)
            .offset(page.offset)
            .load::<NewsArticleDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Page::new(
            rows.into_iter().map(NewsArticle::from).collect(),
            total,
        ))
    }

    async fn insert_ignore(&self, article: NewNewsArticle) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let new_db = NewNewsArticleDB::from_domain(article);
        let inserted = diesel::insert_into(news_articles::table)
            .values(&new_db)
            .on_conflict(news_articles::url)
            .do_nothing()
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(inserted > 0)
    }

    async fn delete(&self, article_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::delete(news_articles::table.find(article_id))
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(affected)
    }
}
