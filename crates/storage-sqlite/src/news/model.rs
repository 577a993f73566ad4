//! Database models for news articles.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{to_naive, to_utc};
use markethub_core::news::{NewNewsArticle, NewsArticle};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::news_articles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewsArticleDB {
    pub id: String,
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_at: NaiveDateTime,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::news_articles)]
pub struct NewNewsArticleDB {
    pub id: String,
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_at: NaiveDateTime,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<NewsArticleDB> for NewsArticle {
    fn from(db: NewsArticleDB) -> Self {
        Self {
            id: db.id,
            title: db.title,
            url: db.url,
            source: db.source,
            published_at: to_utc(db.published_at),
            description: db.description,
            category: db.category,
            created_at: to_utc(db.created_at),
        }
    }
}

impl NewNewsArticleDB {
    pub fn from_domain(domain: NewNewsArticle) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: domain.title,
            url: domain.url,
            source: domain.source,
            published_at: to_naive(domain.published_at),
            description: domain.description,
            category: domain.category,
            created_at: to_naive(chrono::Utc::now()),
        }
    }
}
