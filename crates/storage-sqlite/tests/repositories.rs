//! Repository round-trips against a real on-disk SQLite database.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use tempfile::TempDir;

use markethub_core::alerts::{AlertDirection, AlertRepositoryTrait, NewUserAlert};
use markethub_core::errors::{DatabaseError, Error};
use markethub_core::events::{EventImpact, EventRepositoryTrait, NewEconomicEvent};
use markethub_core::markets::{MarketAssetRepositoryTrait, NewMarketAsset};
use markethub_core::news::{NewNewsArticle, NewsRepositoryTrait};
use markethub_core::pagination::PageRequest;
use markethub_core::users::{NewUser, UserRepositoryTrait};
use markethub_core::watchlists::{NewWatchlistEntry, WatchlistRepositoryTrait};
use markethub_market_data::AssetKind;

use markethub_storage_sqlite::{
    init, AlertRepository, DbPool, EventRepository, MarketAssetRepository, NewsRepository,
    UserRepository, WatchlistRepository,
};

struct TestDb {
    pool: Arc<DbPool>,
    // Held so the database file outlives the test body.
    _dir: TempDir,
}

fn test_db() -> TestDb {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("markethub-test.db");
    let pool = init(path.to_str().expect("utf8 path")).expect("init database");
    TestDb { pool, _dir: dir }
}

async fn seed_user(pool: &Arc<DbPool>, username: &str) -> String {
    let repo = UserRepository::new(pool.clone());
    let user = repo
        .create(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "$argon2id$stub".to_string(),
        })
        .await
        .expect("create user");
    user.id
}

#[tokio::test]
async fn user_natural_keys_are_unique() {
    let db = test_db();
    let repo = UserRepository::new(db.pool.clone());
    seed_user(&db.pool, "alice").await;

    let err = repo
        .create(NewUser {
            username: "alice".to_string(),
            email: "other@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Database(DatabaseError::UniqueViolation(_))
    ));

    let found = repo.find_by_username("alice").expect("find by username");
    assert_eq!(found.email, "alice@example.com");
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let db = test_db();
    let repo = UserRepository::new(db.pool.clone());
    let err = repo.find_by_id("nope").unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
}

#[tokio::test]
async fn market_asset_quote_round_trips_decimal_text() {
    let db = test_db();
    let repo = MarketAssetRepository::new(db.pool.clone());

    let asset = repo
        .create(NewMarketAsset {
            symbol: "AAPL".to_string(),
            kind: AssetKind::Stock,
            name: "Apple Inc.".to_string(),
        })
        .await
        .expect("create asset");
    assert!(asset.price.is_none());

    repo.save_quote(&asset.id, dec!(150.25), dec!(1.01), Utc::now())
        .await
        .expect("save quote");

    let stored = repo
        .find_by_symbol("AAPL", AssetKind::Stock)
        .expect("find by symbol");
    assert_eq!(stored.price, Some(dec!(150.25)));
    assert_eq!(stored.change_percent, Some(dec!(1.01)));
    assert!(stored.price_updated_at.is_some());
}

#[tokio::test]
async fn market_asset_search_matches_symbol_and_name() {
    let db = test_db();
    let repo = MarketAssetRepository::new(db.pool.clone());
    for (symbol, name) in [("AAPL", "Apple Inc."), ("MSFT", "Microsoft"), ("GOOGL", "Alphabet")] {
        repo.create(NewMarketAsset {
            symbol: symbol.to_string(),
            kind: AssetKind::Stock,
            name: name.to_string(),
        })
        .await
        .expect("create asset");
    }

    let by_symbol = repo.search("AAP", PageRequest::default()).unwrap();
    assert_eq!(by_symbol.total, 1);
    assert_eq!(by_symbol.items[0].symbol, "AAPL");

    let by_name = repo.search("soft", PageRequest::default()).unwrap();
    assert_eq!(by_name.items[0].symbol, "MSFT");
}

#[tokio::test]
async fn news_insert_is_idempotent_by_url() {
    let db = test_db();
    let repo = NewsRepository::new(db.pool.clone());

    let article = NewNewsArticle {
        title: "Fed Holds Rates".to_string(),
        url: "https://example.com/fed".to_string(),
        source: "GNEWS".to_string(),
        published_at: Utc::now(),
        description: None,
        category: Some("business".to_string()),
    };

    assert!(repo.insert_ignore(article.clone()).await.unwrap());
    assert!(!repo.insert_ignore(article).await.unwrap());

    let page = repo.list(PageRequest::default()).unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn news_list_is_ordered_by_recency() {
    let db = test_db();
    let repo = NewsRepository::new(db.pool.clone());

    for (i, minutes_ago) in [30i64, 10, 20].iter().enumerate() {
        repo.insert_ignore(NewNewsArticle {
            title: format!("Article {}", i),
            url: format!("https://example.com/{}", i),
            source: "GNEWS".to_string(),
            published_at: Utc::now() - Duration::minutes(*minutes_ago),
            description: None,
            category: None,
        })
        .await
        .unwrap();
    }

    let page = repo.list(PageRequest::default()).unwrap();
    assert!(page
        .items
        .windows(2)
        .all(|w| w[0].published_at >= w[1].published_at));
}

#[tokio::test]
async fn events_prune_deletes_only_before_cutoff() {
    let db = test_db();
    let repo = EventRepository::new(db.pool.clone());

    for offset in [-40i64, -3, 5] {
        repo.create(NewEconomicEvent {
            title: "CPI".to_string(),
            country: "US".to_string(),
            impact: EventImpact::High,
            scheduled_at: Utc::now() + Duration::days(offset),
            actual: None,
            forecast: None,
            previous: None,
        })
        .await
        .unwrap();
    }

    let removed = repo
        .delete_scheduled_before(Utc::now() - Duration::days(30))
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(repo.list(PageRequest::default()).unwrap().total, 2);
}

#[tokio::test]
async fn alerts_are_user_scoped() {
    let db = test_db();
    let alice = seed_user(&db.pool, "alice").await;
    let bob = seed_user(&db.pool, "bob").await;
    let repo = AlertRepository::new(db.pool.clone());

    let alert = repo
        .create(NewUserAlert {
            user_id: alice.clone(),
            symbol: "AAPL".to_string(),
            kind: AssetKind::Stock,
            price_target: dec!(150),
            direction: AlertDirection::Above,
        })
        .await
        .unwrap();
    assert!(alert.active);
    assert_eq!(alert.price_target, dec!(150));

    // Bob cannot touch Alice's alert.
    assert!(repo.set_active(&alert.id, &bob, false).await.is_err());
    assert_eq!(repo.delete(&alert.id, &bob).await.unwrap(), 0);

    let updated = repo.set_active(&alert.id, &alice, false).await.unwrap();
    assert!(!updated.active);
    assert!(repo.list_active().unwrap().is_empty());
    assert_eq!(repo.delete(&alert.id, &alice).await.unwrap(), 1);
}

#[tokio::test]
async fn alert_rows_cascade_with_user() {
    let db = test_db();
    let alice = seed_user(&db.pool, "alice").await;
    let alerts = AlertRepository::new(db.pool.clone());
    let users = UserRepository::new(db.pool.clone());

    alerts
        .create(NewUserAlert {
            user_id: alice.clone(),
            symbol: "AAPL".to_string(),
            kind: AssetKind::Stock,
            price_target: dec!(1),
            direction: AlertDirection::Below,
        })
        .await
        .unwrap();

    users.delete(&alice).await.unwrap();
    assert!(alerts.list_for_user(&alice).unwrap().is_empty());
}

#[tokio::test]
async fn watchlist_insert_ignores_duplicates() {
    let db = test_db();
    let alice = seed_user(&db.pool, "alice").await;
    let repo = WatchlistRepository::new(db.pool.clone());

    let entry = NewWatchlistEntry {
        user_id: alice.clone(),
        symbol: "BTCUSDT".to_string(),
        kind: AssetKind::Crypto,
    };
    let first = repo.insert_ignore(entry.clone()).await.unwrap();
    let second = repo.insert_ignore(entry).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(repo.list_for_user(&alice).unwrap().len(), 1);

    assert_eq!(
        repo.delete(&alice, "BTCUSDT", AssetKind::Crypto).await.unwrap(),
        1
    );
    assert!(repo.list_for_user(&alice).unwrap().is_empty());
}

#[tokio::test]
async fn pagination_limits_and_counts() {
    let db = test_db();
    let repo = MarketAssetRepository::new(db.pool.clone());
    for i in 0..25 {
        repo.create(NewMarketAsset {
            symbol: format!("SYM{:02}", i),
            kind: AssetKind::Stock,
            name: format!("Symbol {}", i),
        })
        .await
        .unwrap();
    }

    let page = repo.list(PageRequest::new(2, 10)).unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.items[0].symbol, "SYM10");
}
