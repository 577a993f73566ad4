//! Cross-provider news deduplication.
//!
//! Two items are duplicates when their URLs match exactly or their
//! normalized titles match. Input order decides the winner, so callers
//! sort by (source priority, published_at desc) first to keep the result
//! deterministic across repeated calls.

use std::collections::HashSet;

use crate::models::NewsItem;

/// Lowercase, strip punctuation, collapse whitespace runs.
pub fn normalize_title(title: &str) -> String {
    let stripped: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop items whose URL or normalized title was already seen. First seen wins.
pub fn dedup_news(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(items.len());

    for item in items {
        let title_key = normalize_title(&item.title);

        if seen_urls.contains(&item.url) {
            continue;
        }
        // An all-punctuation title normalizes to "": never treat those as
        // duplicates of each other.
        if !title_key.is_empty() && seen_titles.contains(&title_key) {
            continue;
        }

        seen_urls.insert(item.url.clone());
        if !title_key.is_empty() {
            seen_titles.insert(title_key);
        }
        kept.push(item);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(title: &str, url: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            url: url.to_string(),
            source: "test".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            description: None,
            category: None,
        }
    }

    #[test]
    fn normalization_strips_case_punctuation_whitespace() {
        assert_eq!(
            normalize_title("  Fed Holds   Rates -- Markets Cheer!  "),
            "fed holds rates markets cheer"
        );
        assert_eq!(normalize_title("U.S. GDP up 2.5%"), "us gdp up 25");
    }

    #[test]
    fn same_url_different_title_casing_keeps_one() {
        let items = vec![
            item("Fed Holds Rates", "https://example.com/fed"),
            item("FED  holds   rates!", "https://example.com/fed"),
        ];
        let deduped = dedup_news(items);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].title, "Fed Holds Rates");
    }

    #[test]
    fn same_title_different_url_keeps_first() {
        let items = vec![
            item("Oil rallies", "https://a.example/oil"),
            item("Oil Rallies", "https://b.example/oil"),
            item("Gold slips", "https://c.example/gold"),
        ];
        let deduped = dedup_news(items);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].url, "https://a.example/oil");
        assert_eq!(deduped[1].title, "Gold slips");
    }

    #[test]
    fn distinct_items_all_survive() {
        let items = vec![
            item("A", "https://x.example/1"),
            item("B", "https://x.example/2"),
            item("C", "https://x.example/3"),
        ];
        assert_eq!(dedup_news(items).len(), 3);
    }

    #[test]
    fn empty_normalized_titles_do_not_collide() {
        let items = vec![
            item("???", "https://x.example/1"),
            item("!!!", "https://x.example/2"),
        ];
        assert_eq!(dedup_news(items).len(), 2);
    }
}
