//! Article records as returned by the listing API

use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError};

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_CATEGORY: &str = "Unknown";
pub const ANONYMOUS: &str = "Anonymous";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_CONTENT: &str = "No Content";

/// Number of leading characters of `publish_date` that make up the date part
pub const DATE_LEN: usize = 10;
/// Number of leading characters of `content` shown in the on-screen table
pub const CONTENT_PREVIEW_LEN: usize = 100;

/// One article/resource record.
///
/// Every field is optional; the backend may omit any of them. Unknown keys
/// (including a virtual `id` next to `_id`) are ignored, and a value of the
/// wrong type reads as missing instead of rejecting the whole list.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Article {
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub title: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub category: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub author: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub content: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub image: Option<String>,
}

impl Article {
    pub fn title_or_default(&self) -> &str {
        present(&self.title).unwrap_or(UNTITLED)
    }

    pub fn category_or_default(&self) -> &str {
        present(&self.category).unwrap_or(UNKNOWN_CATEGORY)
    }

    pub fn author_or_default(&self) -> &str {
        present(&self.author).unwrap_or(ANONYMOUS)
    }

    /// Date portion of `publish_date` (its first 10 characters), or `N/A`
    pub fn publish_date_display(&self) -> &str {
        present(&self.publish_date)
            .map(|date| truncate_chars(date, DATE_LEN))
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Full content text, or `No Content`
    pub fn content_or_default(&self) -> &str {
        present(&self.content).unwrap_or(NO_CONTENT)
    }

    /// First 100 characters of the content, or `No Content`
    pub fn content_preview(&self) -> &str {
        present(&self.content)
            .map(|content| truncate_chars(content, CONTENT_PREVIEW_LEN))
            .unwrap_or(NO_CONTENT)
    }

    pub fn has_image(&self) -> bool {
        present(&self.image).is_some()
    }
}

/// Treat empty strings the same as missing fields
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Return at most the first `max_chars` characters of `s`
///
/// Counts Unicode scalar values so a multi-byte character is never split.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_fallbacks() {
        let article = Article::default();
        assert_eq!(article.title_or_default(), "Untitled");
        assert_eq!(article.category_or_default(), "Unknown");
        assert_eq!(article.author_or_default(), "Anonymous");
        assert_eq!(article.publish_date_display(), "N/A");
        assert_eq!(article.content_or_default(), "No Content");
        assert_eq!(article.content_preview(), "No Content");
        assert!(!article.has_image());
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let article = Article {
            title: Some(String::new()),
            content: Some(String::new()),
            image: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(article.title_or_default(), "Untitled");
        assert_eq!(article.content_preview(), "No Content");
        assert!(!article.has_image());
    }

    #[test]
    fn test_publish_date_truncated_to_date_part() {
        let article = Article {
            publish_date: Some("2024-03-15T08:30:00.000Z".to_string()),
            ..Default::default()
        };
        assert_eq!(article.publish_date_display(), "2024-03-15");

        let short = Article {
            publish_date: Some("2024".to_string()),
            ..Default::default()
        };
        assert_eq!(short.publish_date_display(), "2024");
    }

    #[test]
    fn test_content_preview_truncated_to_100_chars() {
        let long = "x".repeat(250);
        let article = Article {
            content: Some(long.clone()),
            ..Default::default()
        };
        assert_eq!(article.content_preview().chars().count(), 100);
        assert_eq!(article.content_or_default(), long);
    }

    #[test]
    fn test_truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "_id": "65f1",
            "title": "Heart Health",
            "category": "Cardiology",
            "author": "Dr. Perera",
            "publish_date": "2024-01-02T00:00:00.000Z",
            "content": "Regular exercise helps.",
            "image": "https://example.com/a.png",
            "__v": 0
        }"#;
        let article: Article = serde_json::from_str(json).expect("parse");
        assert_eq!(article.id.as_deref(), Some("65f1"));
        assert_eq!(article.category_or_default(), "Cardiology");
        assert_eq!(article.publish_date_display(), "2024-01-02");
        assert!(article.has_image());
    }

    #[test]
    fn test_record_with_both_id_keys() {
        let json = r#"[{"_id": "65f1", "id": "65f1", "title": "Heart Health"}]"#;
        let articles: Vec<Article> = serde_json::from_str(json).expect("parse");
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].id.as_deref(), Some("65f1"));
        assert_eq!(articles[0].title_or_default(), "Heart Health");
    }

    #[test]
    fn test_mistyped_field_reads_as_missing() {
        let json = r#"[
            {"_id": 7, "title": 123, "author": ["a", "b"], "content": "Kept."},
            {"_id": "2", "title": "Sleep Well"}
        ]"#;
        let articles: Vec<Article> = serde_json::from_str(json).expect("parse");
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, None);
        assert_eq!(articles[0].title_or_default(), "Untitled");
        assert_eq!(articles[0].author_or_default(), "Anonymous");
        assert_eq!(articles[0].content_preview(), "Kept.");
        assert_eq!(articles[1].title_or_default(), "Sleep Well");
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let article: Article = serde_json::from_str(r#"{"title": null}"#).expect("parse");
        assert_eq!(article, Article::default());
    }
}
