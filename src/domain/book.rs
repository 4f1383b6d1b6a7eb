//! Catalog book records.
//!
//! A [`BookRecord`] is one entry returned by the catalog lookup. Records are
//! treated as immutable values once received; the search results, the
//! favourites collection and the detail selection all share the same
//! allocation through [`SharedBook`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Title shown when the catalog provides none.
pub const UNTITLED: &str = "Untitled";

/// Author line shown when the catalog provides no authors.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Reference-counted book record shared between results, favourites and
/// the detail selection.
pub type SharedBook = Rc<BookRecord>;

/// One catalog entry: a unique identifier and optional display metadata.
///
/// The serialized form matches the catalog wire format, so a record can be
/// persisted in the favourites collection exactly as it was received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Catalog identifier, unique per book.
    pub id: String,

    /// Display metadata block.
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

/// Optional display fields of a [`BookRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

/// Cover image URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
}

/// A typed identifier such as an ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryIdentifier {
    /// Identifier scheme, e.g. `ISBN_13`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Identifier value.
    pub identifier: String,
}

impl BookRecord {
    /// Creates a record with only an identifier and a title.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::domain::BookRecord;
    ///
    /// let book = BookRecord::new("zyTCAlFPjgYC", "The Google Story");
    /// assert_eq!(book.display_title(), "The Google Story");
    /// assert_eq!(book.display_authors(), "Unknown Author");
    /// ```
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            volume_info: VolumeInfo {
                title: Some(title.into()),
                ..VolumeInfo::default()
            },
        }
    }

    /// Title, or `"Untitled"` when absent or blank.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.volume_info
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
    }

    /// Authors joined by `", "`, or `"Unknown Author"`.
    #[must_use]
    pub fn display_authors(&self) -> String {
        if self.volume_info.authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            self.volume_info.authors.join(", ")
        }
    }

    /// Cover thumbnail URL, falling back to the small thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        let links = self.volume_info.image_links.as_ref()?;
        links
            .thumbnail
            .as_deref()
            .or(links.small_thumbnail.as_deref())
    }

    /// Publication year parsed from `publishedDate`.
    ///
    /// The catalog reports dates as `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::domain::BookRecord;
    ///
    /// let mut book = BookRecord::new("id", "t");
    /// book.volume_info.published_date = Some("2005-11-15".to_string());
    /// assert_eq!(book.published_year(), Some(2005));
    ///
    /// book.volume_info.published_date = Some("1998".to_string());
    /// assert_eq!(book.published_year(), Some(1998));
    /// ```
    #[must_use]
    pub fn published_year(&self) -> Option<i32> {
        let raw = self.volume_info.published_date.as_deref()?.trim();

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date.year());
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
            return Some(date.year());
        }
        if raw.len() == 4 {
            return raw.parse().ok();
        }
        None
    }

    /// Preferred ISBN: ISBN-13 when present, otherwise ISBN-10.
    #[must_use]
    pub fn isbn(&self) -> Option<&str> {
        let find = |kind: &str| {
            self.volume_info
                .industry_identifiers
                .iter()
                .find(|i| i.kind == kind)
                .map(|i| i.identifier.as_str())
        };
        find("ISBN_13").or_else(|| find("ISBN_10"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_shape_and_ignores_unknown_fields() {
        let json = r#"{
            "kind": "books#volume",
            "id": "abc123",
            "etag": "x",
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert"],
                "publisher": "Chilton",
                "publishedDate": "1965-08",
                "pageCount": 412,
                "imageLinks": { "smallThumbnail": "http://s", "thumbnail": "http://t" },
                "industryIdentifiers": [
                    { "type": "ISBN_10", "identifier": "0441013597" },
                    { "type": "ISBN_13", "identifier": "9780441013593" }
                ],
                "printType": "BOOK"
            }
        }"#;

        let book: BookRecord = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, "abc123");
        assert_eq!(book.display_title(), "Dune");
        assert_eq!(book.display_authors(), "Frank Herbert");
        assert_eq!(book.published_year(), Some(1965));
        assert_eq!(book.volume_info.page_count, Some(412));
        assert_eq!(book.thumbnail(), Some("http://t"));
        assert_eq!(book.isbn(), Some("9780441013593"));
    }

    #[test]
    fn missing_volume_info_uses_fallbacks() {
        let book: BookRecord = serde_json::from_str(r#"{"id":"only-id"}"#).unwrap();
        assert_eq!(book.display_title(), UNTITLED);
        assert_eq!(book.display_authors(), UNKNOWN_AUTHOR);
        assert_eq!(book.thumbnail(), None);
        assert_eq!(book.published_year(), None);
        assert_eq!(book.isbn(), None);
    }

    #[test]
    fn record_without_id_is_rejected() {
        assert!(serde_json::from_str::<BookRecord>(r#"{"volumeInfo":{}}"#).is_err());
    }

    #[test]
    fn joins_multiple_authors() {
        let mut book = BookRecord::new("id", "Good Omens");
        book.volume_info.authors = vec!["Terry Pratchett".into(), "Neil Gaiman".into()];
        assert_eq!(book.display_authors(), "Terry Pratchett, Neil Gaiman");
    }

    #[test]
    fn unparsable_date_has_no_year() {
        let mut book = BookRecord::new("id", "t");
        book.volume_info.published_date = Some("circa 1900".to_string());
        assert_eq!(book.published_year(), None);
    }

    #[test]
    fn serialization_keeps_wire_field_names() {
        let mut book = BookRecord::new("id", "t");
        book.volume_info.page_count = Some(10);
        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains("\"volumeInfo\""));
        assert!(json.contains("\"pageCount\":10"));
        let back: BookRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
    }
}
