//! Catalog response parsing.

use crate::domain::{BookRecord, LookupError};
use serde::Deserialize;

/// Longest error detail copied from a failed response into the user message.
const MAX_DETAIL_LEN: usize = 120;

/// Top-level shape of a volumes search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    /// Raw result records; absent when the search matched nothing.
    ///
    /// Kept untyped so one bad record does not fail the whole response.
    #[serde(default)]
    items: Option<Vec<serde_json::Value>>,
}

/// Error body returned alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Maps a raw catalog response to the lookup outcome.
///
/// A 2xx body without `items` is a successful empty result. Records that do
/// not parse (no `id`, for instance) are skipped and the rest are kept in
/// catalog order. Any other status is a failure; transport failures reach
/// this point as non-2xx statuses too.
///
/// # Errors
///
/// Returns [`LookupError::Status`] for non-success statuses and
/// [`LookupError::Malformed`] when a success body is not a volumes response.
///
/// # Examples
///
/// ```
/// use bookfinder::catalog::parse_response;
///
/// let books = parse_response(200, br#"{"kind":"books#volumes","totalItems":0}"#)?;
/// assert!(books.is_empty());
///
/// assert!(parse_response(503, b"").is_err());
/// # Ok::<(), bookfinder::domain::LookupError>(())
/// ```
pub fn parse_response(status: u16, body: &[u8]) -> Result<Vec<BookRecord>, LookupError> {
    if !(200..300).contains(&status) {
        return Err(LookupError::Status {
            status,
            detail: error_detail(body),
        });
    }

    let response: VolumesResponse = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, body_len = body.len(), "catalog body is not a volumes response");
        LookupError::Malformed(e.to_string())
    })?;

    let books = response
        .items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<BookRecord>(item) {
            Ok(book) => Some(book),
            Err(e) => {
                tracing::debug!(index, error = %e, "skipping unreadable catalog record");
                None
            }
        })
        .collect();

    Ok(books)
}

/// Extracts a short human-readable message from an error body.
fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let message = parsed.error.message.trim();
    if message.is_empty() || message.len() > MAX_DETAIL_LEN {
        return None;
    }
    Some(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_are_returned_in_catalog_order() {
        let body = br#"{
            "totalItems": 3,
            "items": [
                {"id": "c", "volumeInfo": {"title": "Third"}},
                {"id": "a", "volumeInfo": {"title": "First"}},
                {"id": "b", "volumeInfo": {"title": "Second"}}
            ]
        }"#;

        let books = parse_response(200, body).unwrap();
        let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn absent_items_is_empty_success() {
        assert_eq!(parse_response(200, br#"{"totalItems": 0}"#).unwrap(), vec![]);
    }

    #[test]
    fn empty_items_is_empty_success() {
        assert_eq!(parse_response(200, br#"{"items": []}"#).unwrap(), vec![]);
    }

    #[test]
    fn non_success_status_is_failure_with_detail() {
        let body = br#"{"error": {"code": 429, "message": "Quota exceeded"}}"#;
        let err = parse_response(429, body).unwrap_err();
        assert_eq!(
            err,
            LookupError::Status {
                status: 429,
                detail: Some("Quota exceeded".to_string())
            }
        );
        assert_eq!(err.to_string(), "catalog returned HTTP 429: Quota exceeded");
    }

    #[test]
    fn non_json_error_body_has_no_detail() {
        let err = parse_response(500, b"<html>oops</html>").unwrap_err();
        assert_eq!(err.to_string(), "catalog returned HTTP 500");
    }

    #[test]
    fn invalid_success_body_is_malformed() {
        assert!(matches!(
            parse_response(200, b"not json"),
            Err(LookupError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(200, br#"{"items": "nope"}"#),
            Err(LookupError::Malformed(_))
        ));
    }

    #[test]
    fn record_without_id_is_skipped() {
        let body = br#"{"items": [
            {"id": "a"},
            {"volumeInfo": {"title": "no id"}},
            {"id": "b", "volumeInfo": {"title": "Kept"}}
        ]}"#;

        let books = parse_response(200, body).unwrap();
        let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn malformed_message_hides_parser_detail() {
        let err = parse_response(200, b"<html>captive portal</html>").unwrap_err();
        assert_eq!(err.to_string(), "unexpected response from catalog");
    }
}
