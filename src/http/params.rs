//! Query parameter extraction and validation.
//!
//! Handlers extract the raw key/value pairs and build these structs from
//! them, so a missing, repeated or malformed value is answered with the
//! façade's JSON error body, not an extractor rejection. A repeated key
//! keeps its first value.

use crate::http::error::ApiError;
use crate::upstream::SearchQuery;

/// Bitrate requested for playback URLs (320 kbps).
pub const PLAYBACK_BITRATE: u32 = 320_000;

#[derive(Debug, Default)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl SearchParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            keyword: first(pairs, "keyword"),
            limit: first(pairs, "limit"),
            offset: first(pairs, "offset"),
        }
    }

    pub fn into_query(self) -> Result<SearchQuery, ApiError> {
        let keyword = non_empty(self.keyword).ok_or_else(|| ApiError::required("keyword"))?;
        let limit = parse_u32("limit", self.limit)?.unwrap_or(SearchQuery::DEFAULT_LIMIT);
        let offset = parse_u32("offset", self.offset)?.unwrap_or(0);

        Ok(SearchQuery::songs(keyword)
            .with_limit(limit)
            .with_offset(offset))
    }
}

/// `id` for a single song; `ids` accepted as an alias on detail lookups.
#[derive(Debug, Default)]
pub struct IdParams {
    pub id: Option<String>,
    pub ids: Option<String>,
}

impl IdParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            id: first(pairs, "id"),
            ids: first(pairs, "ids"),
        }
    }

    pub fn require_id(self) -> Result<String, ApiError> {
        non_empty(self.id).ok_or_else(|| ApiError::required("id"))
    }

    pub fn require_ids(self) -> Result<String, ApiError> {
        non_empty(self.id)
            .or_else(|| non_empty(self.ids))
            .ok_or_else(|| ApiError::required("id"))
    }
}

fn first(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_u32(field: &str, value: Option<String>) -> Result<Option<u32>, ApiError> {
    match non_empty(value) {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| ApiError::invalid(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(keyword: Option<&str>, limit: Option<&str>) -> SearchParams {
        SearchParams {
            keyword: keyword.map(String::from),
            limit: limit.map(String::from),
            offset: None,
        }
    }

    #[test]
    fn test_keyword_required() {
        assert_eq!(
            search(None, None).into_query().unwrap_err(),
            ApiError::required("keyword")
        );
        assert_eq!(
            search(Some(""), None).into_query().unwrap_err(),
            ApiError::required("keyword")
        );
    }

    #[test]
    fn test_limit_defaults_to_ten() {
        let query = search(Some("test"), None).into_query().unwrap();
        assert_eq!(query.limit, 10);
        let query = search(Some("test"), Some("")).into_query().unwrap();
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_limit_must_be_numeric() {
        let err = search(Some("test"), Some("ten")).into_query().unwrap_err();
        assert_eq!(err.to_string(), "limit invalid");
    }

    #[test]
    fn test_ids_alias() {
        let params = IdParams {
            id: None,
            ids: Some("1,2".into()),
        };
        assert_eq!(params.require_ids().unwrap(), "1,2");

        let params = IdParams {
            id: Some("".into()),
            ids: None,
        };
        assert_eq!(params.require_ids().unwrap_err().to_string(), "id required");
    }

    #[test]
    fn test_url_ignores_ids_alias() {
        let params = IdParams {
            id: None,
            ids: Some("1".into()),
        };
        assert!(params.require_id().is_err());
    }

    fn pairs(query: &[(&str, &str)]) -> Vec<(String, String)> {
        query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        let params = IdParams::from_pairs(&pairs(&[("id", "1"), ("id", "2")]));
        assert_eq!(params.require_id().unwrap(), "1");

        let query = SearchParams::from_pairs(&pairs(&[
            ("keyword", "a"),
            ("limit", "3"),
            ("keyword", "b"),
            ("limit", "x"),
        ]))
        .into_query()
        .unwrap();
        assert_eq!(query.keyword, "a");
        assert_eq!(query.limit, 3);
    }

    #[test]
    fn test_empty_first_value_counts_as_missing() {
        let params = IdParams::from_pairs(&pairs(&[("id", ""), ("id", "2")]));
        assert_eq!(params.require_id().unwrap_err(), ApiError::required("id"));
    }
}
