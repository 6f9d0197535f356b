//! Request parameter parsing.
//!
//! Query values are taken as strings and parsed leniently: a malformed page
//! number falls back to its default instead of rejecting the request.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use gallery_db::queries::{CollectionSearch, TemplateSearch};
use gallery_db::query_builder::Page;

use crate::error::AppError;

/// Upper bound on category filters read from one request.
pub const MAX_CATEGORY_FILTERS: usize = 50;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl SearchQuery {
    pub fn filters(&self) -> TemplateSearch {
        TemplateSearch {
            search: non_empty(self.search.as_deref()),
            categories: self
                .category
                .as_deref()
                .map(category_names)
                .unwrap_or_default(),
        }
    }

    pub fn page(&self) -> Page {
        Page::new(parse_int(self.page.as_deref()), parse_int(self.limit.as_deref()))
    }
}

/// Collection list filters from raw query pairs: `search` plus indexed
/// `category[N]=<id>` entries (and bare `category[]` repeats).
pub fn collection_search(pairs: &[(String, String)]) -> CollectionSearch {
    let mut search = None;
    let mut indexed: Vec<(usize, i64)> = Vec::new();

    for (key, value) in pairs {
        if key == "search" {
            search = non_empty(Some(value));
            continue;
        }
        let Some(index) = key
            .strip_prefix("category[")
            .and_then(|rest| rest.strip_suffix(']'))
        else {
            continue;
        };
        let slot = if index.is_empty() {
            Some(indexed.len())
        } else {
            index.parse::<usize>().ok()
        };
        // An id that does not parse filters on 0, which matches nothing.
        let id = value.trim().parse::<i64>().unwrap_or(0);
        if let Some(slot) = slot.filter(|slot| *slot < MAX_CATEGORY_FILTERS) {
            indexed.push((slot, id));
        }
    }

    indexed.sort_by_key(|(slot, _)| *slot);
    CollectionSearch {
        search,
        category_ids: indexed.into_iter().map(|(_, id)| id).collect(),
    }
}

/// Split a comma-separated category list and trim each name. Runs of commas
/// produce no token; a blank token trims to `""`, which names no category.
pub fn category_names(csv: &str) -> Vec<String> {
    csv.split(',')
        .filter(|token| !token.is_empty())
        .map(|token| token.trim_matches(' '))
        .take(MAX_CATEGORY_FILTERS)
        .map(str::to_string)
        .collect()
}

/// Path identifiers that do not parse as integers resolve to nothing.
pub fn path_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        AppError::bad_request("Invalid JSON")
    })
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn category_csv_is_trimmed() {
        assert_eq!(category_names(" AI , Sales,,"), vec!["AI", "Sales"]);
        assert!(category_names("").is_empty());
        assert!(category_names(",,").is_empty());
    }

    #[test]
    fn blank_category_token_is_kept_empty() {
        assert_eq!(category_names(" "), vec![""]);
        assert_eq!(category_names("AI,  "), vec!["AI", ""]);
    }

    #[test]
    fn page_params_recover_to_defaults() {
        let q = SearchQuery {
            page: Some("abc".into()),
            limit: Some("-4".into()),
            ..Default::default()
        };
        assert_eq!(q.page(), Page::new(None, None));

        let q = SearchQuery {
            page: Some("3".into()),
            limit: Some("250".into()),
            ..Default::default()
        };
        assert_eq!(q.page().offset(), 200);
    }

    #[test]
    fn indexed_categories_are_ordered_by_index() {
        let search = collection_search(&pairs(&[
            ("category[1]", "7"),
            ("search", "ops"),
            ("category[0]", "3"),
            ("category[x]", "9"),
            ("category[2]", "nope"),
            ("category[99]", "4"),
        ]));
        assert_eq!(search.category_ids, vec![3, 7, 0]);
        assert_eq!(search.search.as_deref(), Some("ops"));
    }

    #[test]
    fn empty_search_is_absent() {
        let search = collection_search(&pairs(&[("search", "")]));
        assert!(search.search.is_none());
        assert!(search.category_ids.is_empty());
    }
}
