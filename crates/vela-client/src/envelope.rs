//! # Response Shape Normalization
//!
//! Collection endpoints answer in one of two shapes depending on backend
//! revision: a pre-paginated envelope `{"items": [...], "total": n}` or a
//! bare JSON array of the whole (already search-filtered) collection.
//!
//! Both decode into [`ListEnvelope`] and are normalized to a
//! [`PageResult`] right here; neither shape leaks past this boundary.
//! Raw arrays carry no server-side total, so they are sliced client-side
//! against the query, the collection length standing in as the total.

use serde::Deserialize;

use vela_core::paginate::{slice_page, PageQuery, PageResult};

/// Either shape a collection endpoint answers with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    /// Server-paginated: `items` is one page, `total` spans all pages.
    Paginated { items: Vec<T>, total: u64 },
    /// The whole collection as a bare array.
    Raw(Vec<T>),
}

impl<T> ListEnvelope<T> {
    /// Normalizes to a page of results for the given query.
    pub fn into_page(self, query: &PageQuery) -> PageResult<T> {
        match self {
            ListEnvelope::Paginated { items, total } => PageResult {
                items,
                total_count: total,
            },
            ListEnvelope::Raw(all) => slice_page(all, query),
        }
    }

    /// Flattens to the contained items, ignoring pagination.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Paginated { items, .. } => items,
            ListEnvelope::Raw(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_envelope_shape() {
        let json = r#"{"items": [1, 2, 3], "total": 42}"#;
        let envelope: ListEnvelope<i32> = serde_json::from_str(json).unwrap();

        let page = envelope.into_page(&PageQuery::new(10));
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total_count, 42);
    }

    #[test]
    fn test_decodes_raw_array_and_slices() {
        let json = "[1, 2, 3, 4, 5, 6, 7]";
        let envelope: ListEnvelope<i32> = serde_json::from_str(json).unwrap();

        let mut query = PageQuery::new(3);
        query.page = 2;
        let page = envelope.into_page(&query);
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total_count, 7);
    }

    #[test]
    fn test_empty_array_is_raw() {
        let envelope: ListEnvelope<i32> = serde_json::from_str("[]").unwrap();
        let page = envelope.into_page(&PageQuery::new(10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
    }
}
