//! # Pagination Math
//!
//! Queries and results for the list screens (clients, brands, categories,
//! products, users, sales history). The async state machine that drives
//! refetching lives in `vela-engine`; this module is the pure part: page
//! arithmetic, query normalization, and client-side slicing for endpoints
//! that return raw arrays.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// Page Query
// =============================================================================

/// The state a list screen sends with every fetch.
///
/// ## Invariants
/// - `page >= 1` (1-based, matching the page controls)
/// - Changing the search term or any filter resets `page` to 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Free-text search, empty string means "no search".
    pub search_term: String,

    /// Named filters (e.g. `category` / `brand` on the product list).
    /// BTreeMap so query strings are built in a stable order.
    pub filters: BTreeMap<String, String>,

    /// Current page, 1-based.
    pub page: u32,

    /// Items per page.
    pub page_size: u32,
}

impl PageQuery {
    /// Creates a fresh query on page 1.
    pub fn new(page_size: u32) -> Self {
        PageQuery {
            search_term: String::new(),
            filters: BTreeMap::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Sets the search term and resets to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Sets (or clears, with an empty value) a named filter and resets to
    /// page 1.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.filters.remove(&key.into());
        } else {
            self.filters.insert(key.into(), value);
        }
        self.page = 1;
    }

    /// Number of items to skip for the current page (`skip` query param).
    #[inline]
    pub fn skip(&self) -> u32 {
        (self.page - 1) * self.page_size
    }

    /// The `limit` query param.
    #[inline]
    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        PageQuery::new(crate::DEFAULT_PAGE_SIZE)
    }
}

// =============================================================================
// Page Result
// =============================================================================

/// One page of a collection, normalized from whichever shape the backend
/// answered with (pre-paginated envelope or raw array).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// The items on this page.
    pub items: Vec<T>,

    /// Total items across ALL pages.
    pub total_count: u64,
}

impl<T> PageResult<T> {
    /// An empty result (the state before the first fetch resolves).
    pub fn empty() -> Self {
        PageResult {
            items: Vec::new(),
            total_count: 0,
        }
    }

    /// Total pages for a given page size: `max(1, ceil(total / size))`.
    ///
    /// The minimum of 1 keeps the page controls valid when the collection
    /// is empty (there is still "page 1 of 1", just with no rows).
    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.total_count, page_size)
    }
}

/// `max(1, ceil(total_count / page_size))`.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    let size = page_size.max(1) as u64;
    let pages = total_count.div_ceil(size);
    pages.clamp(1, u32::MAX as u64) as u32
}

/// Slices a full collection down to the requested page.
///
/// Some backend revisions return the whole collection as a raw array; the
/// boundary adapter normalizes those through here so only `PageResult`
/// shapes ever reach a controller.
pub fn slice_page<T>(all_items: Vec<T>, query: &PageQuery) -> PageResult<T> {
    let total_count = all_items.len() as u64;
    let start = query.skip() as usize;
    let items: Vec<T> = all_items
        .into_iter()
        .skip(start)
        .take(query.limit() as usize)
        .collect();

    PageResult { items, total_count }
}

// =============================================================================
// Unit Tests
// =============================================================================
