//! # Paginated List Controller
//!
//! One state machine for every list screen: clients, brands, categories,
//! products, users, sales history. Each screen instantiates a
//! `ListController<T>` with its item type and a [`PageFetcher`]
//! implementation; the controller owns the query state, the current page
//! of data, and the loading flag.
//!
//! ## Request Ordering (Last Write Wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │             Fast typing in the search box                               │
//! │                                                                         │
//! │  set_search_term("ca")  ──► ticket #1 ──► fetch (slow) ────────┐        │
//! │  set_search_term("cam") ──► ticket #2 ──► fetch (fast) ──┐     │        │
//! │                                                          ▼     ▼        │
//! │                                      apply(#2, items) APPLIED  │        │
//! │                                      apply(#1, items) ◄────────┘        │
//! │                                              └─► STALE, discarded      │
//! │                                                                         │
//! │  Every mutating operation issues exactly one fetch under a              │
//! │  monotonically increasing token; only the newest token may write.       │
//! │  Nothing is aborted; stale responses are simply dropped.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Surface
//! UIs driving their own event loop use the explicit
//! [`ListController::refresh`]-style ticket methods plus
//! [`ListController::apply`]. Sequential callers (and tests) can use
//! [`ListController::reload`], which does issue → fetch → apply in one
//! await.

use tracing::debug;

use vela_core::paginate::{PageQuery, PageResult};

use crate::gateway::{GatewayError, PageFetcher};

// =============================================================================
// Fetch Ticket
// =============================================================================

/// A single issued fetch: the query to send and the token that decides
/// whether the response is still the newest when it comes back.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    token: u64,
    /// Snapshot of the query at issuance time; send exactly this.
    pub query: PageQuery,
}

/// What [`ListController::apply`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response was the newest and now backs the controller state.
    Applied,
    /// A newer request was issued meanwhile; the response was discarded.
    Stale,
}

// =============================================================================
// List Controller
// =============================================================================

/// Search/filter/page state machine for one list screen.
#[derive(Debug)]
pub struct ListController<T> {
    query: PageQuery,
    result: PageResult<T>,
    is_loading: bool,
    last_error: Option<GatewayError>,
    newest_issued: u64,
}

impl<T> ListController<T> {
    /// A fresh controller on page 1 with no data loaded yet.
    pub fn new(page_size: u32) -> Self {
        ListController {
            query: PageQuery::new(page_size),
            result: PageResult::empty(),
            is_loading: false,
            last_error: None,
            newest_issued: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The current query state.
    #[inline]
    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    /// Items on the current page.
    #[inline]
    pub fn items(&self) -> &[T] {
        &self.result.items
    }

    /// Total items across all pages, per the last applied response.
    #[inline]
    pub fn total_count(&self) -> u64 {
        self.result.total_count
    }

    /// `max(1, ceil(total_count / page_size))`.
    pub fn total_pages(&self) -> u32 {
        self.result.total_pages(self.query.page_size)
    }

    /// Current page, 1-based.
    #[inline]
    pub fn current_page(&self) -> u32 {
        self.query.page
    }

    /// True from fetch issuance until the newest response is applied.
    /// Screens disable their controls and show a spinner on this.
    #[inline]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The error from the last applied response, if it failed. Cleared by
    /// the next successful apply.
    #[inline]
    pub fn last_error(&self) -> Option<&GatewayError> {
        self.last_error.as_ref()
    }

    // -------------------------------------------------------------------------
    // Mutating operations (each issues exactly one fetch)
    // -------------------------------------------------------------------------

    /// Sets the search term, resets to page 1, and issues a fetch.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> FetchTicket {
        self.query.set_search_term(term);
        self.issue()
    }

    /// Sets (or clears) a named filter, resets to page 1, and issues a
    /// fetch.
    pub fn set_filter(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> FetchTicket {
        self.query.set_filter(key, value);
        self.issue()
    }

    /// Navigates to a page, clamping silently into `[1, total_pages]`.
    /// Returns `None` (no fetch) when the clamped target is the page we
    /// are already on.
    pub fn go_to_page(&mut self, page: u32) -> Option<FetchTicket> {
        let target = page.clamp(1, self.total_pages());
        if target == self.query.page {
            return None;
        }
        self.query.page = target;
        Some(self.issue())
    }

    /// Advances one page; a no-op at the last page.
    pub fn next_page(&mut self) -> Option<FetchTicket> {
        self.go_to_page(self.query.page.saturating_add(1))
    }

    /// Goes back one page; a no-op at page 1.
    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        self.go_to_page(self.query.page.saturating_sub(1))
    }

    /// Re-issues the current query unchanged. Used for the initial load
    /// and after create/update/delete round-trips.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        self.newest_issued += 1;
        self.is_loading = true;
        debug!(
            token = self.newest_issued,
            page = self.query.page,
            search = %self.query.search_term,
            "list fetch issued"
        );
        FetchTicket {
            token: self.newest_issued,
            query: self.query.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Response handling
    // -------------------------------------------------------------------------

    /// Applies a response for a previously issued ticket.
    ///
    /// Responses for anything but the newest issued token are discarded
    /// untouched: a stale success must not overwrite newer state, and a
    /// stale error must not clobber a newer success.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<PageResult<T>, GatewayError>,
    ) -> Applied {
        if ticket.token != self.newest_issued {
            debug!(token = ticket.token, newest = self.newest_issued, "stale response discarded");
            return Applied::Stale;
        }

        self.is_loading = false;
        match outcome {
            Ok(page) => {
                self.result = page;
                self.last_error = None;

                // A shrunken collection can leave the cursor past the end
                // (e.g. deleting the only row of the last page). Clamp so
                // the controls stay valid; the next navigation refetches.
                let pages = self.total_pages();
                if self.query.page > pages {
                    self.query.page = pages;
                }
            }
            Err(err) => {
                self.last_error = Some(err);
            }
        }
        Applied::Applied
    }

    /// Issue → fetch → apply in one await, for sequential callers.
    ///
    /// On failure the error is both stored (for `last_error`) and
    /// returned (for an immediate toast).
    pub async fn reload<F>(&mut self, fetcher: &F) -> Result<(), GatewayError>
    where
        F: PageFetcher<T>,
    {
        let ticket = self.refresh();
        let outcome = fetcher.fetch_page(&ticket.query).await;
        let failed = outcome.as_ref().err().cloned();
        self.apply(ticket, outcome);
        match failed {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::gateway::GatewayResult;
    use vela_core::paginate::slice_page;

    fn page(items: Vec<&str>, total: u64) -> PageResult<String> {
        PageResult {
            items: items.into_iter().map(String::from).collect(),
            total_count: total,
        }
    }

    /// Loads a controller with an applied first page.
    fn loaded(total: u64) -> ListController<String> {
        let mut ctrl = ListController::new(10);
        let ticket = ctrl.refresh();
        ctrl.apply(ticket, Ok(page(vec!["row"], total)));
        ctrl
    }

    #[test]
    fn test_initial_state() {
        let ctrl: ListController<String> = ListController::new(10);
        assert_eq!(ctrl.current_page(), 1);
        assert_eq!(ctrl.total_pages(), 1); // empty still has one page
        assert!(!ctrl.is_loading());
        assert!(ctrl.items().is_empty());
    }

    #[test]
    fn test_search_resets_page_and_issues_fetch() {
        let mut ctrl = loaded(95);
        ctrl.go_to_page(5).unwrap();

        let ticket = ctrl.set_search_term("cam");
        assert_eq!(ticket.query.page, 1);
        assert_eq!(ticket.query.search_term, "cam");
        assert!(ctrl.is_loading());
    }

    #[test]
    fn test_filter_resets_page() {
        let mut ctrl = loaded(95);
        ctrl.go_to_page(3).unwrap();

        let ticket = ctrl.set_filter("category", "cat-1");
        assert_eq!(ticket.query.page, 1);
        assert_eq!(
            ticket.query.filters.get("category").map(String::as_str),
            Some("cat-1")
        );
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut ctrl = loaded(95); // 10 pages

        assert!(ctrl.go_to_page(7).is_some());
        assert_eq!(ctrl.current_page(), 7);

        // Out of range clamps silently
        ctrl.go_to_page(999);
        assert_eq!(ctrl.current_page(), 10);
        ctrl.go_to_page(0);
        assert_eq!(ctrl.current_page(), 1);
    }

    #[test]
    fn test_boundary_noops() {
        let mut ctrl = loaded(25); // 3 pages

        assert!(ctrl.previous_page().is_none()); // already at 1
        assert_eq!(ctrl.current_page(), 1);

        ctrl.go_to_page(3).unwrap();
        assert!(ctrl.next_page().is_none()); // already at last
        assert_eq!(ctrl.current_page(), 3);
    }

    #[test]
    fn test_stale_response_discarded() {
        // R1 (slow) then R2 (fast): R1's late response must not win.
        let mut ctrl: ListController<String> = ListController::new(10);

        let r1 = ctrl.set_search_term("ca");
        let r2 = ctrl.set_search_term("cam");

        assert_eq!(ctrl.apply(r2, Ok(page(vec!["camiseta"], 1))), Applied::Applied);
        assert!(!ctrl.is_loading());

        assert_eq!(ctrl.apply(r1, Ok(page(vec!["cama", "camion"], 2))), Applied::Stale);
        assert_eq!(ctrl.items(), ["camiseta"]);
        assert_eq!(ctrl.total_count(), 1);
    }

    #[test]
    fn test_stale_error_does_not_clobber_newer_success() {
        let mut ctrl: ListController<String> = ListController::new(10);

        let r1 = ctrl.set_search_term("ca");
        let r2 = ctrl.set_search_term("cam");

        ctrl.apply(r2, Ok(page(vec!["camiseta"], 1)));
        ctrl.apply(
            r1,
            Err(GatewayError::Network("timed out".to_string())),
        );

        assert!(ctrl.last_error().is_none());
        assert_eq!(ctrl.items(), ["camiseta"]);
    }

    #[test]
    fn test_loading_stays_until_newest_resolves() {
        let mut ctrl: ListController<String> = ListController::new(10);

        let r1 = ctrl.set_search_term("a");
        let r2 = ctrl.set_search_term("ab");

        // Older response arrives first: still loading (newest outstanding)
        assert_eq!(ctrl.apply(r1, Ok(page(vec!["x"], 1))), Applied::Stale);
        assert!(ctrl.is_loading());

        ctrl.apply(r2, Ok(page(vec!["y"], 1)));
        assert!(!ctrl.is_loading());
    }

    #[test]
    fn test_error_applied_and_cleared_by_next_success() {
        let mut ctrl: ListController<String> = ListController::new(10);

        let ticket = ctrl.refresh();
        ctrl.apply(
            ticket,
            Err(GatewayError::Remote {
                status: 500,
                detail: None,
            }),
        );
        assert!(ctrl.last_error().is_some());
        assert!(!ctrl.is_loading());

        let ticket = ctrl.refresh();
        ctrl.apply(ticket, Ok(page(vec!["row"], 1)));
        assert!(ctrl.last_error().is_none());
    }

    #[test]
    fn test_page_clamped_when_collection_shrinks() {
        let mut ctrl = loaded(21); // 3 pages
        ctrl.go_to_page(3).unwrap();

        // The last row of page 3 was deleted; the refreshed total is 20.
        let ticket = ctrl.refresh();
        ctrl.apply(ticket, Ok(page(vec![], 20)));
        assert_eq!(ctrl.current_page(), 2);
        assert_eq!(ctrl.total_pages(), 2);
    }

    // -------------------------------------------------------------------------
    // reload() against an async fake
    // -------------------------------------------------------------------------

    /// Fake backend slicing a fixed collection, raw-array style.
    struct SlicingFetcher {
        rows: Vec<String>,
    }

    #[async_trait]
    impl PageFetcher<String> for SlicingFetcher {
        async fn fetch_page(&self, query: &PageQuery) -> GatewayResult<PageResult<String>> {
            let matching: Vec<String> = self
                .rows
                .iter()
                .filter(|r| r.contains(&query.search_term))
                .cloned()
                .collect();
            Ok(slice_page(matching, query))
        }
    }

    #[tokio::test]
    async fn test_reload_round_trip() {
        let fetcher = SlicingFetcher {
            rows: (1..=25).map(|i| format!("row-{:02}", i)).collect(),
        };
        let mut ctrl = ListController::new(10);

        ctrl.reload(&fetcher).await.unwrap();
        assert_eq!(ctrl.items().len(), 10);
        assert_eq!(ctrl.total_count(), 25);
        assert_eq!(ctrl.total_pages(), 3);

        let ticket = ctrl.go_to_page(3).unwrap();
        let outcome = fetcher.fetch_page(&ticket.query).await;
        ctrl.apply(ticket, outcome);
        assert_eq!(ctrl.items().len(), 5);

        // Searching narrows and resets
        let ticket = ctrl.set_search_term("row-1");
        let outcome = fetcher.fetch_page(&ticket.query).await;
        ctrl.apply(ticket, outcome);
        assert_eq!(ctrl.current_page(), 1);
        assert_eq!(ctrl.total_count(), 10); // row-10..row-19
    }
}
