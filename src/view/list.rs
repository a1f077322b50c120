//! Generic list view: raw items, query and page state of one page instance
//!
//! The filtered view and the visible slice are never stored. They are
//! derived from `(items, query, page)` every time they are read, so what is
//! displayed can never drift from the fetched data.

use crate::core::query::{ListQuery, PageState, PaginationMeta, apply_filters, paginate};
use crate::core::record::ListItem;
use crate::core::result::FetchResult;
use crate::view::render::{PagerControls, RenderedTable, TableSpec, entries_footer, render_rows};
use crate::view::state::{RequestToken, RequestTokens, ViewStatus};

/// State of one list page
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    query: ListQuery,
    page: PageState,
    status: ViewStatus,
    tokens: RequestTokens,
}

impl<T: ListItem> Default for ListView<T> {
    fn default() -> Self {
        Self::new(PageState::default().page_size())
    }
}

impl<T: ListItem> ListView<T> {
    /// Empty, idle view with a fixed page size
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            query: ListQuery::default(),
            page: PageState::new(page_size),
            status: ViewStatus::Idle,
            tokens: RequestTokens::new(),
        }
    }

    // === Fetch lifecycle ===

    /// Enter `Loading` and issue the token the completion must carry
    ///
    /// Any fetch still in flight becomes stale.
    pub fn begin_fetch(&mut self) -> RequestToken {
        let token = self.tokens.issue();
        self.status = ViewStatus::Loading;
        tracing::debug!(token = %token, "fetch issued");
        token
    }

    /// Issue a token unless a fetch is already loading
    ///
    /// The check and the transition to `Loading` happen under one borrow, so
    /// two triggers can never both start a fetch.
    pub fn try_begin_fetch(&mut self) -> Option<RequestToken> {
        self.can_trigger().then(|| self.begin_fetch())
    }

    /// Apply a completed fetch
    ///
    /// Returns `false` and changes nothing when `token` is not the latest
    /// issued one. Otherwise the result replaces the collection as a whole:
    /// a failure leaves the view empty with the failure message.
    pub fn apply(&mut self, token: RequestToken, result: FetchResult<T>) -> bool {
        if !self.tokens.is_current(token) {
            tracing::debug!(token = %token, latest = ?self.tokens.latest(), "discarding stale fetch result");
            return false;
        }

        match result {
            FetchResult::Success(items) => {
                tracing::debug!(token = %token, count = items.len(), "fetch applied");
                self.items = items;
                self.status = ViewStatus::Success;
            }
            FetchResult::Failure(message) => {
                tracing::warn!(token = %token, error = %message, "fetch failed");
                self.items = Vec::new();
                self.status = ViewStatus::Failure(message);
            }
        }
        self.page.reset_if_beyond(self.filtered_count());
        true
    }

    /// Whether the control that triggers a fetch is enabled
    pub fn can_trigger(&self) -> bool {
        !self.status.is_loading()
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    /// Token of the most recent fetch, if any
    pub fn latest_token(&self) -> Option<RequestToken> {
        self.tokens.latest()
    }

    // === Collection updates ===

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replace the whole collection (local data, no fetch involved)
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.page.reset_if_beyond(self.filtered_count());
    }

    /// Append one record
    pub fn push(&mut self, item: T) {
        let mut items = self.items.clone();
        items.push(item);
        self.items = items;
    }

    /// Replace the record with the same identifier; `false` if absent
    pub fn replace(&mut self, item: T) -> bool {
        let Some(index) = self.position(item.id()) else {
            return false;
        };
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(i, existing)| {
                if i == index {
                    item.clone()
                } else {
                    existing.clone()
                }
            })
            .collect();
        self.items = items;
        self.page.reset_if_beyond(self.filtered_count());
        true
    }

    /// Remove the record with this identifier
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.position(id)?;
        let removed = self.items[index].clone();
        self.items = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();
        self.page.reset_if_beyond(self.filtered_count());
        Some(removed)
    }

    /// Find a record by identifier
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    // === Query ===

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Replace the query; go back to page 1 if the current page no longer
    /// has any rows
    pub fn set_query(&mut self, query: ListQuery) {
        self.query = query;
        self.page.reset_if_beyond(self.filtered_count());
    }

    // === Derived views ===

    /// Items passing the current query, in fetch order
    pub fn filtered(&self) -> Vec<&T> {
        apply_filters(&self.items, &self.query)
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    /// Current page state, clamped to the filtered collection
    pub fn page_state(&self) -> PageState {
        self.page.clamped(self.filtered_count())
    }

    /// The rows on the current page
    pub fn visible(&self) -> Vec<&T> {
        let filtered = self.filtered();
        let (visible, _) = paginate(&filtered, self.page);
        visible.to_vec()
    }

    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta::new(self.page, self.filtered_count())
    }

    // === Navigation ===

    /// Advance one page; no-op on the last page
    pub fn next_page(&mut self) -> bool {
        let total = self.filtered_count();
        self.page = self.page.clamped(total);
        self.page.next_page(total)
    }

    /// Go back one page; no-op on page 1
    pub fn previous_page(&mut self) -> bool {
        self.page = self.page.clamped(self.filtered_count());
        self.page.previous_page()
    }

    /// Jump to a page, clamped to the valid range
    pub fn go_to_page(&mut self, page: usize) {
        let total = self.filtered_count();
        self.page.go_to(page, total);
    }

    // === Rendering ===

    /// Render the current page through a table spec
    pub fn render(&self, spec: &TableSpec<T>) -> RenderedTable {
        let filtered = self.filtered();
        let (visible, state) = paginate(&filtered, self.page);
        let offset = (state.page() - 1) * state.page_size();
        let meta = PaginationMeta::new(state, filtered.len());

        RenderedTable {
            headers: spec.headers.clone(),
            rows: render_rows(visible, offset, spec, |item| item.id()),
            pager: PagerControls::from(&meta),
            footer: entries_footer(filtered.len()),
        }
    }
}
