//! Query criteria, filtering and pagination utilities

use crate::core::record::ListItem;
use indexmap::IndexMap;
use serde::Serialize;

/// Page size used by every list page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter and search criteria entered by the user
///
/// A query is an immutable snapshot: pages rebuild it wholesale whenever an
/// input changes and hand the new value to the list view.
///
/// # Format
/// - Field equality: `{"class": "5", "section": "A"}`
/// - Free text: `search = "math"` (case-insensitive substring)
///
/// An empty field value means "no constraint", not "match the empty string".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Expected value per field name, in the order the inputs appear
    pub fields: IndexMap<String, String>,

    /// Free-text search term
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: constrain `field` to `value`
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Builder: set the free-text term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Get the constraint for a field, ignoring blank values
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Field constraints that actually restrict the result
    pub fn active_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Normalized search term, `None` when blank
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    /// True when no criterion restricts the result
    pub fn is_unconstrained(&self) -> bool {
        self.active_fields().next().is_none() && self.search_term().is_none()
    }

    /// Active field constraints as URL query pairs
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.active_fields()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect()
    }

    /// Check whether an item satisfies every criterion
    pub fn matches<T: ListItem>(&self, item: &T) -> bool {
        let fields_match = self
            .active_fields()
            .all(|(field, expected)| item.field_value(field).as_deref() == Some(expected));

        fields_match
            && self
                .search_term()
                .is_none_or(|term| item.matches_text(&term))
    }
}

/// Keep the items matching `query`, preserving input order
///
/// Pure and idempotent: filtering an already-filtered sequence with the same
/// query returns the same sequence.
pub fn apply_filters<'a, T, I>(items: I, query: &ListQuery) -> Vec<&'a T>
where
    T: ListItem,
    I: IntoIterator<Item = &'a T>,
{
    if query.is_unconstrained() {
        return items.into_iter().collect();
    }
    items.into_iter().filter(|item| query.matches(*item)).collect()
}

/// Current page of a list view
///
/// The page is 1-indexed and the page size is fixed once the state is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    page: usize,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// Start on page 1; a zero size is treated as 1
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` items, never less than 1
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Copy of this state moved onto the nearest valid page
    pub fn clamped(self, total: usize) -> Self {
        Self {
            page: self.page.clamp(1, self.total_pages(total)),
            ..self
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page < self.total_pages(total)
    }

    /// Advance one page; no-op on the last page
    pub fn next_page(&mut self, total: usize) -> bool {
        if !self.has_next(total) {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page; no-op on page 1
    pub fn previous_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Jump to a page, clamped to `[1, total_pages]`
    pub fn go_to(&mut self, page: usize, total: usize) {
        self.page = page;
        *self = self.clamped(total);
    }

    /// Return to page 1 when the current page starts past the end
    pub fn reset_if_beyond(&mut self, total: usize) -> bool {
        let lower_bound = (self.page - 1) * self.page_size;
        if self.page > 1 && lower_bound >= total {
            self.page = 1;
            return true;
        }
        false
    }
}

/// Slice out the visible page
///
/// Returns `items[(page-1)*size .. page*size]`, after clamping the page to
/// the last valid one, together with the clamped state.
pub fn paginate<U>(items: &[U], state: PageState) -> (&[U], PageState) {
    let state = state.clamped(items.len());
    let start = (state.page - 1) * state.page_size;
    let end = (start + state.page_size).min(items.len());
    (&items[start.min(end)..end], state)
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata for `total` filtered items
    pub fn new(state: PageState, total: usize) -> Self {
        let state = state.clamped(total);
        Self {
            page: state.page(),
            limit: state.page_size(),
            total,
            total_pages: state.total_pages(total),
            has_next: state.has_next(total),
            has_prev: state.has_prev(),
        }
    }
}
