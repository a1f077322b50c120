//! Row rendering contract
//!
//! The renderer turns the visible slice into display rows. The one branch
//! every page must get right: when nothing is visible, emit exactly one
//! placeholder row carrying the empty-state message instead of a blank
//! table.

use crate::core::query::PaginationMeta;
use serde::Serialize;

/// Maps a record to its cells; receives the record's 0-based position in
/// the filtered collection
pub type RowProjection<T> = Box<dyn Fn(usize, &T) -> Vec<String> + Send + Sync>;

/// Headers, row projection and empty message of one table
pub struct TableSpec<T> {
    pub headers: Vec<String>,
    pub empty_message: String,
    project: RowProjection<T>,
}

impl<T> TableSpec<T> {
    pub fn new<F>(headers: &[&str], empty_message: impl Into<String>, project: F) -> Self
    where
        F: Fn(usize, &T) -> Vec<String> + Send + Sync + 'static,
    {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            empty_message: empty_message.into(),
            project: Box::new(project),
        }
    }

    pub fn columns(&self) -> usize {
        self.headers.len().max(1)
    }

    pub fn project(&self, position: usize, item: &T) -> Vec<String> {
        (self.project)(position, item)
    }
}

impl<T> std::fmt::Debug for TableSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSpec")
            .field("headers", &self.headers)
            .field("empty_message", &self.empty_message)
            .finish_non_exhaustive()
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedRow {
    /// A record, keyed by its identifier (or position when it has none)
    Cells { key: String, cells: Vec<String> },
    /// Stand-in row shown when nothing is visible
    Placeholder { message: String, span: usize },
}

/// Previous/next controls under a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerControls {
    pub page: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Only shown when there is more than one page
    pub shown: bool,
}

impl From<&PaginationMeta> for PagerControls {
    fn from(meta: &PaginationMeta) -> Self {
        Self {
            page: meta.page,
            total_pages: meta.total_pages,
            prev_enabled: meta.has_prev,
            next_enabled: meta.has_next,
            shown: meta.total > meta.limit,
        }
    }
}

/// Everything a page needs to draw its table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RenderedRow>,
    pub pager: PagerControls,
    /// "Showing N entries"
    pub footer: String,
}

impl RenderedTable {
    pub fn is_empty_state(&self) -> bool {
        matches!(self.rows.as_slice(), [RenderedRow::Placeholder { .. }])
    }

    /// Cells of the record rows
    pub fn cell_rows(&self) -> Vec<&[String]> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                RenderedRow::Cells { cells, .. } => Some(cells.as_slice()),
                RenderedRow::Placeholder { .. } => None,
            })
            .collect()
    }
}

/// Render the visible records, or the empty-state placeholder
///
/// `offset` is the position of the first visible record in the filtered
/// collection; `key` yields each record's identifier.
pub fn render_rows<T>(
    visible: &[&T],
    offset: usize,
    spec: &TableSpec<T>,
    key: impl Fn(&T) -> &str,
) -> Vec<RenderedRow> {
    if visible.is_empty() {
        return vec![RenderedRow::Placeholder {
            message: spec.empty_message.clone(),
            span: spec.columns(),
        }];
    }

    visible
        .iter()
        .enumerate()
        .map(|(i, &item)| {
            let position = offset + i;
            let id = key(item);
            RenderedRow::Cells {
                key: if id.is_empty() {
                    position.to_string()
                } else {
                    id.to_string()
                },
                cells: spec.project(position, item),
            }
        })
        .collect()
}

/// Footer under issued-book style tables
pub fn entries_footer(count: usize) -> String {
    format!("Showing {} entries", count)
}
