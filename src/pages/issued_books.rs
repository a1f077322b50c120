//! Issued book list: search criteria, quick search and the results table

use crate::client::{EndpointSource, RequestParams, Transport};
use crate::config::endpoints;
use crate::core::error::ConfigError;
use crate::core::query::ListQuery;
use crate::core::record::{ListItem, display_date};
use crate::core::validation::{FormRules, validators};
use crate::pages::{PageContext, string_or_number};
use crate::view::{ListController, ListView, RenderedTable, TableSpec, ViewStatus};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const EMPTY: &str = "No Data Available In Table";
const FETCH_FAILED: &str = "Failed to fetch issued books. Please try again.";

/// One issued book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedBook {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub book_no: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub issue_date: String,
    #[serde(default)]
    pub return_date: String,
    #[serde(default)]
    pub status: String,
}

impl ListItem for IssuedBook {
    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        let value = match field {
            "title" => &self.title,
            "bookNo" => &self.book_no,
            "isbn" => &self.isbn,
            "memberName" => &self.member_name,
            "author" => &self.author,
            "subject" => &self.subject,
            "status" => &self.status,
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }

    fn search_fields() -> &'static [&'static str] {
        &["title", "bookNo", "isbn", "memberName", "author"]
    }
}

/// Search criteria sent to the backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookCriteria {
    pub book_title: String,
    pub book_id: String,
    pub subject: String,
}

impl BookCriteria {
    /// Non-blank criteria as query parameters
    pub fn to_query(&self) -> ListQuery {
        ListQuery::new()
            .with_field("bookTitle", self.book_title.trim())
            .with_field("bookId", self.book_id.trim())
            .with_field("subject", self.subject.trim())
    }
}

/// The issued book list page
pub struct IssuedBookPage<X> {
    controller: ListController<IssuedBook, EndpointSource<IssuedBook, X>>,
    table: TableSpec<IssuedBook>,
    subjects: Vec<String>,
    rules: FormRules,
    criteria: BookCriteria,
    criteria_error: Option<String>,
}

impl<X: Transport> IssuedBookPage<X> {
    pub fn new(ctx: PageContext<X>) -> Result<Self, ConfigError> {
        let source = ctx.source(endpoints::ISSUED_BOOKS, FETCH_FAILED)?;
        let subjects = ctx.config.subjects.clone();
        Ok(Self {
            controller: ListController::new(ListView::new(ctx.page_size()), source),
            table: TableSpec::new(
                &[
                    "Book Title",
                    "Book No",
                    "ISBN No",
                    "Member Name",
                    "Author",
                    "Issue Date",
                    "Return Date",
                    "Status",
                ],
                EMPTY,
                |_, book: &IssuedBook| {
                    vec![
                        book.title.clone(),
                        book.book_no.clone(),
                        book.isbn.clone(),
                        book.member_name.clone(),
                        book.author.clone(),
                        display_date(&book.issue_date),
                        display_date(&book.return_date),
                        book.status.clone(),
                    ]
                },
            ),
            rules: FormRules::new().add_validator("Subject", validators::in_list(subjects.clone())),
            subjects,
            criteria: BookCriteria::default(),
            criteria_error: None,
        })
    }

    /// Options of the subject dropdown
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn criteria(&self) -> &BookCriteria {
        &self.criteria
    }

    pub fn set_book_title(&mut self, value: impl Into<String>) {
        self.criteria.book_title = value.into();
    }

    pub fn set_book_id(&mut self, value: impl Into<String>) {
        self.criteria.book_id = value.into();
    }

    pub fn set_subject(&mut self, value: impl Into<String>) {
        self.criteria.subject = value.into();
    }

    /// Search button
    ///
    /// Returns whether results were applied. Invalid criteria are reported
    /// through [`criteria_error`](Self::criteria_error) without a request.
    pub async fn search(&mut self) -> bool {
        if let Err(errors) = self
            .rules
            .validate([("Subject", self.criteria.subject.as_str())])
        {
            self.criteria_error = Some(errors.join(" "));
            return false;
        }
        self.criteria_error = None;

        let params = RequestParams::new().queries(self.criteria.to_query().to_query_pairs());
        tracing::debug!(criteria = ?self.criteria, "searching issued books");
        self.controller.trigger(&params).await
    }

    /// Quick search box above the table
    pub fn set_quick_search(&self, term: &str) {
        self.controller
            .view_mut()
            .set_query(ListQuery::new().with_search(term));
    }

    pub fn can_search(&self) -> bool {
        self.controller.view().can_trigger()
    }

    pub fn status(&self) -> ViewStatus {
        self.controller.view().status().clone()
    }

    pub fn error(&self) -> Option<String> {
        self.controller.view().error().map(str::to_string)
    }

    pub fn criteria_error(&self) -> Option<&str> {
        self.criteria_error.as_deref()
    }

    pub fn table(&self) -> RenderedTable {
        self.controller.view().render(&self.table)
    }

    pub fn next_page(&self) -> bool {
        self.controller.view_mut().next_page()
    }

    pub fn previous_page(&self) -> bool {
        self.controller.view_mut().previous_page()
    }
}
