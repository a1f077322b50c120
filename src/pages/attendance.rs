//! Attendance pages: a student's own list and a parent's view of a child

use crate::client::{EndpointSource, RequestParams, Transport};
use crate::config::endpoints;
use crate::core::error::ConfigError;
use crate::core::query::ListQuery;
use crate::core::record::{ListItem, display_date, month_and_year, month_names};
use crate::pages::{PageContext, string_or_number};
use crate::view::{ListController, ListView, RenderedTable, TableSpec, ViewStatus};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const STUDENT_EMPTY: &str = "No attendance records available for the selected month and year.";
const STUDENT_FAILED: &str = "An error occurred while fetching attendance";
const STUDENT_REJECTED: &str = "Error fetching attendance";
const CHILD_EMPTY: &str = "No attendance data available.";
const CHILD_FAILED: &str = "Failed to fetch attendance. Please try again.";
const DETAILS_FAILED: &str = "Failed to fetch student details. Please try again.";

/// Text shown while a list is loading
pub const LOADING: &str = "Loading...";

/// One attendance record
///
/// The student endpoint sends `attendanceStatus`, the parent endpoint sends
/// `status`; both land in [`attendance_status`](Self::attendance_status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub date: String,
    #[serde(alias = "status")]
    pub attendance_status: String,
    #[serde(default)]
    pub subject: String,
}

impl ListItem for AttendanceEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "date" => Some(Cow::Borrowed(&self.date)),
            "status" | "attendanceStatus" => Some(Cow::Borrowed(&self.attendance_status)),
            "subject" => Some(Cow::Borrowed(&self.subject)),
            "month" => month_and_year(&self.date).map(|(month, _)| Cow::Borrowed(month)),
            "year" => month_and_year(&self.date).map(|(_, year)| Cow::Owned(year)),
            _ => None,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["subject", "status"]
    }
}

/// Header card of the parent page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    #[serde(default)]
    pub first_name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub class: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub section: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub roll: String,
}

/// Month and year dropdowns shared by both pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthYearFilter {
    pub month: String,
    pub year: String,
}

impl MonthYearFilter {
    pub fn to_query(&self) -> ListQuery {
        ListQuery::new()
            .with_field("month", self.month.as_str())
            .with_field("year", self.year.as_str())
    }

    /// Month dropdown options
    pub fn months() -> &'static [&'static str] {
        month_names()
    }

    /// Year dropdown options: `count` years counting down from `current`
    pub fn years(current: i32, count: usize) -> Vec<String> {
        (0..count as i32).map(|i| (current - i).to_string()).collect()
    }

    /// Year options ending at this calendar year
    pub fn recent_years() -> Vec<String> {
        Self::years(chrono::Local::now().year(), 4)
    }
}

fn student_table() -> TableSpec<AttendanceEntry> {
    TableSpec::new(
        &["Date", "Attendance Status", "Subject"],
        STUDENT_EMPTY,
        |_, entry: &AttendanceEntry| {
            vec![
                display_date(&entry.date),
                entry.attendance_status.clone(),
                entry.subject.clone(),
            ]
        },
    )
}

fn child_table() -> TableSpec<AttendanceEntry> {
    TableSpec::new(&["Attendance Details"], CHILD_EMPTY, |_, entry: &AttendanceEntry| {
        vec![format!("{}: {}", entry.date, entry.attendance_status)]
    })
}

type AttendanceController<X> = ListController<AttendanceEntry, EndpointSource<AttendanceEntry, X>>;

/// A student's own attendance, loaded when the page opens
pub struct StudentAttendancePage<X> {
    controller: AttendanceController<X>,
    table: TableSpec<AttendanceEntry>,
    params: RequestParams,
    filter: MonthYearFilter,
}

impl<X: Transport> StudentAttendancePage<X> {
    pub fn new(ctx: PageContext<X>) -> Result<Self, ConfigError> {
        let source = ctx
            .source(endpoints::STUDENT_ATTENDANCE, STUDENT_FAILED)?
            .with_server_fallback(STUDENT_REJECTED);
        Ok(Self {
            controller: ListController::new(ListView::new(ctx.page_size()), source),
            table: student_table(),
            params: RequestParams::new().path("studentId", ctx.config.identity.student_id.as_str()),
            filter: MonthYearFilter::default(),
        })
    }

    /// Fetch the attendance list (page open)
    pub async fn load(&self) -> bool {
        self.controller.refresh(&self.params).await
    }

    pub fn set_month(&mut self, month: impl Into<String>) {
        self.filter.month = month.into();
        self.apply_filter();
    }

    pub fn set_year(&mut self, year: impl Into<String>) {
        self.filter.year = year.into();
        self.apply_filter();
    }

    fn apply_filter(&self) {
        self.controller.view_mut().set_query(self.filter.to_query());
    }

    pub fn filter(&self) -> &MonthYearFilter {
        &self.filter
    }

    pub fn status(&self) -> ViewStatus {
        self.controller.view().status().clone()
    }

    /// Loading text while the list is being fetched
    pub fn loading_text(&self) -> Option<&'static str> {
        self.controller.view().is_loading().then_some(LOADING)
    }

    pub fn error(&self) -> Option<String> {
        self.controller.view().error().map(str::to_string)
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

/// A parent's view of one child's attendance
///
/// Student details load when the page opens; the attendance list is only
/// fetched when the parent presses Search.
pub struct ChildAttendancePage<X> {
    ctx: PageContext<X>,
    controller: AttendanceController<X>,
    table: TableSpec<AttendanceEntry>,
    params: RequestParams,
    filter: MonthYearFilter,
    details: Option<StudentDetails>,
    details_error: Option<String>,
}

impl<X: Transport> ChildAttendancePage<X> {
    pub fn new(ctx: PageContext<X>) -> Result<Self, ConfigError> {
        let source = ctx.source(endpoints::CHILD_ATTENDANCE, CHILD_FAILED)?;
        let identity = &ctx.config.identity;
        let params = RequestParams::new()
            .path("parentId", identity.parent_id.as_str())
            .path("studentId", identity.student_id.as_str());
        Ok(Self {
            controller: ListController::new(ListView::new(ctx.page_size()), source),
            table: child_table(),
            params,
            filter: MonthYearFilter::default(),
            details: None,
            details_error: None,
            ctx,
        })
    }

    /// Fetch the student details card (page open)
    pub async fn load_details(&mut self) -> bool {
        let outcome = match self.ctx.config.endpoint(endpoints::CHILD_ATTENDANCE) {
            Ok(endpoint) => {
                self.ctx
                    .fetcher
                    .try_fetch_object::<StudentDetails>(&endpoint, &self.params, "studentDetails")
                    .await
            }
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(details) => {
                self.details = Some(details);
                self.details_error = None;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "student details unavailable");
                self.details_error = Some(err.user_message_or(DETAILS_FAILED));
                false
            }
        }
    }

    /// The Search button
    pub async fn search(&self) -> bool {
        self.controller.trigger(&self.params).await
    }

    /// Label of the Search button
    pub fn search_label(&self) -> &'static str {
        if self.controller.view().is_loading() {
            LOADING
        } else {
            "Search"
        }
    }

    pub fn can_search(&self) -> bool {
        self.controller.view().can_trigger()
    }

    pub fn set_month(&mut self, month: impl Into<String>) {
        self.filter.month = month.into();
        self.controller.view_mut().set_query(self.filter.to_query());
    }

    pub fn set_year(&mut self, year: impl Into<String>) {
        self.filter.year = year.into();
        self.controller.view_mut().set_query(self.filter.to_query());
    }

    pub fn details(&self) -> Option<&StudentDetails> {
        self.details.as_ref()
    }

    /// Error banner: the attendance failure, else the details failure
    pub fn error(&self) -> Option<String> {
        self.controller
            .view()
            .error()
            .map(str::to_string)
            .or_else(|| self.details_error.clone())
    }

    /// Attendance list, shown once a search has succeeded
    pub fn table(&self) -> Option<RenderedTable> {
        let view = self.controller.view();
        matches!(view.status(), ViewStatus::Success).then(|| view.render(&self.table))
    }

    pub fn next_page(&self) -> bool {
        self.controller.view_mut().next_page()
    }

    pub fn previous_page(&self) -> bool {
        self.controller.view_mut().previous_page()
    }
}
