//! Teacher homework list with class/section filters and status updates

use crate::client::{EndpointSource, RequestParams, Transport};
use crate::config::endpoints;
use crate::core::error::ConfigError;
use crate::core::query::ListQuery;
use crate::core::record::{ListItem, display_date};
use crate::core::result::SubmitResult;
use crate::pages::{PageContext, string_or_number};
use crate::view::{ListController, ListView, RenderedTable, TableSpec, ViewStatus};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::borrow::Cow;

const EMPTY: &str = "No homework found for the selected class and section.";
const FETCH_FAILED: &str = "Failed to retrieve homework data";

/// Status choices of the per-row dropdown
pub const STATUS_CHOICES: [&str; 3] = ["Not Submitted", "Submitted", "Graded"];

/// One assigned homework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub homework_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub homework_date: String,
    #[serde(default)]
    pub submission_date: String,
    #[serde(default)]
    pub marks: Value,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub class: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub section: String,
    #[serde(default)]
    pub created_at: String,
}

impl Homework {
    fn marks_text(&self) -> String {
        match &self.marks {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl ListItem for Homework {
    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        let value = match field {
            "class" => &self.class,
            "section" => &self.section,
            "status" => &self.status,
            "homeworkTitle" => &self.homework_title,
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }

    fn search_fields() -> &'static [&'static str] {
        &["homeworkTitle"]
    }
}

/// The teacher's homework page
pub struct HomeworkPage<X> {
    ctx: PageContext<X>,
    controller: ListController<Homework, EndpointSource<Homework, X>>,
    table: TableSpec<Homework>,
    class: String,
    section: String,
    update_error: Option<String>,
}

impl<X: Transport> HomeworkPage<X> {
    pub fn new(ctx: PageContext<X>) -> Result<Self, ConfigError> {
        let source = ctx.source(endpoints::HOMEWORKS, FETCH_FAILED)?;
        Ok(Self {
            controller: ListController::new(ListView::new(ctx.page_size()), source),
            table: TableSpec::new(
                &[
                    "Homework Title",
                    "Description",
                    "Homework Date",
                    "Submission Date",
                    "Marks",
                    "Status",
                    "Created At",
                ],
                EMPTY,
                |_, hw: &Homework| {
                    vec![
                        hw.homework_title.clone(),
                        hw.description.clone(),
                        display_date(&hw.homework_date),
                        display_date(&hw.submission_date),
                        hw.marks_text(),
                        hw.status.clone(),
                        display_date(&hw.created_at),
                    ]
                },
            ),
            class: String::new(),
            section: String::new(),
            update_error: None,
            ctx,
        })
    }

    /// Fetch all homework (page open)
    pub async fn load(&self) -> bool {
        self.controller.refresh(&RequestParams::new()).await
    }

    /// Distinct classes in the order they first appear
    pub fn class_options(&self) -> Vec<String> {
        let view = self.controller.view();
        let classes: IndexSet<&str> = view.items().iter().map(|hw| hw.class.as_str()).collect();
        classes.into_iter().map(str::to_string).collect()
    }

    /// Distinct sections of the selected class
    pub fn section_options(&self) -> Vec<String> {
        if self.class.is_empty() {
            return Vec::new();
        }
        let view = self.controller.view();
        let sections: IndexSet<&str> = view
            .items()
            .iter()
            .filter(|hw| hw.class == self.class)
            .map(|hw| hw.section.as_str())
            .collect();
        sections.into_iter().map(str::to_string).collect()
    }

    /// The section dropdown needs a class first
    pub fn section_enabled(&self) -> bool {
        !self.class.is_empty()
    }

    pub fn selected_class(&self) -> &str {
        &self.class
    }

    pub fn selected_section(&self) -> &str {
        &self.section
    }

    /// Select a class; the section selection is cleared
    pub fn select_class(&mut self, class: impl Into<String>) {
        self.class = class.into();
        self.section.clear();
        self.apply_filter();
    }

    /// Select a section; ignored until a class is selected
    pub fn select_section(&mut self, section: impl Into<String>) -> bool {
        if !self.section_enabled() {
            return false;
        }
        self.section = section.into();
        self.apply_filter();
        true
    }

    fn apply_filter(&self) {
        let query = ListQuery::new()
            .with_field("class", self.class.as_str())
            .with_field("section", self.section.as_str());
        self.controller.view_mut().set_query(query);
    }

    /// Change a homework's status on the backend, then locally
    ///
    /// The local record is only replaced once the backend accepted the
    /// change.
    pub async fn update_status(&mut self, homework_id: &str, status: &str) -> bool {
        let Some(current) = self.controller.view().get(homework_id).cloned() else {
            tracing::warn!(homework_id, "status change for unknown homework");
            return false;
        };
        if !STATUS_CHOICES.contains(&status) {
            self.update_error = Some(format!("Unknown status: {}", status));
            return false;
        }

        let endpoint = match self.ctx.config.endpoint(endpoints::HOMEWORK_STATUS) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                self.update_error = Some(e.to_string());
                return false;
            }
        };
        let params = RequestParams::new()
            .path("homeworkId", homework_id)
            .body(json!({ "status": status }));

        match self.ctx.fetcher.submit(&endpoint, &params).await {
            SubmitResult::Accepted { .. } => {
                let updated = Homework {
                    status: status.to_string(),
                    ..current
                };
                self.controller.view_mut().replace(updated);
                self.update_error = None;
                tracing::info!(homework_id, status, "homework status updated");
                true
            }
            SubmitResult::Rejected(message) => {
                self.update_error = Some(message);
                false
            }
        }
    }

    pub fn status(&self) -> ViewStatus {
        self.controller.view().status().clone()
    }

    pub fn error(&self) -> Option<String> {
        self.controller.view().error().map(str::to_string)
    }

    /// Error of the last status change, if it failed
    pub fn update_error(&self) -> Option<&str> {
        self.update_error.as_deref()
    }

    pub fn homeworks(&self) -> Vec<Homework> {
        self.controller.view().items().to_vec()
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
