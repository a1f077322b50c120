//! Student notice board

use crate::client::{EndpointSource, RequestParams, Transport};
use crate::config::endpoints;
use crate::core::error::ConfigError;
use crate::core::record::{ListItem, display_date};
use crate::pages::PageContext;
use crate::view::{ListController, ListView, RenderedTable, TableSpec, ViewStatus};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const EMPTY: &str = "No notices available.";
const FETCH_FAILED: &str = "An error occurred while fetching notices";

/// Text shown while notices are loading
pub const LOADING: &str = "Loading notices...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub posted_by: String,
}

impl ListItem for Notice {
    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        let value = match field {
            "title" => &self.title,
            "description" => &self.description,
            "postedBy" => &self.posted_by,
            "date" => &self.date,
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }

    fn search_fields() -> &'static [&'static str] {
        &["title", "description"]
    }
}

/// Notices addressed to the configured student, fetched when the page opens
pub struct NoticeBoardPage<X> {
    controller: ListController<Notice, EndpointSource<Notice, X>>,
    table: TableSpec<Notice>,
    params: RequestParams,
}

impl<X: Transport> NoticeBoardPage<X> {
    pub fn new(ctx: PageContext<X>) -> Result<Self, ConfigError> {
        let source = ctx.source(endpoints::NOTICES, FETCH_FAILED)?;
        Ok(Self {
            controller: ListController::new(ListView::new(ctx.page_size()), source),
            table: TableSpec::new(
                &["Title", "Description", "Publish Date", "Posted By"],
                EMPTY,
                |_, notice: &Notice| {
                    vec![
                        notice.title.clone(),
                        notice.description.clone(),
                        display_date(&notice.date),
                        notice.posted_by.clone(),
                    ]
                },
            ),
            params: RequestParams::new().path("studentId", ctx.config.identity.student_id.as_str()),
        })
    }

    pub async fn load(&self) -> bool {
        self.controller.refresh(&self.params).await
    }

    pub fn status(&self) -> ViewStatus {
        self.controller.view().status().clone()
    }

    pub fn loading_text(&self) -> Option<&'static str> {
        self.controller.view().is_loading().then_some(LOADING)
    }

    pub fn error(&self) -> Option<String> {
        self.controller.view().error().map(str::to_string)
    }

    pub fn notices(&self) -> Vec<Notice> {
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
