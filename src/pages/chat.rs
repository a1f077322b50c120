//! Chat list: group search and local group creation

use crate::core::query::ListQuery;
use crate::core::record::ListItem;
use crate::core::validation::{FormRules, validators};
use crate::view::{ListView, RenderedTable, TableSpec};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

const EMPTY: &str = "No groups available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatGroup {
    pub id: String,
    pub name: String,
}

impl ListItem for ChatGroup {
    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        (field == "name").then(|| Cow::Borrowed(self.name.as_str()))
    }

    fn search_fields() -> &'static [&'static str] {
        &["name"]
    }
}

/// The chat list page; groups live only on this page
pub struct ChatListPage {
    view: ListView<ChatGroup>,
    table: TableSpec<ChatGroup>,
    rules: FormRules,
    error: Option<String>,
}

impl ChatListPage {
    pub fn new(page_size: usize) -> Self {
        Self {
            view: ListView::new(page_size),
            table: TableSpec::new(&["Group"], EMPTY, |_, group: &ChatGroup| {
                vec![group.name.clone()]
            }),
            rules: FormRules::new().add_validator("Group name", validators::required()),
            error: None,
        }
    }

    /// "Search People or Group" box
    pub fn set_search(&mut self, term: &str) {
        self.view.set_query(ListQuery::new().with_search(term));
    }

    /// Create Group button; returns the new group's id
    pub fn create_group(&mut self, name: &str) -> Option<String> {
        if let Err(errors) = self.rules.validate([("Group name", name)]) {
            self.error = Some(errors.join(" "));
            return None;
        }
        let group = ChatGroup {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
        };
        let id = group.id.clone();
        tracing::debug!(group_id = %id, "chat group created");
        self.view.push(group);
        self.error = None;
        Some(id)
    }

    pub fn groups(&self) -> &[ChatGroup] {
        self.view.items()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn table(&self) -> RenderedTable {
        self.view.render(&self.table)
    }
}
