//! Class room administration: add form plus the list of rooms added

use crate::client::{RequestParams, Transport};
use crate::config::endpoints;
use crate::core::error::FetchError;
use crate::core::record::ListItem;
use crate::core::validation::{FormRules, validators};
use crate::pages::PageContext;
use crate::view::{ListView, RenderedTable, TableSpec};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::borrow::Cow;

const FILL_ALL_FIELDS: &str = "Please fill in all fields.";
const ADD_FAILED: &str = "Failed to add classroom.";
const ADD_ERRORED: &str = "An error occurred while adding the classroom.";
const ADDED: &str = "Classroom added successfully!";
const EMPTY: &str = "No Data Available In Table";

/// A class room as listed on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRoom {
    pub id: String,
    pub room_no: String,
    pub capacity: String,
}

impl ListItem for ClassRoom {
    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "roomNo" => Some(Cow::Borrowed(&self.room_no)),
            "capacity" => Some(Cow::Borrowed(&self.capacity)),
            _ => None,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["roomNo"]
    }
}

/// Inputs of the "Add Class Room" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassRoomForm {
    pub room_no: String,
    pub capacity: String,
}

/// The class room page
pub struct ClassRoomPage<X> {
    ctx: PageContext<X>,
    view: ListView<ClassRoom>,
    table: TableSpec<ClassRoom>,
    rules: FormRules,
    form: ClassRoomForm,
    saving: bool,
    error: Option<String>,
    success: Option<String>,
}

impl<X: Transport> ClassRoomPage<X> {
    pub fn new(ctx: PageContext<X>) -> Self {
        let view = ListView::new(ctx.page_size());
        Self {
            ctx,
            view,
            table: TableSpec::new(&["Room No", "Capacity", "Action"], EMPTY, |_, room: &ClassRoom| {
                vec![room.room_no.clone(), room.capacity.clone(), "Remove".to_string()]
            }),
            rules: FormRules::new()
                .add_validator("Room No", validators::required())
                .add_validator("Capacity", validators::required())
                .add_validator("Capacity", validators::positive_integer()),
            form: ClassRoomForm::default(),
            saving: false,
            error: None,
            success: None,
        }
    }

    pub fn form(&self) -> &ClassRoomForm {
        &self.form
    }

    pub fn set_room_no(&mut self, value: impl Into<String>) {
        self.form.room_no = value.into();
    }

    pub fn set_capacity(&mut self, value: impl Into<String>) {
        self.form.capacity = value.into();
    }

    /// The save button is disabled while a save is in flight
    pub fn can_save(&self) -> bool {
        !self.saving
    }

    /// Validate the form and post it
    ///
    /// Returns whether a room was added. The outcome is also reflected in
    /// [`error`](Self::error) / [`success_message`](Self::success_message).
    pub async fn save(&mut self) -> bool {
        if self.saving {
            return false;
        }

        if self.form.room_no.trim().is_empty() || self.form.capacity.trim().is_empty() {
            self.fail(FILL_ALL_FIELDS.to_string());
            return false;
        }
        if let Err(errors) = self.rules.validate([
            ("Room No", self.form.room_no.as_str()),
            ("Capacity", self.form.capacity.as_str()),
        ]) {
            self.fail(errors.join(" "));
            return false;
        }

        let endpoint = match self.ctx.config.endpoint(endpoints::ADD_CLASSROOM) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                self.fail(e.to_string());
                return false;
            }
        };
        let params = RequestParams::new().body(json!({
            "roomNumber": self.form.room_no.trim(),
            "capacity": self.form.capacity.trim(),
        }));

        self.saving = true;
        let outcome = self.ctx.fetcher.execute(&endpoint, &params).await;
        self.saving = false;

        let created = outcome.and_then(|envelope| {
            envelope
                .data()
                .and_then(|data| data.get("_id").or_else(|| data.get("id")))
                .and_then(|id| id.as_str())
                .map(str::to_string)
                .ok_or_else(|| FetchError::Parse("response has no data._id".to_string()))
        });

        match created {
            Ok(id) => {
                tracing::info!(room_id = %id, room_no = %self.form.room_no, "classroom added");
                self.view.push(ClassRoom {
                    id,
                    room_no: self.form.room_no.trim().to_string(),
                    capacity: self.form.capacity.trim().to_string(),
                });
                self.form = ClassRoomForm::default();
                self.error = None;
                self.success = Some(ADDED.to_string());
                true
            }
            Err(FetchError::Network(reason)) => {
                tracing::warn!(error = %reason, "classroom request failed");
                self.fail(ADD_ERRORED.to_string());
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "classroom rejected");
                self.fail(err.user_message_or(ADD_FAILED));
                false
            }
        }
    }

    /// Drop a room from the local list
    pub fn remove(&mut self, id: &str) -> bool {
        self.view.remove(id).is_some()
    }

    pub fn rooms(&self) -> &[ClassRoom] {
        self.view.items()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn table(&self) -> RenderedTable {
        self.view.render(&self.table)
    }

    pub fn next_page(&mut self) -> bool {
        self.view.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.view.previous_page()
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.success = None;
    }
}
