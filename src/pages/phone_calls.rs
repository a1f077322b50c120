//! Phone call log: a local-only form and list

use crate::core::record::ListItem;
use crate::core::validation::{FormRules, validators};
use crate::view::{ListView, RenderedTable, TableSpec};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";
const EMPTY: &str = "No Data Available In Table";

/// Direction of a call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallType {
    #[default]
    Incoming,
    Outgoing,
}

impl CallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallType::Incoming => "Incoming",
            CallType::Outgoing => "Outgoing",
        }
    }
}

/// One logged call
///
/// Calls never leave the page, so the identifier is a client-side UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneCall {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub date: String,
    pub follow_up_date: String,
    pub call_duration: String,
    pub description: String,
    #[serde(rename = "type")]
    pub call_type: CallType,
}

impl ListItem for PhoneCall {
    fn id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "name" => Some(Cow::Borrowed(&self.name)),
            "phone" => Some(Cow::Borrowed(&self.phone)),
            "date" => Some(Cow::Borrowed(&self.date)),
            "type" => Some(Cow::Borrowed(self.call_type.as_str())),
            _ => None,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "phone"]
    }
}

/// Inputs of the "Add Phone Call" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneCallForm {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub follow_up_date: String,
    pub call_duration: String,
    pub description: String,
    pub call_type: CallType,
}

impl PhoneCallForm {
    /// Blank form with both dates set to `today`
    pub fn new(today: NaiveDate) -> Self {
        let today = today.format(DATE_FORMAT).to_string();
        Self {
            name: String::new(),
            phone: String::new(),
            date: today.clone(),
            follow_up_date: today,
            call_duration: String::new(),
            description: String::new(),
            call_type: CallType::Incoming,
        }
    }
}

/// The phone call log page
pub struct PhoneCallLogPage {
    today: NaiveDate,
    view: ListView<PhoneCall>,
    table: TableSpec<PhoneCall>,
    rules: FormRules,
    pub form: PhoneCallForm,
    errors: Vec<String>,
}

impl PhoneCallLogPage {
    /// Page whose form dates default to `today`
    pub fn new(page_size: usize, today: NaiveDate) -> Self {
        Self {
            today,
            view: ListView::new(page_size),
            table: TableSpec::new(
                &["SL", "Name", "Phone", "Date", "Follow Up Date", "Call Duration"],
                EMPTY,
                |position, call: &PhoneCall| {
                    vec![
                        (position + 1).to_string(),
                        call.name.clone(),
                        call.phone.clone(),
                        call.date.clone(),
                        call.follow_up_date.clone(),
                        call.call_duration.clone(),
                    ]
                },
            ),
            rules: FormRules::new()
                .add_validator("Phone", validators::required())
                .add_validator("Phone", validators::phone())
                .add_validator("Date", validators::required())
                .add_validator("Date", validators::date_format(DATE_FORMAT))
                .add_validator("Follow Up Date", validators::date_format(DATE_FORMAT)),
            form: PhoneCallForm::new(today),
            errors: Vec::new(),
        }
    }

    /// Page for today's local date
    pub fn for_today(page_size: usize) -> Self {
        Self::new(page_size, chrono::Local::now().date_naive())
    }

    /// Save the form as a new call and reset it
    pub fn submit(&mut self) -> bool {
        let form = &self.form;
        if let Err(errors) = self.rules.validate([
            ("Phone", form.phone.as_str()),
            ("Date", form.date.as_str()),
            ("Follow Up Date", form.follow_up_date.as_str()),
        ]) {
            self.errors = errors;
            return false;
        }

        let form = std::mem::replace(&mut self.form, PhoneCallForm::new(self.today));
        let call = PhoneCall {
            id: Uuid::new_v4().to_string(),
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            date: form.date,
            follow_up_date: form.follow_up_date,
            call_duration: form.call_duration.trim().to_string(),
            description: form.description,
            call_type: form.call_type,
        };
        tracing::debug!(call_id = %call.id, call_type = call.call_type.as_str(), "phone call logged");
        self.view.push(call);
        self.errors.clear();
        true
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn calls(&self) -> &[PhoneCall] {
        self.view.items()
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
}
