//! Configuration loading and management
//!
//! Base URL, page size, the identities a page acts for and the endpoint
//! table are all injected here instead of being hardcoded in pages.

use crate::client::Endpoint;
use crate::core::error::ConfigError;
use crate::core::query::DEFAULT_PAGE_SIZE;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Endpoint names used by the built-in pages
pub mod endpoints {
    pub const ADD_CLASSROOM: &str = "add_classroom";
    pub const ISSUED_BOOKS: &str = "issued_books";
    pub const STUDENT_ATTENDANCE: &str = "student_attendance";
    pub const CHILD_ATTENDANCE: &str = "child_attendance";
    pub const HOMEWORKS: &str = "homeworks";
    pub const HOMEWORK_STATUS: &str = "homework_status";
    pub const NOTICES: &str = "notices";
}

/// Who the pages act for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub student_id: String,

    #[serde(default)]
    pub parent_id: String,
}

/// Complete configuration for the school client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend root, e.g. `https://school-backend.example.com`
    pub base_url: String,

    /// Rows per page in every list view
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub identity: Identity,

    /// Subjects offered by the issued-books criteria
    #[serde(default = "default_subjects")]
    pub subjects: Vec<String>,

    /// Overrides for the default endpoint table (name -> endpoint)
    #[serde(default)]
    pub endpoints: HashMap<String, Endpoint>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_subjects() -> Vec<String> {
    ["Math", "Science", "History", "English"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no page can work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url is empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Resolve an endpoint by name: configured override, then built-in default
    pub fn endpoint(&self, name: &str) -> Result<Endpoint, ConfigError> {
        self.endpoints
            .get(name)
            .cloned()
            .or_else(|| default_endpoint(name))
            .ok_or_else(|| ConfigError::UnknownEndpoint(name.to_string()))
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: default_timeout_secs(),
            identity: Identity::default(),
            subjects: default_subjects(),
            endpoints: HashMap::new(),
        }
    }

    /// Builder: replace the identity
    pub fn with_identity(mut self, student_id: &str, parent_id: &str) -> Self {
        self.identity = Identity {
            student_id: student_id.to_string(),
            parent_id: parent_id.to_string(),
        };
        self
    }
}

/// Built-in endpoint table
pub fn default_endpoint(name: &str) -> Option<Endpoint> {
    let endpoint = match name {
        endpoints::ADD_CLASSROOM => Endpoint::post("/api/admin/add-classroom"),
        endpoints::ISSUED_BOOKS => {
            Endpoint::get("/api/library/issued-books").with_collection("books")
        }
        endpoints::STUDENT_ATTENDANCE => {
            Endpoint::get("/api/students/get-attendance/{studentId}").with_collection("attendance")
        }
        endpoints::CHILD_ATTENDANCE => {
            Endpoint::get("/api/parent/my-child-attendance/{parentId}/{studentId}")
                .with_collection("studentDetails.attendance")
        }
        endpoints::HOMEWORKS => Endpoint::get("/api/teacher/homeworks").with_collection("homeworks"),
        endpoints::HOMEWORK_STATUS => Endpoint::put("/api/teacher/update-status/{homeworkId}"),
        endpoints::NOTICES => {
            Endpoint::get("/api/students/notices/{studentId}").with_collection("notices")
        }
        _ => return None,
    };
    Some(endpoint)
}
