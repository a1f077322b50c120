//! Outcomes handed from the fetcher to a list view

use crate::core::error::FetchError;
use serde_json::Value;

/// Outcome of one list fetch
///
/// Each fetch produces a fresh result which replaces the previous one as a
/// whole; there is no partial merge.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult<T> {
    Success(Vec<T>),
    Failure(String),
}

impl<T> FetchResult<T> {
    /// Collapse a typed fetch outcome using the default message priority
    pub fn from_outcome(outcome: Result<Vec<T>, FetchError>) -> Self {
        match outcome {
            Ok(items) => FetchResult::Success(items),
            Err(err) => FetchResult::Failure(err.user_message()),
        }
    }

    /// Collapse a typed fetch outcome with a page-specific fallback message
    pub fn from_outcome_or(outcome: Result<Vec<T>, FetchError>, fallback: &str) -> Self {
        Self::from_outcome_with(outcome, fallback, fallback)
    }

    /// Collapse with separate fallbacks for server and transport failures
    pub fn from_outcome_with(
        outcome: Result<Vec<T>, FetchError>,
        server_fallback: &str,
        fallback: &str,
    ) -> Self {
        match outcome {
            Ok(items) => FetchResult::Success(items),
            Err(err) => FetchResult::Failure(err.user_message_with(server_fallback, fallback)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    /// Failure text, if this is a failure
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            FetchResult::Failure(message) => Some(message),
            FetchResult::Success(_) => None,
        }
    }
}

/// Outcome of a POST/PUT
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// 2xx with the envelope message and optional `data` payload
    Accepted {
        message: Option<String>,
        data: Option<Value>,
    },
    Rejected(String),
}

impl SubmitResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitResult::Accepted { .. })
    }

    /// Identifier of the created/updated record (`data._id` or `data.id`)
    pub fn created_id(&self) -> Option<&str> {
        match self {
            SubmitResult::Accepted {
                data: Some(data), ..
            } => data
                .get("_id")
                .or_else(|| data.get("id"))
                .and_then(Value::as_str),
            _ => None,
        }
    }
}
