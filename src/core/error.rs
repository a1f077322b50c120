//! Typed error handling for the list-view pipeline
//!
//! Every failure a page can run into while talking to the backend falls
//! into one of four categories:
//!
//! - [`FetchError::Config`]: a required identifying parameter or the endpoint is missing
//! - [`FetchError::Network`]: the request could not be sent or no response came back
//! - [`FetchError::Server`]: non-2xx response, optionally with a server message
//! - [`FetchError::Parse`]: the body was not the JSON we expected
//!
//! Errors never cross the pipeline boundary as `Err`: they collapse into
//! [`FetchResult::Failure`](crate::core::FetchResult) carrying a human-readable
//! message. The message priority is server-supplied text first, then the
//! kind-specific fallback.
//!
//! # Example
//!
//! ```rust,ignore
//! match fetcher.try_fetch_list::<Notice>(&endpoint, &params).await {
//!     Ok(items) => view.show(items),
//!     Err(FetchError::Server { status, .. }) if status == 404 => view.show(vec![]),
//!     Err(e) => view.fail(e.user_message()),
//! }
//! ```

use thiserror::Error;

/// Fallback shown when the request never reached the server
pub const NETWORK_FALLBACK: &str = "An error occurred while contacting the server.";

/// Fallback shown when the body could not be decoded
pub const PARSE_FALLBACK: &str = "The server returned an unreadable response.";

/// Errors raised while building a request from configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The endpoint has no path
    #[error("endpoint path is empty")]
    EmptyEndpoint,

    /// A `{placeholder}` in the path has no value
    #[error("missing required parameter '{name}' for endpoint '{endpoint}'")]
    MissingParam { endpoint: String, name: String },

    /// A placeholder was supplied but left blank
    #[error("parameter '{name}' for endpoint '{endpoint}' is empty")]
    EmptyParam { endpoint: String, name: String },

    /// The path template has an unterminated placeholder
    #[error("malformed path template '{0}'")]
    MalformedTemplate(String),

    /// The base URL does not parse or cannot be joined with the path
    #[error("invalid base url '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// No endpoint is configured under this name
    #[error("unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// The error taxonomy of a single fetch or submit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Programmer error: the request could not even be built
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request could not be sent or no response was received
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("server responded with status {status}")]
    Server {
        status: u16,
        /// `message` field of the error envelope, when the server sent one
        message: Option<String>,
    },

    /// Malformed or unexpected JSON body
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl FetchError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Config(_) => "CONFIG_ERROR",
            FetchError::Network(_) => "NETWORK_ERROR",
            FetchError::Server { .. } => "SERVER_ERROR",
            FetchError::Parse(_) => "PARSE_ERROR",
        }
    }

    /// The server-supplied message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FetchError::Server {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Generic text for this kind of failure
    pub fn fallback_message(&self) -> String {
        match self {
            FetchError::Config(e) => e.to_string(),
            FetchError::Network(_) => NETWORK_FALLBACK.to_string(),
            FetchError::Server { status, .. } => {
                format!("Request failed with status {}.", status)
            }
            FetchError::Parse(_) => PARSE_FALLBACK.to_string(),
        }
    }

    /// Message to display: server text first, then the kind fallback
    pub fn user_message(&self) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.fallback_message())
    }

    /// Like [`user_message`](Self::user_message) but with a caller-chosen
    /// fallback for everything except configuration errors
    pub fn user_message_or(&self, fallback: &str) -> String {
        self.user_message_with(fallback, fallback)
    }

    /// Caller-chosen fallbacks: `server_fallback` for a non-2xx response
    /// without a message, `fallback` for network and parse failures
    pub fn user_message_with(&self, server_fallback: &str, fallback: &str) -> String {
        match (self.server_message(), self) {
            (Some(message), _) => message.to_string(),
            (None, FetchError::Config(e)) => e.to_string(),
            (None, FetchError::Server { .. }) => server_fallback.to_string(),
            (None, _) => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}
