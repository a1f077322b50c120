//! Fetch lifecycle of a list view and the staleness tokens guarding it

use serde::Serialize;

/// Lifecycle of one list view
///
/// `Idle -> Loading -> {Success, Failure}`; the next trigger goes back
/// through `Loading`. A failure stays until the user triggers again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failure(String),
}

impl ViewStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewStatus::Loading)
    }

    /// Error text to display, if the last fetch failed
    pub fn error(&self) -> Option<&str> {
        match self {
            ViewStatus::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one fetch issued by a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic token counter
///
/// Only the most recently issued token is current; completions carrying an
/// older token arrived out of order and must be dropped.
#[derive(Debug, Clone, Default)]
pub struct RequestTokens {
    latest: u64,
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token newer than every token issued before
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// The most recent token, if any was issued
    pub fn latest(&self) -> Option<RequestToken> {
        (self.latest > 0).then_some(RequestToken(self.latest))
    }
}
