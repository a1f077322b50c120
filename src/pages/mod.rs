//! Page view models
//!
//! Each page owns its form state and one list view, and exposes the actions
//! its screen offers. Nothing here draws anything: pages hand back
//! [`RenderedTable`](crate::view::RenderedTable)s and plain strings.

pub mod attendance;
pub mod chat;
pub mod classroom;
pub mod homework;
pub mod issued_books;
pub mod notices;
pub mod phone_calls;

use crate::client::{EndpointSource, Fetcher, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::core::error::{ConfigError, FetchError};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

pub use attendance::{ChildAttendancePage, StudentAttendancePage};
pub use chat::ChatListPage;
pub use classroom::ClassRoomPage;
pub use homework::HomeworkPage;
pub use issued_books::IssuedBookPage;
pub use notices::NoticeBoardPage;
pub use phone_calls::PhoneCallLogPage;

/// Configuration and fetcher shared by every page of one session
pub struct PageContext<X = ReqwestTransport> {
    pub config: Arc<ClientConfig>,
    pub fetcher: Arc<Fetcher<X>>,
}

impl<X> Clone for PageContext<X> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl PageContext<ReqwestTransport> {
    /// Build a reqwest-backed context
    pub fn from_config(config: ClientConfig) -> Result<Self, FetchError> {
        config.validate()?;
        let fetcher = Fetcher::from_config(&config)?;
        Ok(Self::new(config, fetcher))
    }
}

impl<X: Transport> PageContext<X> {
    pub fn new(config: ClientConfig, fetcher: Fetcher<X>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// List source for a named endpoint with a page fallback message
    pub(crate) fn source<T>(
        &self,
        endpoint: &str,
        fallback: &str,
    ) -> Result<EndpointSource<T, X>, ConfigError> {
        let endpoint = self.config.endpoint(endpoint)?;
        Ok(EndpointSource::new(Arc::clone(&self.fetcher), endpoint).with_fallback(fallback))
    }
}

/// Accept `"5"`, `5` or `null` for fields the backend is loose about
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
        Missing(()),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => s,
        Loose::Number(n) => n.to_string(),
        Loose::Flag(b) => b.to_string(),
        Loose::Missing(()) => String::new(),
    })
}
