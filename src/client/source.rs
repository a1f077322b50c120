//! Sources a list view can load from

use crate::client::endpoint::{Endpoint, RequestParams};
use crate::client::fetcher::Fetcher;
use crate::client::transport::Transport;
use crate::core::result::FetchResult;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

/// Anything that can produce one collection per call
///
/// This allows a list controller to be driven by the HTTP fetcher in pages
/// and by scripted sources in tests.
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    async fn load(&self, params: &RequestParams) -> FetchResult<T>;
}

/// A [`ListSource`] bound to one endpoint of a shared fetcher
pub struct EndpointSource<T, X> {
    fetcher: Arc<Fetcher<X>>,
    endpoint: Endpoint,
    fallback: Option<String>,
    server_fallback: Option<String>,
    _record: PhantomData<fn() -> T>,
}

impl<T, X> EndpointSource<T, X> {
    pub fn new(fetcher: Arc<Fetcher<X>>, endpoint: Endpoint) -> Self {
        Self {
            fetcher,
            endpoint,
            fallback: None,
            server_fallback: None,
            _record: PhantomData,
        }
    }

    /// Builder: message shown when the server gives none
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Builder: message for a server error without one, when it should
    /// differ from the general fallback
    pub fn with_server_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.server_fallback = Some(fallback.into());
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl<T, X> ListSource<T> for EndpointSource<T, X>
where
    T: DeserializeOwned + Send + 'static,
    X: Transport,
{
    async fn load(&self, params: &RequestParams) -> FetchResult<T> {
        match &self.fallback {
            Some(fallback) => {
                let server_fallback = self.server_fallback.as_deref().unwrap_or(fallback.as_str());
                self.fetcher
                    .fetch_with(&self.endpoint, params, server_fallback, fallback)
                    .await
            }
            None => self.fetcher.fetch(&self.endpoint, params).await,
        }
    }
}
