//! The fetch stage of the list pipeline

use crate::client::endpoint::{Endpoint, RequestParams};
use crate::client::envelope::Envelope;
use crate::client::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::core::error::FetchError;
use crate::core::result::{FetchResult, SubmitResult};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Issues requests against one backend and decodes its envelopes
///
/// Every call performs exactly one network round trip. There is no retry
/// and no cache; ordering between overlapping calls is the list view's job.
#[derive(Debug, Clone)]
pub struct Fetcher<X = ReqwestTransport> {
    base_url: String,
    transport: X,
}

impl Fetcher<ReqwestTransport> {
    /// Build a reqwest-backed fetcher from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(config.base_url.clone(), transport))
    }
}

impl<X: Transport> Fetcher<X> {
    pub fn new(base_url: impl Into<String>, transport: X) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send the request and return the envelope of a 2xx response
    ///
    /// Non-2xx responses become [`FetchError::Server`] with the envelope
    /// message when the body has one. A 2xx body must be a JSON envelope.
    pub async fn execute(
        &self,
        endpoint: &Endpoint,
        params: &RequestParams,
    ) -> Result<Envelope, FetchError> {
        let response = self.send_checked(endpoint, params).await?;
        Envelope::parse(&response.body)
    }

    /// Send the request; only 2xx responses come back as `Ok`
    async fn send_checked(
        &self,
        endpoint: &Endpoint,
        params: &RequestParams,
    ) -> Result<HttpResponse, FetchError> {
        let url = endpoint.url(&self.base_url, params).inspect_err(|e| {
            tracing::error!(endpoint = %endpoint.path, error = %e, "invalid request configuration");
        })?;

        tracing::debug!(method = endpoint.method.as_str(), url = %url, "sending request");

        let response = self
            .transport
            .send(HttpRequest {
                method: endpoint.method,
                url,
                body: params.body.clone(),
            })
            .await?;

        if !response.is_success() {
            let message = Envelope::parse(&response.body)
                .ok()
                .and_then(|envelope| envelope.message().map(str::to_string));
            return Err(FetchError::Server {
                status: response.status,
                message,
            });
        }

        Ok(response)
    }

    /// Fetch the endpoint's collection as typed records
    pub async fn try_fetch_list<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &RequestParams,
    ) -> Result<Vec<T>, FetchError> {
        let envelope = self.execute(endpoint, params).await?;
        envelope.collection(endpoint.collection.as_deref())
    }

    /// Fetch a single object stored under `field`
    pub async fn try_fetch_object<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &RequestParams,
        field: &str,
    ) -> Result<T, FetchError> {
        let envelope = self.execute(endpoint, params).await?;
        envelope.object(field)
    }

    /// Fetch a collection, collapsing every error into a failure message
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &RequestParams,
    ) -> FetchResult<T> {
        let outcome = self.try_fetch_list(endpoint, params).await;
        log_outcome(endpoint, &outcome);
        FetchResult::from_outcome(outcome)
    }

    /// Like [`fetch`](Self::fetch) with a page-specific fallback message
    pub async fn fetch_or<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &RequestParams,
        fallback: &str,
    ) -> FetchResult<T> {
        self.fetch_with(endpoint, params, fallback, fallback).await
    }

    /// Like [`fetch_or`](Self::fetch_or) with a separate message for a
    /// server error that carries none
    pub async fn fetch_with<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &RequestParams,
        server_fallback: &str,
        fallback: &str,
    ) -> FetchResult<T> {
        let outcome = self.try_fetch_list(endpoint, params).await;
        log_outcome(endpoint, &outcome);
        FetchResult::from_outcome_with(outcome, server_fallback, fallback)
    }

    /// POST/PUT the params body; never returns `Err`
    ///
    /// Unlike list fetches, a 2xx without a body (e.g. 204) is accepted.
    pub async fn submit(&self, endpoint: &Endpoint, params: &RequestParams) -> SubmitResult {
        let outcome = self
            .send_checked(endpoint, params)
            .await
            .and_then(|response| {
                if response.body.trim().is_empty() {
                    Ok(Envelope::empty())
                } else {
                    Envelope::parse(&response.body)
                }
            });
        match outcome {
            Ok(envelope) => SubmitResult::Accepted {
                message: envelope.message().map(str::to_string),
                data: envelope.data().cloned(),
            },
            Err(err) => {
                tracing::warn!(endpoint = %endpoint.path, error = %err, "submit failed");
                SubmitResult::Rejected(err.user_message())
            }
        }
    }
}

fn log_outcome<T>(endpoint: &Endpoint, outcome: &Result<Vec<T>, FetchError>) {
    match outcome {
        Ok(items) => {
            tracing::debug!(endpoint = %endpoint.path, count = items.len(), "fetched collection")
        }
        Err(err) => {
            tracing::warn!(endpoint = %endpoint.path, code = err.error_code(), error = %err, "fetch failed")
        }
    }
}
