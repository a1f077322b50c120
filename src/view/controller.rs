//! Drives a list view from a [`ListSource`]
//!
//! The controller is the only place where a fetch suspends. The view lock is
//! taken to issue the token and again to apply the result, never across the
//! `.await`, so input and rendering keep working while a fetch is pending.

use crate::client::{ListSource, RequestParams};
use crate::core::record::ListItem;
use crate::view::list::ListView;
use crate::view::state::RequestToken;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle to one list view and the source that fills it
pub struct ListController<T, S> {
    view: Arc<RwLock<ListView<T>>>,
    source: S,
}

impl<T, S> ListController<T, S>
where
    T: ListItem,
    S: ListSource<T>,
{
    pub fn new(view: ListView<T>, source: S) -> Self {
        Self {
            view: Arc::new(RwLock::new(view)),
            source,
        }
    }

    /// Read access to the view
    pub fn view(&self) -> RwLockReadGuard<'_, ListView<T>> {
        self.view.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the view (query edits, navigation, local updates)
    pub fn view_mut(&self) -> RwLockWriteGuard<'_, ListView<T>> {
        self.view.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clone of the shared view handle
    pub fn handle(&self) -> Arc<RwLock<ListView<T>>> {
        Arc::clone(&self.view)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and apply, whatever the current state
    ///
    /// Returns whether the result was applied; a result overtaken by a
    /// later refresh is dropped.
    pub async fn refresh(&self, params: &RequestParams) -> bool {
        let token = self.view_mut().begin_fetch();
        self.complete(token, params).await
    }

    /// Fetch on behalf of a user control
    ///
    /// Does nothing and returns `false` while a fetch is already loading,
    /// matching the disabled state of the control.
    pub async fn trigger(&self, params: &RequestParams) -> bool {
        let Some(token) = self.view_mut().try_begin_fetch() else {
            tracing::debug!("trigger ignored while loading");
            return false;
        };
        self.complete(token, params).await
    }

    async fn complete(&self, token: RequestToken, params: &RequestParams) -> bool {
        let result = self.source.load(params).await;
        self.view_mut().apply(token, result)
    }
}
