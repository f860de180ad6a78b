//! Domain service for writing and reading the event log.
//!
//! Wires the entry codec to the store: requests are built with the caller's
//! request context and appended; reads come back newest first with each
//! message resolved independently.

use crate::codec::{self, CodecError};
use crate::db::{Store, StoreError};
use crate::models::{DisplayEntry, LogEntry, LogFilter, LogRequest};
use crate::services::context::RequestContext;
use crate::services::render;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors returned by [`FlowLog`].
#[derive(Debug, Error)]
pub enum LogError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The event log. Holds a [`Store`] handle; clone freely.
#[derive(Clone)]
pub struct FlowLog {
    store: Store,
}

impl FlowLog {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Records an entry and returns its id.
    ///
    /// Actor, location and referrer come from `ctx`. An invalid severity fails
    /// before anything reaches the database.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Codec`] for invalid input and [`LogError::Store`]
    /// when the insert fails.
    pub async fn log(
        &self,
        ctx: &dyn RequestContext,
        request: LogRequest,
    ) -> Result<i64, LogError> {
        let entry = codec::build(
            &request.category,
            &request.message,
            &request.arguments,
            request.subject_id,
            &request.severity,
            &request.link,
            ctx.current_actor_id(),
            &ctx.current_location_url(),
            &ctx.current_referrer(),
        )?;

        let category = entry.category.clone();
        match self.store.insert_log(entry).await {
            Ok(id) => {
                debug!(id, category = %category, "Log entry written");
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, category = %category, "Failed to write log entry");
                Err(e.into())
            }
        }
    }

    /// Raw entries for a subject, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Store`] if the query fails.
    pub async fn entries_for_subject(&self, subject_id: i64) -> Result<Vec<LogEntry>, LogError> {
        Ok(self.store.logs_for_subject(subject_id).await?)
    }

    /// Resolved entries for a subject, newest first.
    ///
    /// Each entry resolves on its own, so one bad template does not hide the
    /// others.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Store`] if the query fails.
    pub async fn subject_logs(
        &self,
        subject_id: i64,
    ) -> Result<Vec<Result<DisplayEntry, CodecError>>, LogError> {
        let rows = self.entries_for_subject(subject_id).await?;
        Ok(rows.iter().map(codec::resolve).collect())
    }

    /// HTML for a subject's entries, or `None` when it has none.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Store`] if the query fails.
    pub async fn render_subject_logs(&self, subject_id: i64) -> Result<Option<String>, LogError> {
        let entries = self.subject_logs(subject_id).await?;
        if entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(render::render_entries(&entries)))
    }

    /// Filtered, paged listing. Currently always empty; see
    /// [`Store::query_logs`].
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Store`] if the query fails.
    pub async fn query_logs(
        &self,
        filter: &LogFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<LogEntry>, LogError> {
        Ok(self.store.query_logs(filter, limit, offset).await?)
    }
}
