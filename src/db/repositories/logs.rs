use crate::entities::{flow_log, prelude::*};
use crate::models::{LogEntry, LogFilter, NewLogEntry};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by the log table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write log entry: {0}")]
    WriteFailure(#[source] DbErr),

    #[error("Failed to query log entries: {0}")]
    Query(#[source] DbErr),
}

pub struct LogRepository {
    conn: DatabaseConnection,
}

impl LogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Appends an entry and returns its engine-assigned id.
    ///
    /// `created_at` is stamped here; callers never supply it.
    pub async fn insert(&self, entry: NewLogEntry) -> Result<i64, StoreError> {
        let active_model = flow_log::ActiveModel {
            actor_id: Set(entry.actor_id),
            subject_id: Set(entry.subject_id),
            category: Set(entry.category),
            message: Set(entry.message),
            variables: Set(entry.variables),
            severity: Set(entry.severity.code()),
            link: Set(entry.link),
            location: Set(entry.location),
            referer: Set(entry.referer),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = FlowLog::insert(active_model)
            .exec(&self.conn)
            .await
            .map_err(StoreError::WriteFailure)?;

        Ok(result.last_insert_id)
    }

    /// Entries for one subject, newest first. Ties on `created_at` fall back
    /// to descending `id`, i.e. insertion order reversed.
    pub async fn by_subject(&self, subject_id: i64) -> Result<Vec<LogEntry>, StoreError> {
        FlowLog::find()
            .filter(flow_log::Column::SubjectId.eq(subject_id))
            .order_by_desc(flow_log::Column::CreatedAt)
            .order_by_desc(flow_log::Column::Id)
            .all(&self.conn)
            .await
            .map_err(StoreError::Query)
    }

    /// Filtered, paged listing of the whole table.
    ///
    /// Not supported yet: always returns an empty result. The signature is
    /// fixed so date-range and pagination support can land without breaking
    /// callers.
    #[allow(clippy::unused_async)]
    pub async fn query(
        &self,
        filter: &LogFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<LogEntry>, StoreError> {
        debug!(?filter, limit, offset, "Filtered log query is not supported yet");
        Ok(Vec::new())
    }
}
