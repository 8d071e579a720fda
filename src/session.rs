// ABOUTME: Port traits for the connection collaborator: provider, session, result row
// ABOUTME: Handlers execute pre-substituted SQL text through these; backends implement them

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::results::OrganisationEntry;

/// Ordinal, typed access to one result row.
///
/// Indexes are zero-based. Temporal accessors return epoch milliseconds, the
/// form result records carry.
pub trait ResultRow {
    fn i64_at(&self, idx: usize) -> Result<i64, SourceError>;
    fn i32_at(&self, idx: usize) -> Result<i32, SourceError>;
    fn f64_at(&self, idx: usize) -> Result<f64, SourceError>;
    fn bool_at(&self, idx: usize) -> Result<bool, SourceError>;
    fn string_at(&self, idx: usize) -> Result<String, SourceError>;

    /// TIMESTAMPTZ or DATE column as epoch milliseconds.
    fn timestamp_millis_at(&self, idx: usize) -> Result<i64, SourceError>;

    fn string_list_at(&self, idx: usize) -> Result<Vec<String>, SourceError>;
    fn id_list_at(&self, idx: usize) -> Result<Vec<i64>, SourceError>;

    /// Organisation column: a `text[]` whose elements are
    /// `name|year|place` triples.
    fn organisations_at(&self, idx: usize) -> Result<Vec<OrganisationEntry>, SourceError>;
}

/// One borrowed database session.
///
/// A session is never shared between concurrent operation invocations: each
/// invocation acquires its own, executes sequentially on it, and releases it
/// on every exit path. All parameter values are already substituted into the
/// SQL text; there is no bind step.
#[async_trait]
pub trait Session: Send {
    type Row: ResultRow + Send;

    /// Run a read statement and collect its rows in result-set order.
    async fn query_rows(&mut self, sql: &str) -> Result<Vec<Self::Row>, SourceError>;

    /// Run a write statement that produces no rows.
    async fn execute(&mut self, sql: &str) -> Result<(), SourceError>;

    /// Give the session back. Failures here surface to the caller only when
    /// the invocation had not already failed.
    async fn release(self) -> Result<(), SourceError>;
}

/// Hands out sessions; typically backed by a connection pool.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    type Session: Session;

    async fn acquire(&self) -> Result<Self::Session, SourceError>;
}
