// ABOUTME: Typed error taxonomy for template loading, binding, execution and release
// ABOUTME: Every operation invocation surfaces at most one of these, wrapping the root cause

use thiserror::Error;

use crate::templates::OperationType;

/// Boxed root cause coming out of a session or row decode.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type for one operation invocation.
///
/// Template-load problems are deliberately absent here: an unreadable
/// template file is logged at catalog construction and only becomes a
/// `TemplateMissing` binding failure if that operation type is invoked.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// No query template was loaded for the operation type being bound.
    #[error("no query template loaded for `{}`", .0.base_name())]
    TemplateMissing(OperationType),

    /// Operation fields could not be turned into a parameter set.
    #[error("parameter binding failed: {0}")]
    Binding(String),

    /// Required configuration was missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A database session could not be acquired.
    #[error("failed to acquire database session")]
    Acquire(#[source] SourceError),

    /// The store rejected a statement. For multi-statement plans this names
    /// the failing statement; prior statements are not rolled back here.
    #[error("statement `{}` failed during execution", .tag.base_name())]
    Execution {
        tag: OperationType,
        #[source]
        source: SourceError,
    },

    /// A result row did not decode into the operation's result record.
    #[error("result row for `{}` did not decode", .tag.base_name())]
    RowDecode {
        tag: OperationType,
        #[source]
        source: SourceError,
    },

    /// Releasing the session failed after an otherwise successful
    /// invocation. Never reported when an execution failure already exists.
    #[error("failed to release database session")]
    Release(#[source] SourceError),
}

/// Result alias used throughout the adapter.
pub type AdapterResult<T> = Result<T, AdapterError>;
