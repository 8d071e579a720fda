// ABOUTME: Library entry point for the SNB Interactive PostgreSQL adapter core
// ABOUTME: Templates in, typed operations through, typed results reported back out
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # SNB Interactive PostgreSQL adapter
//!
//! The query-side core of an LDBC Social Network Benchmark Interactive
//! workload implementation: it binds typed benchmark operations against
//! externally-authored SQL templates, executes the rendered text on a
//! borrowed session, and maps result rows back into typed records.
//!
//! Pipeline: `Operation` → binder (`QueryStore`) → parameter sets or a
//! statement plan → renderer → SQL text → session execution → `ResultRow`
//! mapping → `ResultReporter`.
//!
//! The driver that schedules operations, the connection pool behind the
//! session provider, and retry policy all live outside this crate; it is
//! handed a template directory, a session provider and a reporter, and does
//! the rest.

/// Wiring facade assembling catalog, dialect and session provider.
pub mod adapter;

/// Parameter binding and compound-write decomposition.
pub mod binder;

/// Deployment configuration.
pub mod config;

/// Typed-field to SQL-literal conversion, with the PostgreSQL dialect.
pub mod converter;

/// Error taxonomy for one operation invocation.
pub mod errors;

/// Execution shapes, row mappers, and operation dispatch.
pub mod handlers;

/// Tracing subscriber setup.
pub mod logging;

/// sqlx-backed PostgreSQL session ports.
pub mod postgres;

/// Placeholder substitution.
pub mod renderer;

/// Typed result records and the reporting contract.
pub mod results;

/// Session and result-row port traits.
pub mod session;

/// Operation-type tags and the template catalog.
pub mod templates;

/// Typed operation records for the Interactive workload.
pub mod workload;

pub use adapter::InteractiveAdapter;
pub use binder::{ParameterSet, QueryStore, RenderedStatement, Statement, StatementPlan};
pub use config::AdapterConfig;
pub use converter::{Converter, PgConverter};
pub use errors::{AdapterError, AdapterResult};
pub use results::{ResultPayload, ResultReporter};
pub use session::{ResultRow, Session, SessionProvider};
pub use templates::{OperationType, TemplateCatalog};
pub use workload::Operation;
