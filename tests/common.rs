// ABOUTME: Shared test utilities: mock session plumbing, recording reporter, template dirs
// ABOUTME: Lets handler and plan tests run the full pipeline without a database

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use snb_interactive_pg::errors::SourceError;
use snb_interactive_pg::results::{OrganisationEntry, ResultPayload, ResultReporter};
use snb_interactive_pg::session::{ResultRow, Session, SessionProvider};
use snb_interactive_pg::workload::Operation;
use snb_interactive_pg::{QueryStore, TemplateCatalog};
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process).
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// One typed column value of a scripted result row.
#[derive(Debug, Clone)]
pub enum Cell {
    I64(i64),
    I32(i32),
    F64(f64),
    Bool(bool),
    Str(String),
    Ts(i64),
    StrList(Vec<String>),
    IdList(Vec<i64>),
    Orgs(Vec<OrganisationEntry>),
}

/// Scripted result row for handler tests.
#[derive(Debug, Clone, Default)]
pub struct TestRow(pub Vec<Cell>);

impl TestRow {
    fn cell(&self, idx: usize) -> Result<&Cell, SourceError> {
        self.0
            .get(idx)
            .ok_or_else(|| format!("row has no column {idx}").into())
    }
}

fn type_error(idx: usize, cell: &Cell, wanted: &str) -> SourceError {
    format!("column {idx} holds {cell:?}, wanted {wanted}").into()
}

impl ResultRow for TestRow {
    fn i64_at(&self, idx: usize) -> Result<i64, SourceError> {
        match self.cell(idx)? {
            Cell::I64(v) => Ok(*v),
            other => Err(type_error(idx, other, "i64")),
        }
    }

    fn i32_at(&self, idx: usize) -> Result<i32, SourceError> {
        match self.cell(idx)? {
            Cell::I32(v) => Ok(*v),
            other => Err(type_error(idx, other, "i32")),
        }
    }

    fn f64_at(&self, idx: usize) -> Result<f64, SourceError> {
        match self.cell(idx)? {
            Cell::F64(v) => Ok(*v),
            other => Err(type_error(idx, other, "f64")),
        }
    }

    fn bool_at(&self, idx: usize) -> Result<bool, SourceError> {
        match self.cell(idx)? {
            Cell::Bool(v) => Ok(*v),
            other => Err(type_error(idx, other, "bool")),
        }
    }

    fn string_at(&self, idx: usize) -> Result<String, SourceError> {
        match self.cell(idx)? {
            Cell::Str(v) => Ok(v.clone()),
            other => Err(type_error(idx, other, "string")),
        }
    }

    fn timestamp_millis_at(&self, idx: usize) -> Result<i64, SourceError> {
        match self.cell(idx)? {
            Cell::Ts(v) => Ok(*v),
            other => Err(type_error(idx, other, "timestamp")),
        }
    }

    fn string_list_at(&self, idx: usize) -> Result<Vec<String>, SourceError> {
        match self.cell(idx)? {
            Cell::StrList(v) => Ok(v.clone()),
            other => Err(type_error(idx, other, "string list")),
        }
    }

    fn id_list_at(&self, idx: usize) -> Result<Vec<i64>, SourceError> {
        match self.cell(idx)? {
            Cell::IdList(v) => Ok(v.clone()),
            other => Err(type_error(idx, other, "id list")),
        }
    }

    fn organisations_at(&self, idx: usize) -> Result<Vec<OrganisationEntry>, SourceError> {
        match self.cell(idx)? {
            Cell::Orgs(v) => Ok(v.clone()),
            other => Err(type_error(idx, other, "organisations")),
        }
    }
}

/// Everything the mock sessions observed, shared across acquisitions.
#[derive(Debug, Default)]
pub struct SessionLog {
    /// Write statements in the order they were attempted.
    pub statements: Vec<String>,
    /// Read statements in the order they were issued.
    pub queries: Vec<String>,
    /// Number of sessions released.
    pub releases: usize,
}

/// Scriptable in-memory session provider.
#[derive(Clone, Default)]
pub struct MockProvider {
    rows: Vec<TestRow>,
    fail_execute_at: Option<usize>,
    fail_release: bool,
    log: Arc<Mutex<SessionLog>>,
}

impl MockProvider {
    pub fn new() -> Self {
        init_test_logging();
        Self::default()
    }

    /// Serve these rows to every read statement.
    pub fn with_rows(rows: Vec<TestRow>) -> Self {
        Self {
            rows,
            ..Self::new()
        }
    }

    /// Fail the nth (zero-based) write statement of each session.
    #[must_use]
    pub fn failing_execute_at(mut self, n: usize) -> Self {
        self.fail_execute_at = Some(n);
        self
    }

    /// Fail every release.
    #[must_use]
    pub fn failing_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    pub fn statements(&self) -> Vec<String> {
        self.log.lock().unwrap().statements.clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.log.lock().unwrap().queries.clone()
    }

    pub fn releases(&self) -> usize {
        self.log.lock().unwrap().releases
    }
}

#[async_trait]
impl SessionProvider for MockProvider {
    type Session = MockSession;

    async fn acquire(&self) -> Result<MockSession, SourceError> {
        Ok(MockSession {
            rows: self.rows.clone(),
            fail_execute_at: self.fail_execute_at,
            fail_release: self.fail_release,
            executes: 0,
            log: self.log.clone(),
        })
    }
}

pub struct MockSession {
    rows: Vec<TestRow>,
    fail_execute_at: Option<usize>,
    fail_release: bool,
    executes: usize,
    log: Arc<Mutex<SessionLog>>,
}

#[async_trait]
impl Session for MockSession {
    type Row = TestRow;

    async fn query_rows(&mut self, sql: &str) -> Result<Vec<TestRow>, SourceError> {
        self.log.lock().unwrap().queries.push(sql.to_string());
        Ok(self.rows.clone())
    }

    async fn execute(&mut self, sql: &str) -> Result<(), SourceError> {
        let n = self.executes;
        self.executes += 1;
        self.log.lock().unwrap().statements.push(sql.to_string());
        if self.fail_execute_at == Some(n) {
            return Err(format!("injected failure at statement {n}").into());
        }
        Ok(())
    }

    async fn release(self) -> Result<(), SourceError> {
        self.log.lock().unwrap().releases += 1;
        if self.fail_release {
            return Err("injected release failure".into());
        }
        Ok(())
    }
}

/// Reporter that records every call it receives.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub calls: Vec<(usize, ResultPayload, String)>,
}

impl ResultReporter for RecordingReporter {
    fn report(&mut self, result_count: usize, payload: ResultPayload, operation: &Operation) {
        self.calls
            .push((result_count, payload, operation.name().to_string()));
    }
}

/// Write `(base_name, text)` template files with the default suffix.
pub fn write_templates(dir: &Path, entries: &[(&str, &str)]) {
    for (base, text) in entries {
        fs::write(dir.join(format!("{base}.sql")), text).unwrap();
    }
}

/// A PostgreSQL-dialect store over an on-disk catalog holding `entries`.
/// Keep the returned directory alive for the store's lifetime.
pub fn store_with(entries: &[(&str, &str)]) -> (QueryStore, TempDir) {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    write_templates(dir.path(), entries);
    let catalog = TemplateCatalog::load(dir.path(), ".sql");
    (QueryStore::postgres(catalog), dir)
}
