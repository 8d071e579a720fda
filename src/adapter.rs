// ABOUTME: Wiring facade: configuration in, ready-to-dispatch adapter out
// ABOUTME: Owns the query store and the session provider for the process lifetime

use crate::binder::QueryStore;
use crate::config::AdapterConfig;
use crate::converter::{Converter, PgConverter};
use crate::errors::AdapterResult;
use crate::handlers;
use crate::results::ResultReporter;
use crate::session::SessionProvider;
use crate::templates::TemplateCatalog;
use crate::workload::Operation;

/// The assembled adapter: template catalog and dialect on one side, a
/// session provider on the other.
///
/// Shared by reference across caller threads; each `execute` call borrows
/// its own session and keeps no state in the adapter.
pub struct InteractiveAdapter<P, C = PgConverter>
where
    P: SessionProvider,
    C: Converter,
{
    store: QueryStore<C>,
    provider: P,
}

impl<P: SessionProvider> InteractiveAdapter<P, PgConverter> {
    /// Build the PostgreSQL-dialect adapter from deployment configuration,
    /// loading the template catalog from disk once.
    #[must_use]
    pub fn new(config: &AdapterConfig, provider: P) -> Self {
        let catalog = TemplateCatalog::load(&config.query_dir, &config.file_suffix);
        let store = QueryStore::postgres(catalog)
            .with_markers(
                config.parameter_prefix.clone(),
                config.parameter_postfix.clone(),
            )
            .with_separated_content(config.separated_content);
        Self { store, provider }
    }
}

impl<P: SessionProvider, C: Converter> InteractiveAdapter<P, C> {
    /// Assemble from an already-built store, e.g. for a non-default dialect.
    #[must_use]
    pub fn with_store(store: QueryStore<C>, provider: P) -> Self {
        Self { store, provider }
    }

    #[must_use]
    pub fn store(&self) -> &QueryStore<C> {
        &self.store
    }

    /// Execute one operation and report its result.
    ///
    /// # Errors
    ///
    /// Returns the single typed failure for the invocation: binding,
    /// acquisition, execution (with the failing statement's tag), row
    /// decode, or release.
    pub async fn execute<Rep: ResultReporter>(
        &self,
        operation: &Operation,
        reporter: &mut Rep,
    ) -> AdapterResult<()> {
        handlers::execute_operation(&self.store, &self.provider, reporter, operation).await
    }
}
