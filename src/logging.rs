// ABOUTME: Tracing subscriber setup for adapter diagnostics
// ABOUTME: RUST_LOG wins; falls back to info for this crate

use tracing_subscriber::EnvFilter;

/// Install a global tracing subscriber.
///
/// `RUST_LOG` controls filtering when set; otherwise this crate logs at
/// `info` (rendered statements appear at `debug`). Safe to call more than
/// once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("snb_interactive_pg=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init();
}
