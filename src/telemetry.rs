//! Tracing setup for the CLI.
//!
//! Logs go to stderr so command output on stdout stays clean for piping.
//! Verbosity is controlled through `RUST_LOG`.

use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

pub fn init_tracing_subscriber() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
