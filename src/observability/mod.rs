//! # Observability
//!
//! Structured logging setup for hosts that do not install their own tracing
//! subscriber. Secret values never reach log output; see
//! [`crate::secrets::SecretString`].

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize a global tracing subscriber with `RUST_LOG` filtering.
///
/// Falls back to the given default level when `RUST_LOG` is unset. Safe to
/// call more than once; if a subscriber is already installed (e.g. by the
/// host application or an integration test), this is a no-op.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    if tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_env_filter(filter).finish(),
    )
    .is_err()
    {
        // Subscriber already set elsewhere (e.g. integration tests); ignore.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing("info");
        init_tracing("debug");
    }
}
