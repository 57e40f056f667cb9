//! Diagnostics sink injected into ledger components.
//!
//! Components report through a [`DiagnosticsSink`] handed to them at
//! construction; the core holds no process-wide mutable logger state.

/// Receiver for diagnostic events emitted by ledger components.
pub trait DiagnosticsSink: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards diagnostics to the `tracing` macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Installs the default `tracing_subscriber` fmt layer so [`TracingSink`]
/// output reaches the console. Safe to call more than once.
pub fn install_default() {
    let _ = tracing_subscriber::fmt::try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn sinks_are_usable_as_trait_objects() {
        let sinks: Vec<Arc<dyn DiagnosticsSink>> = vec![Arc::new(TracingSink), Arc::new(NullSink)];
        for sink in sinks {
            sink.debug("debug");
            sink.info("info");
            sink.warning("warning");
            sink.error("error");
        }
    }
}
