//! Logger capability
//!
//! The batch reports progress through a minimal `debug`/`info`/`error`
//! interface. It is passed explicitly so concurrent batches never share one
//! by accident; [`TracingLogger`] is used when the caller has none.

/// Sink for batch progress messages
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Logger forwarding to the process-wide `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}
