use std::fmt;

/// Catalog operations that report their start and end to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `Catalog::count`
    Count,
}

impl Operation {
    /// Name of the operation as it appears in log lines
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Count => "count",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for observing instrumented catalog operations
pub trait CatalogObserver {
    /// Called before the operation runs
    fn on_begin(&self, operation: Operation);
    /// Called after the operation has produced its result
    fn on_end(&self, operation: Operation);
}

/// Logs the begin and end of every instrumented operation
#[derive(Debug, Default)]
pub struct OperationLogger;

impl CatalogObserver for OperationLogger {
    fn on_begin(&self, operation: Operation) {
        tracing::info!(%operation, "Called `{operation}`");
    }

    fn on_end(&self, operation: Operation) {
        tracing::info!(%operation, "Finished `{operation}`");
    }
}
