use thiserror::Error;

/// Result type for reference search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for reference search operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The search was cancelled through its context's cancellation token
    #[error("Search cancelled")]
    Cancelled,

    /// A result item found in one framework has no representation in the other
    #[error("Unsupported result from {source_framework}: {reason}")]
    UnsupportedResult {
        source_framework: String,
        reason: String,
    },

    /// Nested searches exceeded the configured depth limit
    #[error("Nested search depth {depth} exceeds limit {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    /// An executor failed while processing a request
    #[error("Executor '{executor}' failed: {message}")]
    Executor { executor: String, message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an unsupported result error
    pub fn unsupported_result(
        source_framework: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedResult {
            source_framework: source_framework.into(),
            reason: reason.into(),
        }
    }

    /// Creates an executor error
    pub fn executor(executor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Executor {
            executor: executor.into(),
            message: message.into(),
        }
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Returns true if this error, or the error it wraps, is a cancellation
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Cancelled => true,
            Self::WithContext { source, .. } => source
                .downcast_ref::<Error>()
                .is_some_and(Error::is_cancelled),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_result_message() {
        let err = Error::unsupported_result("model", "no psi form for Symbol(foo)");
        assert_eq!(
            err.to_string(),
            "Unsupported result from model: no psi form for Symbol(foo)"
        );
    }

    #[test]
    fn test_cancellation_survives_context() {
        let wrapped: Result<()> = Err::<(), _>(Error::Cancelled).context("running nested search");
        let err = wrapped.unwrap_err();
        assert!(err.is_cancelled());
        assert!(err.to_string().starts_with("running nested search"));
    }

    #[test]
    fn test_other_errors_are_not_cancellation() {
        assert!(!Error::config("bad").is_cancelled());
        assert!(!Error::NestingTooDeep { depth: 9, limit: 8 }.is_cancelled());
    }
}
