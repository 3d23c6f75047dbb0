//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for startlog
#[derive(Error, Debug)]
pub enum Error {
    /// A required dependency had no registration in the final container
    #[error("Missing required dependency: {type_name}")]
    MissingRequiredDependency {
        /// Type name of the dependency that could not be resolved
        type_name: &'static str,
    },

    /// The registry no longer accepts mutations because replay has begun
    #[error("Registry closed: {message}")]
    RegistryClosed {
        /// Description of the rejected operation
        message: String,
    },

    /// A startup hook failed while the host was starting
    #[error("Startup hook '{hook}' failed: {source}")]
    HookFailed {
        /// Name of the failing hook
        hook: String,
        /// Error returned by the hook
        #[source]
        source: Box<Error>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic error from external sources, typically a failing step body
    #[error("Generic error: {0}")]
    Generic(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Create a missing required dependency error for `T`
    pub fn missing_required<T: ?Sized + 'static>() -> Self {
        Self::MissingRequiredDependency {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create a registry closed error
    pub fn registry_closed<S: Into<String>>(message: S) -> Self {
        Self::RegistryClosed {
            message: message.into(),
        }
    }

    /// Wrap an error returned by a startup hook
    pub fn hook_failed<S: Into<String>>(hook: S, source: Error) -> Self {
        Self::HookFailed {
            hook: hook.into(),
            source: Box::new(source),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into().into())
    }
}

impl Error {
    /// The innermost error, looking through hook wrappers
    pub fn root(&self) -> &Error {
        match self {
            Self::HookFailed { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether this error (or the hook error it wraps) is a missing required dependency
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self.root(), Self::MissingRequiredDependency { .. })
    }

    /// Whether this error was caused by mutating a registry after replay began
    pub fn is_registry_closed(&self) -> bool {
        matches!(self.root(), Self::RegistryClosed { .. })
    }
}
