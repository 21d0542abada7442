//! Error types for asset reconciliation.
//!
//! Every failure the controller can surface is a [`ManagerError`] variant.
//! Callers branch on variants (or on [`ManagerError::category`]); the
//! rendered messages exist for humans and log lines only.
//!
//! A rendered [`ManagerError`] already contains its whole cause chain, so
//! `Error::source()` is always `None` and chain printers show each cause once.

use std::fmt;
use std::path::PathBuf;

use crate::types::{AssetKind, Operation};

/// Errors raised by a provider client while talking to the remote dashboard.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request never produced a response (DNS, TLS, timeout, refused).
    #[error("{action} failed because: {message}")]
    Transport {
        /// Provider action that was attempted, e.g. `createApi`.
        action: String,
        /// Description of the transport failure.
        message: String,
    },

    /// The dashboard answered with a non-success status code.
    #[error("{action} failed because: HTTP {status}: {body}")]
    Status {
        /// Provider action that was attempted.
        action: String,
        /// HTTP status code returned by the dashboard.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The dashboard answered but the body could not be understood.
    #[error("{action} failed because: {message}")]
    Decode {
        /// Provider action that was attempted.
        action: String,
        /// Description of the decoding failure.
        message: String,
    },
}

impl ProviderError {
    /// Creates a new `Transport` error.
    #[must_use]
    pub fn transport(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            action: action.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Status` error.
    #[must_use]
    pub fn status(action: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            action: action.into(),
            status,
            body: body.into(),
        }
    }

    /// Creates a new `Decode` error.
    #[must_use]
    pub fn decode(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            action: action.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code, if the dashboard answered at all.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors surfaced by the reconciliation controller.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    /// No authorisation credential was supplied.
    #[error("authorisation cannot be undefined, null or empty")]
    MissingAuthorisation,

    /// The provider identifier has no registered implementation.
    #[error("the specified provider \"{0}\" is not configured in this package")]
    UnknownProvider(String),

    /// The provider factory rejected its settings.
    #[error("the provider \"{provider}\" could not be initialised: {message}")]
    ProviderSetup {
        /// Provider identifier.
        provider: String,
        /// Why the settings were rejected.
        message: String,
    },

    /// The operation string is not one of `create`, `update`, `delete`.
    #[error("The specified operation, {0}, is not valid.")]
    InvalidOperation(String),

    /// The asset type string is not one of `api`, `policy`.
    #[error("The specified type, {0}, is not valid.")]
    InvalidAssetKind(String),

    /// The asset file could not be read.
    #[error("failed to read the file at {}: {cause}", .path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        cause: std::io::Error,
    },

    /// The asset file is not valid JSON.
    #[error("failed to parse the file at {}: {cause}", .path.display())]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        cause: serde_json::Error,
    },

    /// The definition has no usable name for its kind.
    #[error("the {kind} definition has no non-empty {field} field")]
    MissingName {
        /// Kind the definition was loaded as.
        kind: AssetKind,
        /// Dotted path of the expected name field.
        field: &'static str,
    },

    /// No remote asset carries the definition's name.
    #[error("the asset with name {name} does not exist in the provider")]
    AssetNotFound {
        /// Asset kind.
        kind: AssetKind,
        /// Name that was searched for.
        name: String,
    },

    /// A remote asset already carries the definition's name.
    #[error("an asset with name {name} already exists")]
    AssetAlreadyExists {
        /// Asset kind.
        kind: AssetKind,
        /// Name that was searched for.
        name: String,
        /// Remote identifier of the existing asset.
        id: String,
    },

    /// More than one remote asset carries the definition's name.
    #[error(
        "the asset with name {name} matched {} assets in the provider: {}",
        .ids.len(),
        .ids.join(", ")
    )]
    AmbiguousAsset {
        /// Asset kind.
        kind: AssetKind,
        /// Name that was searched for.
        name: String,
        /// Remote identifiers of every exact match.
        ids: Vec<String>,
    },

    /// The provider call itself failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Operation-level wrapper around any of the above.
    #[error("{operation} operation failed because: {cause}")]
    OperationFailed {
        /// Operation that was running.
        operation: Operation,
        /// What went wrong inside it.
        cause: Box<ManagerError>,
    },
}

impl ManagerError {
    /// Creates a new `ProviderSetup` error.
    #[must_use]
    pub fn provider_setup(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderSetup {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Wraps `self` with the operation that was running when it occurred.
    #[must_use]
    pub fn during(self, operation: Operation) -> Self {
        Self::OperationFailed {
            operation,
            cause: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through operation wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &ManagerError {
        match self {
            Self::OperationFailed { cause, .. } => cause.root_cause(),
            other => other,
        }
    }

    /// Returns the operation this error was raised under, if any.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::OperationFailed { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Returns `true` if the asset was expected to exist but did not.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), Self::AssetNotFound { .. })
    }

    /// Returns `true` if the asset was expected to be absent but exists.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self.root_cause(), Self::AssetAlreadyExists { .. })
    }

    /// Returns the error category for logging and exit-code mapping.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingAuthorisation | Self::UnknownProvider(_) | Self::ProviderSetup { .. } => {
                ErrorCategory::Configuration
            }
            Self::InvalidOperation(_) | Self::InvalidAssetKind(_) => ErrorCategory::Validation,
            Self::Read { .. } | Self::Parse { .. } | Self::MissingName { .. } => {
                ErrorCategory::Load
            }
            Self::AssetNotFound { .. }
            | Self::AssetAlreadyExists { .. }
            | Self::AmbiguousAsset { .. } => ErrorCategory::Resolution,
            Self::Provider(_) => ErrorCategory::Provider,
            Self::OperationFailed { cause, .. } => cause.category(),
        }
    }
}

/// Categories of reconciliation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing credential or unknown provider.
    Configuration,
    /// Unrecognized operation or asset kind.
    Validation,
    /// Asset file unreadable or malformed.
    Load,
    /// Existence precondition violated.
    Resolution,
    /// Remote call failed.
    Provider,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Validation => write!(f, "validation"),
            Self::Load => write!(f, "load"),
            Self::Resolution => write!(f, "resolution"),
            Self::Provider => write!(f, "provider"),
        }
    }
}
