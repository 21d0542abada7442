//! The reconciliation controller.
//!
//! [`CloudApiManager`] loads one asset definition, resolves it against the
//! provider by name, checks the existence precondition of the requested
//! operation and then issues the single terminal call:
//!
//! | Operation | Requires     | Calls                         |
//! |-----------|--------------|-------------------------------|
//! | create    | `NotFound`   | `create(kind, definition)`    |
//! | update    | `Found(id)`  | `update_by_id(kind, id, def)` |
//! | delete    | `Found(id)`  | `delete_by_id(kind, id)`      |
//!
//! Anything that fails after the operation is known comes back wrapped in
//! [`ManagerError::OperationFailed`].

use std::path::Path;

use serde_json::Value;
use tracing::{error, info};

use crate::error::ManagerError;
use crate::loader::load_definition;
use crate::provider::{DynProvider, ProviderRegistry, ProviderSettings};
use crate::resolver::AssetResolver;
use crate::types::{AssetDefinition, AssetKind, Operation, Resolution};

/// Identifier of the provider used when none is configured.
pub const DEFAULT_PROVIDER: &str = "tyk";

/// Construction parameters for [`CloudApiManager`].
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Registry key of the provider implementation.
    pub provider: String,
    /// Credential for the dashboard. Required.
    pub authorisation: Option<String>,
    /// Overrides the provider's default dashboard URL.
    pub base_url: Option<String>,
}

impl ManagerConfig {
    #[must_use]
    pub fn new(provider: impl Into<String>, authorisation: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            authorisation: Some(authorisation.into()),
            base_url: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Creates, updates or deletes one asset on a remote dashboard, keyed by
/// the asset's name.
pub struct CloudApiManager {
    provider: DynProvider,
}

impl CloudApiManager {
    /// Validates `config` and builds the configured provider from `registry`.
    ///
    /// The credential is checked before the provider identifier.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::MissingAuthorisation` for an absent or blank
    /// credential, `ManagerError::UnknownProvider` for an unregistered
    /// provider, or the provider factory's own error.
    pub fn new(config: &ManagerConfig, registry: &ProviderRegistry) -> Result<Self, ManagerError> {
        info!("initialising new CloudApiManager");

        let authorisation = config
            .authorisation
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ManagerError::MissingAuthorisation)
            .inspect_err(|e| error!("{e}"))?;

        let settings = ProviderSettings {
            authorisation: authorisation.to_string(),
            base_url: config.base_url.clone(),
        };
        let provider = registry
            .build(&config.provider, &settings)
            .inspect_err(|e| error!("{e}"))?;

        info!(provider = provider.id(), "successfully initialised new CloudApiManager");
        Ok(Self { provider })
    }

    /// Uses an already-built provider, skipping registry lookup.
    #[must_use]
    pub fn with_provider(provider: DynProvider) -> Self {
        Self { provider }
    }

    /// Identifier of the provider this manager talks to.
    #[must_use]
    pub fn provider_id(&self) -> &str {
        self.provider.id()
    }

    /// Like [`execute`](Self::execute), but takes the operation and asset
    /// type as strings and rejects unknown values before reading the file.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::InvalidOperation` or
    /// `ManagerError::InvalidAssetKind` for unknown values, otherwise
    /// whatever [`execute`](Self::execute) returns.
    pub async fn execute_raw(
        &self,
        file_path: &Path,
        operation: &str,
        kind: &str,
    ) -> Result<Value, ManagerError> {
        let operation: Operation = operation.parse().inspect_err(|e| error!("{e}"))?;
        let kind: AssetKind = kind.parse().inspect_err(|e| error!("{e}"))?;
        self.execute(file_path, operation, kind).await
    }

    /// Loads the definition at `file_path` and applies `operation` to it.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::OperationFailed` wrapping the load, resolution
    /// or provider error.
    pub async fn execute(
        &self,
        file_path: &Path,
        operation: Operation,
        kind: AssetKind,
    ) -> Result<Value, ManagerError> {
        let definition = match load_definition(file_path, kind) {
            Ok(definition) => definition,
            Err(e) => return Err(fail(operation, e)),
        };
        self.apply(operation, &definition).await
    }

    /// Applies `operation` to an already-loaded definition.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::OperationFailed` wrapping the resolution or
    /// provider error.
    pub async fn apply(
        &self,
        operation: Operation,
        definition: &AssetDefinition,
    ) -> Result<Value, ManagerError> {
        let result = match operation {
            Operation::Create => self.create(definition).await,
            Operation::Update => self.update(definition).await,
            Operation::Delete => self.delete(definition).await,
        };
        result.map_err(|e| fail(operation, e))
    }

    /// Resolves `definition` against the provider without acting on it.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error unwrapped.
    pub async fn resolve(&self, definition: &AssetDefinition) -> Result<Resolution, ManagerError> {
        AssetResolver::new(self.provider.as_ref())
            .resolve(definition)
            .await
    }

    async fn create(&self, definition: &AssetDefinition) -> Result<Value, ManagerError> {
        let (kind, name) = (definition.kind(), definition.name());
        info!(%kind, name, ".create: checking if asset exists");

        match self.resolve(definition).await? {
            Resolution::Found(id) => {
                info!(%kind, name, system_id = %id, ".create: asset already exists");
                Err(ManagerError::AssetAlreadyExists {
                    kind,
                    name: name.to_string(),
                    id,
                })
            }
            Resolution::NotFound => {
                info!(%kind, name, ".create: asset does not exist, proceeding with creation");
                Ok(self.provider.create(kind, definition).await?)
            }
        }
    }

    async fn update(&self, definition: &AssetDefinition) -> Result<Value, ManagerError> {
        let (kind, name) = (definition.kind(), definition.name());
        info!(%kind, name, ".update: checking if asset exists");

        let id = self.require_existing(definition, Operation::Update).await?;
        info!(%kind, name, system_id = %id, ".update: asset exists, proceeding with update");
        Ok(self.provider.update_by_id(kind, &id, definition).await?)
    }

    async fn delete(&self, definition: &AssetDefinition) -> Result<Value, ManagerError> {
        let (kind, name) = (definition.kind(), definition.name());
        info!(%kind, name, ".delete: checking if asset exists");

        let id = self.require_existing(definition, Operation::Delete).await?;
        info!(%kind, name, system_id = %id, ".delete: asset exists, proceeding with delete");
        Ok(self.provider.delete_by_id(kind, &id).await?)
    }

    async fn require_existing(
        &self,
        definition: &AssetDefinition,
        operation: Operation,
    ) -> Result<String, ManagerError> {
        match self.resolve(definition).await? {
            Resolution::Found(id) => Ok(id),
            Resolution::NotFound => {
                info!(
                    kind = %definition.kind(),
                    name = definition.name(),
                    "asset does not exist, terminating {operation}"
                );
                Err(ManagerError::AssetNotFound {
                    kind: definition.kind(),
                    name: definition.name().to_string(),
                })
            }
        }
    }
}

fn fail(operation: Operation, cause: ManagerError) -> ManagerError {
    let err = cause.during(operation);
    error!(category = %err.category(), ".{operation}: {err}");
    err
}
