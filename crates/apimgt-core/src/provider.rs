//! Provider capability trait and the registry that maps provider
//! identifiers to implementations.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ManagerError, ProviderError};
use crate::types::{AssetDefinition, AssetKind, SearchResponse};

/// The four calls the controller needs from a remote API-management
/// dashboard, per asset kind.
///
/// Implementations must be thread-safe (`Send + Sync`). Timeouts and retries,
/// if any, belong to the implementation; the controller treats every
/// `ProviderError` as terminal.
#[async_trait]
pub trait AssetProvider: Send + Sync {
    /// Identifier this provider is registered under, e.g. `tyk`.
    fn id(&self) -> &str;

    /// Searches for assets whose name matches `name`.
    ///
    /// The result may contain near-matches; callers filter for equality.
    async fn find_by_name(
        &self,
        kind: AssetKind,
        name: &str,
    ) -> Result<SearchResponse, ProviderError>;

    /// Creates a new asset from `definition`.
    async fn create(
        &self,
        kind: AssetKind,
        definition: &AssetDefinition,
    ) -> Result<Value, ProviderError>;

    /// Replaces the asset identified by `id` with `definition`.
    async fn update_by_id(
        &self,
        kind: AssetKind,
        id: &str,
        definition: &AssetDefinition,
    ) -> Result<Value, ProviderError>;

    /// Deletes the asset identified by `id`.
    async fn delete_by_id(&self, kind: AssetKind, id: &str) -> Result<Value, ProviderError>;
}

/// Shared handle to a provider implementation.
pub type DynProvider = Arc<dyn AssetProvider>;

/// Settings handed to a provider factory.
#[derive(Clone)]
pub struct ProviderSettings {
    /// Credential sent with every request.
    pub authorisation: String,
    /// Overrides the provider's default dashboard URL.
    pub base_url: Option<String>,
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("authorisation", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Builds a provider from its settings.
pub type ProviderFactory = fn(&ProviderSettings) -> Result<DynProvider, ManagerError>;

/// Provider identifiers and the factories that build them.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    factories: BTreeMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `id`, replacing any previous entry.
    pub fn register(&mut self, id: impl Into<String>, factory: ProviderFactory) -> &mut Self {
        self.factories.insert(id.into(), factory);
        self
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, factory: ProviderFactory) -> Self {
        self.register(id, factory);
        self
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Builds the provider registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::UnknownProvider` if nothing is registered under
    /// `id`, or whatever the factory returns.
    pub fn build(&self, id: &str, settings: &ProviderSettings) -> Result<DynProvider, ManagerError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| ManagerError::UnknownProvider(id.to_string()))?;
        factory(settings)
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullProvider;

    #[async_trait]
    impl AssetProvider for NullProvider {
        fn id(&self) -> &str {
            "null"
        }

        async fn find_by_name(
            &self,
            _kind: AssetKind,
            _name: &str,
        ) -> Result<SearchResponse, ProviderError> {
            Ok(SearchResponse::default())
        }

        async fn create(
            &self,
            _kind: AssetKind,
            _definition: &AssetDefinition,
        ) -> Result<Value, ProviderError> {
            Ok(Value::Null)
        }

        async fn update_by_id(
            &self,
            _kind: AssetKind,
            _id: &str,
            _definition: &AssetDefinition,
        ) -> Result<Value, ProviderError> {
            Ok(Value::Null)
        }

        async fn delete_by_id(&self, _kind: AssetKind, _id: &str) -> Result<Value, ProviderError> {
            Ok(Value::Null)
        }
    }

    fn null_factory(_settings: &ProviderSettings) -> Result<DynProvider, ManagerError> {
        Ok(Arc::new(NullProvider))
    }

    fn settings() -> ProviderSettings {
        ProviderSettings {
            authorisation: "secret-token".into(),
            base_url: None,
        }
    }

    #[test]
    fn test_build_registered_provider() {
        let registry = ProviderRegistry::new().with("null", null_factory);
        assert!(registry.contains("null"));
        let provider = registry.build("null", &settings()).unwrap();
        assert_eq!(provider.id(), "null");
    }

    #[test]
    fn test_build_unknown_provider() {
        let registry = ProviderRegistry::new().with("null", null_factory);
        let err = registry.build("kong", &settings()).err().unwrap();
        assert_eq!(
            err.to_string(),
            "the specified provider \"kong\" is not configured in this package"
        );
    }

    #[test]
    fn test_settings_debug_redacts_token() {
        let rendered = format!("{:?}", settings());
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
