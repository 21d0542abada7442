//! # apimgt-core
//!
//! Keeps JSON asset definitions (API gateway configurations and access
//! policies) in step with a remote API-management dashboard, one asset per
//! call, keyed by the asset's name.
//!
//! ## Overview
//!
//! - [`AssetProvider`] is the capability surface a dashboard client
//!   implements: search by name, create, update by id, delete by id.
//! - [`ProviderRegistry`] maps provider identifiers (`tyk`, ...) to
//!   factories, so the controller never names a concrete provider.
//! - [`AssetResolver`] turns a definition into [`Resolution::Found`] or
//!   [`Resolution::NotFound`] using exact name equality.
//! - [`CloudApiManager`] enforces the existence precondition of each
//!   [`Operation`] and issues the terminal provider call.
//!
//! ## Example
//!
//! ```ignore
//! use apimgt_core::{AssetKind, CloudApiManager, ManagerConfig, Operation, ProviderRegistry};
//!
//! async fn sync(registry: &ProviderRegistry) -> Result<(), apimgt_core::ManagerError> {
//!     let config = ManagerConfig::new("tyk", std::env::var("TOKEN").unwrap_or_default());
//!     let manager = CloudApiManager::new(&config, registry)?;
//!     let response = manager
//!         .execute("petstore.json".as_ref(), Operation::Create, AssetKind::Api)
//!         .await?;
//!     println!("{response}");
//!     Ok(())
//! }
//! ```

mod controller;
mod error;
mod loader;
mod provider;
mod resolver;
mod types;

pub use controller::{CloudApiManager, DEFAULT_PROVIDER, ManagerConfig};
pub use error::{ErrorCategory, ManagerError, ProviderError};
pub use loader::load_definition;
pub use provider::{AssetProvider, DynProvider, ProviderFactory, ProviderRegistry, ProviderSettings};
pub use resolver::AssetResolver;
pub use types::{AssetDefinition, AssetKind, Operation, Resolution, SearchResponse};

/// Type alias for a reconciliation result.
pub type ManagerResult<T> = Result<T, ManagerError>;
