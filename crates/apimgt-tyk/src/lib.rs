//! # apimgt-tyk
//!
//! [`AssetProvider`](apimgt_core::AssetProvider) implementation for the Tyk
//! Dashboard management API.
//!
//! | Kind   | Search                              | Create / Update / Delete            |
//! |--------|-------------------------------------|-------------------------------------|
//! | api    | `GET /api/apis/search?q=`           | `POST /api/apis`, `PUT`/`DELETE /api/apis/{id}` |
//! | policy | `GET /api/portal/policies/search?q=`| `POST /api/portal/policies`, `PUT`/`DELETE /api/portal/policies/{id}` |
//!
//! The dashboard credential is sent verbatim in the `Authorization` header.

mod client;
mod search;

use std::sync::Arc;

use apimgt_core::{DynProvider, ManagerError, ProviderRegistry, ProviderSettings};

pub use client::{DEFAULT_BASE_URL, PROVIDER_ID, TykDashboardClient};

/// [`ProviderFactory`](apimgt_core::ProviderFactory) for the Tyk Dashboard.
///
/// # Errors
///
/// Returns `ManagerError::ProviderSetup` for an unusable base URL.
pub fn factory(settings: &ProviderSettings) -> Result<DynProvider, ManagerError> {
    let client = TykDashboardClient::new(&settings.authorisation, settings.base_url.as_deref())?;
    Ok(Arc::new(client))
}

/// Registers this provider under [`PROVIDER_ID`].
pub fn register(registry: &mut ProviderRegistry) {
    registry.register(PROVIDER_ID, factory);
}
