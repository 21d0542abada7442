//! Name-to-identifier resolution against the provider.

use tracing::{debug, info};

use crate::error::{ManagerError, ProviderError};
use crate::provider::AssetProvider;
use crate::types::{AssetDefinition, AssetKind, Resolution, SearchResponse};

/// Looks up the remote identity of an asset definition by its name.
///
/// Every call goes to the provider; results are never cached.
pub struct AssetResolver<'a> {
    provider: &'a dyn AssetProvider,
}

impl<'a> AssetResolver<'a> {
    #[must_use]
    pub fn new(provider: &'a dyn AssetProvider) -> Self {
        Self { provider }
    }

    /// Resolves `definition` to `Found(id)` or `NotFound`.
    ///
    /// Only candidates whose name equals the definition's name exactly are
    /// considered, for both asset kinds.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::Provider` if the search fails or an exact match
    /// carries no identifier, and `ManagerError::AmbiguousAsset` if more than
    /// one candidate matches exactly.
    pub async fn resolve(&self, definition: &AssetDefinition) -> Result<Resolution, ManagerError> {
        let kind = definition.kind();
        let name = definition.name();

        let response = self.provider.find_by_name(kind, name).await?;
        info!(
            kind = %kind,
            name,
            candidates = response.len(),
            "search result(s) for asset name"
        );

        match_exact(kind, name, &response)
    }
}

fn match_exact(
    kind: AssetKind,
    name: &str,
    response: &SearchResponse,
) -> Result<Resolution, ManagerError> {
    let matches: Vec<&serde_json::Value> = response
        .candidates
        .iter()
        .filter(|candidate| kind.name_of(candidate) == Some(name))
        .collect();

    let mut ids = Vec::with_capacity(matches.len());
    for candidate in matches {
        let id = kind.id_of(candidate).ok_or_else(|| {
            ProviderError::decode(
                format!("find{}ByName", capitalised(kind)),
                format!(
                    "search result for {name} has no {} field",
                    kind.id_path().join(".")
                ),
            )
        })?;
        ids.push(id.to_string());
    }

    match ids.len() {
        0 => {
            debug!(kind = %kind, name, "no exact name match");
            Ok(Resolution::NotFound)
        }
        1 => Ok(Resolution::Found(ids.remove(0))),
        _ => Err(ManagerError::AmbiguousAsset {
            kind,
            name: name.to_string(),
            ids,
        }),
    }
}

fn capitalised(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::Api => "Api",
        AssetKind::Policy => "Policy",
    }
}
