use std::time::Duration;

use apimgt_core::{
    AssetDefinition, AssetKind, AssetProvider, ManagerError, ProviderError, SearchResponse,
};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::search::{ApiSearchPage, PolicySearchPage};

/// Registry key of this provider.
pub const PROVIDER_ID: &str = "tyk";

/// Tyk Cloud dashboard.
pub const DEFAULT_BASE_URL: &str = "https://admin.cloud.tyk.io";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider action names, used to label errors.
struct Actions {
    find: &'static str,
    create: &'static str,
    update: &'static str,
    delete: &'static str,
}

const API_ACTIONS: Actions = Actions {
    find: "findApiByName",
    create: "createApi",
    update: "updateApiById",
    delete: "deleteApiById",
};

const POLICY_ACTIONS: Actions = Actions {
    find: "findPolicyByName",
    create: "createPolicy",
    update: "updatePolicyById",
    delete: "deletePolicyById",
};

fn actions(kind: AssetKind) -> &'static Actions {
    match kind {
        AssetKind::Api => &API_ACTIONS,
        AssetKind::Policy => &POLICY_ACTIONS,
    }
}

/// Path segments of the collection endpoint for `kind`.
fn collection(kind: AssetKind) -> &'static [&'static str] {
    match kind {
        AssetKind::Api => &["api", "apis"],
        AssetKind::Policy => &["api", "portal", "policies"],
    }
}

/// Client for the Tyk Dashboard management API.
pub struct TykDashboardClient {
    http: reqwest::Client,
    base_url: Url,
    authorisation: String,
}

impl TykDashboardClient {
    /// Builds a client for `base_url`, or [`DEFAULT_BASE_URL`] when `None`.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::ProviderSetup` if the URL is not an absolute
    /// http(s) URL or the HTTP client cannot be built.
    pub fn new(authorisation: &str, base_url: Option<&str>) -> Result<Self, ManagerError> {
        let raw = base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        let base_url = Url::parse(raw)
            .map_err(|e| ManagerError::provider_setup(PROVIDER_ID, format!("invalid base url {raw}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ManagerError::provider_setup(
                PROVIDER_ID,
                format!("base url {raw} must be an http or https url"),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ManagerError::provider_setup(PROVIDER_ID, e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            authorisation: authorisation.to_string(),
        })
    }

    /// The dashboard this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, kind: AssetKind, tail: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(collection(kind))
                .extend(tail);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "tyk dashboard request");
        self.http
            .request(method, url)
            .header(AUTHORIZATION, &self.authorisation)
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, action: &str, request: RequestBuilder) -> Result<Value, ProviderError> {
        let resp = request
            .send()
            .await
            .map_err(|e| ProviderError::transport(action, e.to_string()))?;
        handle_response(action, resp).await
    }
}

#[async_trait]
impl AssetProvider for TykDashboardClient {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    async fn find_by_name(
        &self,
        kind: AssetKind,
        name: &str,
    ) -> Result<SearchResponse, ProviderError> {
        let action = actions(kind).find;
        let url = self.endpoint(kind, &["search"]);
        let body = self
            .send(action, self.request(Method::GET, url).query(&[("q", name)]))
            .await?;

        let candidates = match kind {
            AssetKind::Api => serde_json::from_value::<ApiSearchPage>(body)
                .map(|page| page.apis.unwrap_or_default()),
            AssetKind::Policy => serde_json::from_value::<PolicySearchPage>(body)
                .map(|page| page.data.unwrap_or_default()),
        }
        .map_err(|e| ProviderError::decode(action, format!("unexpected search response: {e}")))?;

        Ok(SearchResponse::new(candidates))
    }

    async fn create(
        &self,
        kind: AssetKind,
        definition: &AssetDefinition,
    ) -> Result<Value, ProviderError> {
        let url = self.endpoint(kind, &[]);
        let request = self.request(Method::POST, url).json(definition.document());
        self.send(actions(kind).create, request).await
    }

    async fn update_by_id(
        &self,
        kind: AssetKind,
        id: &str,
        definition: &AssetDefinition,
    ) -> Result<Value, ProviderError> {
        let url = self.endpoint(kind, &[id]);
        let request = self.request(Method::PUT, url).json(definition.document());
        self.send(actions(kind).update, request).await
    }

    async fn delete_by_id(&self, kind: AssetKind, id: &str) -> Result<Value, ProviderError> {
        let url = self.endpoint(kind, &[id]);
        self.send(actions(kind).delete, self.request(Method::DELETE, url))
            .await
    }
}

async fn handle_response(action: &str, resp: reqwest::Response) -> Result<Value, ProviderError> {
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ProviderError::status(action, status.as_u16(), body.trim()));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| ProviderError::transport(action, format!("failed to read response body: {e}")))?;

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body)
        .map_err(|e| ProviderError::decode(action, format!("failed to parse response JSON: {e}")))
}
