//! Shared fixtures for controller and resolver tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use apimgt_core::{
    AssetDefinition, AssetKind, AssetProvider, DynProvider, ManagerError, ProviderError,
    ProviderSettings, SearchResponse,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use tempfile::NamedTempFile;

/// One recorded provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Find { kind: AssetKind, name: String },
    Create { kind: AssetKind, document: Value },
    Update { kind: AssetKind, id: String, document: Value },
    Delete { kind: AssetKind, id: String },
}

/// In-memory provider that records every call and replays canned answers.
#[derive(Default)]
pub struct MockProvider {
    candidates: Vec<Value>,
    search_failure: Option<u16>,
    terminal_failure: Option<(u16, String)>,
    calls: Mutex<Vec<Call>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(mut self, candidates: Vec<Value>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn failing_search(mut self, status: u16) -> Self {
        self.search_failure = Some(status);
        self
    }

    pub fn failing_terminal(mut self, status: u16, body: &str) -> Self {
        self.terminal_failure = Some((status, body.to_string()));
        self
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Calls other than searches.
    pub fn terminal_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::Find { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn terminal(&self, action: &str, ok: Value) -> Result<Value, ProviderError> {
        match &self.terminal_failure {
            Some((status, body)) => Err(ProviderError::status(action, *status, body.clone())),
            None => Ok(ok),
        }
    }
}

#[async_trait]
impl AssetProvider for MockProvider {
    fn id(&self) -> &str {
        "mock"
    }

    async fn find_by_name(
        &self,
        kind: AssetKind,
        name: &str,
    ) -> Result<SearchResponse, ProviderError> {
        self.record(Call::Find {
            kind,
            name: name.to_string(),
        });
        if let Some(status) = self.search_failure {
            return Err(ProviderError::status("findByName", status, "search unavailable"));
        }
        Ok(SearchResponse::new(self.candidates.clone()))
    }

    async fn create(
        &self,
        kind: AssetKind,
        definition: &AssetDefinition,
    ) -> Result<Value, ProviderError> {
        self.record(Call::Create {
            kind,
            document: definition.document().clone(),
        });
        self.terminal("create", json!({ "Status": "OK", "Message": "created", "Meta": "new-id" }))
    }

    async fn update_by_id(
        &self,
        kind: AssetKind,
        id: &str,
        definition: &AssetDefinition,
    ) -> Result<Value, ProviderError> {
        self.record(Call::Update {
            kind,
            id: id.to_string(),
            document: definition.document().clone(),
        });
        self.terminal("update", json!({ "Status": "OK", "Message": "updated" }))
    }

    async fn delete_by_id(&self, kind: AssetKind, id: &str) -> Result<Value, ProviderError> {
        self.record(Call::Delete {
            kind,
            id: id.to_string(),
        });
        self.terminal("delete", json!({ "Status": "OK", "Message": "deleted" }))
    }
}

pub fn mock_factory(_settings: &ProviderSettings) -> Result<DynProvider, ManagerError> {
    Ok(Arc::new(MockProvider::new()))
}

pub fn api_document(name: &str) -> Value {
    json!({
        "api_definition": {
            "name": name,
            "auth": { "auth_header_name": "authorization" },
            "definition": { "location": "header", "key": "x-api-version" },
            "version_data": { "not_versioned": true, "versions": { "Default": { "name": "Default" } } },
            "proxy": { "listen_path": "/foo/", "target_url": "http://httpbin.org/", "strip_listen_path": true }
        }
    })
}

pub fn api_candidate(name: &str, id: &str) -> Value {
    json!({ "api_definition": { "name": name, "id": id } })
}

pub fn policy_document(name: &str) -> Value {
    json!({
        "name": name,
        "active": true,
        "access_rights": { "b5b7c1d2": { "api_name": "foo", "versions": ["Default"] } }
    })
}

pub fn policy_candidate(name: &str, id: &str) -> Value {
    json!({ "name": name, "_id": id })
}

pub fn write_asset(document: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{document}").unwrap();
    file
}
