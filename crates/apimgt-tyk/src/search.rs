//! Search response shapes of the Tyk Dashboard.

use serde::Deserialize;
use serde_json::Value;

/// `GET /api/apis/search` body.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiSearchPage {
    #[serde(default)]
    pub apis: Option<Vec<Value>>,
}

/// `GET /api/portal/policies/search` body.
#[derive(Debug, Deserialize)]
pub(crate) struct PolicySearchPage {
    #[serde(rename = "Data", default)]
    pub data: Option<Vec<Value>>,
}
