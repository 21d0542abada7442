//! A wiremock stand-in for the Tyk Dashboard.
//!
//! Routes can be switched off individually; anything unmatched answers
//! `404 not found`, and requests without a credential answer `401`.

#![allow(dead_code)]

use std::io::Write;

use serde_json::{Value, json};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

pub const API_ID: &str = "5e0fac4845b9a10001a8ee25";
pub const POLICY_ID: &str = "5ead7120575961000181867e";

pub fn fixture(name: &str) -> Value {
    let raw = match name {
        "api_definition" => include_str!("../fixtures/api_definition.json"),
        "api_search" => include_str!("../fixtures/api_search.json"),
        "policy_definition" => include_str!("../fixtures/policy_definition.json"),
        "policy_search" => include_str!("../fixtures/policy_search.json"),
        "create_response" => include_str!("../fixtures/create_response.json"),
        other => panic!("unknown fixture {other}"),
    };
    serde_json::from_str(raw).unwrap()
}

pub fn write_fixture(name: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", fixture(name)).unwrap();
    file
}

/// Which dashboard routes answer.
#[derive(Debug, Clone, Copy)]
pub struct Routes {
    pub api_search: bool,
    pub api_crud: bool,
    pub policy_search: bool,
    pub policy_crud: bool,
    /// Serve empty search results instead of the fixtures.
    pub empty_search: bool,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            api_search: true,
            api_crud: true,
            policy_search: true,
            policy_crud: true,
            empty_search: false,
        }
    }
}

struct MissingAuthorisation;

impl Match for MissingAuthorisation {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .is_none_or(|value| value.is_empty())
    }
}

pub async fn start_dashboard(routes: Routes) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(MissingAuthorisation)
        .respond_with(ResponseTemplate::new(401).set_body_string("API call unauthorised call"))
        .with_priority(1)
        .mount(&server)
        .await;

    if routes.api_search {
        let body = if routes.empty_search {
            json!({ "apis": [], "pages": 0 })
        } else {
            fixture("api_search")
        };
        Mock::given(method("GET"))
            .and(path("/api/apis/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .with_priority(2)
            .mount(&server)
            .await;
    }

    if routes.api_crud {
        Mock::given(method("POST"))
            .and(path("/api/apis"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixture("create_response")))
            .with_priority(3)
            .mount(&server)
            .await;
        for verb in ["PUT", "DELETE"] {
            Mock::given(method(verb))
                .and(path_regex(r"^/api/apis/[^/]+$"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "Status": "OK",
                    "Message": format!("API {verb}"),
                    "Meta": null
                })))
                .with_priority(3)
                .mount(&server)
                .await;
        }
    }

    if routes.policy_search {
        let body = if routes.empty_search {
            json!({ "Data": [], "Pages": 0 })
        } else {
            fixture("policy_search")
        };
        Mock::given(method("GET"))
            .and(path("/api/portal/policies/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .with_priority(2)
            .mount(&server)
            .await;
    }

    if routes.policy_crud {
        Mock::given(method("POST"))
            .and(path("/api/portal/policies"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "Status": "OK", "Message": POLICY_ID })),
            )
            .with_priority(3)
            .mount(&server)
            .await;
        for verb in ["PUT", "DELETE"] {
            Mock::given(method(verb))
                .and(path_regex(r"^/api/portal/policies/[^/]+$"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({ "Status": "OK", "Message": format!("policy {verb}") })),
                )
                .with_priority(3)
                .mount(&server)
                .await;
        }
    }

    Mock::given(path_regex(r"^/.+$"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .with_priority(10)
        .mount(&server)
        .await;

    server
}
