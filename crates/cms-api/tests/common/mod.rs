//! Shared harness for cms-api integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use cms_api::config::PaginationConfig;
use cms_api::{AppState, router};
use cms_service::ContactService;
use cms_storage::MemoryContactStore;
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh in-memory store.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_pagination(PaginationConfig::default())
    }

    pub fn with_pagination(pagination: PaginationConfig) -> Self {
        let service = ContactService::new(Arc::new(MemoryContactStore::new()));
        Self {
            router: router(AppState::new(service, pagination)),
        }
    }

    /// Sends one request; an empty response body comes back as `Value::Null`.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn create(&self, name: &str, email: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/contacts",
                Some(serde_json::json!({ "name": name, "email": email })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body
    }

    /// Seeds Eve, Dan, Carol, Bob, Ann in that insertion order.
    pub async fn seed_five(&self) {
        for name in ["Eve", "Dan", "Carol", "Bob", "Ann"] {
            self.create(name, &format!("{}@example.com", name.to_lowercase()))
                .await;
        }
    }
}

pub fn names(page: &Value) -> Vec<String> {
    page["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}
