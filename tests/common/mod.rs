#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use user_management_api::app::{self, AppState};
use user_management_api::database::models::{NewUser, User};
use user_management_api::database::{MemoryUserStore, StoreError, UserStore};
use user_management_api::middleware::AuthGate;

pub const TOKEN: &str = "test-secret-token";

/// In-process server: the real router and gate over a store the test owns.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryUserStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryUserStore::new());
        let router = router_with_store(store.clone());
        Self { router, store }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        send(&self.router, method, uri, authorization, body).await
    }

    /// Authenticated request with the test token.
    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse> {
        let auth = format!("Bearer {}", TOKEN);
        self.request(method, uri, Some(&auth), body).await
    }

    pub async fn create_user(&self, first_name: &str) -> Result<Value> {
        let res = self
            .call(Method::POST, "/api/users", Some(user_body(first_name)))
            .await?;
        assert_eq!(res.status, StatusCode::CREATED, "create failed: {:?}", res.body);
        res.body.ok_or_else(|| anyhow::anyhow!("create returned no body"))
    }
}

pub fn router_with_store(store: Arc<dyn UserStore>) -> Router {
    let gate = AuthGate::new(TOKEN, vec!["/swagger".to_string()]).expect("valid gate");
    app::router(AppState::new(store), gate)
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = authorization {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes)?)
    };

    Ok(TestResponse { status, headers, body })
}

pub fn user_body(first_name: &str) -> Value {
    serde_json::json!({
        "firstName": first_name,
        "lastName": "Tester",
        "email": format!("{}@example.com", first_name.to_lowercase()),
        "department": "Engineering"
    })
}

/// A store whose every call fails, for exercising the 500 path.
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn insert(&self, _user: NewUser) -> Result<i32, StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }

    async fn get(&self, _id: i32) -> Result<Option<User>, StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }

    async fn list(&self, _offset: i64, _limit: i64) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }

    async fn update(&self, _user: &User) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }

    async fn delete(&self, _id: i32) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }
}
