#![allow(dead_code)]

use std::sync::Arc;

use mockito::{Mock, ServerGuard};
use quizgate::api::ApiClient;
use quizgate::config::ApiConfig;
use quizgate::models::TokenPair;
use quizgate::session::{SessionManager, ToastQueue};
use quizgate::store::{MemoryStore, TokenStore};

pub struct Harness {
    pub manager: SessionManager,
    pub store: Arc<MemoryStore>,
    pub toasts: Arc<ToastQueue>,
}

pub fn build_harness(base_url: String, store: MemoryStore) -> Harness {
    let api = ApiClient::new(&ApiConfig {
        base_url,
        timeout_in_ms: Some(5_000),
    })
    .expect("failed to build API client");
    let store = Arc::new(store);
    let toasts = Arc::new(ToastQueue::new());
    let manager = SessionManager::new(api, store.clone(), toasts.clone());

    Harness {
        manager,
        store,
        toasts,
    }
}

pub fn store_with(token: &str, refresh_token: &str) -> MemoryStore {
    MemoryStore::with_tokens(&TokenPair::new(token, refresh_token))
        .expect("failed to seed memory store")
}

pub async fn stored_tokens(store: &MemoryStore) -> Option<TokenPair> {
    store.load().await.expect("memory store never fails")
}

/// Mocks that must never be hit, for any path.
pub async fn forbid_any_request(server: &mut ServerGuard) -> Vec<Mock> {
    let mut mocks = Vec::new();
    for method in ["GET", "POST"] {
        mocks.push(
            server
                .mock(method, mockito::Matcher::Any)
                .expect(0)
                .create_async()
                .await,
        );
    }
    mocks
}

pub async fn assert_all(mocks: &[Mock]) {
    for mock in mocks {
        mock.assert_async().await;
    }
}

pub fn auth_body(token: &str, refresh_token: &str, email: &str) -> String {
    serde_json::json!({
        "data": {
            "token": token,
            "refreshToken": refresh_token,
            "email": email,
        }
    })
    .to_string()
}

pub fn refresh_body(token: &str, refresh_token: &str) -> String {
    serde_json::json!({
        "data": {
            "token": token,
            "refreshToken": refresh_token,
        }
    })
    .to_string()
}
