#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use tinylink::application::services::SubmissionGate;
use tinylink::config::{CaptchaConfig, Config};
use tinylink::domain::{CollisionPolicy, TokenStore};
use tinylink::routes::api_router;
use tinylink::state::AppState;
use url::Url;

pub const CLIENT_IP: &str = "203.0.113.9";
pub const SECRET: &str = "test-turnstile-secret";

/// State with captcha disabled and the default capacity.
pub fn create_test_state() -> AppState {
    create_test_state_with_capacity(tinylink::domain::MAX_ENTRIES)
}

pub fn create_test_state_with_capacity(capacity: usize) -> AppState {
    let store = Arc::new(TokenStore::with_config(capacity, CollisionPolicy::Reroll));
    let gate = Arc::new(SubmissionGate::new(store.clone(), None));
    AppState::new(store, gate, "CF-Connecting-IP")
}

/// State with captcha enforced against `verify_url`.
pub fn create_captcha_state(verify_url: &str, timeout_seconds: u64) -> AppState {
    let config = Config {
        captcha: CaptchaConfig {
            enabled: true,
            secret: Some(SECRET.to_string()),
            verify_url: Url::parse(verify_url).unwrap(),
            timeout_seconds,
        },
        ..Config::default()
    };
    config.validate().unwrap();

    AppState::from_config(&config).unwrap()
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(api_router(state, &[])).unwrap()
}
