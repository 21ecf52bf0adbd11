#![allow(dead_code)]

use std::sync::Once;

use slackr_api::auth::auth_register;
use slackr_api::channels::channels_create;
use slackr_api::config::Config;
use slackr_api::{AppState, AppStateInner};
use slackr_types::api::AuthResponse;
use slackr_types::models::ChannelId;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("slackr_api=debug".parse().unwrap())
            .add_directive("slackr_db=debug".parse().unwrap());

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

pub fn get_test_config() -> Config {
    Config {
        token_secret: "test_secret".to_string(),
        // Keeps Argon2 fast enough to register dozens of users per test.
        password_hash_memory_kib: 64,
        ..Config::default()
    }
}

pub fn workspace() -> AppState {
    setup_tracing();
    AppStateInner::new(get_test_config())
}

/// Registers `first last` with an address derived from the two names.
pub fn register(state: &AppState, first: &str, last: &str) -> AuthResponse {
    let email = format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase());
    auth_register(state, &email, "password123", first, last).expect("registration failed")
}

pub fn public_channel(state: &AppState, token: &str, name: &str) -> ChannelId {
    channels_create(state, token, name, true).expect("channel creation failed")
}

pub fn private_channel(state: &AppState, token: &str, name: &str) -> ChannelId {
    channels_create(state, token, name, false).expect("channel creation failed")
}
