use std::sync::LazyLock;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{SaltString, rand_core::OsRng},
};
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use slackr_db::DataStore;
use slackr_db::ids::EntityKind;
use slackr_types::api::{AuthResponse, LogoutResponse};
use slackr_types::models::{HANDLE_MAX_LENGTH, User, UserId};
use tracing::{debug, info, warn};

use crate::access::{create_token, decode_claims};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::state::AppStateInner;

pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 64;
pub const NAME_MIN_LENGTH: usize = 1;
pub const NAME_MAX_LENGTH: usize = 50;
pub const RESET_CODE_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([\.-]?\w+)*@\w+([\.-]?\w+)*(\.\w{2,3})+$").expect("email pattern compiles")
});

#[tracing::instrument(skip(state, email, password), fields(u_id = tracing::field::Empty))]
pub fn auth_register(
    state: &AppStateInner,
    email: &str,
    password: &str,
    name_first: &str,
    name_last: &str,
) -> ApiResult<AuthResponse> {
    if !email_valid(email) {
        return Err(ApiError::input("email is not valid"));
    }
    check_length(password, "password", PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH)?;
    check_length(name_first, "first name", NAME_MIN_LENGTH, NAME_MAX_LENGTH)?;
    check_length(name_last, "last name", NAME_MIN_LENGTH, NAME_MAX_LENGTH)?;

    // Hash before taking the store lock; it is the slow part.
    let password_hash = hash_password(&state.config, password)?;

    let response = state.db.with_store(|store| {
        if store.email_in_use(email) {
            return Err(ApiError::input("email is already in use"));
        }

        let handle = generate_handle(store, name_first, name_last);
        let u_id = store.generate_id(EntityKind::User);
        store.insert_user(User {
            id: u_id,
            email: email.to_string(),
            password_hash,
            name_first: name_first.to_string(),
            name_last: name_last.to_string(),
            handle,
            profile_img_url: state.config.default_avatar_url.clone(),
        });

        if store.global_owners().is_empty() {
            store.add_global_owner(u_id);
            info!(u_id, "First user registered; granted workspace ownership");
        }

        let token = start_session(store, &state.config, u_id)?;
        Ok(AuthResponse { u_id, token })
    })?;

    tracing::Span::current().record("u_id", response.u_id);
    info!("User registered");
    Ok(response)
}

#[tracing::instrument(skip(state, email, password))]
pub fn auth_login(state: &AppStateInner, email: &str, password: &str) -> ApiResult<AuthResponse> {
    if !email_valid(email) {
        return Err(ApiError::input("email is not valid"));
    }

    let (u_id, password_hash) = state.db.with_store(|store| {
        store
            .user_by_email(email)
            .map(|user| (user.id, user.password_hash.clone()))
            .ok_or_else(|| ApiError::input("email does not belong to a user"))
    })?;

    if !verify_password(password, &password_hash)? {
        warn!(u_id, "Login failed: incorrect password");
        return Err(ApiError::input("password is not correct"));
    }

    // The user may have been removed while the password was being checked.
    let token = state.db.with_store(|store| {
        store.get_user(u_id)?;
        start_session(store, &state.config, u_id)
    })?;

    info!(u_id, "User logged in");
    Ok(AuthResponse { u_id, token })
}

/// Never fails: an unknown, expired or malformed token just reports
/// `is_success: false`.
#[tracing::instrument(skip_all)]
pub fn auth_logout(state: &AppStateInner, token: &str) -> ApiResult<LogoutResponse> {
    let Some(claims) = decode_claims(&state.config, token) else {
        debug!("Logout with malformed token");
        return Ok(LogoutResponse { is_success: false });
    };

    let is_success = state.db.with_store(|store| {
        let bound = store.sessions().resolve(&claims.jti) == Some(claims.uid);
        Ok::<_, ApiError>(bound && store.sessions_mut().logout(&claims.jti))
    })?;

    if is_success {
        info!(u_id = claims.uid, "User logged out");
    }
    Ok(LogoutResponse { is_success })
}

/// Issues a reset code for the account owning `email`. Delivering the code is
/// the caller's job; it must never be handed back to whoever asked for it.
/// An unknown email yields `None` without any error.
#[tracing::instrument(skip_all)]
pub fn auth_passwordreset_request(state: &AppStateInner, email: &str) -> ApiResult<Option<String>> {
    state.db.with_store(|store| {
        let Some(u_id) = store.user_by_email(email).map(|user| user.id) else {
            debug!("Password reset requested for unknown email");
            return Ok(None);
        };

        let code = loop {
            let candidate = generate_reset_code();
            if !store.reset_code_in_use(&candidate) {
                break candidate;
            }
        };
        store.insert_reset_code(code.clone(), u_id);

        info!(u_id, "Password reset code issued");
        Ok(Some(code))
    })
}

#[tracing::instrument(skip_all)]
pub fn auth_passwordreset_reset(
    state: &AppStateInner,
    reset_code: &str,
    new_password: &str,
) -> ApiResult<()> {
    let known = state
        .db
        .with_store(|store| Ok::<_, ApiError>(store.reset_code_owner(reset_code).is_some()))?;
    if !known {
        return Err(ApiError::input("reset code is not valid"));
    }
    check_length(new_password, "password", PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH)?;

    let password_hash = hash_password(&state.config, new_password)?;

    let u_id = state.db.with_store(|store| {
        let u_id = store
            .take_reset_code(reset_code)
            .ok_or_else(|| ApiError::input("reset code is not valid"))?;
        store.get_user_mut(u_id)?.password_hash = password_hash;
        Ok::<_, ApiError>(u_id)
    })?;

    info!(u_id, "Password reset");
    Ok(())
}

// -- Helpers --

pub fn email_valid(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Length bounds are counted in characters, inclusive at both ends.
pub fn check_length(value: &str, name: &str, min_len: usize, max_len: usize) -> ApiResult<()> {
    let len = value.chars().count();
    if len < min_len {
        return Err(ApiError::input(format!(
            "{name} must contain {min_len} or more characters"
        )));
    }
    if len > max_len {
        return Err(ApiError::input(format!(
            "{name} must contain {max_len} or less characters"
        )));
    }
    Ok(())
}

/// Lowercased first+last name cut to the handle limit. Collisions get a
/// numeric suffix (1, 2, ...), trimming the stem so the result still fits.
pub fn generate_handle(store: &DataStore, name_first: &str, name_last: &str) -> String {
    let base: String = format!("{name_first}{name_last}")
        .to_lowercase()
        .chars()
        .take(HANDLE_MAX_LENGTH)
        .collect();

    if !store.handle_in_use(&base) {
        return base;
    }

    let mut discriminator: u32 = 1;
    loop {
        let suffix = discriminator.to_string();
        let stem: String = base
            .chars()
            .take(HANDLE_MAX_LENGTH.saturating_sub(suffix.len()))
            .collect();
        let candidate = format!("{stem}{suffix}");
        if !store.handle_in_use(&candidate) {
            return candidate;
        }
        discriminator += 1;
    }
}

fn start_session(store: &mut DataStore, config: &Config, u_id: UserId) -> ApiResult<String> {
    let session_id = store.sessions_mut().login(u_id);
    match create_token(config, u_id, session_id) {
        Ok(token) => Ok(token),
        Err(e) => {
            store.sessions_mut().logout(&session_id);
            Err(e)
        }
    }
}

fn hasher(config: &Config) -> ApiResult<Argon2<'static>> {
    let params = Params::new(
        config.password_hash_memory_kib,
        Params::DEFAULT_T_COST,
        Params::DEFAULT_P_COST,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 parameters: {e}"))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn hash_password(config: &Config, password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher(config)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {e}"))?
        .to_string();
    Ok(hash)
}

/// The PHC string carries its own parameters, so verification does not
/// depend on the current configuration.
fn verify_password(password: &str, password_hash: &str) -> ApiResult<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Stored password hash is corrupt: {e}"))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn generate_reset_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_CODE_LENGTH)
        .map(char::from)
        .collect()
}
