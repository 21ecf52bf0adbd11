use std::env;

use anyhow::Context;
use tracing::warn;

const DEFAULT_AVATAR_URL: &str = "https://iupac.org/wp-content/uploads/2018/05/default-avatar.png";

#[derive(Debug, Clone)]
pub struct Config {
    /// HMAC secret used to sign session tokens.
    pub token_secret: String,
    pub message_max_len: usize,
    pub page_size: usize,
    pub channel_name_max_len: usize,
    pub default_avatar_url: String,
    /// Argon2 memory cost in KiB.
    pub password_hash_memory_kib: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_secret: "dev-secret-change-me".into(),
            message_max_len: 1000,
            page_size: 50,
            channel_name_max_len: 20,
            default_avatar_url: DEFAULT_AVATAR_URL.into(),
            password_hash_memory_kib: argon2::Params::DEFAULT_M_COST,
        }
    }
}

impl Config {
    /// Reads `SLACKR_*` variables (after loading `.env` if present), falling
    /// back to the defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Ok(Self {
            token_secret: token_secret_or_default(
                env::var("SLACKR_TOKEN_SECRET").ok(),
                defaults.token_secret,
            ),
            message_max_len: parse_var("SLACKR_MESSAGE_MAX_LEN", defaults.message_max_len)?,
            page_size: parse_var("SLACKR_PAGE_SIZE", defaults.page_size)?,
            channel_name_max_len: parse_var(
                "SLACKR_CHANNEL_NAME_MAX_LEN",
                defaults.channel_name_max_len,
            )?,
            default_avatar_url: env::var("SLACKR_DEFAULT_AVATAR_URL")
                .unwrap_or(defaults.default_avatar_url),
            password_hash_memory_kib: parse_var(
                "SLACKR_PASSWORD_HASH_MEMORY_KIB",
                defaults.password_hash_memory_kib,
            )?,
        })
    }
}

fn token_secret_or_default(configured: Option<String>, default: String) -> String {
    configured.unwrap_or_else(|| {
        warn!("SLACKR_TOKEN_SECRET is not set; signing tokens with the development secret");
        default
    })
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
