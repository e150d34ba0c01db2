//! Credential loading from the process environment.
//!
//! The four OAuth 1.0a user-context variables are required and checked in a
//! fixed order; validation stops at the first variable that is absent or
//! empty. The bearer token is optional and never required for posting.

use std::env;
use thiserror::Error;

pub const ENV_APP_KEY: &str = "TWITTER_API_KEY";
pub const ENV_APP_SECRET: &str = "TWITTER_API_KEY_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
pub const ENV_ACCESS_SECRET: &str = "TWITTER_TOKEN_SECRET";
pub const ENV_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";

#[derive(Debug, Clone, Error)]
#[error("Missing required environment variable: {0}")]
pub struct MissingVar(pub &'static str);

/// OAuth 1.0a user-context quadruple plus the optional app bearer token.
#[derive(Clone)]
pub struct Credentials {
    pub app_key: String,
    pub app_secret: String,
    pub access_token: String,
    pub access_secret: String,
    pub bearer_token: Option<String>,
}

// Secrets stay out of `{:?}` output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer_token", &self.bearer_token.is_some())
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Read credentials from the environment, validating the required
    /// variables in order: app key, app secret, access token, access secret.
    pub fn from_env() -> Result<Self, MissingVar> {
        let app_key = required(ENV_APP_KEY)?;
        let app_secret = required(ENV_APP_SECRET)?;
        let access_token = required(ENV_ACCESS_TOKEN)?;
        let access_secret = required(ENV_ACCESS_SECRET)?;
        let bearer_token = env::var(ENV_BEARER_TOKEN).ok().filter(|v| !v.is_empty());

        Ok(Self {
            app_key,
            app_secret,
            access_token,
            access_secret,
            bearer_token,
        })
    }
}

fn required(name: &'static str) -> Result<String, MissingVar> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(MissingVar(name)),
    }
}
