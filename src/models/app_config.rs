use crate::error::{AppError, ConfigError};
use crate::github::{self, TokenExchanger, UserFetcher};
use crate::models::oauth::MessageFormat;
use oauth2::{ClientId, ClientSecret};

pub const DEFAULT_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
pub const DEFAULT_USER_URL: &str = "https://api.github.com/user";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:10000";

/// OAuth app credentials issued by GitHub.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
}

impl ProviderCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: ClientId::new(client_id.into()),
            client_secret: ClientSecret::new(client_secret.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: ProviderCredentials,
    pub redirect_url: Option<String>,
    pub scope: Option<String>,
    pub authorize_url: String,
    pub token_url: String,
    pub user_url: String,
    pub message_format: MessageFormat,
    pub bind_addr: String,
}

impl AppConfig {
    /// Reads the process environment. `.env` is loaded by `main` beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        use std::env;

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let client_id = required("GITHUB_CLIENT_ID")?;
        let client_secret = required("GITHUB_CLIENT_SECRET")?;

        let message_format = match var("CALLBACK_ECHO_SECRETS") {
            None => MessageFormat::default(),
            Some(value) => MessageFormat::from_echo_flag(&value).ok_or(ConfigError::Invalid {
                name: "CALLBACK_ECHO_SECRETS",
                value,
            })?,
        };

        Ok(Self {
            credentials: ProviderCredentials::new(client_id, client_secret),
            redirect_url: var("GITHUB_REDIRECT_URL"),
            scope: var("GITHUB_SCOPE"),
            authorize_url: var("GITHUB_AUTHORIZE_URL")
                .unwrap_or_else(|| DEFAULT_AUTHORIZE_URL.to_string()),
            token_url: var("GITHUB_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            user_url: var("GITHUB_USER_URL").unwrap_or_else(|| DEFAULT_USER_URL.to_string()),
            message_format,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub token_exchanger: TokenExchanger,
    pub user_fetcher: UserFetcher,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let client = github::http_client()?;

        let token_exchanger = TokenExchanger::new(
            client.clone(),
            config.token_url.clone(),
            config.credentials.clone(),
        );
        let user_fetcher = UserFetcher::new(client, config.user_url.clone());

        Ok(Self {
            config,
            token_exchanger,
            user_fetcher,
        })
    }
}
