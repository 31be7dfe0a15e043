use oauth2::{AccessToken, AuthorizationCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Profile returned by the GitHub user endpoint, passed through untouched.
pub type UserProfile = Value;

#[derive(Debug, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
}

impl CallbackParams {
    /// Reads the callback query. Only `code` is recognized; when it is
    /// repeated the first occurrence wins.
    pub fn from_query(query: Option<&str>) -> Self {
        let code = query.and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(name, _)| name == "code")
                .map(|(_, value)| value.into_owned())
        });
        Self { code }
    }

    /// The authorization code, if one was supplied and is non-empty.
    pub fn authorization_code(self) -> Option<AuthorizationCode> {
        self.code
            .filter(|code| !code.is_empty())
            .map(AuthorizationCode::new)
    }
}

/// Token endpoint body. GitHub answers a bad code with `200` and an `error`
/// field instead of a token, so every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl TokenResponse {
    pub fn into_access_token(self) -> Option<AccessToken> {
        self.access_token
            .filter(|token| !token.is_empty())
            .map(AccessToken::new)
    }
}

#[derive(Debug, Serialize)]
pub struct CallbackMessage {
    pub message: String,
}

/// How the success message renders the code and token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageFormat {
    /// Code and token appear verbatim.
    #[default]
    Echo,
    /// Code and token are replaced with a placeholder.
    Redacted,
}

const REDACTED: &str = "[redacted]";

impl MessageFormat {
    pub fn from_echo_flag(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(MessageFormat::Echo),
            "0" | "false" | "no" | "off" => Some(MessageFormat::Redacted),
            _ => None,
        }
    }

    pub fn render(
        self,
        code: &AuthorizationCode,
        token: &AccessToken,
        user: Option<&UserProfile>,
    ) -> CallbackMessage {
        let (code, token) = match self {
            MessageFormat::Echo => (code.secret().as_str(), token.secret().as_str()),
            MessageFormat::Redacted => (REDACTED, REDACTED),
        };
        let user = user.map_or_else(|| "null".to_string(), Value::to_string);

        CallbackMessage {
            message: format!(
                "received code: {code} and exchanged it for token {token} then fetched user: {user}"
            ),
        }
    }
}
