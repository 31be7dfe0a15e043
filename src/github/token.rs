use super::error_payload;
use crate::models::ProviderCredentials;
use crate::models::oauth::TokenResponse;
use oauth2::{AccessToken, AuthorizationCode};
use reqwest::header::ACCEPT;

/// Trades an authorization code for an access token.
#[derive(Debug, Clone)]
pub struct TokenExchanger {
    client: reqwest::Client,
    token_url: String,
    credentials: ProviderCredentials,
}

impl TokenExchanger {
    pub fn new(client: reqwest::Client, token_url: String, credentials: ProviderCredentials) -> Self {
        Self {
            client,
            token_url,
            credentials,
        }
    }

    /// Makes exactly one POST to the token endpoint.
    ///
    /// Returns `None` on transport failure, a non-success status, an
    /// undecodable body, or a body without a usable `access_token`.
    pub async fn exchange(&self, code: &AuthorizationCode) -> Option<AccessToken> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.secret().as_str()),
            ("code", code.secret().as_str()),
        ];

        let response = match self
            .client
            .post(&self.token_url)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                tracing::error!(error = %e, "token exchange request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let payload = error_payload(response).await;
            tracing::error!(%status, %payload, "error exchanging code for token");
            return None;
        }

        let body = match response.json::<TokenResponse>().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "failed to decode token response");
                return None;
            }
        };

        if let Some(error) = body.error.as_deref() {
            tracing::warn!(
                error,
                description = body.error_description.as_deref().unwrap_or_default(),
                "token endpoint refused the code"
            );
        }

        let token = body.into_access_token();
        if token.is_none() {
            tracing::warn!("token response carried no access_token");
        } else {
            tracing::debug!("authorization code exchanged");
        }
        token
    }
}
