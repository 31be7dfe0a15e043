use super::error_payload;
use crate::models::oauth::UserProfile;
use oauth2::AccessToken;
use reqwest::header::ACCEPT;

/// Fetches the profile of the user a token belongs to.
#[derive(Debug, Clone)]
pub struct UserFetcher {
    client: reqwest::Client,
    user_url: String,
}

impl UserFetcher {
    pub fn new(client: reqwest::Client, user_url: String) -> Self {
        Self { client, user_url }
    }

    /// Makes exactly one GET to the user endpoint and returns the body as-is.
    pub async fn fetch(&self, token: &AccessToken) -> Option<UserProfile> {
        let response = match self
            .client
            .get(&self.user_url)
            .bearer_auth(token.secret())
            .header(ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                tracing::error!(error = %e, "user fetch request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let payload = error_payload(response).await;
            tracing::error!(%status, %payload, "error fetching user info");
            return None;
        }

        match response.json::<UserProfile>().await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::error!(error = %e, "failed to decode user response");
                None
            }
        }
    }
}
