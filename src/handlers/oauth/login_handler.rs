use crate::error::{ConfigError, Result};
use crate::models::AppState;
use axum::{extract::State, response::Redirect};

/// GET /login
///
/// Sends the browser to GitHub's consent page. GitHub redirects back to the
/// callback with a `code`.
pub async fn login_handler(State(app_state): State<AppState>) -> Result<Redirect> {
    let config = &app_state.config;

    let mut url =
        reqwest::Url::parse(&config.authorize_url).map_err(|_| ConfigError::Invalid {
            name: "GITHUB_AUTHORIZE_URL",
            value: config.authorize_url.clone(),
        })?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("client_id", config.credentials.client_id.as_str());
        if let Some(redirect_url) = &config.redirect_url {
            query.append_pair("redirect_uri", redirect_url);
        }
        if let Some(scope) = &config.scope {
            query.append_pair("scope", scope);
        }
    }

    tracing::debug!(authorize_url = %config.authorize_url, "redirecting to GitHub");
    Ok(Redirect::to(url.as_str()))
}
