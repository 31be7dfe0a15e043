use crate::error::{AppError, Result};
use crate::models::AppState;
use crate::models::oauth::{CallbackMessage, CallbackParams};
use axum::{
    Json,
    extract::{RawQuery, State},
};

/// GET /oauth_callback
///
/// Exchanges `code` for a token, then fetches the user it belongs to. A
/// failed user fetch does not fail the request; the profile renders as
/// `null`.
pub async fn callback_handler(
    State(app_state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<CallbackMessage>> {
    let code = CallbackParams::from_query(query.as_deref())
        .authorization_code()
        .ok_or(AppError::MissingCode)?;
    tracing::info!("OAuth callback received");

    let token = app_state
        .token_exchanger
        .exchange(&code)
        .await
        .ok_or(AppError::TokenExchange)?;

    let user = app_state.user_fetcher.fetch(&token).await;
    if user.is_none() {
        tracing::warn!("user profile unavailable; responding without it");
    }

    Ok(Json(app_state.config.message_format.render(
        &code,
        &token,
        user.as_ref(),
    )))
}
