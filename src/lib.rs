//! GitHub OAuth login callback
//!
//! Receives the authorization code GitHub redirects back with, trades it for
//! an access token, and fetches the user the token belongs to.

pub mod error;
pub mod github;
pub mod handlers;
pub mod models;

use axum::{Router, routing::get};
use models::AppState;

pub const CALLBACK_PATH: &str = "/oauth_callback";
pub const LOGIN_PATH: &str = "/login";

pub fn build_router(app_state: AppState) -> Router {
    use handlers::{callback_handler, login_handler};

    Router::new()
        .route(LOGIN_PATH, get(login_handler))
        .route(CALLBACK_PATH, get(callback_handler))
        .with_state(app_state)
}
