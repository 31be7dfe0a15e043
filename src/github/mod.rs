//! Outbound calls to GitHub
//!
//! Both collaborators share one `reqwest::Client`. Neither retries nor sets a
//! timeout of its own; a failed call is logged and reported as `None`.

mod token;
mod user;

pub use token::TokenExchanger;
pub use user::UserFetcher;

/// GitHub's REST API rejects requests without a `User-Agent`.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}

/// Reads an error body for logging, whatever shape it has.
async fn error_payload(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "could not read error body".to_string())
}
