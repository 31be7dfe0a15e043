pub mod oauth;

pub use oauth::{callback_handler, login_handler};
