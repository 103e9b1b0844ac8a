//! Authentication via the Telegram login widget.
//!
//! This module provides:
//! - `AuthPayload` parsing and check-string canonicalization
//! - `TelegramVerifier`, the HMAC-SHA256 signature check
//! - the `/auth` handler

mod handlers;
mod telegram;
pub mod types;

pub use handlers::telegram_login;
pub use telegram::TelegramVerifier;
pub use types::{AuthError, AuthPayload};
