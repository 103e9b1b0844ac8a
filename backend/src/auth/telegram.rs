//! Telegram login-widget signature verification.

use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::types::{AuthPayload, SharedSecret};

type HmacSha256 = Hmac<Sha256>;

/// Verifies login-widget payloads against the bot's shared secret.
///
/// Holds only the immutable secret, so one instance can be shared across all
/// request handlers.
#[derive(Debug, Clone)]
pub struct TelegramVerifier {
    secret: SharedSecret,
}

impl TelegramVerifier {
    pub fn new(bot_token: &str) -> Self {
        Self {
            secret: SharedSecret::from_bot_token(bot_token),
        }
    }

    /// Lowercase hex `HMAC-SHA256(secret, check_string)` for a payload.
    pub fn sign(&self, payload: &AuthPayload) -> Result<String, InvalidLength> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())?;
        mac.update(payload.check_string().as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Returns `true` iff the payload's `hash` matches its signed fields.
    ///
    /// A payload without a hash fails closed, as does a signing failure.
    pub fn verify(&self, payload: &AuthPayload) -> bool {
        let Some(received) = payload.hash() else {
            return false;
        };

        match self.sign(payload) {
            Ok(expected) => expected.as_bytes().ct_eq(received.as_bytes()).into(),
            Err(e) => {
                tracing::error!("Failed to create HMAC: {}", e);
                false
            }
        }
    }
}
