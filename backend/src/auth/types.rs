//! Login-widget payload and key material types.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Name of the field carrying the widget's signature.
pub const HASH_FIELD: &str = "hash";

/// Structural problems with a login-widget payload.
///
/// A payload that is well formed but carries a wrong or missing signature is
/// not an error; verification simply returns `false` for it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization payload must be a JSON object")]
    NotAnObject,

    #[error("Field '{0}' must be a string or a number")]
    NonScalarField(String),

    #[error("Field 'hash' must be a string")]
    InvalidHashType,
}

/// Signed identity assertion produced by the Telegram login widget.
///
/// Field values are kept in their check-string form: strings verbatim,
/// numbers in their JSON textual form. Keys are held in a `BTreeMap` so they
/// iterate in byte-wise ascending order.
#[derive(Debug, Clone)]
pub struct AuthPayload {
    fields: BTreeMap<String, String>,
    hash: Option<String>,
    raw: Map<String, Value>,
}

impl AuthPayload {
    /// Parse a payload from a JSON request body.
    pub fn from_json(value: Value) -> Result<Self, AuthError> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Err(AuthError::NotAnObject),
        }
    }

    pub fn from_map(raw: Map<String, Value>) -> Result<Self, AuthError> {
        let mut fields = BTreeMap::new();
        let mut hash = None;

        for (key, value) in &raw {
            if key == HASH_FIELD {
                match value {
                    Value::Null => {}
                    Value::String(s) if s.is_empty() => {}
                    Value::String(s) => hash = Some(s.clone()),
                    _ => return Err(AuthError::InvalidHashType),
                }
                continue;
            }

            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return Err(AuthError::NonScalarField(key.clone())),
            };
            fields.insert(key.clone(), rendered);
        }

        Ok(Self { fields, hash, raw })
    }

    /// The signature sent by the widget, if any. An empty or null `hash` counts as absent.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Newline-joined `key=value` lines over every field except `hash`,
    /// sorted by key, without a trailing newline.
    pub fn check_string(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Telegram user id, when the payload carries one.
    pub fn user_id(&self) -> Option<&str> {
        self.fields.get("id").map(String::as_str)
    }

    /// The payload exactly as it was received, `hash` included.
    pub fn into_raw(self) -> Map<String, Value> {
        self.raw
    }
}

/// HMAC key derived from the bot token: `SHA-256(bot_token)`, raw bytes.
#[derive(Clone)]
pub struct SharedSecret([u8; 32]);

impl SharedSecret {
    pub fn from_bot_token(bot_token: &str) -> Self {
        Self(Sha256::digest(bot_token.as_bytes()).into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}
