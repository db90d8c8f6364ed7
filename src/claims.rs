//! Claims carried inside the bearer token.
//!
//! The client never verifies signatures: it only reads the payload segment
//! to learn who the token belongs to, which role it was minted with and when
//! it stops being valid. The server stays the authority on every request.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Payload decoder: padding optional, alphabet normalized before decoding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Role of a storefront account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Client,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Self::Admin
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "admin" => Ok(Self::Admin),
            other => Err(ClientError::Decode(format!("unknown role {other:?}"))),
        }
    }
}

/// Claims decoded from a compact token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the account email. Empty when the token carries none.
    #[serde(default)]
    pub sub: String,
    /// Role the token was minted with, if the server embeds one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiration time (Unix timestamp, seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn email(&self) -> &str {
        &self.sub
    }

    /// Role embedded in the token.
    ///
    /// Unrecognised role names map to [`UserRole::Client`]: an unknown role
    /// is never privileged.
    pub fn role(&self) -> Option<UserRole> {
        self.role
            .as_deref()
            .map(|r| r.parse().unwrap_or(UserRole::Client))
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(|r| r.is_admin())
    }

    /// True when `exp` is present and not after `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }
}

/// Decodes the claims segment of a compact (`header.payload.signature`) token.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] unless the token is visible ASCII, has
/// exactly three dot-separated segments, and the middle one is base64 encoded
/// JSON claims. The token must be usable as-is in an `Authorization` header,
/// so surrounding whitespace is an error rather than trimmed.
pub fn decode(token: &str) -> Result<TokenClaims, ClientError> {
    if let Some(bad) = token.chars().find(|c| !c.is_ascii_graphic()) {
        return Err(ClientError::Decode(format!(
            "token contains invalid character {bad:?}"
        )));
    }

    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(ClientError::Decode(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    if payload.is_empty() {
        return Err(ClientError::Decode("empty claims segment".to_owned()));
    }

    let normalized = payload.replace('-', "+").replace('_', "/");
    let bytes = PAYLOAD_ENGINE
        .decode(normalized.as_bytes())
        .map_err(|e| ClientError::Decode(format!("claims segment is not base64: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::Decode(format!("claims segment is not JSON claims: {e}")))
}
