use chrono::{DateTime, Utc};

use crate::UserRole;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutReason {
    /// The user asked to log out.
    Logout,
    /// The token's `exp` claim has passed.
    Expired,
    /// The persisted token could not be decoded.
    DecodeFailed,
    /// The server rejected the token with a 401.
    Unauthorized,
}

impl SignOutReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logout => "logout",
            Self::Expired => "expired",
            Self::DecodeFailed => "decode_failed",
            Self::Unauthorized => "unauthorized",
        }
    }
}

/// Session state changes.
///
/// Exactly one event is dispatched per change, so a listener that refreshes
/// user-visible affordances redraws once per transition.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A user logged in or registered.
    SignedIn {
        email: String,
        role: UserRole,
        at: DateTime<Utc>,
    },
    /// A persisted token was loaded at start-up.
    Restored {
        email: String,
        role: UserRole,
        at: DateTime<Utc>,
    },
    SignedOut {
        reason: SignOutReason,
        at: DateTime<Utc>,
    },
}

impl SessionEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignedIn { .. } => "session.signed_in",
            Self::Restored { .. } => "session.restored",
            Self::SignedOut { .. } => "session.signed_out",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SignedIn { at, .. } | Self::Restored { at, .. } | Self::SignedOut { at, .. } => {
                *at
            }
        }
    }

    /// Whether privileged affordances should be visible after this event.
    pub fn is_admin(&self) -> bool {
        match self {
            Self::SignedIn { role, .. } | Self::Restored { role, .. } => role.is_admin(),
            Self::SignedOut { .. } => false,
        }
    }

    /// Email of the signed-in user, if any.
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::SignedIn { email, .. } | Self::Restored { email, .. } => Some(email),
            Self::SignedOut { .. } => None,
        }
    }
}
