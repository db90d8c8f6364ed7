use serde::{Deserialize, Serialize};

use crate::{TokenClaims, UserRole};

/// The signed-in account as the client knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Absent for a provisional profile built from token claims.
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

impl UserProfile {
    /// Profile derived from token claims alone.
    ///
    /// Used until the server confirms who the token belongs to, and kept when
    /// the server can't be asked.
    pub fn from_claims(claims: &TokenClaims) -> Self {
        Self {
            id: None,
            email: claims.sub.clone(),
            first_name: None,
            role: claims.role().unwrap_or_default(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
