//! Authenticated-session types consumed by the access-control layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ability::AbilityGrant;

/// Role that bypasses every ability check
pub const ROLE_SUPER: &str = "super";

/// Role granted access to the admin route group
pub const ROLE_ADMIN: &str = "admin";

/// The slice of an authenticated session the access layer consumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// Acting role name
    pub role: String,

    /// Per-module abilities held by the role
    #[serde(default)]
    pub abilities: Vec<AbilityGrant>,

    /// When the session was established
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
}

impl SessionClaims {
    /// Create claims for a role with its ability records
    pub fn new(role: impl Into<String>, abilities: Vec<AbilityGrant>) -> Self {
        Self {
            role: role.into(),
            abilities,
            issued_at: None,
        }
    }

    /// Builder: stamp the issue time
    pub fn issued_now(mut self) -> Self {
        self.issued_at = Some(Utc::now());
        self
    }

    /// Whether the role bypasses ability checks
    pub fn is_super(&self) -> bool {
        self.role == ROLE_SUPER
    }

    /// Whether the role may see the admin route group
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_SUPER || self.role == ROLE_ADMIN
    }
}
