//! The verified identity derived from a request's session credential.

use serde::{Deserialize, Serialize};

/// Role carried in a session credential's claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    User,
    Admin,
}

/// The verified identity for the current request.
///
/// Constructed fresh per request from a verified session credential and
/// discarded when the request ends; the gate never persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Subject identifier from the credential (user id or email).
    pub subject: String,
    pub role: Role,
    pub authenticated: bool,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
