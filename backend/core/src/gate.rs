//! The access gate — classify, verify, authorize.
//!
//! Runs in front of every inbound request and produces one of three
//! decisions: pass through, redirect to login, or redirect to the
//! unauthorized page. The whole decision is synchronous and pure; nothing
//! here writes to any store or retains state between requests.

use tracing::{debug, warn};

use crate::credential::{CredentialError, CredentialVerifier};
use crate::principal::Principal;
use crate::routes::{RouteTable, Tier};

/// How the `admin` tier is authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminPolicy {
    /// The credential's role claim must be `admin`.
    Role,
    /// The credential's subject must be one of these identities.
    Subjects(Vec<String>),
}

impl AdminPolicy {
    pub fn authorizes(&self, principal: &Principal) -> bool {
        match self {
            AdminPolicy::Role => principal.is_admin(),
            AdminPolicy::Subjects(subjects) => subjects.iter().any(|s| s == &principal.subject),
        }
    }
}

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Request may proceed. Carries the verified principal when the route
    /// required one; `None` for public routes where credentials are never
    /// inspected.
    Allow { principal: Option<Principal> },
    /// Send the caller to the login page, remembering where they were going.
    RedirectLogin { return_to: String },
    /// Valid identity, insufficient role.
    RedirectUnauthorized,
}

/// The request authorization gate.
///
/// Built once at startup from validated configuration and shared read-only
/// across all requests.
#[derive(Clone)]
pub struct AccessGate {
    table: RouteTable,
    verifier: CredentialVerifier,
    admin_policy: AdminPolicy,
    login_path: String,
    unauthorized_path: String,
}

impl AccessGate {
    pub fn new(
        table: RouteTable,
        verifier: CredentialVerifier,
        admin_policy: AdminPolicy,
        login_path: impl Into<String>,
        unauthorized_path: impl Into<String>,
    ) -> Self {
        Self {
            table,
            verifier,
            admin_policy,
            login_path: login_path.into(),
            unauthorized_path: unauthorized_path.into(),
        }
    }

    /// Redirect target for unauthenticated requests to protected routes.
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Redirect target for authenticated-but-unauthorized requests.
    pub fn unauthorized_path(&self) -> &str {
        &self.unauthorized_path
    }

    /// Decide whether a request may proceed.
    ///
    /// Classify the path; public routes pass without touching the
    /// credential. Protected routes require a verifiable credential, and
    /// admin routes additionally require the admin policy to pass. Every
    /// credential failure — absent, malformed, expired, bad signature, or
    /// anything unexpected from the verifier — maps to a login redirect
    /// carrying the original path.
    pub fn decide(&self, path: &str, credential: Option<&str>) -> GateDecision {
        let tier = self.table.classify(path);
        debug!(path = %path, tier = ?tier, "Classified request");

        if tier == Tier::Public {
            return GateDecision::Allow { principal: None };
        }

        let Some(token) = credential else {
            return self.redirect_login(path, &CredentialError::Missing);
        };

        let principal = match self.verifier.verify(token) {
            Ok(principal) => principal,
            Err(err) => return self.redirect_login(path, &err),
        };

        if tier == Tier::Admin && !self.admin_policy.authorizes(&principal) {
            debug!(
                path = %path,
                subject = %principal.subject,
                "Admin tier denied: policy not satisfied"
            );
            return GateDecision::RedirectUnauthorized;
        }

        GateDecision::Allow {
            principal: Some(principal),
        }
    }

    fn redirect_login(&self, path: &str, reason: &CredentialError) -> GateDecision {
        match reason {
            // Fail closed, but make sure the operator can see it.
            CredentialError::Unexpected(msg) => {
                warn!(path = %path, error = %msg, "Credential verification failed unexpectedly; denying");
            }
            _ => {
                debug!(path = %path, reason = %reason, "Credential rejected");
            }
        }
        GateDecision::RedirectLogin {
            return_to: path.to_string(),
        }
    }
}
