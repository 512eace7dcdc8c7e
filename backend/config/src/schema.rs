//! Folio configuration schema, typed for serde YAML deserialization.

use folio_core::{AdminPolicy, RouteRule, RouteTable, Tier};
use serde::{Deserialize, Serialize};

/// Root configuration for the Folio backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolioConfig {
    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub gate: GateSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Access-gate settings: the route table and everything needed to verify
/// and authorize a session credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateSection {
    /// Ordered route classification rules.
    #[serde(default)]
    pub routes: Vec<RouteRule>,

    /// Tier applied when no rule matches. Defaults to `authenticated`:
    /// unlisted paths require a login rather than leaking.
    #[serde(default = "default_tier")]
    pub default_tier: Tier,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default = "default_unauthorized_path")]
    pub unauthorized_path: String,

    #[serde(default)]
    pub admin_policy: AdminPolicySection,

    #[serde(default)]
    pub session: SessionSection,
}

impl Default for GateSection {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            default_tier: default_tier(),
            login_path: default_login_path(),
            unauthorized_path: default_unauthorized_path(),
            admin_policy: AdminPolicySection::default(),
            session: SessionSection::default(),
        }
    }
}

impl GateSection {
    pub fn route_table(&self) -> RouteTable {
        RouteTable::new(self.routes.clone(), self.default_tier)
    }

    pub fn admin_policy(&self) -> AdminPolicy {
        match &self.admin_policy {
            AdminPolicySection::Role => AdminPolicy::Role,
            AdminPolicySection::Subjects { subjects } => AdminPolicy::Subjects(subjects.clone()),
        }
    }
}

/// How the `admin` tier is authorized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum AdminPolicySection {
    /// Credential role claim must be `admin`.
    Role,
    /// Credential subject must be listed here.
    Subjects {
        #[serde(default)]
        subjects: Vec<String>,
    },
}

impl Default for AdminPolicySection {
    fn default() -> Self {
        AdminPolicySection::Role
    }
}

/// Session credential settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSection {
    /// Cookie the credential is read from. `Authorization: Bearer` is
    /// accepted as a fallback for API clients.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// HMAC signing secret, normally `${FOLIO_SESSION_SECRET}`.
    /// Required; an empty value fails validation at startup.
    #[serde(default)]
    pub signing_secret: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            signing_secret: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4600
}

fn default_tier() -> Tier {
    Tier::Authenticated
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_unauthorized_path() -> String {
    "/".to_string()
}

fn default_cookie_name() -> String {
    "folio_session".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
