//! Config validation: deep checks with user-friendly error messages.
//!
//! Errors here are fatal — the process must not serve traffic with a
//! misconfigured gate. Warnings are logged and serving continues.

use folio_core::Tier;
use thiserror::Error;

use crate::schema::{AdminPolicySection, FolioConfig};

/// A config validation finding with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one validation pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &FolioConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_session(config, &mut report);
    validate_routes(config, &mut report);
    validate_admin_policy(config, &mut report);
    validate_redirect_targets(config, &mut report);
    validate_gateway(config, &mut report);
    report
}

/// The signing secret is the one thing the gate cannot run without.
fn validate_session(config: &FolioConfig, report: &mut ValidationReport) {
    if config.gate.session.signing_secret.trim().is_empty() {
        report.error(
            "gate.session.signingSecret",
            "Signing secret is required; set FOLIO_SESSION_SECRET and reference it as ${FOLIO_SESSION_SECRET}",
        );
    }
    if config.gate.session.cookie_name.trim().is_empty() {
        report.error("gate.session.cookieName", "Cookie name cannot be empty");
    }
}

fn validate_routes(config: &FolioConfig, report: &mut ValidationReport) {
    if config.gate.routes.is_empty() {
        report.warn(
            "gate.routes",
            format!(
                "Route table is empty; every path will be treated as {:?}",
                config.gate.default_tier
            ),
        );
    }
    for (i, rule) in config.gate.routes.iter().enumerate() {
        if !rule.pattern.starts_with('/') {
            report.error(
                format!("gate.routes[{i}].pattern"),
                format!("Pattern '{}' must start with '/'", rule.pattern),
            );
        }
    }
}

fn validate_admin_policy(config: &FolioConfig, report: &mut ValidationReport) {
    if let AdminPolicySection::Subjects { subjects } = &config.gate.admin_policy {
        if subjects.is_empty() {
            report.error(
                "gate.adminPolicy.subjects",
                "Subject allowlist policy with no subjects would deny every admin request",
            );
        }
        for (i, subject) in subjects.iter().enumerate() {
            if subject.trim().is_empty() {
                report.error(
                    format!("gate.adminPolicy.subjects[{i}]"),
                    "Subject identifier cannot be empty",
                );
            }
        }
    }
}

/// A login path that itself requires login is a redirect loop.
fn validate_redirect_targets(config: &FolioConfig, report: &mut ValidationReport) {
    let table = config.gate.route_table();
    if table.classify(&config.gate.login_path) != Tier::Public {
        report.error(
            "gate.loginPath",
            format!(
                "Login path '{}' does not classify as public; unauthenticated users could never reach it",
                config.gate.login_path
            ),
        );
    }
    if table.classify(&config.gate.unauthorized_path) != Tier::Public {
        report.warn(
            "gate.unauthorizedPath",
            format!(
                "Unauthorized path '{}' is not public; denied admins will bounce through login",
                config.gate.unauthorized_path
            ),
        );
    }
}

fn validate_gateway(config: &FolioConfig, report: &mut ValidationReport) {
    let port = config.gateway.port;
    if port < 1024 && port != 80 && port != 443 {
        report.warn(
            "gateway.port",
            format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
        );
    }
}
