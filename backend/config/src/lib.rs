//! `folio-config` — Folio backend configuration management.
//!
//! Provides:
//! - Typed config schema (gateway listener, gate route table, session)
//! - YAML loading with `${ENV_VAR}` substitution
//! - Deep validation with an error/warning report
//! - Config redaction for safe logging/display

pub mod env;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use redact::redact;
pub use schema::{
    AdminPolicySection, FolioConfig, GateSection, GatewaySection, LoggingSection, SessionSection,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use std::path::Path;

/// Load and prepare a config file: read, substitute env vars, deserialize,
/// validate.
///
/// This is the main entry point for loading a config at runtime. Returns
/// the typed config together with the validation report so callers can
/// decide how strict to be (`check-config` prints everything; `serve`
/// refuses to start on errors).
pub async fn load_and_validate(path: &Path) -> Result<(FolioConfig, ValidationReport)> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let value: serde_json::Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML: {}", path.display()))?;

    // Substitute ${VAR} env vars before typing the tree.
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;

    let config: FolioConfig =
        serde_json::from_value(value).context("Failed to deserialize config")?;

    let report = validate(&config);
    Ok((config, report))
}
