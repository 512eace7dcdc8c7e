use thiserror::Error;

/// Top-level error type for the Folio backend.
///
/// Credential failures are deliberately *not* represented here — they are
/// expected per-request outcomes handled inside the gate, never surfaced as
/// server errors. This enum covers the startup-time failures that must
/// prevent the process from serving traffic.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("empty signing secret")]
    EmptySigningSecret,
}
