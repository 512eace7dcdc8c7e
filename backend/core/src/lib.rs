//! `folio-core` — access-gate decision logic for the Folio backend.
//!
//! Everything needed to answer "may this request proceed?" lives here:
//! - The route classification table (path prefix → visibility tier)
//! - Session credential verification (signed claims → principal)
//! - The gate itself: classify → verify → authorize, producing a pass or
//!   a redirect decision
//!
//! The gate is a pure function of (path, credential, table, clock). It has
//! no side effects, holds no per-request state, and is safe to call from
//! any number of concurrent requests.

pub mod credential;
pub mod error;
pub mod gate;
pub mod principal;
pub mod routes;

pub use credential::{CredentialError, CredentialVerifier, SessionClaims};
pub use error::FolioError;
pub use gate::{AccessGate, AdminPolicy, GateDecision};
pub use principal::{Principal, Role};
pub use routes::{RouteRule, RouteTable, Tier};
