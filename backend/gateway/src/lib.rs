//! Folio Gateway HTTP Server
//!
//! Hosts the portfolio routes behind the access gate: a middleware layer
//! classifies every request, verifies the session credential, and either
//! forwards to the handler or redirects to the login/unauthorized page.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use middleware::access_gate;
pub use server::{build_router, start_server, GatewayState};
