//! Access-gate middleware — runs the gate decision before every handler.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use folio_core::GateDecision;

use crate::server::GatewayState;

/// Gate every inbound request.
///
/// For each request:
/// 1. CORS preflight requests pass through untouched
/// 2. The session credential is read from the configured cookie, falling
///    back to an `Authorization: Bearer` header for API clients
/// 3. The gate classifies the path and verifies/authorizes the credential
/// 4. Allow forwards to the handler (with the principal in request
///    extensions); denials become `303` redirects
pub async fn access_gate(
    State(state): State<GatewayState>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_preflight_request(req.method(), req.headers()) {
        return next.run(req).await;
    }

    let path = req.uri().path().to_string();
    let credential = extract_credential(req.headers(), &state.cookie_name);

    match state.gate.decide(&path, credential.as_deref()) {
        GateDecision::Allow { principal } => {
            if let Some(principal) = principal {
                req.extensions_mut().insert(principal);
            }
            next.run(req).await
        }
        GateDecision::RedirectLogin { return_to } => {
            debug!(path = %path, "Redirecting to login");
            Redirect::to(&login_url(state.gate.login_path(), &return_to)).into_response()
        }
        GateDecision::RedirectUnauthorized => {
            debug!(path = %path, "Redirecting to unauthorized page");
            Redirect::to(state.gate.unauthorized_path()).into_response()
        }
    }
}

/// Build the login redirect URL, carrying the original path verbatim in the
/// `from` query parameter.
fn login_url(login_path: &str, return_to: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("from", return_to)
        .finish();
    format!("{login_path}?{query}")
}

/// Read the session credential from the named cookie, or fall back to a
/// bearer token.
fn extract_credential(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(token) = cookie_value(headers, cookie_name) {
        return Some(token);
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in raw.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some(name) {
            return parts.next().map(str::to_string);
        }
    }
    None
}

/// CORS preflight requests are OPTIONS with Origin and
/// Access-Control-Request-Method headers; browsers never attach
/// credentials to them, so gating them would only break CORS.
fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}
