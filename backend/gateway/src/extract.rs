//! Handler-side access to the verified principal.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts, http::StatusCode};

use folio_core::Principal;

/// Extractor for the principal the gate verified for this request.
///
/// Only present on routes the gate classified as protected; on public
/// routes credentials are never inspected, so there is nothing to extract.
/// A handler on a protected route can rely on this succeeding — the gate
/// runs first — but the rejection keeps misuse from panicking.
pub struct CurrentUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "No verified principal for this request",
            ))
    }
}
