//! Route handlers.
//!
//! These are thin placeholders standing in for the rendering and project
//! CRUD collaborators — the interesting part is which tier each route sits
//! behind, not what it returns.

use axum::{extract::Query, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::extract::CurrentUser;

pub async fn home() -> Json<Value> {
    Json(json!({ "page": "home" }))
}

pub async fn about() -> Json<Value> {
    Json(json!({ "page": "about" }))
}

pub async fn projects() -> Json<Value> {
    Json(json!({ "page": "projects", "items": [] }))
}

/// Login page. Echoes the `from` parameter so the authentication
/// collaborator can send the user back where they were headed.
pub async fn login(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "page": "login",
        "returnTo": params.get("from").cloned().unwrap_or_else(|| "/".to_string()),
    }))
}

pub async fn unauthorized() -> Json<Value> {
    Json(json!({ "page": "unauthorized" }))
}

pub async fn dashboard(CurrentUser(principal): CurrentUser) -> Json<Value> {
    Json(json!({
        "page": "dashboard",
        "subject": principal.subject,
    }))
}

pub async fn admin_panel(CurrentUser(principal): CurrentUser) -> Json<Value> {
    Json(json!({
        "page": "admin",
        "subject": principal.subject,
        "role": principal.role,
    }))
}

pub async fn admin_projects(CurrentUser(_principal): CurrentUser) -> Json<Value> {
    Json(json!({ "projects": [] }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
