use std::sync::Arc;

use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::security::auth::AdminUser;
use crate::store::Store;

pub fn routes() -> Vec<rocket::Route> {
    routes![list, contact_delete, feedback_delete]
}

/// Incoming form submissions, most recent first.
#[get("/requests")]
pub fn list(_admin: AdminUser, store: &State<Arc<dyn Store>>) -> Json<Value> {
    Json(json!({
        "contact_submissions": store.contact_list(),
        "feedback_submissions": store.feedback_list(),
    }))
}

#[post("/requests/contact/<id>/delete")]
pub fn contact_delete(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
) -> Result<Json<Value>, AppError> {
    store.contact_delete(id).map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true })))
}

#[post("/requests/feedback/<id>/delete")]
pub fn feedback_delete(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
) -> Result<Json<Value>, AppError> {
    store.feedback_delete(id).map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true })))
}
