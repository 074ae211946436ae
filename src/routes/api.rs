use std::sync::Arc;

use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::ai;
use crate::error::AppError;
use crate::security::auth::AdminUser;
use crate::store::Store;
use crate::validate;

pub fn routes() -> Vec<rocket::Route> {
    routes![generate_ai_summary]
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub title: String,
    #[serde(rename = "manualSummary")]
    pub manual_summary: Option<String>,
}

/// Proxy to the hosted text-generation model. The response is clamped to
/// 200 characters with any leading "Summary:" label removed.
#[post("/generate-ai-summary", format = "json", data = "<req>")]
pub fn generate_ai_summary(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    req: Json<SummaryRequest>,
) -> Result<Json<Value>, AppError> {
    let title =
        validate::required(&req.title).ok_or_else(|| AppError::invalid("Title is required"))?;
    let manual = validate::optional(req.manual_summary.as_deref());

    let summary = ai::generate_summary(store.inner().as_ref(), &title, manual.as_deref())
        .map_err(|e| AppError::ServiceUnavailable(e.0))?;

    Ok(Json(json!({ "aiSummary": summary })))
}
