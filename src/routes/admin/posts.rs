use std::sync::Arc;

use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{check_status, delete_blob, delete_blob_sync, upload_image};
use crate::ai;
use crate::error::AppError;
use crate::models::block::BlockPayload;
use crate::models::post::BlogPostForm;
use crate::security::auth::AdminUser;
use crate::store::{ReorderError, Store};
use crate::validate;

pub fn routes() -> Vec<rocket::Route> {
    routes![
        list,
        detail,
        create,
        update,
        delete,
        ai_summary,
        block_add,
        block_update,
        block_delete,
        block_reorder,
    ]
}

// ── Posts ───────────────────────────────────────────────

#[get("/blog?<status>")]
pub fn list(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    status: Option<String>,
) -> Json<Value> {
    Json(json!({ "posts": store.post_list(status.as_deref()) }))
}

#[get("/blog/<id>")]
pub fn detail(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
) -> Result<Json<Value>, AppError> {
    let post = store
        .post_find(id)
        .ok_or_else(|| AppError::not_found("Blog post"))?;
    let blocks = store.block_list(id);
    Ok(Json(json!({ "post": post, "blocks": blocks })))
}

#[derive(FromForm)]
pub struct PostUpload<'f> {
    pub title: String,
    pub slug: Option<String>,
    pub manual_summary: Option<String>,
    pub status: String,
    pub featured_image: Option<TempFile<'f>>,
    pub remove_featured_image: Option<bool>,
}

/// Resolve and check the slug: explicit values must already be
/// URL-friendly, a blank one is generated from the title.
fn resolve_slug(title: &str, given: Option<&str>) -> Result<String, AppError> {
    match given.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => {
            if !validate::slug(s) {
                return Err(AppError::invalid(
                    "Slug must contain only lowercase letters, numbers, and hyphens",
                ));
            }
            Ok(s.to_string())
        }
        None => Ok(slug::slugify(title)),
    }
}

#[post("/blog", data = "<form>")]
pub async fn create(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    mut form: Form<PostUpload<'_>>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();

    let title = validate::required(&form.title)
        .ok_or_else(|| AppError::invalid("Blog post title is required"))?;
    let slug = resolve_slug(&title, form.slug.as_deref())?;
    if store.post_find_by_slug(&slug).is_some() {
        return Err(AppError::invalid("Slug is already in use"));
    }
    let status = check_status(&form.status)?;

    let featured_image = match form.featured_image.as_mut() {
        Some(file) if file.len() > 0 => Some(upload_image(store, file, "blog").await?),
        _ => None,
    };

    let post = BlogPostForm {
        title,
        slug,
        manual_summary: validate::optional(form.manual_summary.as_deref()),
        featured_image,
        status,
    };
    let id = store.post_create(&post).map_err(AppError::internal)?;

    Ok(Json(json!({ "success": true, "id": id })))
}

#[post("/blog/<id>", data = "<form>")]
pub async fn update(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
    mut form: Form<PostUpload<'_>>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let current = store
        .post_find(id)
        .ok_or_else(|| AppError::not_found("Blog post"))?;

    let title = validate::required(&form.title)
        .ok_or_else(|| AppError::invalid("Blog post title is required"))?;
    let slug = resolve_slug(&title, form.slug.as_deref())?;
    if let Some(other) = store.post_find_by_slug(&slug) {
        if other.id != current.id {
            return Err(AppError::invalid("Slug is already in use"));
        }
    }
    let status = check_status(&form.status)?;

    let mut featured_image = current.featured_image.clone();

    if form.remove_featured_image.unwrap_or(false) {
        if let Some(url) = featured_image.take() {
            delete_blob(store, &url).await;
        }
    }

    if let Some(file) = form.featured_image.as_mut() {
        if file.len() > 0 {
            let new_url = upload_image(store, file, "blog").await?;
            if let Some(old) = featured_image.take() {
                delete_blob(store, &old).await;
            }
            featured_image = Some(new_url);
        }
    }

    let post = BlogPostForm {
        title,
        slug,
        manual_summary: validate::optional(form.manual_summary.as_deref()),
        featured_image,
        status,
    };
    store.post_update(id, &post).map_err(AppError::internal)?;

    Ok(Json(json!({ "success": true })))
}

/// Deleting a post cascades over its blocks in the store, then clears the
/// associated blobs. A blob that fails to delete is orphaned and logged,
/// never an error to the caller.
#[post("/blog/<id>/delete")]
pub fn delete(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let post = store
        .post_find(id)
        .ok_or_else(|| AppError::not_found("Blog post"))?;

    let mut blob_urls: Vec<String> = Vec::new();
    if let Some(url) = post.featured_image.as_deref() {
        blob_urls.push(url.to_string());
    }
    for block in store.block_list(id) {
        if let Ok(payload) = block.payload() {
            if let Some(url) = payload.image_url() {
                blob_urls.push(url.to_string());
            }
        }
    }

    store.post_delete(id).map_err(AppError::internal)?;

    for url in &blob_urls {
        delete_blob_sync(store, url);
    }

    Ok(Json(json!({ "success": true })))
}

// ── AI summary ──────────────────────────────────────────

#[derive(FromForm)]
pub struct AiSummaryForm {
    pub title: Option<String>,
    pub manual_summary: Option<String>,
}

#[post("/blog/<id>/ai-summary", data = "<form>")]
pub fn ai_summary(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
    form: Form<AiSummaryForm>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let post = store
        .post_find(id)
        .ok_or_else(|| AppError::not_found("Blog post"))?;

    // Prefer the (possibly unsaved) editor values over the stored row
    let title = validate::optional(form.title.as_deref()).unwrap_or_else(|| post.title.clone());
    let manual =
        validate::optional(form.manual_summary.as_deref()).or_else(|| post.manual_summary.clone());

    let summary = ai::generate_summary(store, &title, manual.as_deref())
        .map_err(|e| AppError::ServiceUnavailable(e.0))?;
    store
        .post_set_ai_summary(id, &summary)
        .map_err(AppError::internal)?;

    Ok(Json(json!({ "success": true, "aiSummary": summary })))
}

// ── Blocks ──────────────────────────────────────────────

#[derive(FromForm)]
pub struct BlockAdd {
    #[field(name = "type")]
    pub kind: String,
}

#[post("/blog/<id>/blocks", data = "<form>")]
pub fn block_add(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
    form: Form<BlockAdd>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    store
        .post_find(id)
        .ok_or_else(|| AppError::not_found("Blog post"))?;

    let payload = BlockPayload::empty(form.kind.trim()).map_err(AppError::invalid)?;
    let block = store
        .block_append(id, &payload)
        .map_err(AppError::internal)?;

    Ok(Json(json!({ "success": true, "block": block })))
}

#[derive(FromForm)]
pub struct BlockUpdate<'f> {
    pub content: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
    pub image: Option<TempFile<'f>>,
    pub remove_image: Option<bool>,
}

/// Per-variant block edit. The variant comes from the stored row, never
/// from the client; the match below is exhaustive over the payload type.
#[post("/blog/blocks/<block_id>", data = "<form>")]
pub async fn block_update(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    block_id: &str,
    mut form: Form<BlockUpdate<'_>>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let block = store
        .block_find(block_id)
        .ok_or_else(|| AppError::not_found("Block"))?;
    let current = block.payload().map_err(AppError::internal)?;

    let payload = match current {
        BlockPayload::Text { .. } => BlockPayload::Text {
            content: form.content.clone().unwrap_or_default(),
        },
        BlockPayload::Image { url: old_url, .. } => {
            let mut url = old_url;

            if form.remove_image.unwrap_or(false) && !url.is_empty() {
                delete_blob(store, &url).await;
                url = String::new();
            }

            if let Some(file) = form.image.as_mut() {
                if file.len() > 0 {
                    let new_url = upload_image(store, file, "blog/blocks").await?;
                    if !url.is_empty() {
                        delete_blob(store, &url).await;
                    }
                    url = new_url;
                }
            }

            BlockPayload::Image {
                url,
                alt: form.alt.clone().unwrap_or_default(),
                caption: form.caption.clone().unwrap_or_default(),
            }
        }
        BlockPayload::Youtube { .. } => BlockPayload::Youtube {
            url: form.url.clone().unwrap_or_default(),
            title: form.title.clone().unwrap_or_default(),
        },
        BlockPayload::Link { .. } => BlockPayload::Link {
            url: form.url.clone().unwrap_or_default(),
            title: form.title.clone().unwrap_or_default(),
            description: form.description.clone().unwrap_or_default(),
        },
    };

    store
        .block_update_content(block_id, &payload)
        .map_err(AppError::internal)?;

    Ok(Json(json!({ "success": true })))
}

#[post("/blog/blocks/<block_id>/delete")]
pub fn block_delete(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    block_id: &str,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let block = store
        .block_find(block_id)
        .ok_or_else(|| AppError::not_found("Block"))?;

    store.block_delete(block_id).map_err(AppError::internal)?;

    if let Ok(payload) = block.payload() {
        if let Some(url) = payload.image_url() {
            delete_blob_sync(store, url);
        }
    }

    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub block_ids: Vec<String>,
}

#[post("/blog/<id>/blocks/reorder", format = "json", data = "<req>")]
pub fn block_reorder(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
    req: Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    store
        .post_find(id)
        .ok_or_else(|| AppError::not_found("Blog post"))?;

    match store.block_reorder(id, &req.block_ids) {
        Ok(()) => Ok(Json(json!({ "success": true }))),
        Err(ReorderError::Mismatch) => Err(AppError::invalid(
            "Block ids do not match this post's blocks",
        )),
        Err(ReorderError::Db(e)) => Err(AppError::internal(e)),
    }
}
