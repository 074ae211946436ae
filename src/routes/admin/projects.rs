use std::sync::Arc;

use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use super::{check_status, delete_blob, delete_blob_sync, upload_image};
use crate::error::AppError;
use crate::models::project::ProjectForm;
use crate::security::auth::AdminUser;
use crate::store::Store;
use crate::validate;

pub fn routes() -> Vec<rocket::Route> {
    routes![list, create, update, delete]
}

#[get("/projects?<status>")]
pub fn list(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    status: Option<String>,
) -> Json<Value> {
    Json(json!({ "projects": store.project_list(status.as_deref()) }))
}

#[derive(FromForm)]
pub struct ProjectUpload<'f> {
    pub name: String,
    pub short_description: Option<String>,
    pub optional_link: Option<String>,
    pub full_description: Option<String>,
    pub extra_details: Option<String>,
    pub status: String,
    pub image: Option<TempFile<'f>>,
    pub remove_image: Option<bool>,
}

fn project_form(form: &ProjectUpload<'_>, image: Option<String>) -> Result<ProjectForm, AppError> {
    let name = validate::required(&form.name)
        .ok_or_else(|| AppError::invalid("Project name is required"))?;
    let status = check_status(&form.status)?;

    Ok(ProjectForm {
        name,
        image,
        short_description: validate::optional(form.short_description.as_deref()),
        optional_link: validate::optional(form.optional_link.as_deref()),
        full_description: validate::optional(form.full_description.as_deref()),
        extra_details: validate::optional(form.extra_details.as_deref()),
        status,
    })
}

#[post("/projects", data = "<form>")]
pub async fn create(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    mut form: Form<ProjectUpload<'_>>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();

    let image = match form.image.as_mut() {
        Some(file) if file.len() > 0 => Some(upload_image(store, file, "projects").await?),
        _ => None,
    };

    let project = project_form(&form, image)?;
    let id = store.project_create(&project).map_err(AppError::internal)?;

    Ok(Json(json!({ "success": true, "id": id })))
}

#[post("/projects/<id>", data = "<form>")]
pub async fn update(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
    mut form: Form<ProjectUpload<'_>>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let current = store
        .project_find(id)
        .ok_or_else(|| AppError::not_found("Project"))?;

    let mut image = current.image.clone();

    if form.remove_image.unwrap_or(false) {
        if let Some(url) = image.take() {
            delete_blob(store, &url).await;
        }
    }

    if let Some(file) = form.image.as_mut() {
        if file.len() > 0 {
            // The old blob goes only after the new upload is confirmed;
            // an upload failure leaves the record untouched.
            let new_url = upload_image(store, file, "projects").await?;
            if let Some(old) = image.take() {
                delete_blob(store, &old).await;
            }
            image = Some(new_url);
        }
    }

    let project = project_form(&form, image)?;
    store
        .project_update(id, &project)
        .map_err(AppError::internal)?;

    Ok(Json(json!({ "success": true })))
}

#[post("/projects/<id>/delete")]
pub fn delete(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let project = store
        .project_find(id)
        .ok_or_else(|| AppError::not_found("Project"))?;

    store.project_delete(id).map_err(AppError::internal)?;

    if let Some(url) = project.image.as_deref() {
        delete_blob_sync(store, url);
    }

    Ok(Json(json!({ "success": true })))
}
