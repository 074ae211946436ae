use rocket::fs::TempFile;
use rocket::tokio::io::AsyncReadExt;
use rocket::tokio::task::spawn_blocking;

use crate::error::AppError;
use crate::storage::{self, ObjectStore};
use crate::store::Store;

pub mod posts;
pub mod projects;
pub mod requests;
pub mod resume;

pub fn routes() -> Vec<rocket::Route> {
    [
        projects::routes(),
        posts::routes(),
        resume::routes(),
        requests::routes(),
    ]
    .concat()
}

/// Pull an uploaded file into memory: (bytes, content type, extension).
/// The extension is taken from the content type first, then the original
/// filename.
pub(crate) async fn read_upload(
    file: &mut TempFile<'_>,
) -> Result<(Vec<u8>, String, String), AppError> {
    let content_type = file
        .content_type()
        .map(|ct| ct.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let ext = file
        .content_type()
        .and_then(|ct| ct.extension())
        .map(|e| e.to_string())
        .or_else(|| {
            file.raw_name().and_then(|rn| {
                let s = rn.dangerous_unsafe_unsanitized_raw().as_str().to_string();
                s.rsplit('.').next().map(|e| e.to_lowercase())
            })
        })
        .unwrap_or_else(|| "jpg".to_string());

    let mut handle = file
        .open()
        .await
        .map_err(|e| AppError::internal(e.to_string()))?;
    let mut bytes = Vec::with_capacity(file.len() as usize);
    handle
        .read_to_end(&mut bytes)
        .await
        .map_err(|e| AppError::internal(e.to_string()))?;

    Ok((bytes, content_type, ext))
}

/// Validate and upload an image read from a multipart field, returning its
/// public URL. The gateway call runs on a blocking thread.
pub(crate) async fn upload_image(
    store: &dyn Store,
    file: &mut TempFile<'_>,
    prefix: &str,
) -> Result<String, AppError> {
    let (bytes, content_type, ext) = read_upload(file).await?;
    storage::validate_image(&bytes).map_err(AppError::invalid)?;

    let gateway = ObjectStore::from_settings(store).map_err(AppError::ServiceUnavailable)?;
    let key = storage::object_key(prefix, &ext);

    spawn_blocking(move || gateway.upload(&bytes, &content_type, &key))
        .await
        .map_err(|e| AppError::internal(e.to_string()))?
        .map_err(AppError::ServiceUnavailable)
}

/// Best-effort blob removal from an async handler. Failures are logged,
/// never surfaced: the worst case is an orphaned blob.
pub(crate) async fn delete_blob(store: &dyn Store, url: &str) {
    let gateway = match ObjectStore::from_settings(store) {
        Ok(g) => g,
        Err(e) => {
            log::warn!("Cannot delete blob {}: {}", url, e);
            return;
        }
    };
    let Some(key) = storage::key_from_url(url) else {
        log::warn!("Cannot derive object key from url {}", url);
        return;
    };

    let url = url.to_string();
    let result = spawn_blocking(move || gateway.delete(&key)).await;
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::warn!("Failed to delete stored blob {}: {}", url, e),
        Err(e) => log::warn!("Blob delete task failed for {}: {}", url, e),
    }
}

/// Best-effort blob removal from a sync handler.
pub(crate) fn delete_blob_sync(store: &dyn Store, url: &str) {
    let gateway = match ObjectStore::from_settings(store) {
        Ok(g) => g,
        Err(e) => {
            log::warn!("Cannot delete blob {}: {}", url, e);
            return;
        }
    };
    match storage::key_from_url(url) {
        Some(key) => {
            if let Err(e) = gateway.delete(&key) {
                log::warn!("Failed to delete stored blob {}: {}", url, e);
            }
        }
        None => log::warn!("Cannot derive object key from url {}", url),
    }
}

/// The two publish states accepted from admin forms.
pub(crate) fn check_status(status: &str) -> Result<String, AppError> {
    match status {
        "draft" | "published" => Ok(status.to_string()),
        _ => Err(AppError::invalid("Invalid status")),
    }
}
