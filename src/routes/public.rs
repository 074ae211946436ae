use std::io::Cursor;
use std::sync::Arc;

use rocket::http::ContentType;
use rocket::request::Request;
use rocket::response::{Responder, Response};
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::block::{BlockPayload, BlogBlock};
use crate::pdf;
use crate::render;
use crate::sitemap;
use crate::store::Store;

pub fn routes() -> Vec<rocket::Route> {
    routes![
        home,
        blog_index,
        blog_detail,
        projects_index,
        project_detail,
        resume_page,
        resume_download,
        sitemap_xml,
    ]
}

// ── Page data loaders ──────────────────────────────────

#[get("/")]
pub fn home(store: &State<Arc<dyn Store>>) -> Json<Value> {
    Json(json!({
        "recent_blog_posts": store.post_recent(3),
        "featured_projects": store.project_recent(6),
    }))
}

#[get("/blog")]
pub fn blog_index(store: &State<Arc<dyn Store>>) -> Json<Value> {
    Json(json!({ "posts": store.post_list(Some("published")) }))
}

#[get("/blog/<slug>")]
pub fn blog_detail(store: &State<Arc<dyn Store>>, slug: &str) -> Result<Json<Value>, AppError> {
    let post = store
        .post_find_by_slug(slug)
        .filter(|p| p.status == "published")
        .ok_or_else(|| AppError::not_found("Blog post"))?;

    let blocks: Vec<Value> = store.block_list(&post.id).iter().map(block_view).collect();

    Ok(Json(json!({ "post": post, "blocks": blocks })))
}

/// Public view of a block: the raw payload document plus, for text
/// blocks, the markdown rendered to HTML.
fn block_view(block: &BlogBlock) -> Value {
    let content: Value = serde_json::from_str(&block.content).unwrap_or_else(|_| json!({}));
    let mut view = json!({
        "id": block.id,
        "type": block.kind,
        "order": block.order,
        "content": content,
    });
    if let Ok(BlockPayload::Text { content }) = block.payload() {
        view["html"] = Value::String(render::markdown_to_html(&content));
    }
    view
}

#[get("/projects")]
pub fn projects_index(store: &State<Arc<dyn Store>>) -> Json<Value> {
    Json(json!({ "projects": store.project_list(Some("published")) }))
}

#[get("/projects/<id>")]
pub fn project_detail(store: &State<Arc<dyn Store>>, id: &str) -> Result<Json<Value>, AppError> {
    let project = store
        .project_find(id)
        .filter(|p| p.status == "published")
        .ok_or_else(|| AppError::not_found("Project"))?;
    Ok(Json(json!({ "project": project })))
}

#[get("/resume")]
pub fn resume_page(store: &State<Arc<dyn Store>>) -> Json<Value> {
    match store.resume_get() {
        Some(resume) => {
            let experiences = store.experience_list(&resume.id);
            let educations = store.education_list(&resume.id);
            let skills = store.skill_list(&resume.id);
            let social_links = store.social_link_list(&resume.id);
            Json(json!({
                "resume": resume,
                "experiences": experiences,
                "educations": educations,
                "skills": skills,
                "social_links": social_links,
            }))
        }
        None => Json(json!({
            "resume": null,
            "experiences": [],
            "educations": [],
            "skills": [],
            "social_links": [],
        })),
    }
}

// ── Resume PDF export ──────────────────────────────────

pub struct PdfAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl<'r> Responder<'r, 'static> for PdfAttachment {
    fn respond_to(self, _req: &'r Request<'_>) -> rocket::response::Result<'static> {
        Response::build()
            .header(ContentType::PDF)
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.filename),
            )
            .sized_body(self.bytes.len(), Cursor::new(self.bytes))
            .ok()
    }
}

#[get("/resume/download")]
pub fn resume_download(store: &State<Arc<dyn Store>>) -> Result<PdfAttachment, AppError> {
    let resume = store
        .resume_get()
        .ok_or_else(|| AppError::not_found("Resume"))?;

    let experiences = store.experience_list(&resume.id);
    let educations = store.education_list(&resume.id);
    let skills = store.skill_list(&resume.id);
    let social_links = store.social_link_list(&resume.id);

    let bytes = pdf::render(&resume, &experiences, &educations, &skills, &social_links)
        .map_err(AppError::internal)?;

    Ok(PdfAttachment {
        filename: pdf::attachment_filename(&resume.full_name),
        bytes,
    })
}

// ── Sitemap ────────────────────────────────────────────

pub struct CachedXml(pub String);

impl<'r> Responder<'r, 'static> for CachedXml {
    fn respond_to(self, _req: &'r Request<'_>) -> rocket::response::Result<'static> {
        Response::build()
            .header(ContentType::XML)
            .raw_header("Cache-Control", "max-age=3600")
            .sized_body(self.0.len(), Cursor::new(self.0))
            .ok()
    }
}

#[get("/sitemap.xml")]
pub fn sitemap_xml(store: &State<Arc<dyn Store>>) -> CachedXml {
    CachedXml(sitemap::generate(store.inner().as_ref()))
}
