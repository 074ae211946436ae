use std::sync::Arc;

use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::resume::{
    EducationForm, ExperienceForm, ResumeForm, SkillForm, SocialLinkForm, SKILL_CATEGORIES,
    SKILL_LEVELS, SOCIAL_PLATFORMS,
};
use crate::security::auth::AdminUser;
use crate::store::{ReorderError, Store};
use crate::validate;

pub fn routes() -> Vec<rocket::Route> {
    routes![
        detail,
        upsert,
        experience_add,
        experience_update,
        experience_delete,
        experience_reorder,
        education_add,
        education_update,
        education_delete,
        education_reorder,
        skill_add,
        skill_update,
        skill_delete,
        skill_reorder,
        social_link_add,
        social_link_update,
        social_link_delete,
        social_link_reorder,
    ]
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<String>,
}

fn lift_reorder(result: Result<(), ReorderError>, what: &str) -> Result<Json<Value>, AppError> {
    match result {
        Ok(()) => Ok(Json(json!({ "success": true }))),
        Err(ReorderError::Mismatch) => Err(AppError::invalid(format!(
            "{} ids do not match the resume's entries",
            what
        ))),
        Err(ReorderError::Db(e)) => Err(AppError::internal(e)),
    }
}

fn require_resume(store: &dyn Store) -> Result<String, AppError> {
    store
        .resume_get()
        .map(|r| r.id)
        .ok_or_else(|| AppError::not_found("Resume"))
}

/// `YYYY-MM` check for the date fields; end dates may be blank (ongoing).
fn check_dates(start: &str, end: Option<&str>) -> Result<(), AppError> {
    if !validate::year_month(start) {
        return Err(AppError::invalid("Start date must be in YYYY-MM format"));
    }
    if let Some(end) = end {
        if !validate::year_month(end) {
            return Err(AppError::invalid("End date must be in YYYY-MM format"));
        }
    }
    Ok(())
}

// ── Resume record ───────────────────────────────────────

#[get("/resume")]
pub fn detail(_admin: AdminUser, store: &State<Arc<dyn Store>>) -> Json<Value> {
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

#[derive(FromForm)]
pub struct ResumeUpload {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
}

#[post("/resume", data = "<form>")]
pub fn upsert(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    form: Form<ResumeUpload>,
) -> Result<Json<Value>, AppError> {
    let full_name = validate::required(&form.full_name)
        .ok_or_else(|| AppError::invalid("Full name is required"))?;
    let title =
        validate::required(&form.title).ok_or_else(|| AppError::invalid("Title is required"))?;
    let email =
        validate::required(&form.email).ok_or_else(|| AppError::invalid("Email is required"))?;
    if !validate::email(&email) {
        return Err(AppError::invalid("Please enter a valid email address"));
    }

    let resume = ResumeForm {
        full_name,
        title,
        email,
        phone: validate::optional(form.phone.as_deref()),
        location: validate::optional(form.location.as_deref()),
        website: validate::optional(form.website.as_deref()),
        summary: validate::optional(form.summary.as_deref()),
    };

    let id = store.resume_upsert(&resume).map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true, "id": id })))
}

// ── Experiences ─────────────────────────────────────────

#[derive(FromForm)]
pub struct ExperienceUpload {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

fn experience_form(form: &ExperienceUpload) -> Result<ExperienceForm, AppError> {
    let company = validate::required(&form.company)
        .ok_or_else(|| AppError::invalid("Company is required"))?;
    let position = validate::required(&form.position)
        .ok_or_else(|| AppError::invalid("Position is required"))?;
    let start_date = validate::required(&form.start_date)
        .ok_or_else(|| AppError::invalid("Start date is required"))?;
    let end_date = validate::optional(form.end_date.as_deref());
    check_dates(&start_date, end_date.as_deref())?;

    Ok(ExperienceForm {
        company,
        position,
        start_date,
        end_date,
        description: validate::optional(form.description.as_deref()),
        location: validate::optional(form.location.as_deref()),
    })
}

#[post("/resume/experiences", data = "<form>")]
pub fn experience_add(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    form: Form<ExperienceUpload>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let entry = experience_form(&form)?;
    let resume_id = store.resume_get_or_create().map_err(AppError::internal)?;
    let id = store
        .experience_append(&resume_id, &entry)
        .map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true, "id": id })))
}

#[post("/resume/experiences/<id>", data = "<form>")]
pub fn experience_update(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
    form: Form<ExperienceUpload>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    store
        .experience_find(id)
        .ok_or_else(|| AppError::not_found("Experience"))?;
    let entry = experience_form(&form)?;
    store
        .experience_update(id, &entry)
        .map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true })))
}

#[post("/resume/experiences/<id>/delete")]
pub fn experience_delete(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    store
        .experience_find(id)
        .ok_or_else(|| AppError::not_found("Experience"))?;
    store.experience_delete(id).map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true })))
}

#[post("/resume/experiences/reorder", format = "json", data = "<req>")]
pub fn experience_reorder(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    req: Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let resume_id = require_resume(store)?;
    lift_reorder(store.experience_reorder(&resume_id, &req.ids), "Experience")
}

// ── Education ───────────────────────────────────────────

#[derive(FromForm)]
pub struct EducationUpload {
    pub institution: String,
    pub degree: String,
    pub field: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub description: Option<String>,
}

fn education_form(form: &EducationUpload) -> Result<EducationForm, AppError> {
    let institution = validate::required(&form.institution)
        .ok_or_else(|| AppError::invalid("Institution is required"))?;
    let degree =
        validate::required(&form.degree).ok_or_else(|| AppError::invalid("Degree is required"))?;
    let start_date = validate::required(&form.start_date)
        .ok_or_else(|| AppError::invalid("Start date is required"))?;
    let end_date = validate::optional(form.end_date.as_deref());
    check_dates(&start_date, end_date.as_deref())?;

    Ok(EducationForm {
        institution,
        degree,
        field: validate::optional(form.field.as_deref()),
        start_date,
        end_date,
        gpa: validate::optional(form.gpa.as_deref()),
        description: validate::optional(form.description.as_deref()),
    })
}

#[post("/resume/educations", data = "<form>")]
pub fn education_add(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    form: Form<EducationUpload>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let entry = education_form(&form)?;
    let resume_id = store.resume_get_or_create().map_err(AppError::internal)?;
    let id = store
        .education_append(&resume_id, &entry)
        .map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true, "id": id })))
}

#[post("/resume/educations/<id>", data = "<form>")]
pub fn education_update(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
    form: Form<EducationUpload>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    store
        .education_find(id)
        .ok_or_else(|| AppError::not_found("Education entry"))?;
    let entry = education_form(&form)?;
    store
        .education_update(id, &entry)
        .map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true })))
}

#[post("/resume/educations/<id>/delete")]
pub fn education_delete(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    store
        .education_find(id)
        .ok_or_else(|| AppError::not_found("Education entry"))?;
    store.education_delete(id).map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true })))
}

#[post("/resume/educations/reorder", format = "json", data = "<req>")]
pub fn education_reorder(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    req: Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let resume_id = require_resume(store)?;
    lift_reorder(store.education_reorder(&resume_id, &req.ids), "Education")
}

// ── Skills ──────────────────────────────────────────────

#[derive(FromForm)]
pub struct SkillUpload {
    pub name: String,
    pub category: String,
    pub level: Option<String>,
}

fn skill_form(form: &SkillUpload) -> Result<SkillForm, AppError> {
    let name = validate::required(&form.name)
        .ok_or_else(|| AppError::invalid("Skill name is required"))?;
    let category = validate::required(&form.category)
        .ok_or_else(|| AppError::invalid("Category is required"))?;
    if !SKILL_CATEGORIES.contains(&category.as_str()) {
        return Err(AppError::invalid("Invalid skill category"));
    }
    let level = validate::optional(form.level.as_deref());
    if let Some(level) = level.as_deref() {
        if !SKILL_LEVELS.contains(&level) {
            return Err(AppError::invalid("Invalid skill level"));
        }
    }

    Ok(SkillForm {
        name,
        category,
        level,
    })
}

#[post("/resume/skills", data = "<form>")]
pub fn skill_add(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    form: Form<SkillUpload>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let entry = skill_form(&form)?;
    let resume_id = store.resume_get_or_create().map_err(AppError::internal)?;
    let id = store
        .skill_append(&resume_id, &entry)
        .map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true, "id": id })))
}

#[post("/resume/skills/<id>", data = "<form>")]
pub fn skill_update(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
    form: Form<SkillUpload>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    store
        .skill_find(id)
        .ok_or_else(|| AppError::not_found("Skill"))?;
    let entry = skill_form(&form)?;
    store.skill_update(id, &entry).map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true })))
}

#[post("/resume/skills/<id>/delete")]
pub fn skill_delete(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    store
        .skill_find(id)
        .ok_or_else(|| AppError::not_found("Skill"))?;
    store.skill_delete(id).map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true })))
}

#[post("/resume/skills/reorder", format = "json", data = "<req>")]
pub fn skill_reorder(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    req: Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let resume_id = require_resume(store)?;
    lift_reorder(store.skill_reorder(&resume_id, &req.ids), "Skill")
}

// ── Social links ────────────────────────────────────────

#[derive(FromForm)]
pub struct SocialLinkUpload {
    pub platform: String,
    pub url: String,
}

fn social_link_form(form: &SocialLinkUpload) -> Result<SocialLinkForm, AppError> {
    let platform = validate::required(&form.platform)
        .ok_or_else(|| AppError::invalid("Platform is required"))?;
    if !SOCIAL_PLATFORMS.contains(&platform.as_str()) {
        return Err(AppError::invalid("Invalid platform"));
    }
    let url =
        validate::required(&form.url).ok_or_else(|| AppError::invalid("URL is required"))?;
    if url::Url::parse(&url).is_err() {
        return Err(AppError::invalid("Please enter a valid URL"));
    }

    Ok(SocialLinkForm { platform, url })
}

#[post("/resume/social-links", data = "<form>")]
pub fn social_link_add(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    form: Form<SocialLinkUpload>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let entry = social_link_form(&form)?;
    let resume_id = store.resume_get_or_create().map_err(AppError::internal)?;
    let id = store
        .social_link_append(&resume_id, &entry)
        .map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true, "id": id })))
}

#[post("/resume/social-links/<id>", data = "<form>")]
pub fn social_link_update(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
    form: Form<SocialLinkUpload>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    store
        .social_link_find(id)
        .ok_or_else(|| AppError::not_found("Social link"))?;
    let entry = social_link_form(&form)?;
    store
        .social_link_update(id, &entry)
        .map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true })))
}

#[post("/resume/social-links/<id>/delete")]
pub fn social_link_delete(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    id: &str,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    store
        .social_link_find(id)
        .ok_or_else(|| AppError::not_found("Social link"))?;
    store.social_link_delete(id).map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true })))
}

#[post("/resume/social-links/reorder", format = "json", data = "<req>")]
pub fn social_link_reorder(
    _admin: AdminUser,
    store: &State<Arc<dyn Store>>,
    req: Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    let resume_id = require_resume(store)?;
    lift_reorder(store.social_link_reorder(&resume_id, &req.ids), "Social link")
}
