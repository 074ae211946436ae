use std::sync::Arc;
use std::time::Duration;

use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::submission::{ContactForm, FeedbackForm};
use crate::rate_limit::RateLimiter;
use crate::security::auth::{self, ClientIp};
use crate::security::turnstile;
use crate::store::Store;
use crate::validate;

pub fn routes() -> Vec<rocket::Route> {
    routes![contact_submit, feedback_submit]
}

const RATE_WINDOW: Duration = Duration::from_secs(10 * 60);

fn check_rate(
    store: &dyn Store,
    limiter: &RateLimiter,
    bucket: &str,
    ip: &ClientIp,
) -> Result<(), AppError> {
    let max = store.setting_get_i64("form_rate_limit").max(1) as u64;
    let key = format!("{}:{}", bucket, auth::hash_ip(&ip.0));
    if !limiter.check_and_record(&key, max, RATE_WINDOW) {
        return Err(AppError::invalid(
            "Too many submissions. Please wait before trying again.",
        ));
    }
    Ok(())
}

/// Bot check. Skipped entirely when Turnstile is disabled; otherwise a
/// token is mandatory, a rejection fails verification, and a broken call
/// to the service is surfaced as unavailability.
fn check_captcha(store: &dyn Store, token: Option<&str>, ip: &ClientIp) -> Result<(), AppError> {
    if !turnstile::enabled(store) {
        return Ok(());
    }
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::invalid("Please complete the CAPTCHA"))?;

    match turnstile::verify(store, token, Some(&ip.0)) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AppError::VerificationFailed),
        Err(e) => Err(AppError::ServiceUnavailable(e)),
    }
}

// ── Contact ────────────────────────────────────────────

#[derive(FromForm)]
pub struct ContactSubmit {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    #[field(name = "cf-turnstile-response")]
    pub turnstile_token: Option<String>,
}

#[post("/contact", data = "<form>")]
pub fn contact_submit(
    store: &State<Arc<dyn Store>>,
    limiter: &State<RateLimiter>,
    client_ip: ClientIp,
    form: Form<ContactSubmit>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    check_rate(store, limiter, "contact", &client_ip)?;

    let name = validate::required(&form.name).ok_or_else(|| AppError::invalid("Name is required"))?;
    let email =
        validate::required(&form.email).ok_or_else(|| AppError::invalid("Email is required"))?;
    if !validate::email(&email) {
        return Err(AppError::invalid("Please enter a valid email address"));
    }
    let subject = validate::required(&form.subject)
        .ok_or_else(|| AppError::invalid("Subject is required"))?;
    let message = validate::required(&form.message)
        .ok_or_else(|| AppError::invalid("Message is required"))?;

    check_captcha(store, form.turnstile_token.as_deref(), &client_ip)?;

    let submission = ContactForm {
        name,
        email,
        company: validate::optional(form.company.as_deref()),
        subject,
        message,
        budget: validate::optional(form.budget.as_deref()),
        timeline: validate::optional(form.timeline.as_deref()),
    };

    let id = store
        .contact_create(&submission)
        .map_err(AppError::internal)?;

    Ok(Json(json!({
        "success": true,
        "id": id,
        "message": "Thank you for your message! I'll get back to you soon.",
    })))
}

// ── Feedback ───────────────────────────────────────────

#[derive(FromForm)]
pub struct FeedbackSubmit {
    pub client_name: String,
    pub email: String,
    pub company: Option<String>,
    pub project_name: String,
    pub rating: String,
    pub feedback: String,
    pub improvements: Option<String>,
    pub recommend: Option<String>,
    pub testimonial_permission: Option<String>,
    #[field(name = "cf-turnstile-response")]
    pub turnstile_token: Option<String>,
}

#[post("/feedback", data = "<form>")]
pub fn feedback_submit(
    store: &State<Arc<dyn Store>>,
    limiter: &State<RateLimiter>,
    client_ip: ClientIp,
    form: Form<FeedbackSubmit>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();
    check_rate(store, limiter, "feedback", &client_ip)?;

    let client_name = validate::required(&form.client_name)
        .ok_or_else(|| AppError::invalid("Name is required"))?;
    let email =
        validate::required(&form.email).ok_or_else(|| AppError::invalid("Email is required"))?;
    if !validate::email(&email) {
        return Err(AppError::invalid("Please enter a valid email address"));
    }
    let project_name = validate::required(&form.project_name)
        .ok_or_else(|| AppError::invalid("Project name is required"))?;
    let rating: i64 = form
        .rating
        .trim()
        .parse()
        .map_err(|_| AppError::invalid("Please provide a rating"))?;
    if !(1..=5).contains(&rating) {
        return Err(AppError::invalid("Rating must be between 1 and 5"));
    }
    let feedback = validate::required(&form.feedback)
        .ok_or_else(|| AppError::invalid("Feedback is required"))?;

    check_captcha(store, form.turnstile_token.as_deref(), &client_ip)?;

    let submission = FeedbackForm {
        client_name,
        email,
        company: validate::optional(form.company.as_deref()),
        project_name,
        rating,
        feedback,
        improvements: validate::optional(form.improvements.as_deref()),
        recommend: validate::optional(form.recommend.as_deref()),
        testimonial_permission: validate::optional(form.testimonial_permission.as_deref()),
    };

    let id = store
        .feedback_create(&submission)
        .map_err(AppError::internal)?;

    Ok(Json(json!({
        "success": true,
        "id": id,
        "message": "Thank you for your valuable feedback! I really appreciate it.",
    })))
}
