use std::sync::Arc;
use std::time::Duration;

use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::rate_limit::RateLimiter;
use crate::security::auth::{self, AdminUser, ClientIp, UserAgent};
use crate::store::Store;

pub fn routes() -> Vec<rocket::Route> {
    routes![login, logout, me]
}

#[derive(FromForm)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[post("/login", data = "<form>")]
pub fn login(
    store: &State<Arc<dyn Store>>,
    limiter: &State<RateLimiter>,
    cookies: &CookieJar<'_>,
    client_ip: ClientIp,
    user_agent: UserAgent,
    form: Form<LoginForm>,
) -> Result<Json<Value>, AppError> {
    let store = store.inner().as_ref();

    let max_attempts = store.setting_get_i64("login_rate_limit").max(1) as u64;
    let key = format!("login:{}", auth::hash_ip(&client_ip.0));
    if !limiter.check_and_record(&key, max_attempts, Duration::from_secs(15 * 60)) {
        return Err(AppError::invalid(
            "Too many login attempts. Please wait before trying again.",
        ));
    }

    let user = store
        .user_get_by_username(form.username.trim())
        .filter(|u| auth::verify_password(&form.password, &u.password_hash))
        .ok_or_else(|| AppError::invalid("Invalid username or password"))?;

    let session_id = auth::create_session(
        store,
        &user.id,
        Some(&client_ip.0),
        user_agent.0.as_deref(),
    )
    .map_err(AppError::internal)?;
    auth::set_session_cookie(cookies, &session_id, store);

    store.session_cleanup_expired();

    Ok(Json(json!({ "success": true, "username": user.username })))
}

#[post("/logout")]
pub fn logout(store: &State<Arc<dyn Store>>, cookies: &CookieJar<'_>) -> Json<Value> {
    if let Some(session_id) = auth::session_cookie(cookies) {
        let _ = auth::destroy_session(store.inner().as_ref(), &session_id);
    }
    auth::clear_session_cookie(cookies);
    Json(json!({ "success": true }))
}

#[get("/me")]
pub fn me(admin: AdminUser) -> Json<Value> {
    Json(json!({ "user": admin.user }))
}
