use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::RngCore;
use rocket::http::{Cookie, CookieJar, Status};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::State;
use sha2::{Digest, Sha256};

use crate::models::user::User;
use crate::store::Store;

const SESSION_COOKIE: &str = "folio_session";

// ── Client IP request guard ──

/// Extracts the real client IP from the request, checking proxy headers
/// in priority order before falling back to the socket peer address.
pub struct ClientIp(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientIp {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let headers = request.headers();

        for header in ["CF-Connecting-IP", "True-Client-IP", "X-Real-IP"] {
            if let Some(ip) = headers.get_one(header) {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return Outcome::Success(ClientIp(ip.to_string()));
                }
            }
        }

        // X-Forwarded-For: client, proxy1, proxy2 — take the leftmost
        if let Some(forwarded) = headers.get_one("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return Outcome::Success(ClientIp(ip.to_string()));
                }
            }
        }

        let ip = request
            .client_ip()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Outcome::Success(ClientIp(ip))
    }
}

/// The request's User-Agent header, if any. Stored alongside sessions.
pub struct UserAgent(pub Option<String>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for UserAgent {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(UserAgent(
            request.headers().get_one("User-Agent").map(str::to_string),
        ))
    }
}

// ── Admin request guard ──

/// Guard: a request carrying a valid, unexpired admin session.
pub struct AdminUser {
    pub user: User,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match resolve_session_user(request).await {
            Some(user) => Outcome::Success(AdminUser { user }),
            None => Outcome::Forward(Status::Unauthorized),
        }
    }
}

async fn resolve_session_user(request: &Request<'_>) -> Option<User> {
    let store = request
        .guard::<&State<Arc<dyn Store>>>()
        .await
        .succeeded()?;
    let cookies = request.cookies();
    let session_id = cookies.get_private(SESSION_COOKIE)?.value().to_string();

    match store.session_get_user(&session_id) {
        Some(user) => Some(user),
        None => {
            // Stale or expired cookie, drop it
            cookies.remove_private(Cookie::from(SESSION_COOKIE));
            None
        }
    }
}

// ── Password utilities ──

pub fn hash_password(password: &str) -> Result<String, String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| e.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

// ── Session management ──

pub fn create_session(
    store: &dyn Store,
    user_id: &str,
    ip: Option<&str>,
    user_agent: Option<&str>,
) -> Result<String, String> {
    let expiry_hours = store.setting_get_i64("session_expiry_hours").max(1);

    let mut token = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut token);
    let session_id = hex::encode(token);

    let expires = Utc::now().naive_utc() + Duration::hours(expiry_hours);
    let expires_str = expires.format("%Y-%m-%d %H:%M:%S").to_string();

    store.session_create(user_id, &session_id, &expires_str, ip, user_agent)?;

    Ok(session_id)
}

pub fn destroy_session(store: &dyn Store, session_id: &str) -> Result<(), String> {
    store.session_delete(session_id)
}

pub fn set_session_cookie(cookies: &CookieJar<'_>, session_id: &str, store: &dyn Store) {
    let site_url = store.setting_get_or("site_url", "");

    let mut cookie = Cookie::new(SESSION_COOKIE, session_id.to_string());
    cookie.set_http_only(true);
    cookie.set_same_site(rocket::http::SameSite::Strict);
    cookie.set_path("/");
    if site_url.starts_with("https://") {
        cookie.set_secure(true);
    }
    cookies.add_private(cookie);
}

pub fn clear_session_cookie(cookies: &CookieJar<'_>) {
    cookies.remove_private(Cookie::from(SESSION_COOKIE));
}

pub fn session_cookie(cookies: &CookieJar<'_>) -> Option<String> {
    cookies
        .get_private(SESSION_COOKIE)
        .map(|c| c.value().to_string())
}

pub fn hash_ip(ip: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hex::encode(hasher.finalize())
}
