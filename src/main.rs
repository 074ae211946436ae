#[macro_use]
extern crate rocket;

use std::sync::Arc;

use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{Build, Rocket};
use serde_json::{json, Value};

mod ai;
mod boot;
mod db;
mod error;
mod models;
mod pdf;
mod rate_limit;
mod render;
mod routes;
mod security;
mod sitemap;
mod storage;
mod store;
mod validate;

#[cfg(test)]
mod tests;

use rate_limit::RateLimiter;
use store::sqlite::SqliteStore;
use store::Store;

#[catch(404)]
fn not_found() -> Json<Value> {
    Json(json!({ "error": "Not found" }))
}

/// Admin guards forward unauthenticated requests here; browsers land on
/// the login page.
#[catch(401)]
fn unauthorized() -> Redirect {
    Redirect::to("/admin/login")
}

#[catch(500)]
fn server_error() -> Json<Value> {
    Json(json!({ "error": "Internal server error" }))
}

pub fn build(store: Arc<dyn Store>) -> Rocket<Build> {
    rocket::build()
        .manage(store)
        .manage(RateLimiter::new())
        .mount("/", routes::public::routes())
        .mount("/", routes::forms::routes())
        .mount("/admin", routes::auth::routes())
        .mount("/admin", routes::admin::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, unauthorized, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    // Boot check — verify/create required directories before anything else
    boot::run();

    let pool = db::init_pool().expect("Failed to initialize database pool");
    let store: Arc<dyn Store> = Arc::new(SqliteStore::new(pool));
    store
        .run_migrations()
        .expect("Failed to run database migrations");
    store.seed_defaults().expect("Failed to seed default settings");

    build(store)
}
