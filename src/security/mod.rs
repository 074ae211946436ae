pub mod auth;
pub mod turnstile;
