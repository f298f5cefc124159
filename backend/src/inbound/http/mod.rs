//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod interceptors;
pub mod not_found;
pub mod problem;
pub mod schemas;
pub mod state;
pub mod things;

pub use error::ApiResult;

/// Prefix under which every API route is mounted.
pub const API_BASE_PATH: &str = "/temp/api";

/// Register the API routes relative to [`API_BASE_PATH`].
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use problem_service::inbound::http::{API_BASE_PATH, configure};
///
/// let _app = App::new().service(web::scope(API_BASE_PATH).configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(things::get_thing);
}
