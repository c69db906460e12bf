//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Body extractor settings: bodies are decoded whatever their content type,
/// and decode failures become the 400 error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(error::json_error_handler)
}

/// Query extractor settings: decode failures become the 400 error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(error::query_error_handler)
}

/// The `/users` resource tree, relative to the API prefix.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use users_api::inbound::http::users_scope;
///
/// let _app = App::new().service(web::scope("/api/v1").service(users_scope()));
/// ```
pub fn users_scope() -> Scope {
    web::scope("/users")
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
}
