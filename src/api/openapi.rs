//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, post_handler};
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{Credentials, FieldError, PostResponse, UserResponse};

/// OpenAPI documentation for Postboard
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Postboard",
        version = "0.1.0",
        description = "Account sessions and posts over Axum, SeaORM, and Redis"
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    paths(
        // Account session endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        auth_handler::logout,
        // Post endpoints
        post_handler::list_posts,
        post_handler::create_post,
        post_handler::get_post,
        post_handler::update_post,
        post_handler::delete_post,
    ),
    components(
        schemas(
            // Domain types
            Credentials,
            FieldError,
            UserResponse,
            PostResponse,
            // Handler types
            auth_handler::AuthResponse,
            post_handler::CreatePostRequest,
            post_handler::UpdatePostRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login, and session management"),
        (name = "Posts", description = "Post operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for cookie-based sessions
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}
