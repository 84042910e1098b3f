//! API layer - HTTP handlers and route wiring
//!
//! This module contains all HTTP-related concerns:
//! - Request handlers
//! - Cookie session glue
//! - Custom extractors
//! - Route definitions

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod session;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
