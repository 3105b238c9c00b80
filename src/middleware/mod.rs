//! Middleware del sistema
//!
//! Autenticación JWT, autorización por rol y CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
