// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Everything here sits under /api/auth/ (or is a service probe) and is
// skipped by jwt_auth_middleware.

pub mod auth;
pub mod root;

pub use auth::*;
