// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route Prefix: /api/plants
// Middleware: jwt_auth_middleware injects `AuthUser`; every operation is
// scoped to that caller's plants.

pub mod plants;

pub use plants::*;
