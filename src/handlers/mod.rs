// handlers/mod.rs - Two-tier handler architecture
//
// Public (no auth) → Protected (JWT auth). The tier decides only whether
// jwt_auth_middleware lets the request through; see middleware::auth.
pub mod public;    // Tier 1: No authentication required (/, /health, /api/auth/*)
pub mod protected; // Tier 2: JWT authentication required (/api/plants*)
pub mod validation;
