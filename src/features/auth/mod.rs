//! Bearer-token authentication against the hosted identity provider.
//!
//! Token issuance is delegated entirely to the provider; this module only
//! verifies RS256 session tokens against the issuer's JWKS and exposes the
//! resulting identity to handlers.

mod jwks;
mod validator;

pub mod dto;
pub mod handler;
pub mod model;
pub mod routes;

pub use jwks::JwksClient;
pub use validator::JwtValidator;
