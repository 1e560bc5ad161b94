//! Middleware y extractores del sistema
//!
//! CORS, rol de quien llama y el extractor JSON con errores del portal.

pub mod caller;
pub mod cors;
pub mod json;

pub use caller::resolve_submission_role;
pub use cors::cors_layer;
pub use json::ApiJson;
