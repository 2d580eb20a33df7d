//! Fault taxonomy and error translation for sqlgate
//!
//! # Fault kinds
//!
//! - Validation (400)
//! - Authentication (401)
//! - Database (500, or 503 when the store is not initialized)
//! - Unexpected (500, message redacted outside development mode)

mod errors;
mod translator;

pub use errors::{FaultKind, GatewayError, GatewayResult};
pub use translator::{ErrorBody, ErrorTranslator};
