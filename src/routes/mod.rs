//! HTTP route handlers grouped by resource.
//!
//! JSON endpoints are annotated with `#[openapi]` so `rocket_okapi` can derive
//! an OpenAPI document automatically. The multipart import endpoints are
//! mounted separately.

pub mod dummies;
pub mod health;
pub mod imports;
pub mod params;
pub mod version;
