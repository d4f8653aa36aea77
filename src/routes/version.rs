use rocket::serde::json::Json;
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use rocket_okapi::openapi;
use serde::{Deserialize, Serialize};

/// Version of the running build.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VersionResponse {
    pub version: String,
}

/// Report the crate version baked in at compile time.
#[openapi(tag = "Meta")]
#[get("/version")]
pub fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
