//! JSON bodies for requests no route handled successfully.

use crate::models::MessageResponse;
use rocket::serde::json::Json;
use rocket::{Catcher, Request};

#[catch(400)]
pub fn bad_request() -> Json<MessageResponse> {
    Json(MessageResponse::new("Bad request"))
}

#[catch(404)]
pub fn not_found(request: &Request<'_>) -> Json<MessageResponse> {
    log::debug!("no route for {} {}", request.method(), request.uri());
    Json(MessageResponse::new("Resource not found"))
}

#[catch(422)]
pub fn unprocessable_entity() -> Json<MessageResponse> {
    Json(MessageResponse::new("Unprocessable entity"))
}

#[catch(500)]
pub fn internal_error(request: &Request<'_>) -> Json<MessageResponse> {
    log::error!("unhandled failure for {} {}", request.method(), request.uri());
    Json(MessageResponse::new("Internal server error"))
}

/// Every catcher the application registers at the root.
pub fn all() -> Vec<Catcher> {
    catchers![bad_request, not_found, unprocessable_entity, internal_error]
}
