//! CRUD endpoints for dummy items.

use crate::error::ApiError;
use crate::models::{Dummy, MessageResponse, PageResponse};
use crate::routes::params::PaginationParams;
use crate::schema;
use crate::store::SharedStore;
use rocket::State;
use rocket::response::status::Created;
use rocket::serde::json::{Json, Value};
use rocket::{delete, get, post, put};
use rocket_okapi::openapi;

fn not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("Dummy {id} not found"))
}

/// List dummies ordered by id.
#[openapi(tag = "Dummies")]
#[get("/dummies?<params..>")]
pub async fn list_dummies(
    params: PaginationParams,
    store: &State<SharedStore>,
) -> Result<Json<PageResponse<Dummy>>, ApiError> {
    let data = store.list(params.offset(), params.size()).await?;
    let total = store.count().await?;

    Ok(Json(PageResponse {
        data,
        page: params.page(),
        size: params.size(),
        total,
    }))
}

/// Create a dummy from a `{name, description}` body.
#[openapi(tag = "Dummies")]
#[post("/dummies", format = "json", data = "<body>")]
pub async fn create_dummy(
    body: Json<Value>,
    store: &State<SharedStore>,
) -> Result<Created<Json<Dummy>>, ApiError> {
    let new_dummy = schema::load_json(body.into_inner())?;
    let dummy = store.create(&new_dummy).await?;

    log::info!("created dummy {}", dummy.id);
    let location = format!("/api/v1/dummies/{}", dummy.id);
    Ok(Created::new(location).body(Json(dummy)))
}

/// Fetch a single dummy.
#[openapi(tag = "Dummies")]
#[get("/dummies/<id>")]
pub async fn get_dummy(id: i32, store: &State<SharedStore>) -> Result<Json<Dummy>, ApiError> {
    store.get(id).await?.map(Json).ok_or_else(|| not_found(id))
}

/// Replace the name and description of a dummy.
#[openapi(tag = "Dummies")]
#[put("/dummies/<id>", format = "json", data = "<body>")]
pub async fn update_dummy(
    id: i32,
    body: Json<Value>,
    store: &State<SharedStore>,
) -> Result<Json<Dummy>, ApiError> {
    let new_dummy = schema::load_json(body.into_inner())?;

    store
        .update(id, &new_dummy)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Delete a dummy.
#[openapi(tag = "Dummies")]
#[delete("/dummies/<id>")]
pub async fn delete_dummy(
    id: i32,
    store: &State<SharedStore>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !store.delete(id).await? {
        return Err(not_found(id));
    }

    log::info!("deleted dummy {id}");
    Ok(Json(MessageResponse::new(format!("Dummy {id} deleted"))))
}
