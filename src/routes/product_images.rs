use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::Result,
    models::{
        ApiResponse, CreateProductImageRequest, ProductImage, ReorderImagesRequest,
        UpdateProductImageRequest,
    },
    queries::product_image_queries,
};

pub async fn list_images(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ProductImage>>>> {
    let images = product_image_queries::find_by_product(&state.store, product_id)?;
    Ok(ApiResponse::json(images))
}

pub async fn create_image(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    Json(payload): Json<CreateProductImageRequest>,
) -> Result<Json<ApiResponse<ProductImage>>> {
    let image = product_image_queries::create_image(&state.store, product_id, payload)?;
    Ok(ApiResponse::json(image))
}

pub async fn reorder_images(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    Json(payload): Json<ReorderImagesRequest>,
) -> Result<Json<ApiResponse<Value>>> {
    product_image_queries::reorder_images(&state.store, product_id, &payload.image_order)?;
    Ok(ApiResponse::json(
        json!({ "updated": payload.image_order.len() }),
    ))
}

pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ProductImage>>> {
    let image = product_image_queries::find_by_id(&state.store, id)?;
    Ok(ApiResponse::json(image))
}

pub async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductImageRequest>,
) -> Result<Json<ApiResponse<ProductImage>>> {
    let image = product_image_queries::update_image(&state.store, id, payload)?;
    Ok(ApiResponse::json(image))
}

pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Value>>> {
    product_image_queries::delete_image(&state.store, id)?;
    Ok(ApiResponse::json(json!({ "id": id })))
}
