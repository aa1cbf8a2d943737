use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::Result,
    models::{
        ApiResponse, CreateProductRequest, Product, ProductListQuery, ProductListResponse,
        UpdateProductRequest,
    },
    queries::product_queries,
};

pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<ApiResponse<ProductListResponse>>> {
    let page = product_queries::search_products(&state.store, params)?;
    Ok(ApiResponse::json(page))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = product_queries::find_by_id(&state.store, id)?;
    Ok(ApiResponse::json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = product_queries::create_product(&state.store, payload)?;
    Ok(ApiResponse::json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = product_queries::update_product(&state.store, id, payload)?;
    Ok(ApiResponse::json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Value>>> {
    product_queries::delete_product(&state.store, id)?;
    Ok(ApiResponse::json(json!({ "id": id })))
}
