use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::Result,
    models::{
        ApiResponse, Category, CategoryListQuery, CategoryTree, CategoryTreeQuery,
        CreateCategoryRequest, UpdateCategoryRequest,
    },
    queries::category_queries,
};

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<ApiResponse<Vec<Category>>>> {
    let categories = category_queries::get_all(&state.store, &query);
    Ok(ApiResponse::json(categories))
}

pub async fn featured_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Category>>>> {
    let categories = category_queries::get_featured(&state.store);
    Ok(ApiResponse::json(categories))
}

pub async fn category_tree(
    State(state): State<AppState>,
    Query(query): Query<CategoryTreeQuery>,
) -> Result<Json<ApiResponse<CategoryTree>>> {
    let tree = category_queries::get_category_tree(&state.store, query.active_only.unwrap_or(true));
    Ok(ApiResponse::json(tree))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Category>>> {
    let category = category_queries::find_by_id(&state.store, id)?;
    Ok(ApiResponse::json(category))
}

pub async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Category>>> {
    let category = category_queries::find_by_slug(&state.store, &slug)?;
    Ok(ApiResponse::json(category))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<Json<ApiResponse<Category>>> {
    let category = category_queries::create_category(&state.store, payload)?;
    Ok(ApiResponse::json(category))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<Category>>> {
    let category = category_queries::update_category(&state.store, id, payload)?;
    Ok(ApiResponse::json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Value>>> {
    category_queries::delete_category(&state.store, id)?;
    Ok(ApiResponse::json(json!({ "id": id })))
}
