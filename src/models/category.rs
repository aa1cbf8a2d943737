use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum depth of the category hierarchy (root = 1).
pub const MAX_CATEGORY_LEVEL: i32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
    pub slug: String,
    /// Depth in the hierarchy, root = 1, max = 3.
    pub level: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub active: bool,
    pub featured: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    /// Aggregate product count for this category and all descendants.
    pub product_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CategoryWithChildren {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryWithChildren>,
}

#[derive(Debug, Serialize)]
pub struct CategoryTree {
    pub categories: Vec<CategoryWithChildren>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    pub parent_id: Option<i32>,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 500, message = "image_url must be at most 500 characters"))]
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
    pub active: Option<bool>,
    pub featured: Option<bool>,
    #[validate(length(max = 200, message = "meta_title must be at most 200 characters"))]
    pub meta_title: Option<String>,
    #[validate(length(max = 500, message = "meta_description must be at most 500 characters"))]
    pub meta_description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    pub parent_id: Option<i32>,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 500, message = "image_url must be at most 500 characters"))]
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
    pub active: Option<bool>,
    pub featured: Option<bool>,
    #[validate(length(max = 200, message = "meta_title must be at most 200 characters"))]
    pub meta_title: Option<String>,
    #[validate(length(max = 500, message = "meta_description must be at most 500 characters"))]
    pub meta_description: Option<String>,
}

/// Query parameters for the category listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListQuery {
    pub parent_id: Option<i32>,
    /// Defaults to true; pass `active_only=false` to include inactive rows.
    pub active_only: Option<bool>,
    /// Only acts as a filter when `featured=true` is requested.
    pub featured: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryTreeQuery {
    pub active_only: Option<bool>,
}
