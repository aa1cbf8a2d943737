use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Free-text category label. Not a foreign key to a category record;
    /// association with the category tree is by name only.
    pub category: String,
    pub image_url: Option<String>,
    pub additional_images: Vec<String>,
    pub specifications: ProductSpecifications,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSpecifications {
    pub dimensions: Option<String>,
    pub material: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100, message = "category must be between 1 and 100 characters"))]
    pub category: String,
    #[validate(length(max = 500, message = "image_url must be at most 500 characters"))]
    pub image_url: Option<String>,
    #[serde(default)]
    pub additional_images: Vec<String>,
    #[serde(default)]
    pub specifications: ProductSpecifications,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100, message = "category must be between 1 and 100 characters"))]
    pub category: Option<String>,
    #[validate(length(max = 500, message = "image_url must be at most 500 characters"))]
    pub image_url: Option<String>,
    pub additional_images: Option<Vec<String>>,
    pub specifications: Option<ProductSpecifications>,
}

/// Query parameters for the paginated product listing.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProductListQuery {
    #[validate(length(max = 200, message = "search must be at most 200 characters"))]
    pub search: Option<String>,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,
    pub sort_by: Option<String>,
    #[validate(range(min = 1, message = "page must be a positive integer"))]
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    NameAsc,
    NameDesc,
    DateAsc,
    DateDesc,
}

impl SortBy {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "name_asc" => Some(SortBy::NameAsc),
            "name_desc" => Some(SortBy::NameDesc),
            "date_asc" => Some(SortBy::DateAsc),
            "date_desc" => Some(SortBy::DateDesc),
            _ => None,
        }
    }
}

/// Slim projection used in list responses. Full description, specifications
/// and additional images are only returned by the detail endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProductListItem {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductListItem {
    fn from(product: &Product) -> Self {
        ProductListItem {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            image_url: product.image_url.clone(),
            created_at: product.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub items: Vec<ProductListItem>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}
