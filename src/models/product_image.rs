use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Hard cap on gallery size per product.
pub const MAX_IMAGES_PER_PRODUCT: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub image_url: String,
    pub thumbnail_url: String,
    pub high_res_url: String,
    /// Sort key within the product's gallery, ties broken by insertion.
    pub display_order: i32,
    pub caption: Option<String>,
    pub alt_text: String,
    pub view_angle: ViewAngle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewAngle {
    Front,
    Back,
    SideLeft,
    SideRight,
    Top,
    Detail,
    Angle,
    Lifestyle,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductImageRequest {
    #[validate(length(min = 1, max = 500, message = "image_url must be between 1 and 500 characters"))]
    pub image_url: String,
    #[validate(length(min = 1, max = 500, message = "thumbnail_url must be between 1 and 500 characters"))]
    pub thumbnail_url: String,
    #[validate(length(min = 1, max = 500, message = "high_res_url must be between 1 and 500 characters"))]
    pub high_res_url: String,
    pub display_order: Option<i32>,
    #[validate(length(max = 300, message = "caption must be at most 300 characters"))]
    pub caption: Option<String>,
    #[validate(length(min = 1, max = 300, message = "alt_text must be between 1 and 300 characters"))]
    pub alt_text: String,
    pub view_angle: ViewAngle,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductImageRequest {
    #[validate(length(min = 1, max = 500, message = "image_url must be between 1 and 500 characters"))]
    pub image_url: Option<String>,
    #[validate(length(min = 1, max = 500, message = "thumbnail_url must be between 1 and 500 characters"))]
    pub thumbnail_url: Option<String>,
    #[validate(length(min = 1, max = 500, message = "high_res_url must be between 1 and 500 characters"))]
    pub high_res_url: Option<String>,
    pub display_order: Option<i32>,
    #[validate(length(max = 300, message = "caption must be at most 300 characters"))]
    pub caption: Option<String>,
    #[validate(length(min = 1, max = 300, message = "alt_text must be between 1 and 300 characters"))]
    pub alt_text: Option<String>,
    pub view_angle: Option<ViewAngle>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderImagesRequest {
    pub image_order: Vec<ReorderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReorderEntry {
    pub image_id: i32,
    pub display_order: i32,
}
