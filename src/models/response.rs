use axum::Json;
use serde::Serialize;

/// Success envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn json(data: T) -> Json<Self> {
        Json(ApiResponse {
            success: true,
            data,
        })
    }
}
