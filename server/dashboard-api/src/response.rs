//! Success envelope shared by every route.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
  pub success: bool,
  pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
  Json(ApiResponse {
    success: true,
    data,
  })
}
