//! Shared response envelope types for API handlers.
//!
//! Successful responses use a `{ "success": true, "data": ... }` envelope;
//! errors are rendered by [`AppError`](crate::error::AppError) with
//! `"success": false`.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse::new(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
