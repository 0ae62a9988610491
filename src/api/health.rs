//! Health check

use serde::Serialize;
use utoipa::ToSchema;

use super::Success;

/// Static health payload
#[derive(Debug, Serialize, ToSchema)]
pub struct Health {
    /// Always `Healthy`
    message: String,
}

/// Health check
///
/// Returns service health information.
///
/// Request:
/// ```sh
/// curl -v http://localhost:8000/
/// ```
///
/// Response
/// ```json
/// { "message": "Healthy" }
/// ```
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is healthy", body = Health)
    ),
    tag = "Health"
)]
pub async fn check() -> Success<Health> {
    Success::ok(Health {
        message: "Healthy".to_string(),
    })
}
