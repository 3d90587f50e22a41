//! Catalog administration pages, mounted under `/admin`.

use actix_web::HttpResponse;

use crate::forms::FormError;
use crate::routes::admin_failure;
use crate::services::ServiceError;

pub mod brands;
pub mod categories;
pub mod products;

/// Unpacks a multipart body or answers with the flash-and-redirect failure.
pub(crate) fn split_upload<T>(
    parts: Result<T, FormError>,
    back: &str,
    action: &str,
) -> Result<T, HttpResponse> {
    parts.map_err(|e| admin_failure(ServiceError::from(e), back, action))
}
