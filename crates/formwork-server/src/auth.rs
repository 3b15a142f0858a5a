//! Principal extraction for inbound requests
//!
//! Token-based authentication lives in front of this service; by the time a
//! request arrives here the acting principal travels in a header.

use crate::error::{ApiError, Result};
use axum::http::HeaderMap;

/// Header carrying the acting principal's identifier
pub const PRINCIPAL_HEADER: &str = "x-principal";

/// Read the acting principal from the request headers
pub fn current_principal(headers: &HeaderMap) -> Result<String> {
    headers
        .get(PRINCIPAL_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::AccessDenied("request carries no principal".to_string()))
}
