//! Whole-response cache for GET endpoints.
//!
//! Successful bodies are stored in the cache store under a key derived from
//! the request path and query, for a fixed 15 minutes. This layer is separate
//! from the listing cache: property writes drop the listing key but not the
//! stored responses, which age out on their own TTL.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::AppState;
use crate::error::{AppError, Result};

/// Lifetime of a cached response, in seconds
pub const RESPONSE_CACHE_TTL: u64 = 900;

const CACHE_CONTROL_VALUE: &str = "max-age=900";

/// Cache key for the response to `uri`.
pub fn page_cache_key(uri: &Uri) -> String {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!("page:{}", target)
}

/// Serves GET/HEAD requests from the cache store, storing `200 OK` bodies on
/// the way out. Other methods pass straight through.
pub async fn cache_page(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return Ok(next.run(request).await);
    }

    let key = page_cache_key(request.uri());
    if let Some(body) = state.cache.get(&key).await? {
        debug!(%key, "Response cache hit");
        let mut response = ([(header::CONTENT_TYPE, "application/json")], body).into_response();
        set_max_age(&mut response);
        return Ok(response);
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to buffer response: {}", e)))?;

    match std::str::from_utf8(&bytes) {
        Ok(text) => {
            state
                .cache
                .set(&key, text.to_string(), RESPONSE_CACHE_TTL)
                .await?;
            debug!(%key, "Response cache store");
        }
        Err(_) => debug!(%key, "Response body is not UTF-8, not cached"),
    }

    let mut response = Response::from_parts(parts, Body::from(bytes));
    set_max_age(&mut response);
    Ok(response)
}

fn set_max_age(response: &mut Response) {
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_control_matches_ttl() {
        assert_eq!(CACHE_CONTROL_VALUE, format!("max-age={}", RESPONSE_CACHE_TTL));
    }

    #[test]
    fn test_page_cache_key_includes_query() {
        let plain: Uri = "/properties".parse().unwrap();
        let query: Uri = "/properties?page=2".parse().unwrap();

        assert_eq!(page_cache_key(&plain), "page:/properties");
        assert_eq!(page_cache_key(&query), "page:/properties?page=2");
    }
}
