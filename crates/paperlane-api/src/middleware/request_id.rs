use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

/// Request ID extension type
#[derive(Clone, Debug)]
pub struct RequestId(
    #[allow(dead_code)] // Carried in request extensions for handlers/logging
    pub String,
);

/// Request ID middleware
/// Generates a unique request ID for each request and includes it in:
/// - Response headers (X-Request-ID)
/// - Request extensions (for logging)
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    // Honor an inbound X-Request-ID so traces line up across services
    let request_id = request
        .headers()
        .get("X-Request-ID")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("X-Request-ID", header_value);
    }

    response
}
