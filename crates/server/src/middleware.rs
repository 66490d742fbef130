use axum::{extract::Request, http::HeaderName, middleware::Next, response::Response};
use uuid::Uuid;

/// Request ID wrapper for extensions
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn get(&self) -> &str {
        &self.0
    }
}

/// Request ID middleware that adds correlation IDs to requests
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    // Make the ID available to handlers, then echo it back to the caller
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    let header_name = HeaderName::from_static("x-request-id");
    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert(header_name, header_value);
    }

    response
}
