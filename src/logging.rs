//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::internal_server_error::InternalServerError;

/// The number of bytes of a request or response body to log at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body_text) = match buffer_body(request.into_parts()).await {
        Ok(buffered) => buffered,
        Err(response) => return response,
    };
    log_body("Received request", &format!("{parts:#?}"), &body_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).to_string(),
        Err(error) => {
            tracing::error!("Could not read the response body: {error}");
            return Response::from_parts(parts, Body::empty());
        }
    };
    log_body("Sending response", &format!("{parts:#?}"), &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn buffer_body(
    (parts, body): (axum::http::request::Parts, Body),
) -> Result<(axum::http::request::Parts, String), Response> {
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => Ok((parts, String::from_utf8_lossy(&bytes).to_string())),
        Err(error) => {
            tracing::error!("Could not read the request body: {error}");
            Err(InternalServerError::default().into_response())
        }
    }
}

fn log_body(event: &str, headers: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        let end = (0..=LOG_BODY_LENGTH_LIMIT)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        tracing::info!("{event}: {headers}\nbody: {:}...", &body[..end]);
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{event}: {headers}\nbody: {body:?}");
    }
}
