use std::any::Any;

use axum::{
    body::Body,
    extract::{
        rejection::{BytesRejection, FailedToBufferBody},
        Request, State,
    },
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::infrastructure::http::envelope::Envelope;
use crate::infrastructure::http::extractors::buffer_body;
use crate::infrastructure::http::middleware::error::{ApiError, UnexpectedError, INTERNAL_MESSAGE};

#[derive(Debug, Clone, Copy)]
pub struct ErrorReporting {
    pub development_mode: bool,
}

/// Wrap a router so panics and unhandled failures become the uniform 500
/// envelope, logged together with the request that caused them.
pub fn with_error_handling(router: Router, development_mode: bool) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            ErrorReporting { development_mode },
            handle_unexpected_errors,
        ))
}

pub async fn handle_unexpected_errors(
    State(reporting): State<ErrorReporting>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let (request, body) = if method == Method::POST || method == Method::PUT {
        let (parts, bytes) = match buffer_body(request).await {
            Ok(buffered) => buffered,
            Err(rejection) => {
                tracing::warn!("Rejected {} {}: {}", method, uri, rejection.body_text());
                let message = match &rejection {
                    BytesRejection::FailedToBufferBody(FailedToBufferBody::LengthLimitError(_)) => {
                        "Request body too large"
                    }
                    _ => "Invalid request body",
                };
                return (rejection.status(), Json(Envelope::failure(message))).into_response();
            }
        };
        let text = String::from_utf8_lossy(&bytes).into_owned();
        (Request::from_parts(parts, Body::from(bytes)), Some(text))
    } else {
        (request, None)
    };

    let response = next.run(request).await;

    let Some(UnexpectedError(message)) = response.extensions().get::<UnexpectedError>().cloned()
    else {
        return response;
    };

    match body {
        Some(body) => tracing::error!(
            method = %method,
            uri = %uri,
            body = %body,
            "Unhandled error: {}",
            message
        ),
        None => tracing::error!(
            method = %method,
            uri = %uri,
            path = uri.path(),
            query = uri.query().unwrap_or(""),
            "Unhandled error: {}",
            message
        ),
    }

    if !reporting.development_mode {
        return response;
    }

    (
        response.status(),
        Json(Envelope::failure(INTERNAL_MESSAGE).with_error(message)),
    )
        .into_response()
}

/// Turns a caught panic into an unexpected error for [`handle_unexpected_errors`].
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Unexpected(message).into_response()
}
