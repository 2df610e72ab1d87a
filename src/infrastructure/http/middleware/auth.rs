use crate::{
    application::services::{AuthService, HotelService},
    domain::{entities::Identity, errors::DomainError},
    infrastructure::http::middleware::error::ApiError,
};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

#[derive(Clone)]
pub struct AppState {
    pub hotel_service: HotelService,
    pub auth_service: AuthService,
    pub development_mode: bool,
}

/// Caller resolved from the bearer credential, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub identity: Identity,
}

/// Resolve the bearer credential and attach the caller to the request.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let identity = match state.auth_service.authenticate(header) {
        Ok(identity) => identity,
        Err(DomainError::Unauthorized(reason)) => {
            tracing::debug!("Rejected {} {}: {}", request.method(), request.uri().path(), reason);
            metrics::counter!("auth_rejections_total", "reason" => reason).increment(1);
            return Err(ApiError::Unauthorized);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(
        "Authenticated {} ({}) as role '{}'",
        identity.email,
        identity.id,
        identity.role.name
    );
    request
        .extensions_mut()
        .insert(AuthenticatedUser { identity });

    Ok(next.run(request).await)
}
