use axum::{extract::Request, middleware::Next, response::Response};

use crate::{
    application::services::{AccessDecision, PermissionService},
    infrastructure::http::middleware::{auth::AuthenticatedUser, error::ApiError},
};

/// Route-level authorization; must run after [`require_auth`](super::require_auth).
pub async fn require_permission(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or(ApiError::Unauthorized)?;

    let decision = PermissionService::check_access(
        &user.identity.role,
        request.uri().path(),
        request.method(),
    );

    if let AccessDecision::Denied { resource, action } = decision {
        tracing::warn!(
            "Permission denied: {} (role '{}') attempted {} on '{}'",
            user.identity.email,
            user.identity.role.name,
            action.map_or_else(|| request.method().to_string(), |a| a.to_string()),
            resource
        );
        metrics::counter!("auth_rejections_total", "reason" => "forbidden").increment(1);
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(request).await)
}
