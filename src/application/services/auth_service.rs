use crate::domain::{
    entities::Identity,
    errors::{DomainError, DomainResult},
    ports::IdentityProvider,
};
use std::sync::Arc;

pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct AuthService {
    identity_provider: Arc<dyn IdentityProvider>,
}

impl AuthService {
    pub fn new(identity_provider: Arc<dyn IdentityProvider>) -> Self {
        Self { identity_provider }
    }

    /// Extract the token from an `Authorization` header value.
    pub fn bearer_token(header: Option<&str>) -> DomainResult<&str> {
        let header =
            header.ok_or_else(|| DomainError::Unauthorized("missing credential".to_string()))?;
        header
            .strip_prefix(BEARER_PREFIX)
            .ok_or_else(|| DomainError::Unauthorized("unsupported scheme".to_string()))
    }

    /// Resolve the caller behind an `Authorization` header value.
    pub fn authenticate(&self, header: Option<&str>) -> DomainResult<Identity> {
        let token = Self::bearer_token(header)?;
        self.identity_provider
            .resolve(token)
            .ok_or_else(|| DomainError::Unauthorized("unknown credential".to_string()))
    }
}
