use crate::domain::entities::Identity;

/// Resolves a bearer token to the caller it was issued to.
pub trait IdentityProvider: Send + Sync {
    fn resolve(&self, token: &str) -> Option<Identity>;
}
