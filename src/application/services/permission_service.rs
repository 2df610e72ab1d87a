use crate::domain::entities::{Action, Role};

/// Path prefix every protected resource lives under.
pub const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// The role holds the required action on the resource.
    Granted,
    /// No resource name in the path, or the role's table has no entry for it.
    Unrestricted,
    Denied {
        resource: String,
        action: Option<Action>,
    },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, AccessDecision::Denied { .. })
    }
}

/// Resolves route-level access from a role's permission table.
///
/// Resources the table does not mention are **not** protected: a request for
/// them is let through whatever the role. Only resources with an entry are
/// checked against the action implied by the HTTP method.
pub struct PermissionService;

impl PermissionService {
    /// First path segment after [`API_PREFIX`], e.g. `hotels` for `/api/hotels/12`.
    pub fn resource_name(path: &str) -> Option<&str> {
        let rest = path.strip_prefix(API_PREFIX)?;
        let rest = rest.strip_prefix('/')?;
        rest.split('/').next().filter(|segment| !segment.is_empty())
    }

    pub fn has_permission(role: &Role, resource: &str, action: Action) -> bool {
        role.permissions
            .actions_for(resource)
            .is_some_and(|actions| actions.contains(&action))
    }

    pub fn check_access(role: &Role, path: &str, method: &http::Method) -> AccessDecision {
        let Some(resource) = Self::resource_name(path) else {
            return AccessDecision::Unrestricted;
        };

        if role.permissions.actions_for(resource).is_none() {
            tracing::debug!(
                "No permission entry for resource '{}' in role '{}', allowing",
                resource,
                role.name
            );
            return AccessDecision::Unrestricted;
        }

        match Action::for_method(method) {
            Some(action) if Self::has_permission(role, resource, action) => AccessDecision::Granted,
            action => AccessDecision::Denied {
                resource: resource.to_string(),
                action,
            },
        }
    }
}
