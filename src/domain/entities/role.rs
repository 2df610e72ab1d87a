use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Operation a role may perform on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    /// GET→read, POST→create, PUT→update, DELETE→delete. Any other verb maps to nothing.
    pub fn for_method(method: &http::Method) -> Option<Action> {
        match *method {
            http::Method::GET => Some(Action::Read),
            http::Method::POST => Some(Action::Create),
            http::Method::PUT => Some(Action::Update),
            http::Method::DELETE => Some(Action::Delete),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Read => write!(f, "read"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// Resource name → allowed actions. Plain data, so roles and resources can
/// be extended from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTable(HashMap<String, BTreeSet<Action>>);

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, resource: impl Into<String>, actions: &[Action]) -> Self {
        self.0
            .entry(resource.into())
            .or_default()
            .extend(actions.iter().copied());
        self
    }

    /// `None` when the table has no entry for the resource at all.
    pub fn actions_for(&self, resource: &str) -> Option<&BTreeSet<Action>> {
        self.0.get(resource)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub permissions: PermissionTable,
}

impl Role {
    pub fn new(name: impl Into<String>, permissions: PermissionTable) -> Self {
        Self {
            name: name.into(),
            permissions,
        }
    }

    pub fn admin() -> Self {
        Self::new(
            "admin",
            PermissionTable::new()
                .grant("hotels", &Action::ALL)
                .grant("rooms", &Action::ALL),
        )
    }

    pub fn user() -> Self {
        Self::new(
            "user",
            PermissionTable::new()
                .grant("hotels", &[Action::Read])
                .grant("rooms", &[Action::Read]),
        )
    }
}

/// Caller resolved from a bearer credential. Request-scoped, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}
