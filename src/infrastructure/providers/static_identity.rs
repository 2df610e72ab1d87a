use crate::domain::entities::{Identity, Role};
use crate::domain::ports::IdentityProvider;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum IdentityTableError {
    #[error("Failed to read identity file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid identity file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Identity file {0} defines no credentials")]
    Empty(String),
}

#[derive(Debug, Deserialize)]
struct CredentialEntry {
    token: String,
    #[serde(flatten)]
    identity: Identity,
}

/// Fixed token → identity table held in memory.
///
/// The file form is a JSON array of
/// `{ "token", "id", "email", "name", "role": { "name", "permissions": { "<resource>": ["read", ...] } } }`.
#[derive(Debug, Clone)]
pub struct StaticIdentityProvider {
    identities: HashMap<String, Identity>,
}

impl StaticIdentityProvider {
    pub fn new(identities: impl IntoIterator<Item = (String, Identity)>) -> Self {
        Self {
            identities: identities.into_iter().collect(),
        }
    }

    /// `admin-key` → admin with full rights, `user-key` → read-only user.
    pub fn builtin() -> Self {
        Self::new([
            (
                "admin-key".to_string(),
                Identity {
                    id: 1,
                    email: "tino1@example.com".to_string(),
                    name: "Tino One".to_string(),
                    role: Role::admin(),
                },
            ),
            (
                "user-key".to_string(),
                Identity {
                    id: 2,
                    email: "tino2@example.com".to_string(),
                    name: "Tino Two".to_string(),
                    role: Role::user(),
                },
            ),
        ])
    }

    pub fn from_json(json: &str, origin: &str) -> Result<Self, IdentityTableError> {
        let entries: Vec<CredentialEntry> =
            serde_json::from_str(json).map_err(|source| IdentityTableError::Parse {
                path: origin.to_string(),
                source,
            })?;
        if entries.is_empty() {
            return Err(IdentityTableError::Empty(origin.to_string()));
        }

        Ok(Self::new(
            entries
                .into_iter()
                .map(|entry| (entry.token, entry.identity)),
        ))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, IdentityTableError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| IdentityTableError::Read {
            path: origin.clone(),
            source,
        })?;
        Self::from_json(&json, &origin)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn resolve(&self, token: &str) -> Option<Identity> {
        self.identities.get(token).cloned()
    }
}
