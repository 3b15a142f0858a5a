//! Authorization contract
//!
//! Permission evaluation lives outside this engine; the repository only
//! needs a yes/no decision and a distinguishable access-denied failure.

use crate::error::{RepositoryError, Result};
use crate::kind::ResourceKind;
use std::fmt;

/// CRUD action on a resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

/// A permission is one action on one resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission {
    pub kind: ResourceKind,
    pub action: Action,
}

impl Permission {
    pub const fn new(kind: ResourceKind, action: Action) -> Self {
        Self { kind, action }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.path_segment(), self.action.as_str())
    }
}

/// Decides whether a principal holds a permission
pub trait Authorizer: Send + Sync {
    fn must_have(&self, principal: &str, permission: Permission) -> Result<()>;
}

/// Grants every permission to every principal.
///
/// Stands in until a real policy backend is wired up.
#[derive(Debug, Default)]
pub struct OpenAccess;

impl Authorizer for OpenAccess {
    fn must_have(&self, principal: &str, _permission: Permission) -> Result<()> {
        if principal.is_empty() {
            return Err(RepositoryError::AccessDenied(
                "request carries no principal".to_string(),
            ));
        }
        Ok(())
    }
}
