//! Authenticated identity consulted by security rules.
//!
//! The registry never establishes identity. Callers attach an
//! already-authenticated [`Principal`] to a request and rules read it.

use serde::{Deserialize, Serialize};

/// An authenticated caller and the roles it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Display name or login of the caller.
    pub name: String,
    /// Roles granted by the identity provider (e.g., "admin", "hr").
    pub roles: Vec<String>,
}

impl Principal {
    /// Creates a principal with no roles.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: Vec::new(),
        }
    }

    /// Adds a role. Duplicate roles are ignored.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        let role = role.into();
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Returns whether this principal holds `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
