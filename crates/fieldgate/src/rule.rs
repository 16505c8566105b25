//! The access rule abstraction.
//!
//! Every rule answers two questions:
//!
//! 1. Does it apply to a field at all? ([`AccessRule::matches`], metadata only)
//! 2. If so, what access does it grant for this request? ([`AccessRule::rights_for`])
//!
//! The registry only calls `rights_for` after `matches` returned `true` for
//! the request's descriptor.

use serde::{Deserialize, Serialize};

use crate::access::AccessRight;
use crate::error::Result;
use crate::field::FieldDescriptor;
use crate::request::FieldRequest;

/// A rule restricting access to some fields.
///
/// Rules are evaluated concurrently from shared registries and must be
/// `Send + Sync`. Any configuration they hold is fixed at construction.
///
/// # Example
///
/// ```
/// use fieldgate::{AccessRight, AccessRule, FieldDescriptor, FieldRequest};
///
/// /// Names starting with "J" are editable, everything else is read-only.
/// struct JNameRule;
///
/// impl AccessRule for JNameRule {
///     fn matches(&self, descriptor: &FieldDescriptor) -> bool {
///         descriptor.name() == "name"
///     }
///
///     fn rights_for(&self, request: &FieldRequest<'_>) -> fieldgate::Result<AccessRight> {
///         if request.value_str()?.starts_with('J') {
///             Ok(AccessRight::All)
///         } else {
///             Ok(AccessRight::ReadOnly)
///         }
///     }
/// }
/// ```
pub trait AccessRule: Send + Sync {
    /// Returns whether this rule applies to `descriptor`.
    ///
    /// Must be pure and cheap; it runs once per rule per resolution.
    fn matches(&self, descriptor: &FieldDescriptor) -> bool;

    /// Computes the access this rule grants for `request`.
    ///
    /// # Errors
    ///
    /// [`AccessError`](crate::AccessError) when the request's model or value
    /// is not of the type this rule expects.
    fn rights_for(&self, request: &FieldRequest<'_>) -> Result<AccessRight>;

    /// Returns a name for explanations and logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Field name pattern used by security rules.
///
/// Supported forms:
/// - `"*"` - every field
/// - `"pii_*"` - fields starting with "pii_"
/// - `"*_secret"` - fields ending with "_secret"
/// - `"ssn"` - exact field name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPattern {
    pattern: String,
}

impl FieldPattern {
    /// Creates a new field pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Returns the raw pattern.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns whether this pattern matches `field_name`.
    pub fn matches(&self, field_name: &str) -> bool {
        let pattern = self.pattern.as_str();

        if pattern == "*" {
            return true;
        }

        if let Some(prefix) = pattern.strip_suffix('*') {
            return field_name.starts_with(prefix);
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            return field_name.ends_with(suffix);
        }

        field_name == pattern
    }
}

impl From<&str> for FieldPattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for FieldPattern {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}
