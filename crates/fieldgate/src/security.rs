//! Built-in security rules.
//!
//! Security rules restrict named fields based on the field's value or on the
//! caller's identity:
//! - [`ValueRule`]: maps the field's current value to an access level
//! - [`RoleRule`]: requires the caller to hold a role
//! - [`OwnerTypeRule`]: fixed limitation on every field of one type

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::access::AccessRight;
use crate::error::Result;
use crate::field::FieldDescriptor;
use crate::request::FieldRequest;
use crate::rule::{AccessRule, FieldPattern};

fn read_typed<'a, V: 'static>(request: &FieldRequest<'a>) -> Result<&'a V> {
    request.value_as::<V>()
}

fn read_str<'a>(request: &FieldRequest<'a>) -> Result<&'a str> {
    request.value_str()
}

// ---------------------------------------------------------------------------
// ValueRule
// ---------------------------------------------------------------------------

/// Decides access from the current value of every field matching a pattern.
///
/// # Examples
///
/// ```
/// use fieldgate::{AccessRight, AccessRule, Field, FieldRequest, ValueRule};
///
/// struct Player {
///     name: String,
/// }
///
/// let rule = ValueRule::for_str("name", |name| {
///     if name.starts_with('J') { AccessRight::All } else { AccessRight::ReadOnly }
/// });
///
/// let name = Field::new("name", |p: &Player| &p.name);
/// let chad = Player { name: "Chad".to_string() };
/// assert_eq!(rule.rights_for(&FieldRequest::new(&chad, &name))?, AccessRight::ReadOnly);
/// # Ok::<(), fieldgate::AccessError>(())
/// ```
pub struct ValueRule<V: ?Sized + 'static> {
    name: String,
    pattern: FieldPattern,
    read: for<'r, 'a> fn(&'r FieldRequest<'a>) -> Result<&'a V>,
    map: Box<dyn Fn(&V) -> AccessRight + Send + Sync>,
}

impl<V: 'static> ValueRule<V> {
    /// Creates a rule reading values of exactly type `V`.
    ///
    /// A matching field holding any other type fails with
    /// [`AccessError::ValueTypeMismatch`](crate::AccessError::ValueTypeMismatch).
    pub fn new<F>(pattern: impl Into<FieldPattern>, map: F) -> Self
    where
        F: Fn(&V) -> AccessRight + Send + Sync + 'static,
    {
        let pattern = pattern.into();
        Self {
            name: format!("ValueRule<{}>({})", type_name::<V>(), pattern.as_str()),
            pattern,
            read: read_typed::<V>,
            map: Box::new(map),
        }
    }
}

impl ValueRule<str> {
    /// Creates a rule reading textual values (`String`, `&str`, `Box<str>`).
    pub fn for_str<F>(pattern: impl Into<FieldPattern>, map: F) -> Self
    where
        F: Fn(&str) -> AccessRight + Send + Sync + 'static,
    {
        let pattern = pattern.into();
        Self {
            name: format!("ValueRule<str>({})", pattern.as_str()),
            pattern,
            read: read_str,
            map: Box::new(map),
        }
    }
}

impl<V: ?Sized + 'static> ValueRule<V> {
    /// Sets the rule's name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the field pattern this rule matches.
    pub fn pattern(&self) -> &FieldPattern {
        &self.pattern
    }
}

impl<V: ?Sized + 'static> AccessRule for ValueRule<V> {
    fn matches(&self, descriptor: &FieldDescriptor) -> bool {
        self.pattern.matches(descriptor.name())
    }

    fn rights_for(&self, request: &FieldRequest<'_>) -> Result<AccessRight> {
        let value = (self.read)(request)?;
        Ok((self.map)(value))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<V: ?Sized + 'static> fmt::Debug for ValueRule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// RoleRule
// ---------------------------------------------------------------------------

/// Requires the caller to hold a role for fields matching a pattern.
///
/// Callers holding the role get [`AccessRight::All`]; everyone else,
/// including requests without a principal, gets the limitation.
#[derive(Debug, Clone)]
pub struct RoleRule {
    name: String,
    pattern: FieldPattern,
    role: String,
    limitation: AccessRight,
}

impl RoleRule {
    /// Creates a rule limiting `pattern` fields for callers without `role`.
    pub fn new(
        pattern: impl Into<FieldPattern>,
        role: impl Into<String>,
        limitation: AccessRight,
    ) -> Self {
        let pattern = pattern.into();
        let role = role.into();
        Self {
            name: format!("RoleRule({} requires {role})", pattern.as_str()),
            pattern,
            role,
            limitation,
        }
    }

    /// Sets the rule's name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the required role.
    pub fn role(&self) -> &str {
        &self.role
    }
}

impl AccessRule for RoleRule {
    fn matches(&self, descriptor: &FieldDescriptor) -> bool {
        self.pattern.matches(descriptor.name())
    }

    fn rights_for(&self, request: &FieldRequest<'_>) -> Result<AccessRight> {
        match request.principal() {
            Some(principal) if principal.has_role(&self.role) => Ok(AccessRight::All),
            _ => Ok(self.limitation),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// OwnerTypeRule
// ---------------------------------------------------------------------------

/// Applies a fixed limitation to every field declared by `T`.
pub struct OwnerTypeRule<T> {
    name: String,
    limitation: AccessRight,
    _owner: PhantomData<fn() -> T>,
}

impl<T: 'static> OwnerTypeRule<T> {
    /// Creates a rule limiting all fields of `T`.
    pub fn new(limitation: AccessRight) -> Self {
        Self {
            name: format!("OwnerTypeRule<{}>", type_name::<T>()),
            limitation,
            _owner: PhantomData,
        }
    }
}

impl<T: 'static> AccessRule for OwnerTypeRule<T> {
    fn matches(&self, descriptor: &FieldDescriptor) -> bool {
        descriptor.is_declared_by::<T>()
    }

    fn rights_for(&self, _request: &FieldRequest<'_>) -> Result<AccessRight> {
        Ok(self.limitation)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<T> fmt::Debug for OwnerTypeRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnerTypeRule")
            .field("name", &self.name)
            .field("limitation", &self.limitation)
            .finish()
    }
}
