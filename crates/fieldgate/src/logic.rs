//! Business-condition rules scoped to one model type.

use std::any::type_name;
use std::fmt;

use crate::access::AccessRight;
use crate::error::Result;
use crate::field::FieldDescriptor;
use crate::request::FieldRequest;
use crate::rule::AccessRule;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Limits every field declared by `T` while a predicate over the model holds.
///
/// Matches fields declared by exactly `T`; there is no subtype matching.
/// When the predicate is true the configured limitation applies, otherwise
/// the rule grants [`AccessRight::All`].
///
/// # Examples
///
/// ```
/// use fieldgate::{AccessRight, AccessRule, Field, FieldRequest, LogicRule};
///
/// struct Person {
///     age: u32,
/// }
///
/// let rule = LogicRule::new(|p: &Person| p.age > 30, AccessRight::ReadOnly);
/// let age = Field::new("age", |p: &Person| &p.age);
///
/// let older = Person { age: 31 };
/// assert!(rule.matches(age.descriptor()));
/// assert_eq!(rule.rights_for(&FieldRequest::new(&older, &age))?, AccessRight::ReadOnly);
/// # Ok::<(), fieldgate::AccessError>(())
/// ```
pub struct LogicRule<T> {
    name: String,
    predicate: Predicate<T>,
    limitation: AccessRight,
}

impl<T: 'static> LogicRule<T> {
    /// Creates a rule applying `limitation` whenever `predicate` holds.
    pub fn new<F>(predicate: F, limitation: AccessRight) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            name: format!("LogicRule<{}>", type_name::<T>()),
            predicate: Box::new(predicate),
            limitation,
        }
    }

    /// Sets the rule's name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the access applied while the predicate holds.
    pub fn limitation(&self) -> AccessRight {
        self.limitation
    }
}

impl<T: 'static> AccessRule for LogicRule<T> {
    fn matches(&self, descriptor: &FieldDescriptor) -> bool {
        descriptor.is_declared_by::<T>()
    }

    fn rights_for(&self, request: &FieldRequest<'_>) -> Result<AccessRight> {
        let model = request.model_as::<T>()?;
        if (self.predicate)(model) {
            Ok(self.limitation)
        } else {
            Ok(AccessRight::All)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<T> fmt::Debug for LogicRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicRule")
            .field("name", &self.name)
            .field("limitation", &self.limitation)
            .finish_non_exhaustive()
    }
}
