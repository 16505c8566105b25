//! Per-call view over a model instance and one of its fields.

use std::any::{Any, type_name};

use crate::error::{AccessError, Result};
use crate::field::{Field, FieldDescriptor};
use crate::identity::Principal;

/// A single (model, field) pair to resolve access for.
///
/// Borrows the caller's model for the duration of one resolution. The field
/// value is read once, when the request is built.
///
/// # Examples
///
/// ```
/// use fieldgate::{Field, FieldRequest};
///
/// struct Player {
///     name: String,
/// }
///
/// let name = Field::new("name", |p: &Player| &p.name);
/// let player = Player { name: "Jeremy".to_string() };
///
/// let request = FieldRequest::new(&player, &name);
/// assert_eq!(request.field_name(), "name");
/// assert_eq!(request.value_str()?, "Jeremy");
/// assert!(request.model_as::<Player>().is_ok());
/// assert!(request.model_as::<String>().is_err());
/// # Ok::<(), fieldgate::AccessError>(())
/// ```
#[derive(Clone, Copy)]
pub struct FieldRequest<'a> {
    model: &'a dyn Any,
    model_type_name: &'static str,
    descriptor: &'a FieldDescriptor,
    value: &'a dyn Any,
    value_type_name: &'static str,
    principal: Option<&'a Principal>,
}

impl<'a> FieldRequest<'a> {
    /// Builds a request for `field` on `model`.
    pub fn new<T: 'static, V: 'static>(model: &'a T, field: &'a Field<T, V>) -> Self {
        Self::from_parts(model, field.descriptor(), field.get(model))
    }

    /// Builds a request from a model, a descriptor and an already-read value.
    ///
    /// For collaborators that resolve fields without a [`Field`] selector.
    /// Nothing checks that `descriptor` really belongs to `model`; rules
    /// that rely on it report [`AccessError::TypeMismatch`] instead.
    pub fn from_parts<T: 'static, V: 'static>(
        model: &'a T,
        descriptor: &'a FieldDescriptor,
        value: &'a V,
    ) -> Self {
        Self {
            model,
            model_type_name: type_name::<T>(),
            descriptor,
            value,
            value_type_name: type_name::<V>(),
            principal: None,
        }
    }

    /// Attaches the authenticated caller.
    #[must_use]
    pub fn with_principal(mut self, principal: &'a Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Returns the targeted field's metadata.
    pub fn descriptor(&self) -> &'a FieldDescriptor {
        self.descriptor
    }

    /// Returns the targeted field's name.
    pub fn field_name(&self) -> &'static str {
        self.descriptor.name()
    }

    /// Returns the authenticated caller, if one was attached.
    pub fn principal(&self) -> Option<&'a Principal> {
        self.principal
    }

    /// Returns the model's concrete type name, for diagnostics.
    pub fn model_type_name(&self) -> &'static str {
        self.model_type_name
    }

    /// Down-casts the model to `T`.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] if the model is not exactly a `T`.
    pub fn model_as<T: 'static>(&self) -> Result<&'a T> {
        self.model
            .downcast_ref::<T>()
            .ok_or(AccessError::TypeMismatch {
                expected: type_name::<T>(),
                actual: self.model_type_name,
            })
    }

    /// Coerces the field value to `V`.
    ///
    /// # Errors
    ///
    /// [`AccessError::ValueTypeMismatch`] if the value is not exactly a `V`.
    pub fn value_as<V: 'static>(&self) -> Result<&'a V> {
        self.value
            .downcast_ref::<V>()
            .ok_or_else(|| self.value_mismatch(type_name::<V>()))
    }

    /// Coerces a textual field value to `&str`.
    ///
    /// Accepts `String`, `&'static str` and `Box<str>` values.
    ///
    /// # Errors
    ///
    /// [`AccessError::ValueTypeMismatch`] for any other value type.
    pub fn value_str(&self) -> Result<&'a str> {
        let value = self.value;
        if let Some(s) = value.downcast_ref::<String>() {
            return Ok(s.as_str());
        }
        if let Some(s) = value.downcast_ref::<&'static str>() {
            return Ok(*s);
        }
        if let Some(s) = value.downcast_ref::<Box<str>>() {
            return Ok(&**s);
        }
        Err(self.value_mismatch("str"))
    }

    fn value_mismatch(&self, expected: &'static str) -> AccessError {
        AccessError::ValueTypeMismatch {
            field: self.descriptor.name(),
            expected,
            actual: self.value_type_name,
        }
    }
}

impl std::fmt::Debug for FieldRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRequest")
            .field("model_type", &self.model_type_name)
            .field("field", &self.descriptor.name())
            .field("value_type", &self.value_type_name)
            .field("principal", &self.principal.map(|p| p.name.as_str()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        name: String,
        age: u32,
    }

    #[derive(Debug)]
    struct Player {
        nickname: &'static str,
    }

    fn person(age: u32) -> Person {
        Person {
            name: "Jeremy".to_string(),
            age,
        }
    }

    #[test]
    fn test_model_down_cast() {
        let age = Field::new("age", |p: &Person| &p.age);
        let model = person(31);
        let request = FieldRequest::new(&model, &age);

        assert_eq!(request.model_as::<Person>().unwrap().age, 31);

        let err = request.model_as::<Player>().unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { .. }));
    }

    #[test]
    fn test_value_coercion() {
        let age = Field::new("age", |p: &Person| &p.age);
        let model = person(29);
        let request = FieldRequest::new(&model, &age);

        assert_eq!(*request.value_as::<u32>().unwrap(), 29);

        match request.value_as::<String>() {
            Err(AccessError::ValueTypeMismatch {
                field,
                expected,
                actual,
            }) => {
                assert_eq!(field, "age");
                assert!(expected.ends_with("String"));
                assert_eq!(actual, "u32");
            }
            other => panic!("Expected ValueTypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_value_str_accepts_textual_types() {
        let name = Field::new("name", |p: &Person| &p.name);
        let model = person(40);
        assert_eq!(FieldRequest::new(&model, &name).value_str().unwrap(), "Jeremy");

        let nickname = Field::new("nickname", |p: &Player| &p.nickname);
        let player = Player { nickname: "Chad" };
        assert_eq!(
            FieldRequest::new(&player, &nickname).value_str().unwrap(),
            "Chad"
        );

        let boxed: Box<str> = "boxed".into();
        let descriptor = FieldDescriptor::of::<Player, Box<str>>("label");
        let request = FieldRequest::from_parts(&player, &descriptor, &boxed);
        assert_eq!(request.value_str().unwrap(), "boxed");
    }

    #[test]
    fn test_value_str_rejects_numbers() {
        let age = Field::new("age", |p: &Person| &p.age);
        let model = person(31);
        let err = FieldRequest::new(&model, &age).value_str().unwrap_err();
        assert_eq!(err.kind(), "value_type_mismatch");
    }

    #[test]
    fn test_principal_is_optional() {
        let age = Field::new("age", |p: &Person| &p.age);
        let model = person(31);
        let request = FieldRequest::new(&model, &age);
        assert!(request.principal().is_none());

        let principal = Principal::new("jeremy").with_role("hr");
        let request = request.with_principal(&principal);
        assert_eq!(request.principal().map(|p| p.name.as_str()), Some("jeremy"));
    }

    #[test]
    fn test_from_parts_with_foreign_descriptor() {
        let descriptor = FieldDescriptor::of::<Person, u32>("age");
        let player = Player { nickname: "Chad" };
        let age = 31_u32;

        let request = FieldRequest::from_parts(&player, &descriptor, &age);
        assert!(request.descriptor().is_declared_by::<Person>());
        assert!(request.model_as::<Person>().is_err());
        assert!(request.model_type_name().ends_with("Player"));
    }
}
