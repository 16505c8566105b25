//! Field metadata and typed field selectors.
//!
//! A [`FieldDescriptor`] names a field on a declaring type and records the
//! type of its value. Rules match against descriptors only, never against
//! model instances.
//!
//! A [`Field`] pairs a descriptor with a getter, and is what callers use to
//! build a [`FieldRequest`](crate::FieldRequest) for a concrete model.

use std::any::{TypeId, type_name};
use std::fmt;

/// Static metadata describing one field on one declaring type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    owner_type: TypeId,
    owner_type_name: &'static str,
    name: &'static str,
    value_type: TypeId,
    value_type_name: &'static str,
}

impl FieldDescriptor {
    /// Describes field `name` of type `V` declared on `T`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn of<T: 'static, V: 'static>(name: &'static str) -> Self {
        assert!(!name.is_empty(), "Field name must not be empty");
        Self {
            owner_type: TypeId::of::<T>(),
            owner_type_name: type_name::<T>(),
            name,
            value_type: TypeId::of::<V>(),
            value_type_name: type_name::<V>(),
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declaring type's identity.
    pub fn owner_type(&self) -> TypeId {
        self.owner_type
    }

    /// Returns the declaring type's name, for diagnostics.
    pub fn owner_type_name(&self) -> &'static str {
        self.owner_type_name
    }

    /// Returns the value type's identity.
    pub fn value_type(&self) -> TypeId {
        self.value_type
    }

    /// Returns the value type's name, for diagnostics.
    pub fn value_type_name(&self) -> &'static str {
        self.value_type_name
    }

    /// Returns whether this field is declared by exactly `T`.
    pub fn is_declared_by<T: 'static>(&self) -> bool {
        self.owner_type == TypeId::of::<T>()
    }

    /// Returns whether this field holds values of exactly `V`.
    pub fn holds<V: 'static>(&self) -> bool {
        self.value_type == TypeId::of::<V>()
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner_type_name, self.name)
    }
}

/// Typed selector for field `V` on model `T`.
///
/// # Examples
///
/// ```
/// use fieldgate::Field;
///
/// struct Person {
///     age: u32,
/// }
///
/// let age = Field::new("age", |p: &Person| &p.age);
/// assert_eq!(age.descriptor().name(), "age");
/// assert_eq!(*age.get(&Person { age: 31 }), 31);
/// ```
pub struct Field<T, V> {
    descriptor: FieldDescriptor,
    getter: fn(&T) -> &V,
}

impl<T: 'static, V: 'static> Field<T, V> {
    /// Creates a selector from a field name and a getter.
    pub fn new(name: &'static str, getter: fn(&T) -> &V) -> Self {
        Self {
            descriptor: FieldDescriptor::of::<T, V>(name),
            getter,
        }
    }

    /// Returns the field's static metadata.
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Reads the field's current value off `model`.
    pub fn get<'m>(&self, model: &'m T) -> &'m V {
        (self.getter)(model)
    }
}

impl<T, V> Clone for Field<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Field<T, V> {}

impl<T, V> fmt::Debug for Field<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}
