use std::{
    any::{Any, type_name},
    fmt::Debug,
};

/// Errors returned when reading a typed value out of a [`Payload`] slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// The slot holds no value.
    #[error("payload slot is empty")]
    Missing,
    /// The slot holds a value of a different type.
    #[error("payload holds a `{found}`, not a `{expected}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// A type-erased value attached to a node or connection.  Callers know what
/// they stored and read it back with [`Payload::get`], which fails instead of
/// panicking when the type does not match.
pub struct Payload {
    value: Box<dyn Any>,
    type_name: &'static str,
}

impl Payload {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the stored type, as reported by [`std::any::type_name`].
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn get<T: Any>(&self) -> Result<&T, PayloadError> {
        self.value
            .downcast_ref::<T>()
            .ok_or(PayloadError::TypeMismatch {
                expected: type_name::<T>(),
                found: self.type_name,
            })
    }

    pub fn get_mut<T: Any>(&mut self) -> Result<&mut T, PayloadError> {
        let found = self.type_name;
        self.value
            .downcast_mut::<T>()
            .ok_or(PayloadError::TypeMismatch {
                expected: type_name::<T>(),
                found,
            })
    }
}

impl Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Payload({})", self.type_name)
    }
}

/// Reads a typed value out of an optional slot.
pub(crate) fn slot_get<T: Any>(slot: &Option<Payload>) -> Result<&T, PayloadError> {
    slot.as_ref().ok_or(PayloadError::Missing)?.get::<T>()
}
