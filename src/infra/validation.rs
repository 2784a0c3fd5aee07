//! Utilities for validating constraints on types.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// A type that cannot be instatiated without validating the value within.
/// That is, if you have a [`Valid<T>`], `T` is guaranteed to be valid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Valid<T> {
    value: T,
}

impl<T> Valid<T> {
    /// Constructs a new validated value.
    pub fn new(value: T) -> Result<Valid<T>, ValidationErrors>
    where
        T: Validate,
    {
        value.validate().map(|_| Valid { value })
    }

    /// Returns a reference to the validated value.
    pub fn inner(&self) -> &T {
        &self.value
    }

    /// Returns the validated value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<'de, T: Deserialize<'de> + Validate> Deserialize<'de> for Valid<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: T = T::deserialize(deserializer)?;
        Valid::new(value).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Valid;
    use crate::feature::todo::todo_api::{DeleteTodos, NewTodo, UpdateTodo};

    #[test]
    pub fn subject_is_required() {
        let value = serde_json::from_str::<Valid<NewTodo>>(r#"{ "subject": "buy milk" }"#);
        assert_eq!("", value.unwrap().inner().description);

        let value = serde_json::from_str::<Valid<NewTodo>>(r#"{ "subject": "" }"#);
        assert!(value.is_err());
    }

    #[test]
    pub fn update_needs_an_id() {
        let value =
            serde_json::from_str::<Valid<UpdateTodo>>(r#"{ "id": 0, "subject": "walk dog" }"#);
        assert!(value.is_err());

        let value =
            serde_json::from_str::<Valid<UpdateTodo>>(r#"{ "id": 3, "subject": "walk dog" }"#);
        assert!(value.is_ok());
    }

    #[test]
    pub fn delete_needs_ids() {
        let value = serde_json::from_str::<Valid<DeleteTodos>>(r#"{ "ids": [] }"#);
        assert!(value.is_err());

        let value = serde_json::from_str::<Valid<DeleteTodos>>(r#"{ "ids": [1, 1, 2] }"#);
        assert_eq!(vec![1, 1, 2], value.unwrap().into_inner().ids);
    }
}
