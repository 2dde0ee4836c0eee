//! Lookup predicates shared by every collection.
//!
//! A lookup is either an exact match on a scalar field or a containment test
//! on a sequence field. A predicate applied to the wrong kind of field, or
//! with a key of the wrong type, simply matches nothing.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Value a predicate compares against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Text(String),
    Id(i32),
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Id(value)
    }
}

/// Single-field lookup over a collection of `F`-addressable records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate<F> {
    /// Field value equals the key
    Equals(F, Key),
    /// Field sequence contains the key
    Contains(F, Key),
}

impl<F: Copy> Predicate<F> {
    pub fn equals(field: F, key: impl Into<Key>) -> Self {
        Predicate::Equals(field, key.into())
    }

    pub fn contains(field: F, key: impl Into<Key>) -> Self {
        Predicate::Contains(field, key.into())
    }

    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Record<Field = F>,
    {
        match self {
            Predicate::Equals(field, key) => record.field_equals(*field, key),
            Predicate::Contains(field, key) => record.field_contains(*field, key),
        }
    }
}

/// A stored entity addressable by a primary identifier
pub trait Record: Clone + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + Display + Debug + Send + Sync + 'static;
    type Field: Copy + Debug + Send + Sync + 'static;

    /// Human readable collection name used in error messages
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;

    fn field_equals(&self, field: Self::Field, key: &Key) -> bool;

    fn field_contains(&self, field: Self::Field, key: &Key) -> bool;
}
