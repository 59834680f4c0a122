//! Typestate markers for builders with required fields.
//!
//! A builder generic over `Unset<T>`/`Set<T>` only exposes its final `build`
//! once every required field has moved to `Set`.

use std::marker::PhantomData;

/// A required field that has not been provided yet.
pub struct Unset<T> {
    _value: PhantomData<T>,
}

impl<T> Default for Unset<T> {
    fn default() -> Self {
        Self {
            _value: PhantomData,
        }
    }
}

impl<T> Unset<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A required field holding its value.
#[derive(Clone)]
pub struct Set<T> {
    value: T,
}

impl<T> Set<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn as_ref_inner(&self) -> &T {
        &self.value
    }
}
