#![forbid(unsafe_code)]

//! Shared, mutable property map.
//!
//! A [`Target`] is a handle to a map from property names to [`Value`]s.
//! Cloning a `Target` creates a new handle to the **same** properties, the
//! same way an object reference is shared: writes through one handle are
//! visible through every other.
//!
//! Writes made directly on a `Target` are not intercepted. Route writes
//! through a [`Surrogate`](crate::reactive::Surrogate) to get notified.
//!
//! # Failure Modes
//!
//! - **Borrow while iterating**: [`Target::with_props`] holds an immutable
//!   borrow for the duration of the closure. Writing to the same target from
//!   inside the closure panics (RefCell borrow rules).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// Shared handle to a property map.
#[derive(Default)]
pub struct Target {
    props: Rc<RefCell<HashMap<String, Value>>>,
}

// Manual Clone: shares the same Rc.
impl Clone for Target {
    fn clone(&self) -> Self {
        Self {
            props: Rc::clone(&self.props),
        }
    }
}

impl fmt::Debug for Target {
    // Keys only: nested objects may refer back to this target.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("keys", &self.keys())
            .finish_non_exhaustive()
    }
}

impl Target {
    /// Create an empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `property`, or [`Value::Undefined`] if absent.
    #[must_use]
    pub fn get(&self, property: &str) -> Value {
        self.props
            .borrow()
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether `property` has been assigned.
    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.props.borrow().contains_key(property)
    }

    /// Store `value` under `property` without notifying anyone.
    ///
    /// Returns the value previously stored, if any.
    pub fn insert(&self, property: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.props.borrow_mut().insert(property.into(), value.into())
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.props.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.borrow().is_empty()
    }

    /// Property names, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.props.borrow().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Access the underlying map by reference without cloning values.
    pub fn with_props<R>(&self, f: impl FnOnce(&HashMap<String, Value>) -> R) -> R {
        f(&self.props.borrow())
    }

    /// Whether both handles refer to the same properties.
    #[must_use]
    pub fn ptr_eq(&self, other: &Target) -> bool {
        Rc::ptr_eq(&self.props, &other.props)
    }
}

impl<K, V> FromIterator<(K, V)> for Target
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let props = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            props: Rc::new(RefCell::new(props)),
        }
    }
}
