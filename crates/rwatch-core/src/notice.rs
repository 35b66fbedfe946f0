#![forbid(unsafe_code)]

//! Change notifications.
//!
//! A [`ChangeNotice`] describes one property's transition. Its `Display`
//! form is the message handed to string callbacks:
//!
//! ```text
//! {property}가 [{previous}] >> [{current}] 로 변경되었습니다
//! ```
//!
//! The format is a compatibility contract for anyone parsing the messages.

use std::fmt;

use crate::value::Value;

/// One property's transition from `previous` to `current`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeNotice {
    pub property: String,
    pub previous: Value,
    pub current: Value,
}

impl ChangeNotice {
    #[must_use]
    pub fn new(property: impl Into<String>, previous: Value, current: Value) -> Self {
        Self {
            property: property.into(),
            previous,
            current,
        }
    }

    /// Whether the previous value was `Undefined`.
    ///
    /// True both for a property that was absent and for one explicitly
    /// holding [`Value::Undefined`].
    #[must_use]
    pub fn is_addition(&self) -> bool {
        self.previous.is_undefined()
    }
}

impl fmt::Display for ChangeNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}가 [{}] >> [{}] 로 변경되었습니다",
            self.property, self.previous, self.current
        )
    }
}
