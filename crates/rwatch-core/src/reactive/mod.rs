#![forbid(unsafe_code)]

//! Write interception for [`Target`](crate::target::Target)s.
//!
//! - [`wrap`]: build a [`Surrogate`] whose handler receives formatted change
//!   messages.
//! - [`wrap_notices`]: same, with structured [`ChangeNotice`](crate::notice::ChangeNotice)s.
//! - [`try_wrap`]: same as `wrap`, with a fallible handler.
//!
//! # Architecture
//!
//! A `Surrogate` shares the target through its `Rc<RefCell<..>>` handle and
//! owns the handler. There is no subscriber list: one surrogate, one handler.
//! Nested objects stored in the target are not wrapped.
//!
//! # Invariants
//!
//! 1. Reads through a surrogate always return the target's current value.
//! 2. Writing a value strictly equal to the stored one is a no-op (no commit,
//!    no notification, no version bump).
//! 3. A differing write commits first, then notifies exactly once, before
//!    `set()` returns.
//! 4. Handler failures reach the writer unmodified.

pub mod surrogate;

pub use surrogate::{Surrogate, try_wrap, wrap, wrap_notices};
