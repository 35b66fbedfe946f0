#![forbid(unsafe_code)]

//! Write-intercepting wrapper over a [`Target`].
//!
//! # Design
//!
//! [`Surrogate<E>`] holds a handle to a [`Target`] and a change handler.
//! Reads pass straight through to the target. Writes go through
//! [`Surrogate::try_set`], which compares the new value against the stored one
//! with [`Value::strict_eq`] and, only if they differ, commits the value and
//! then invokes the handler exactly once.
//!
//! # Performance
//!
//! | Operation   | Complexity                     |
//! |-------------|--------------------------------|
//! | `get()`     | O(1) average, clones the value |
//! | `set()`     | O(1) average + handler cost    |
//! | Memory      | one `Rc` + one boxed handler   |
//!
//! # Failure Modes
//!
//! - **Handler error**: [`Surrogate::try_set`] returns the handler's error
//!   unchanged. The new value is already committed at that point.
//! - **Handler panic**: unwinds through `set()` under `panic = "unwind"`
//!   (the default for dev and test builds). The target borrow is released
//!   before the handler runs, so the committed value stays in place and the
//!   target remains usable. The workspace release profile sets
//!   `panic = "abort"`, so in release binaries a handler panic aborts the
//!   process instead.

use std::convert::Infallible;
use std::fmt;

use tracing::{debug, trace};

use crate::notice::ChangeNotice;
use crate::target::Target;
use crate::value::Value;

type Handler<E> = Box<dyn FnMut(&ChangeNotice) -> Result<(), E>>;

/// Pass-through view over a [`Target`] that reports value changes.
///
/// `E` is the error type of the change handler. Surrogates built by [`wrap`]
/// and [`wrap_notices`] cannot fail and expose the plain [`Surrogate::set`].
///
/// # Invariants
///
/// 1. After any write, `target.get(p)` strictly equals the written value.
/// 2. The handler runs iff the written value differs from the stored one.
/// 3. `version` increments by exactly 1 per committed change.
pub struct Surrogate<E = Infallible> {
    target: Target,
    handler: Handler<E>,
    version: u64,
}

/// Wrap `target` so that every value-changing write calls `on_change` with a
/// formatted message (see [`ChangeNotice`]).
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use rwatch_core::reactive::wrap;
/// use rwatch_core::target::Target;
///
/// let target: Target = [("형규", "솔로")].into_iter().collect();
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&log);
/// let mut surrogate = wrap(&target, move |msg| sink.borrow_mut().push(msg.to_owned()));
///
/// surrogate.set("형규", "솔로");
/// assert!(log.borrow().is_empty());
///
/// surrogate.set("형규", "커플");
/// assert_eq!(*log.borrow(), ["형규가 [솔로] >> [커플] 로 변경되었습니다"]);
/// assert_eq!(target.get("형규"), "커플");
/// ```
pub fn wrap(target: &Target, mut on_change: impl FnMut(&str) + 'static) -> Surrogate {
    Surrogate::with_handler(target, move |notice: &ChangeNotice| {
        on_change(&notice.to_string());
        Ok(())
    })
}

/// Like [`wrap`], but the handler receives the structured [`ChangeNotice`].
pub fn wrap_notices(
    target: &Target,
    mut on_change: impl FnMut(&ChangeNotice) + 'static,
) -> Surrogate {
    Surrogate::with_handler(target, move |notice: &ChangeNotice| {
        on_change(notice);
        Ok(())
    })
}

/// Like [`wrap`], with a fallible handler. Errors surface from
/// [`Surrogate::try_set`].
pub fn try_wrap<E>(
    target: &Target,
    mut on_change: impl FnMut(&str) -> Result<(), E> + 'static,
) -> Surrogate<E> {
    Surrogate::with_handler(target, move |notice: &ChangeNotice| {
        on_change(&notice.to_string())
    })
}

impl<E> Surrogate<E> {
    /// Wrap `target` with a handler that receives structured notices and may
    /// fail.
    #[must_use]
    pub fn with_handler(
        target: &Target,
        handler: impl FnMut(&ChangeNotice) -> Result<(), E> + 'static,
    ) -> Self {
        Self {
            target: target.clone(),
            handler: Box::new(handler),
            version: 0,
        }
    }

    /// Current value of `property` on the target.
    #[must_use]
    pub fn get(&self, property: &str) -> Value {
        self.target.get(property)
    }

    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.target.contains(property)
    }

    /// Handle to the wrapped target.
    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Number of changes committed through this surrogate.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Assign `value` to `property`.
    ///
    /// If the value strictly equals the stored one this is a no-op. Otherwise
    /// the value is committed and the handler is invoked once; its error, if
    /// any, is returned after the commit.
    pub fn try_set(&mut self, property: &str, value: impl Into<Value>) -> Result<(), E> {
        let value = value.into();
        let previous = self.target.get(property);
        if previous.strict_eq(&value) {
            trace!(property, kind = value.kind(), "write unchanged");
            return Ok(());
        }

        self.target.insert(property, value.clone());
        self.version += 1;
        debug!(
            property,
            version = self.version,
            previous = %previous,
            current = %value,
            "property changed"
        );

        let notice = ChangeNotice::new(property, previous, value);
        (self.handler)(&notice)
    }
}

impl Surrogate<Infallible> {
    /// Assign `value` to `property`, notifying the handler if it changed.
    pub fn set(&mut self, property: &str, value: impl Into<Value>) {
        match self.try_set(property, value) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}

impl<E> fmt::Debug for Surrogate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surrogate")
            .field("target", &self.target)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;
    use tracing_test::traced_test;

    fn recording(target: &Target) -> (Surrogate, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let surrogate = wrap(target, move |msg| sink.borrow_mut().push(msg.to_owned()));
        (surrogate, log)
    }

    #[test]
    fn reference_scenario() {
        let target: Target = [("형규", "솔로")].into_iter().collect();
        let (mut surrogate, log) = recording(&target);

        surrogate.set("형규", "솔로");
        assert!(log.borrow().is_empty());
        assert_eq!(target.get("형규"), "솔로");

        surrogate.set("형규", "커플");
        assert_eq!(*log.borrow(), ["형규가 [솔로] >> [커플] 로 변경되었습니다"]);
        assert_eq!(target.get("형규"), "커플");
    }

    #[test]
    fn equal_write_is_noop() {
        let target: Target = [("n", 1)].into_iter().collect();
        let (mut surrogate, log) = recording(&target);

        surrogate.set("n", 1);
        assert!(log.borrow().is_empty());
        assert_eq!(surrogate.version(), 0);
    }

    #[test]
    fn repeat_write_notifies_once() {
        let target = Target::new();
        let (mut surrogate, log) = recording(&target);

        surrogate.set("mood", "happy");
        surrogate.set("mood", "happy");
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(surrogate.version(), 1);
    }

    #[test]
    fn reads_pass_through() {
        let target: Target = [("a", 1)].into_iter().collect();
        let (surrogate, _log) = recording(&target);

        assert_eq!(surrogate.get("a"), Value::from(1));
        // Direct, unintercepted writes are visible through the surrogate.
        target.insert("a", 2);
        assert_eq!(surrogate.get("a"), Value::from(2));
        assert!(surrogate.get("missing").is_undefined());
        assert!(!surrogate.contains("missing"));
        assert!(surrogate.target().ptr_eq(&target));
    }

    #[test]
    fn absent_property_is_introduced() {
        let target = Target::new();
        let (mut surrogate, log) = recording(&target);

        surrogate.set("new", "value");
        assert_eq!(*log.borrow(), ["new가 [undefined] >> [value] 로 변경되었습니다"]);
        assert!(target.contains("new"));
    }

    #[test]
    fn undefined_over_absent_is_noop() {
        let target = Target::new();
        let (mut surrogate, log) = recording(&target);

        surrogate.set("ghost", Value::Undefined);
        assert!(log.borrow().is_empty());
        assert!(!target.contains("ghost"));
    }

    #[test]
    fn explicit_undefined_counts_as_addition() {
        let target: Target = [("k", Value::Undefined)].into_iter().collect();
        let notices = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notices);
        let mut surrogate = wrap_notices(&target, move |n| sink.borrow_mut().push(n.clone()));

        assert!(surrogate.contains("k"));
        surrogate.set("k", 1);
        let notices = notices.borrow();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_addition());
        assert_eq!(notices[0].to_string(), "k가 [undefined] >> [1] 로 변경되었습니다");
    }

    #[test]
    fn kind_change_notifies() {
        let target: Target = [("x", "1")].into_iter().collect();
        let (mut surrogate, log) = recording(&target);

        surrogate.set("x", 1);
        assert_eq!(*log.borrow(), ["x가 [1] >> [1] 로 변경되었습니다"]);
        assert_eq!(target.get("x"), Value::from(1));
    }

    #[test]
    fn nan_always_notifies() {
        let target: Target = [("x", f64::NAN)].into_iter().collect();
        let (mut surrogate, log) = recording(&target);

        surrogate.set("x", f64::NAN);
        assert_eq!(*log.borrow(), ["x가 [NaN] >> [NaN] 로 변경되었습니다"]);
    }

    #[test]
    fn objects_notify_on_reference_change_only() {
        let inner = Target::new();
        let target: Target = [("child", inner.clone())].into_iter().collect();
        let (mut surrogate, log) = recording(&target);

        // Same reference: no-op.
        surrogate.set("child", inner.clone());
        assert!(log.borrow().is_empty());

        // Mutating the nested object is not observed.
        inner.insert("deep", 1);
        assert!(log.borrow().is_empty());

        // Different reference, same (empty) contents: notifies.
        surrogate.set("child", Target::new());
        assert_eq!(
            *log.borrow(),
            ["child가 [[object Object]] >> [[object Object]] 로 변경되었습니다"]
        );
    }

    #[test]
    fn handler_sees_committed_value() {
        let target = Target::new();
        let observed = Rc::new(RefCell::new(Value::Undefined));
        let seen = Rc::clone(&observed);
        let handle = target.clone();
        let mut surrogate = wrap(&target, move |_| {
            *seen.borrow_mut() = handle.get("k");
        });

        surrogate.set("k", "v");
        assert_eq!(*observed.borrow(), "v");
    }

    #[test]
    fn structured_notices() {
        let target: Target = [("n", 1)].into_iter().collect();
        let notices = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notices);
        let mut surrogate = wrap_notices(&target, move |n| sink.borrow_mut().push(n.clone()));

        surrogate.set("n", 2);
        let notices = notices.borrow();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].property, "n");
        assert_eq!(notices[0].previous, Value::from(1));
        assert_eq!(notices[0].current, Value::from(2));
    }

    #[test]
    fn handler_error_propagates_after_commit() {
        let target: Target = [("k", "old")].into_iter().collect();
        let mut surrogate = try_wrap(&target, |msg| Err(msg.to_owned()));

        let err = surrogate.try_set("k", "new").unwrap_err();
        assert_eq!(err, "k가 [old] >> [new] 로 변경되었습니다");
        assert_eq!(target.get("k"), "new");
        assert_eq!(surrogate.version(), 1);

        // No change, so the failing handler is not reached.
        assert_eq!(surrogate.try_set("k", "new"), Ok(()));
    }

    #[test]
    fn handler_panic_propagates_after_commit() {
        let target: Target = [("k", "old")].into_iter().collect();
        let mut surrogate = wrap(&target, |_| panic!("handler failed"));

        let result = catch_unwind(AssertUnwindSafe(|| surrogate.set("k", "new")));
        assert!(result.is_err());
        assert_eq!(target.get("k"), "new");
        // Target borrow was released before the handler ran.
        target.insert("k", "after");
        assert_eq!(target.get("k"), "after");
    }

    #[test]
    fn one_call_per_change() {
        let target = Target::new();
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let mut surrogate = wrap(&target, move |_| count_clone.set(count_clone.get() + 1));

        for i in 1..=100 {
            surrogate.set("i", i);
        }
        assert_eq!(count.get(), 100);
        assert_eq!(surrogate.version(), 100);
    }

    #[test]
    fn debug_format() {
        let target: Target = [("a", 1)].into_iter().collect();
        let (surrogate, _log) = recording(&target);
        let dbg = format!("{surrogate:?}");
        assert!(dbg.contains("Surrogate"));
        assert!(dbg.contains("version"));
    }

    #[traced_test]
    #[test]
    fn logs_committed_changes() {
        let target = Target::new();
        let (mut surrogate, _log) = recording(&target);

        surrogate.set("k", "v");
        assert!(logs_contain("property changed"));
        assert!(logs_contain("version=1"));
    }

    #[traced_test]
    #[test]
    fn logs_unchanged_writes() {
        let target: Target = [("k", "v")].into_iter().collect();
        let (mut surrogate, _log) = recording(&target);

        surrogate.set("k", "v");
        assert!(logs_contain("write unchanged"));
        assert!(!logs_contain("property changed"));
    }
}
