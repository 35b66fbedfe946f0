#![forbid(unsafe_code)]

//! Core: transparent property wrapper with change notification.
//!
//! # Primary responsibilities
//! - **Value**: closed set of property value kinds with strict equality.
//! - **Target**: shared, mutable property map.
//! - **ChangeNotice**: one property's transition and its message form.
//! - **Surrogate**: pass-through view that reports value-changing writes.
//!
//! # Example
//!
//! ```
//! use rwatch_core::{Target, wrap};
//!
//! let target: Target = [("형규", "솔로")].into_iter().collect();
//! let mut surrogate = wrap(&target, |msg| println!("{msg}"));
//! surrogate.set("형규", "커플"); // prints: 형규가 [솔로] >> [커플] 로 변경되었습니다
//! assert_eq!(target.get("형규"), "커플");
//! ```

pub mod notice;
pub mod reactive;
pub mod target;
pub mod value;

pub use notice::ChangeNotice;
pub use reactive::{Surrogate, try_wrap, wrap, wrap_notices};
pub use target::Target;
pub use value::Value;
