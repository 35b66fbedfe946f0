#![forbid(unsafe_code)]

//! rwatch demo library.
//!
//! Exposes the demo internals so tests can drive a scenario without spawning
//! the binary.
//!
//! - [`cli`]: options from environment variables and flags.
//! - [`logging`]: `tracing-subscriber` setup.
//! - [`scenario`]: builds a target, wraps it and replays writes.

pub mod cli;
pub mod logging;
pub mod scenario;
