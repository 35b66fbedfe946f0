#![forbid(unsafe_code)]

//! Replays a sequence of writes to one property through a surrogate.

use rwatch_core::{Target, Value, wrap};
use tracing::info;

use crate::cli::Opts;

/// Parse a command-line literal.
///
/// `undefined`, `null`, `true` and `false` map to their kinds, finite
/// numbers become [`Value::Number`], anything else is a string.
#[must_use]
pub fn parse_literal(raw: &str) -> Value {
    match raw {
        "undefined" => Value::Undefined,
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::from(raw),
        },
    }
}

/// Build `{property: initial}`, wrap it with `sink`, apply every write in
/// order and return the final value.
pub fn run(opts: &Opts, sink: impl FnMut(&str) + 'static) -> Value {
    let target: Target = [(opts.property.as_str(), parse_literal(&opts.initial))]
        .into_iter()
        .collect();
    info!(
        property = %opts.property,
        initial = %opts.initial,
        writes = opts.writes.len(),
        "scenario start"
    );

    let mut surrogate = wrap(&target, sink);
    for raw in &opts.writes {
        surrogate.set(&opts.property, parse_literal(raw));
    }

    let value = target.get(&opts.property);
    info!(
        property = %opts.property,
        changes = surrogate.version(),
        value = %value,
        "scenario done"
    );
    value
}
