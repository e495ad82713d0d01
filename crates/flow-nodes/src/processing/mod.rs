//! Processing nodes
//!
//! Pure data transforms. Ports and controls only; the transforms run in
//! the external flow executor, which reads the naming contracts exposed
//! here (`Combine::resolved_names`, `ArraySum::field_mode` and friends).

mod array;
mod combine;
mod convert;
mod math;
mod template;

pub use array::{ArrayCount, ArrayFlatten, ArrayHead, ArrayMap, ArrayNth, ArraySum, SumMode};
pub use combine::Combine;
pub use convert::{Convert, ToFloat, ToJson, ToNumber, ToText};
pub use math::{Add, Multiply};
pub use template::{Handlebars, JsonTemplate};

use serde_json::{Map, Value};

/// A string held under `key`, `None` when absent, not a string, or empty
pub(crate) fn non_empty<'a>(data: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
