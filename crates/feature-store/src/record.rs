//! Record field access and value matching.

use std::cmp::Ordering;

use serde_json::Value;

use features_protocol::intervals::parse_datetime_literal;
use features_protocol::params::{FilterOp, FilterValue};
use features_protocol::Record;

/// Nested-lookup separator in predicate paths. Dotted paths from
/// collection configuration (`related.field`) are translated to this
/// separator before reaching the store.
pub const PATH_SEPARATOR: &str = "__";

/// Look up a possibly nested field by `__`-separated path.
pub fn lookup_path<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut parts = path.split(PATH_SEPARATOR);
    let mut current = record.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Compare a record value against a raw filter string.
///
/// Numbers compare numerically when the filter side parses; strings that
/// both parse as datetimes compare chronologically; everything else falls
/// back to lexicographic string comparison. `None` means the pair is not
/// comparable (e.g. ordering against a boolean).
pub fn compare_value(value: &Value, raw: &str) -> Option<Ordering> {
    match value {
        Value::Number(n) => {
            let lhs = n.as_f64()?;
            let rhs: f64 = raw.parse().ok()?;
            lhs.partial_cmp(&rhs)
        }
        Value::String(s) => {
            if let (Some(lhs), Some(rhs)) = (parse_datetime_literal(s), parse_datetime_literal(raw))
            {
                return Some(lhs.cmp(&rhs));
            }
            Some(s.as_str().cmp(raw))
        }
        _ => None,
    }
}

fn equals_text(value: &Value, raw: &str) -> bool {
    match value {
        Value::String(s) => s == raw,
        Value::Number(n) => raw.parse::<f64>().ok() == n.as_f64(),
        Value::Bool(b) => raw.parse::<bool>().ok() == Some(*b),
        _ => false,
    }
}

fn equals(value: &Value, filter: &FilterValue) -> bool {
    match filter {
        FilterValue::Boolean(b) => value.as_bool() == Some(*b),
        FilterValue::Text(t) => equals_text(value, t),
        FilterValue::List(items) => items.iter().any(|t| equals_text(value, t)),
    }
}

/// Evaluate one field filter against a record value.
pub fn matches_filter(value: &Value, op: FilterOp, filter: &FilterValue) -> bool {
    match op {
        FilterOp::Eq => equals(value, filter),
        FilterOp::Ne => !equals(value, filter),
        FilterOp::In => equals(value, filter),
        FilterOp::Lt | FilterOp::Lte | FilterOp::Gt | FilterOp::Gte => {
            let raw = match filter {
                FilterValue::Text(t) => t.as_str(),
                // Ordering against booleans or lists never matches.
                _ => return false,
            };
            match compare_value(value, raw) {
                Some(ordering) => match op {
                    FilterOp::Lt => ordering == Ordering::Less,
                    FilterOp::Lte => ordering != Ordering::Greater,
                    FilterOp::Gt => ordering == Ordering::Greater,
                    FilterOp::Gte => ordering != Ordering::Less,
                    _ => unreachable!(),
                },
                None => false,
            }
        }
    }
}
