//! Query parameter whitelisting and the filter operator model.
//!
//! Every items request is validated all-or-nothing before any filtering
//! runs: a key is accepted when it is one of the fixed common parameters,
//! or when it resolves to `field` or `field__{op}` for a field the
//! collection declares filterable. Operators are a closed enum so no
//! string-suffix dispatch leaks past this boundary.

use crate::errors::ApiError;

/// Query keys accepted on every items request regardless of collection.
pub const COMMON_PARAMETERS: &[&str] = &["bbox", "datetime", "skipGeometry", "limit", "offset", "f"];

/// Filter operators usable as `field__{suffix}` query keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    /// Equality (bare field name, no suffix).
    Eq,
    /// Less than or equal.
    Lte,
    /// Less than.
    Lt,
    /// Greater than or equal.
    Gte,
    /// Greater than.
    Gt,
    /// Not equal.
    Ne,
    /// Set membership; the value is a comma-separated list.
    In,
}

impl FilterOp {
    /// Operators carrying a key suffix, in resolution order.
    const SUFFIXED: [FilterOp; 6] = [
        FilterOp::Lte,
        FilterOp::Lt,
        FilterOp::Gte,
        FilterOp::Gt,
        FilterOp::Ne,
        FilterOp::In,
    ];

    /// The query-key suffix for this operator.
    pub const fn suffix(&self) -> &'static str {
        match self {
            FilterOp::Eq => "",
            FilterOp::Lte => "__lte",
            FilterOp::Lt => "__lt",
            FilterOp::Gte => "__gte",
            FilterOp::Gt => "__gt",
            FilterOp::Ne => "__ne",
            FilterOp::In => "__in",
        }
    }
}

/// A coerced filter value.
///
/// The literal strings `"true"`/`"false"` become booleans; `__in` values
/// are comma-split into a raw string list (list elements are not coerced).
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// A plain text value.
    Text(String),
    /// A coerced boolean literal.
    Boolean(bool),
    /// A membership list for the `__in` operator.
    List(Vec<String>),
}

/// Coerce a raw query value for the given operator.
pub fn coerce_filter_value(op: FilterOp, raw: &str) -> FilterValue {
    if op == FilterOp::In {
        return FilterValue::List(raw.trim().split(',').map(str::to_string).collect());
    }
    match raw {
        "true" => FilterValue::Boolean(true),
        "false" => FilterValue::Boolean(false),
        _ => FilterValue::Text(raw.to_string()),
    }
}

/// Resolve a request key into a `(field, operator)` pair against the
/// collection's filterable fields. Returns `None` for keys that do not
/// name a filterable field.
pub fn resolve_filter_key<'a>(key: &'a str, filter_fields: &[String]) -> Option<(&'a str, FilterOp)> {
    for op in FilterOp::SUFFIXED {
        if let Some(field) = key.strip_suffix(op.suffix()) {
            if filter_fields.iter().any(|f| f == field) {
                return Some((field, op));
            }
        }
    }
    if filter_fields.iter().any(|f| f == key) {
        return Some((key, FilterOp::Eq));
    }
    None
}

/// Validate every incoming query key against the accepted set.
///
/// The first unknown key fails the whole request with a 400 naming it.
pub fn validate_parameters<'a, I>(keys: I, filter_fields: &[String]) -> Result<(), ApiError>
where
    I: IntoIterator<Item = &'a str>,
{
    for key in keys {
        let known =
            COMMON_PARAMETERS.contains(&key) || resolve_filter_key(key, filter_fields).is_some();
        if !known {
            return Err(ApiError::UnknownParameter(key.to_string()));
        }
    }
    Ok(())
}
