//! Composable record filters.
//!
//! The query pipeline assembles an AND-set of predicates per request; the
//! store applies them in-memory. A record with a missing or unparsable
//! target field never matches.

use chrono::NaiveDateTime;
use serde_json::Value;

use features_protocol::intervals::parse_datetime_literal;
use features_protocol::params::{FilterOp, FilterValue};
use features_protocol::Record;

use crate::record::{lookup_path, matches_filter};

/// A single filter condition over a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field comparison resolved from a `field__{op}` query key.
    Field {
        /// `__`-separated path to the field.
        path: String,
        /// Comparison operator.
        op: FilterOp,
        /// Coerced request value.
        value: FilterValue,
    },

    /// GeoJSON Point containment in a `[min_x, min_y, max_x, max_y]` box,
    /// bounds inclusive.
    WithinBbox {
        /// Path to the geometry field.
        path: String,
        /// Box corners in axis order x, y.
        bbox: [f64; 4],
    },

    /// Inclusive datetime range; an absent side is unbounded.
    DatetimeRange {
        /// Path to the datetime field.
        path: String,
        /// Inclusive lower bound.
        start: Option<NaiveDateTime>,
        /// Inclusive upper bound.
        end: Option<NaiveDateTime>,
    },
}

fn point_coordinates(value: &Value) -> Option<(f64, f64)> {
    let obj = value.as_object()?;
    if obj.get("type")?.as_str()? != "Point" {
        return None;
    }
    let coords = obj.get("coordinates")?.as_array()?;
    Some((coords.first()?.as_f64()?, coords.get(1)?.as_f64()?))
}

impl Predicate {
    /// Evaluate this predicate against one record.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::Field { path, op, value } => match lookup_path(record, path) {
                Some(field) => matches_filter(field, *op, value),
                None => false,
            },
            Predicate::WithinBbox { path, bbox } => {
                let Some((x, y)) = lookup_path(record, path).and_then(point_coordinates) else {
                    return false;
                };
                x >= bbox[0] && x <= bbox[2] && y >= bbox[1] && y <= bbox[3]
            }
            Predicate::DatetimeRange { path, start, end } => {
                let Some(dt) = lookup_path(record, path)
                    .and_then(Value::as_str)
                    .and_then(parse_datetime_literal)
                else {
                    return false;
                };
                if start.is_some_and(|s| dt < s) {
                    return false;
                }
                if end.is_some_and(|e| dt > e) {
                    return false;
                }
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn record() -> Record {
        match json!({
            "id": 7,
            "province": "SO",
            "altitude": 290,
            "date": "2023-01-15T10:00:00",
            "location": {"type": "Point", "coordinates": [9.87, 46.16]},
            "station": {"location": {"type": "Point", "coordinates": [9.0, 45.5]}}
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_field_predicate() {
        let p = Predicate::Field {
            path: "province".to_string(),
            op: FilterOp::Eq,
            value: FilterValue::Text("SO".to_string()),
        };
        assert!(p.matches(&record()));
    }

    #[test]
    fn test_field_predicate_missing_field() {
        let p = Predicate::Field {
            path: "nope".to_string(),
            op: FilterOp::Eq,
            value: FilterValue::Text("SO".to_string()),
        };
        assert!(!p.matches(&record()));
    }

    #[test]
    fn test_bbox_containment() {
        let inside = Predicate::WithinBbox {
            path: "location".to_string(),
            bbox: [9.0, 46.0, 10.0, 47.0],
        };
        let outside = Predicate::WithinBbox {
            path: "location".to_string(),
            bbox: [0.0, 0.0, 1.0, 1.0],
        };
        assert!(inside.matches(&record()));
        assert!(!outside.matches(&record()));
    }

    #[test]
    fn test_bbox_bounds_inclusive() {
        let edge = Predicate::WithinBbox {
            path: "location".to_string(),
            bbox: [9.87, 46.16, 9.87, 46.16],
        };
        assert!(edge.matches(&record()));
    }

    #[test]
    fn test_bbox_nested_geometry_path() {
        let p = Predicate::WithinBbox {
            path: "station__location".to_string(),
            bbox: [8.0, 45.0, 10.0, 46.0],
        };
        assert!(p.matches(&record()));
    }

    #[test]
    fn test_bbox_non_point_never_matches() {
        let p = Predicate::WithinBbox {
            path: "province".to_string(),
            bbox: [-180.0, -90.0, 180.0, 90.0],
        };
        assert!(!p.matches(&record()));
    }

    #[test]
    fn test_datetime_range_closed() {
        let p = Predicate::DatetimeRange {
            path: "date".to_string(),
            start: Some(dt(2023, 1, 1)),
            end: Some(dt(2023, 2, 1)),
        };
        assert!(p.matches(&record()));
    }

    #[test]
    fn test_datetime_range_excludes() {
        let p = Predicate::DatetimeRange {
            path: "date".to_string(),
            start: Some(dt(2023, 2, 1)),
            end: None,
        };
        assert!(!p.matches(&record()));
    }

    #[test]
    fn test_datetime_range_open_both_sides() {
        let p = Predicate::DatetimeRange {
            path: "date".to_string(),
            start: None,
            end: None,
        };
        assert!(p.matches(&record()));
    }

    #[test]
    fn test_datetime_range_unparsable_field() {
        let p = Predicate::DatetimeRange {
            path: "province".to_string(),
            start: None,
            end: None,
        };
        assert!(!p.matches(&record()));
    }
}
