//! Response serializers for paginated record sets.
//!
//! Two GeoJSON shapes exist, selected by the collection's API type:
//! Features-style (flat geometry + properties per item) and EDR-style
//! (observation-oriented nesting with the timestamp lifted out of the
//! parameter map). Plain JSON is a bare projected array with no geometry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Link, Record};

/// Options shared by all serializers for one response.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Count before pagination.
    pub number_matched: usize,

    /// Count after truncation.
    pub number_returned: usize,

    /// Navigation and alternate links for the envelope.
    pub links: &'a [Link],

    /// Ordered field names to include in output.
    pub fields: &'a [String],

    /// Field holding the primary geometry; `None` suppresses geometry.
    pub geometry_field: Option<&'a str>,

    /// Field holding the observation timestamp (EDR shape only).
    pub datetime_field: Option<&'a str>,
}

/// A Features-style GeoJSON FeatureCollection envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Count before pagination.
    #[serde(rename = "numberMatched")]
    pub number_matched: usize,

    /// Count after truncation.
    #[serde(rename = "numberReturned")]
    pub number_returned: usize,

    /// Navigation and alternate links.
    pub links: Vec<Link>,

    /// The features.
    pub features: Vec<Feature>,
}

/// A single Features-style GeoJSON feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    /// Feature identifier, taken from the record's `id` field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// GeoJSON geometry object, or null when suppressed.
    pub geometry: Value,

    /// Record fields projected to the collection's display fields.
    pub properties: Record,
}

/// An EDR-style GeoJSON FeatureCollection envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdrFeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Count before pagination.
    #[serde(rename = "numberMatched")]
    pub number_matched: usize,

    /// Count after truncation.
    #[serde(rename = "numberReturned")]
    pub number_returned: usize,

    /// Navigation and alternate links.
    pub links: Vec<Link>,

    /// The features.
    pub features: Vec<EdrFeature>,
}

/// A single EDR-style feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdrFeature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    /// Feature identifier, taken from the record's `id` field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// GeoJSON geometry object, or null when suppressed.
    pub geometry: Value,

    /// Observation-oriented properties.
    pub properties: EdrProperties,
}

/// Properties of an EDR-style feature: timestamp lifted out, remaining
/// display fields nested under `parameters`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdrProperties {
    /// Observation timestamp from the collection's datetime field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<Value>,

    /// Projected display fields.
    pub parameters: Record,
}

/// Project one record to the given fields, in order. Missing fields are
/// omitted rather than emitted as null.
pub fn project_record(record: &Record, fields: &[String]) -> Record {
    let mut out = Record::new();
    for field in fields {
        if let Some(value) = record.get(field) {
            out.insert(field.clone(), value.clone());
        }
    }
    out
}

/// Project a record slice to a plain JSON array (no geometry key).
pub fn project_records(records: &[Record], fields: &[String]) -> Vec<Record> {
    records.iter().map(|r| project_record(r, fields)).collect()
}

fn record_geometry(record: &Record, geometry_field: Option<&str>) -> Value {
    geometry_field
        .and_then(|field| record.get(field))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Serialize records as a Features-style FeatureCollection.
pub fn serialize_features(records: &[Record], opts: &RenderOptions) -> FeatureCollection {
    let features = records
        .iter()
        .map(|record| Feature {
            type_: "Feature".to_string(),
            id: record.get("id").cloned(),
            geometry: record_geometry(record, opts.geometry_field),
            properties: project_record(record, opts.fields),
        })
        .collect();

    FeatureCollection {
        type_: "FeatureCollection".to_string(),
        number_matched: opts.number_matched,
        number_returned: opts.number_returned,
        links: opts.links.to_vec(),
        features,
    }
}

/// Serialize records as an EDR-style FeatureCollection.
pub fn serialize_edr(records: &[Record], opts: &RenderOptions) -> EdrFeatureCollection {
    let features = records
        .iter()
        .map(|record| {
            let datetime = opts
                .datetime_field
                .and_then(|field| record.get(field))
                .cloned();
            let mut parameters = project_record(record, opts.fields);
            if let Some(field) = opts.datetime_field {
                parameters.remove(field);
            }
            EdrFeature {
                type_: "Feature".to_string(),
                id: record.get("id").cloned(),
                geometry: record_geometry(record, opts.geometry_field),
                properties: EdrProperties { datetime, parameters },
            }
        })
        .collect();

    EdrFeatureCollection {
        type_: "FeatureCollection".to_string(),
        number_matched: opts.number_matched,
        number_returned: opts.number_returned,
        links: opts.links.to_vec(),
        features,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sensor_record() -> Record {
        let value = json!({
            "id": 10431,
            "province": "SO",
            "altitude": 290,
            "date": "2023-01-15T10:00:00",
            "location": {"type": "Point", "coordinates": [9.879209, 46.167852]},
            "internal_only": "hidden"
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_projection_limits_and_orders_fields() {
        let record = sensor_record();
        let projected = project_record(&record, &fields(&["province", "altitude"]));
        assert_eq!(projected.len(), 2);
        assert_eq!(projected["province"], "SO");
        assert!(!projected.contains_key("internal_only"));
        assert!(!projected.contains_key("location"));
    }

    #[test]
    fn test_projection_omits_missing_fields() {
        let record = sensor_record();
        let projected = project_record(&record, &fields(&["province", "no_such_field"]));
        assert_eq!(projected.len(), 1);
    }

    #[test]
    fn test_features_serializer_envelope() {
        let records = vec![sensor_record()];
        let display = fields(&["province", "altitude"]);
        let links = vec![Link::new("http://example.com", "self")];
        let opts = RenderOptions {
            number_matched: 25,
            number_returned: 1,
            links: &links,
            fields: &display,
            geometry_field: Some("location"),
            datetime_field: None,
        };

        let fc = serialize_features(&records, &opts);
        assert_eq!(fc.type_, "FeatureCollection");
        assert_eq!(fc.number_matched, 25);
        assert_eq!(fc.number_returned, 1);
        assert_eq!(fc.links.len(), 1);
        assert_eq!(fc.features[0].id, Some(json!(10431)));
        assert_eq!(fc.features[0].geometry["type"], "Point");
        assert_eq!(fc.features[0].properties["province"], "SO");
    }

    #[test]
    fn test_features_serializer_geometry_suppressed() {
        let records = vec![sensor_record()];
        let display = fields(&["province"]);
        let opts = RenderOptions {
            number_matched: 1,
            number_returned: 1,
            links: &[],
            fields: &display,
            geometry_field: None,
            datetime_field: None,
        };

        let fc = serialize_features(&records, &opts);
        assert_eq!(fc.features[0].geometry, Value::Null);
    }

    #[test]
    fn test_edr_serializer_lifts_datetime() {
        let records = vec![sensor_record()];
        let display = fields(&["province", "date"]);
        let opts = RenderOptions {
            number_matched: 1,
            number_returned: 1,
            links: &[],
            fields: &display,
            geometry_field: Some("location"),
            datetime_field: Some("date"),
        };

        let fc = serialize_edr(&records, &opts);
        let props = &fc.features[0].properties;
        assert_eq!(props.datetime, Some(json!("2023-01-15T10:00:00")));
        assert!(!props.parameters.contains_key("date"));
        assert_eq!(props.parameters["province"], "SO");
    }

    #[test]
    fn test_envelope_field_names_on_wire() {
        let opts = RenderOptions {
            number_matched: 0,
            number_returned: 0,
            links: &[],
            fields: &[],
            geometry_field: None,
            datetime_field: None,
        };
        let fc = serialize_features(&[], &opts);
        let json = serde_json::to_string(&fc).unwrap();
        assert!(json.contains("\"numberMatched\":0"));
        assert!(json.contains("\"numberReturned\":0"));
        assert!(json.contains("\"type\":\"FeatureCollection\""));
    }
}
