/// The widget's current selection
///
/// The state is an explicit tag so that a multiple-selection widget holding
/// one image is never confused with a single-selection widget. Across the
/// binding boundary only the payload travels: `null`, one record, or an
/// array of records.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::data::ImageRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Empty,
    Single(ImageRecord),
    Multiple(Vec<ImageRecord>),
}

/// Inbound payload shape; `Option<Payload>` covers `null`
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Many(Vec<ImageRecord>),
    One(ImageRecord),
}

impl WidgetState {
    /// Build the state a widget with the given `multiple` flag holds for
    /// `records`.
    ///
    /// A single-selection widget keeps only the first record.
    pub fn from_records(mut records: Vec<ImageRecord>, multiple: bool) -> Self {
        if records.is_empty() {
            return WidgetState::Empty;
        }

        if multiple {
            return WidgetState::Multiple(records);
        }

        if records.len() > 1 {
            log::warn!(
                "⚠️  {} records given to a single-image input, keeping the first",
                records.len()
            );
        }
        WidgetState::Single(records.swap_remove(0))
    }

    /// Parse a payload coming from the host
    pub fn from_value(value: Value, multiple: bool) -> Result<Self, serde_json::Error> {
        let records = match serde_json::from_value::<Option<Payload>>(value)? {
            None => Vec::new(),
            Some(Payload::One(record)) => vec![record],
            Some(Payload::Many(records)) => records,
        };
        Ok(Self::from_records(records, multiple))
    }

    /// Payload form of the state, as handed to the host
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Records in display order
    pub fn records(&self) -> &[ImageRecord] {
        match self {
            WidgetState::Empty => &[],
            WidgetState::Single(record) => std::slice::from_ref(record),
            WidgetState::Multiple(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, WidgetState::Empty)
    }
}

impl Serialize for WidgetState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WidgetState::Empty => serializer.serialize_none(),
            WidgetState::Single(record) => record.serialize(serializer),
            WidgetState::Multiple(records) => records.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str) -> ImageRecord {
        ImageRecord {
            name: name.to_string(),
            size: 4,
            mime_type: "image/png".to_string(),
            data_url: "data:image/png;base64,AAAAAA==".to_string(),
        }
    }

    #[test]
    fn test_from_records_respects_mode() {
        assert_eq!(WidgetState::from_records(vec![], true), WidgetState::Empty);
        assert_eq!(WidgetState::from_records(vec![], false), WidgetState::Empty);
        assert_eq!(
            WidgetState::from_records(vec![record("a")], false),
            WidgetState::Single(record("a"))
        );
        // One image in a multiple input is still a list
        assert_eq!(
            WidgetState::from_records(vec![record("a")], true),
            WidgetState::Multiple(vec![record("a")])
        );
    }

    #[test]
    fn test_payload_shapes() {
        assert_eq!(WidgetState::Empty.to_value().unwrap(), Value::Null);

        let single = WidgetState::Single(record("a"));
        let value = single.to_value().unwrap();
        assert_eq!(value["name"], "a");
        assert_eq!(value["type"], "image/png");

        let multiple = WidgetState::Multiple(vec![record("a"), record("b")]);
        let value = multiple.to_value().unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["name"], "b");
    }

    #[test]
    fn test_from_value_round_trip() {
        let multiple = WidgetState::Multiple(vec![record("a"), record("b")]);
        let restored = WidgetState::from_value(multiple.to_value().unwrap(), true).unwrap();
        assert_eq!(restored, multiple);

        let single = WidgetState::Single(record("a"));
        let restored = WidgetState::from_value(single.to_value().unwrap(), false).unwrap();
        assert_eq!(restored, single);

        assert_eq!(WidgetState::from_value(Value::Null, true).unwrap(), WidgetState::Empty);
    }

    #[test]
    fn test_from_value_adapts_to_mode() {
        let one = json!({"name": "a", "size": 4, "type": "image/png", "dataURL": "data:image/png;base64,AAAAAA=="});
        assert_eq!(
            WidgetState::from_value(one, true).unwrap(),
            WidgetState::Multiple(vec![record("a")])
        );

        let many = json!([
            {"name": "a", "size": 4, "type": "image/png", "dataURL": "data:image/png;base64,AAAAAA=="},
            {"name": "b", "size": 4, "type": "image/png", "dataURL": "data:image/png;base64,AAAAAA=="}
        ]);
        assert_eq!(
            WidgetState::from_value(many, false).unwrap(),
            WidgetState::Single(record("a"))
        );

        assert_eq!(WidgetState::from_value(json!([]), true).unwrap(), WidgetState::Empty);
    }

    #[test]
    fn test_from_value_rejects_malformed() {
        assert!(WidgetState::from_value(json!({"name": "a"}), false).is_err());
        assert!(WidgetState::from_value(json!(42), true).is_err());
    }
}
