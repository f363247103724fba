use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One catalog item exactly as the remote API returned it.
///
/// Field values are left untyped; the normalizer decides how to read them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Returns the raw value of a field, or `None` if the record lacks it.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_transparently_from_object() {
        let record: RawRecord = serde_json::from_value(json!({"name": "Luke Skywalker", "height": "172"})).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("height"), Some(&json!("172")));
        assert_eq!(record.get("mass"), None);
    }

    #[test]
    fn rejects_non_object() {
        let _ = serde_json::from_value::<RawRecord>(json!(["not", "an", "object"])).unwrap_err();
    }

    #[test]
    fn serializes_back_to_same_object() {
        let value = json!({"title": "A New Hope", "episode_id": 4});
        let record: RawRecord = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
    }
}
