//! Metadata record: the JSON sidecar stored next to each audio file
//!
//! Records are open key/value objects. The server owns three keys
//! (`id`, `filename`, `upload_time`); everything else is whatever the
//! client sent, kept in its original order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the storage id
pub const ID_KEY: &str = "id";
/// Key holding the stored audio file name
pub const FILENAME_KEY: &str = "filename";
/// Key holding the Unix timestamp of the upload
pub const UPLOAD_TIME_KEY: &str = "upload_time";

/// One catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataRecord(Map<String, Value>);

impl MetadataRecord {
    /// Parse a record from JSON text
    ///
    /// Anything other than a JSON object is rejected.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Parse a record from raw JSON bytes
    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn to_json_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.0)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.get(ID_KEY).and_then(Value::as_str)
    }

    /// Upload time in seconds, if present and numeric
    ///
    /// Fractional values are truncated.
    pub fn upload_time(&self) -> Option<i64> {
        let value = self.get(UPLOAD_TIME_KEY)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|secs| secs as i64))
    }

    /// Sort key for the catalog: records without a usable upload time rank
    /// below every real timestamp
    pub fn recency_key(&self) -> i64 {
        self.upload_time().unwrap_or(i64::MIN)
    }

    /// Overwrite the server-owned keys
    pub fn stamp(&mut self, id: &str, filename: &str, upload_time: i64) {
        self.0.insert(UPLOAD_TIME_KEY.to_string(), Value::from(upload_time));
        self.0.insert(ID_KEY.to_string(), Value::from(id));
        self.0.insert(FILENAME_KEY.to_string(), Value::from(filename));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object() {
        let record = MetadataRecord::from_json_str(r#"{"title":"Song","artist":"Band"}"#).unwrap();
        assert_eq!(record.get("title"), Some(&json!("Song")));
        assert!(record.id().is_none());
        assert!(record.upload_time().is_none());
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(MetadataRecord::from_json_str("[1, 2, 3]").is_err());
        assert!(MetadataRecord::from_json_str("\"title\"").is_err());
        assert!(MetadataRecord::from_json_str("null").is_err());
        assert!(MetadataRecord::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_stamp_overwrites_caller_values() {
        let mut record = MetadataRecord::from_json_str(
            r#"{"id":"fake","filename":"fake.mp3","upload_time":1,"title":"Song"}"#,
        )
        .unwrap();

        record.stamp("abc:16", "abc:16.mp3", 1_700_000_000);

        assert_eq!(record.id(), Some("abc:16"));
        assert_eq!(record.get(FILENAME_KEY), Some(&json!("abc:16.mp3")));
        assert_eq!(record.upload_time(), Some(1_700_000_000));
        assert_eq!(record.get("title"), Some(&json!("Song")));
    }

    #[test]
    fn test_caller_key_order_is_preserved() {
        let mut record =
            MetadataRecord::from_json_str(r#"{"zeta":1,"alpha":2,"mid":3}"#).unwrap();
        record.stamp("x", "x.mp3", 5);

        let value = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid", "upload_time", "id", "filename"]);
    }

    #[test]
    fn test_upload_time_variants() {
        let float = MetadataRecord::from_json_str(r#"{"upload_time": 12.9}"#).unwrap();
        assert_eq!(float.upload_time(), Some(12));

        let text = MetadataRecord::from_json_str(r#"{"upload_time": "12"}"#).unwrap();
        assert_eq!(text.upload_time(), None);
        assert_eq!(text.recency_key(), i64::MIN);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut record = MetadataRecord::from_json_str(r#"{"title":"Песня"}"#).unwrap();
        record.stamp("a", "a.mp3", 3);

        let bytes = record.to_json_vec().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        // Non-ASCII text is written as UTF-8, not escaped
        assert!(text.contains("Песня"));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["id"], "a");
        assert_eq!(value["upload_time"], 3);
    }
}
