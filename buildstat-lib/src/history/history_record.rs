use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved key holding the free-text description of a run.
pub const DESCRIPTION_KEY: &str = "buildstat_run_description_key";

/// Reserved key holding the RFC 3339 timestamp of a run.
pub const TIMESTAMP_KEY: &str = "buildstat_run_timestamp_key";

/// One past run: provider identifier to raw payload, plus run metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryRecord(Map<String, Value>);

impl HistoryRecord {
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Whether `key` is one of the metadata keys that can never name a provider.
    #[must_use]
    pub fn is_reserved_key(key: &str) -> bool {
        key == DESCRIPTION_KEY || key == TIMESTAMP_KEY
    }

    /// The raw payload stored for a provider, if any.
    #[must_use]
    pub fn payload(&self, identifier: &str) -> Option<&Value> {
        if Self::is_reserved_key(identifier) {
            return None;
        }

        self.0.get(identifier)
    }

    /// Store the payload for a provider, returning the previous payload if there was one.
    pub fn insert_payload(&mut self, identifier: impl Into<String>, payload: Value) -> Option<Value> {
        self.0.insert(identifier.into(), payload)
    }

    /// Identifiers of all providers that contributed to this record.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str).filter(|key| !Self::is_reserved_key(key))
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.get(DESCRIPTION_KEY).and_then(Value::as_str)
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        let _ = self.0.insert(DESCRIPTION_KEY.to_string(), Value::String(description.into()));
    }

    /// The run timestamp, or `None` when it is missing or unparsable.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let text = self.0.get(TIMESTAMP_KEY)?.as_str()?;
        DateTime::parse_from_rfc3339(text).ok().map(|ts| ts.with_timezone(&Utc))
    }

    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        let _ = self.0.insert(
            TIMESTAMP_KEY.to_string(),
            Value::String(timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
    }
}

/// The ordered sequence of past runs, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    data: Vec<HistoryRecord>,
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Build a history from records already ordered newest first.
    #[must_use]
    pub const fn from_records(data: Vec<HistoryRecord>) -> Self {
        Self { data }
    }

    /// The most recent run, if any run was ever recorded.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.data.first()
    }

    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.data
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Make `record` the most recent run.
    pub fn prepend(&mut self, record: HistoryRecord) {
        self.data.insert(0, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_reserved_keys_are_not_payloads() {
        let mut record = HistoryRecord::new();
        record.set_description("nightly");
        let _ = record.insert_payload("BinarySize", json!({"bytes": 10}));

        assert_eq!(record.payload(DESCRIPTION_KEY), None);
        assert_eq!(record.identifiers().collect::<Vec<_>>(), vec!["BinarySize"]);
        assert_eq!(record.description(), Some("nightly"));
    }

    #[test]
    fn test_timestamp_roundtrip() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let mut record = HistoryRecord::new();
        record.set_timestamp(ts);

        assert_eq!(record.timestamp(), Some(ts));
    }

    #[test]
    fn test_timestamp_garbage_is_none() {
        let record: HistoryRecord = serde_json::from_value(json!({ TIMESTAMP_KEY: "yesterday" })).unwrap();
        assert_eq!(record.timestamp(), None);
    }

    #[test]
    fn test_prepend_keeps_newest_first() {
        let mut first = HistoryRecord::new();
        first.set_description("first");
        let mut second = HistoryRecord::new();
        second.set_description("second");

        let mut history = History::new();
        history.prepend(first);
        history.prepend(second);

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().and_then(HistoryRecord::description), Some("second"));
        assert_eq!(history.records()[1].description(), Some("first"));
    }

    #[test]
    fn test_history_serializes_under_data_key() {
        let mut record = HistoryRecord::new();
        let _ = record.insert_payload("Warnings", json!({"items": ["A"]}));
        let history = History::from_records(vec![record]);

        let value = serde_json::to_value(&history).unwrap();
        assert_eq!(value, json!({"data": [{"Warnings": {"items": ["A"]}}]}));
    }

    #[test]
    fn test_history_without_data_key_is_empty() {
        let history: History = serde_json::from_str("{}").unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let history: History =
            serde_json::from_str(r#"{"data": [{"BinarySize": {"bytes": 1}, "BinarySize": {"bytes": 2}}]}"#).unwrap();

        let payload = history.latest().and_then(|r| r.payload("BinarySize")).cloned();
        assert_eq!(payload, Some(json!({"bytes": 2})));
    }
}
