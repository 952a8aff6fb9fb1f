use crate::Result;
use crate::history::HistoryRecord;
use crate::summary::{Status, Summary};
use chrono::{DateTime, Utc};
use ohno::bail;
use serde_json::Value;

/// The outcome of running a single provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRecord {
    identifier: String,
    payload: Value,
    summary: Summary,
}

impl CombinedRecord {
    #[must_use]
    pub fn new(identifier: impl Into<String>, payload: Value, summary: Summary) -> Self {
        Self {
            identifier: identifier.into(),
            payload,
            summary,
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// This run's data in its persisted form.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    #[must_use]
    pub const fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Accumulates provider results while a run progresses.
#[derive(Debug, Default)]
pub struct OutputBuilder {
    records: Vec<CombinedRecord>,
}

impl OutputBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Append a provider's result.
    ///
    /// # Errors
    ///
    /// Returns an error if a record with the same identifier was already added.
    pub fn add_record(&mut self, record: CombinedRecord) -> Result<()> {
        if self.records.iter().any(|r| r.identifier == record.identifier) {
            bail!("duplicate provider identifier '{}' in run output", record.identifier);
        }

        self.records.push(record);
        Ok(())
    }

    #[must_use]
    pub fn finish(self) -> RunOutput {
        RunOutput { records: self.records }
    }
}

/// The complete result of a successful run, in provider order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutput {
    records: Vec<CombinedRecord>,
}

impl RunOutput {
    #[must_use]
    pub fn records(&self) -> &[CombinedRecord] {
        &self.records
    }

    #[must_use]
    pub fn record(&self, identifier: &str) -> Option<&CombinedRecord> {
        self.records.iter().find(|r| r.identifier == identifier)
    }

    #[must_use]
    pub fn summaries(&self) -> impl Iterator<Item = &Summary> {
        self.records.iter().map(|r| &r.summary)
    }

    /// Whether any provider reported a change since the previous run.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summaries().any(|s| s.status() != Status::Unchanged)
    }

    /// Build the history entry for this run: every provider's payload under its identifier,
    /// plus the run description and timestamp.
    #[must_use]
    pub fn to_raw_mapping(&self, description: &str, timestamp: DateTime<Utc>) -> HistoryRecord {
        let mut record = HistoryRecord::new();
        for r in &self.records {
            let _ = record.insert_payload(r.identifier.clone(), r.payload.clone());
        }

        if !description.is_empty() {
            record.set_description(description);
        }

        record.set_timestamp(timestamp);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::Tone;
    use chrono::TimeZone;
    use serde_json::json;

    fn record(identifier: &str, payload: Value) -> CombinedRecord {
        let summary = Summary::new(identifier, Status::Unchanged, Tone::Neutral, vec![format!("{identifier}: no change")]);
        CombinedRecord::new(identifier, payload, summary)
    }

    #[test]
    fn test_builder_preserves_order() {
        let mut builder = OutputBuilder::new();
        builder.add_record(record("B", json!(2))).unwrap();
        builder.add_record(record("A", json!(1))).unwrap();

        let output = builder.finish();
        let ids: Vec<_> = output.records().iter().map(CombinedRecord::identifier).collect();
        assert_eq!(ids, ["B", "A"]);
        assert!(!output.has_changes());
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let mut builder = OutputBuilder::new();
        builder.add_record(record("A", json!(1))).unwrap();

        let err = builder.add_record(record("A", json!(2))).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_raw_mapping() {
        let mut builder = OutputBuilder::new();
        builder.add_record(record("BinarySize", json!({"bytes": 1200}))).unwrap();
        builder.add_record(record("Warnings", json!({"items": ["A"]}))).unwrap();
        let output = builder.finish();

        let timestamp = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let raw = output.to_raw_mapping("nightly", timestamp);

        assert_eq!(raw.payload("BinarySize"), Some(&json!({"bytes": 1200})));
        assert_eq!(raw.payload("Warnings"), Some(&json!({"items": ["A"]})));
        assert_eq!(raw.description(), Some("nightly"));
        assert_eq!(raw.timestamp(), Some(timestamp));
        assert_eq!(raw.identifiers().count(), 2);
    }

    #[test]
    fn test_raw_mapping_without_description() {
        let output = OutputBuilder::new().finish();
        let raw = output.to_raw_mapping("", Utc::now());

        assert_eq!(raw.description(), None);
        assert!(raw.timestamp().is_some());
    }
}
