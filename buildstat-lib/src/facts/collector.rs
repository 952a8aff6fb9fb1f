use super::{CombinedRecord, OutputBuilder, Provider, ProviderRegistry, RunContext, RunOutput};
use crate::Result;
use crate::history::{History, locate};
use ohno::{EnrichableExt, IntoAppError};

const LOG_TARGET: &str = " collector";

/// Drives providers through one run against a fixed history.
#[derive(Debug, Clone, Copy)]
pub struct Collector<'a> {
    context: &'a RunContext,
    history: &'a History,
}

impl<'a> Collector<'a> {
    #[must_use]
    pub const fn new(context: &'a RunContext, history: &'a History) -> Self {
        Self { context, history }
    }

    /// Extract, compare, and record a single provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to extract its data, or if that data cannot be
    /// converted to JSON.
    pub fn run<P>(&self, provider: &P) -> Result<CombinedRecord>
    where
        P: Provider + ?Sized,
    {
        let identifier = provider.identifier();
        log::info!(target: LOG_TARGET, "Extracting {identifier}");

        let current = provider
            .extract(self.context)
            .map_err(|e| e.enrich_with(|| format!("provider '{identifier}' failed")))?;

        let previous = locate::<P::Data>(self.history, identifier);
        let summary = provider.summarize(&current, previous.as_ref());
        log::debug!(target: LOG_TARGET, "{identifier}: {:?}", summary.status());

        let payload = serde_json::to_value(&current)
            .into_app_err_with(|| format!("unable to serialize data from provider '{identifier}'"))?;

        Ok(CombinedRecord::new(identifier, payload, summary))
    }

    /// Run every provider in registration order.
    ///
    /// The first extraction failure aborts the run and is returned; no partial output is produced.
    ///
    /// # Errors
    ///
    /// Returns the first provider failure.
    pub fn run_all(&self, registry: &ProviderRegistry) -> Result<RunOutput> {
        let mut builder = OutputBuilder::new();

        for provider in registry.iter() {
            builder.add_record(provider.collect(self)?)?;
        }

        log::info!(target: LOG_TARGET, "Collected {} metric(s)", registry.len());
        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::ProjectInfo;
    use crate::history::HistoryRecord;
    use crate::summary::{Direction, Status, Summary, Tone, Unit};
    use core::cell::Cell;
    use ohno::bail;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Size {
        bytes: u64,
    }

    #[derive(Debug)]
    struct FixedSize {
        bytes: u64,
        seen_previous: Cell<Option<Option<u64>>>,
    }

    impl FixedSize {
        fn new(bytes: u64) -> Self {
            Self {
                bytes,
                seen_previous: Cell::new(None),
            }
        }
    }

    impl Provider for FixedSize {
        type Data = Size;

        fn identifier(&self) -> &str {
            "BinarySize"
        }

        fn extract(&self, _context: &RunContext) -> Result<Size> {
            Ok(Size { bytes: self.bytes })
        }

        #[expect(clippy::cast_precision_loss, reason = "test sizes are small")]
        fn summarize(&self, current: &Size, previous: Option<&Size>) -> Summary {
            self.seen_previous.set(Some(previous.map(|p| p.bytes)));
            Summary::numeric(
                "Binary size",
                current.bytes as f64,
                previous.map(|p| p.bytes as f64),
                Unit::Bytes,
                Direction::LowerIsBetter,
            )
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl Provider for Failing {
        type Data = Size;

        fn identifier(&self) -> &str {
            "Broken"
        }

        fn extract(&self, _context: &RunContext) -> Result<Size> {
            bail!("tool not found")
        }

        fn summarize(&self, _current: &Size, _previous: Option<&Size>) -> Summary {
            unreachable!("summarize is never called after a failed extraction")
        }
    }

    fn context() -> RunContext {
        RunContext::new(ProjectInfo::new("demo", "test run"), "/tmp/demo")
    }

    #[test]
    fn test_first_run_has_no_previous() {
        let context = context();
        let history = History::new();
        let provider = FixedSize::new(1000);

        let record = Collector::new(&context, &history).run(&provider).unwrap();

        assert_eq!(provider.seen_previous.get(), Some(None));
        assert_eq!(record.identifier(), "BinarySize");
        assert_eq!(record.payload(), &json!({"bytes": 1000}));
        assert_eq!(record.summary().status(), Status::New);
    }

    #[test]
    fn test_previous_run_is_decoded() {
        let context = context();
        let mut prior = HistoryRecord::new();
        let _ = prior.insert_payload("BinarySize", json!({"bytes": 1000}));
        let history = History::from_records(vec![prior]);
        let provider = FixedSize::new(1200);

        let record = Collector::new(&context, &history).run(&provider).unwrap();

        assert_eq!(provider.seen_previous.get(), Some(Some(1000)));
        assert_eq!(record.summary().status(), Status::Changed);
        assert_eq!(record.summary().tone(), Tone::Negative);
        assert!(record.summary().text().contains("increased by 200 bytes"));
    }

    #[test]
    fn test_undecodable_previous_is_treated_as_absent() {
        let context = context();
        let mut prior = HistoryRecord::new();
        let _ = prior.insert_payload("BinarySize", json!("not an object"));
        let history = History::from_records(vec![prior]);
        let provider = FixedSize::new(1200);

        let record = Collector::new(&context, &history).run(&provider).unwrap();

        assert_eq!(provider.seen_previous.get(), Some(None));
        assert_eq!(record.summary().status(), Status::New);
    }

    #[test]
    fn test_extraction_failure_aborts_run() {
        let context = context();
        let history = History::new();
        let mut registry = ProviderRegistry::new();
        registry.register(Box::new(FixedSize::new(1))).unwrap();
        registry.register(Box::new(Failing)).unwrap();

        let err = Collector::new(&context, &history).run_all(&registry).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("tool not found"), "unexpected message: {msg}");
        assert!(msg.contains("provider 'Broken' failed"), "unexpected message: {msg}");
    }

    #[test]
    fn test_run_all_preserves_registration_order() {
        #[derive(Debug)]
        struct Named(&'static str);

        impl Provider for Named {
            type Data = Vec<String>;

            fn identifier(&self) -> &str {
                self.0
            }

            fn extract(&self, _context: &RunContext) -> Result<Vec<String>> {
                Ok(vec![self.0.to_string()])
            }

            fn summarize(&self, current: &Vec<String>, previous: Option<&Vec<String>>) -> Summary {
                Summary::collection(self.0, current, previous.map(Vec::as_slice), Clone::clone, Direction::Neutral)
            }
        }

        let context = context();
        let history = History::new();
        let mut registry = ProviderRegistry::new();
        registry.register(Box::new(Named("Zeta"))).unwrap();
        registry.register(Box::new(Named("Alpha"))).unwrap();

        let output = Collector::new(&context, &history).run_all(&registry).unwrap();
        let ids: Vec<_> = output.records().iter().map(CombinedRecord::identifier).collect();
        assert_eq!(ids, ["Zeta", "Alpha"]);
    }
}
