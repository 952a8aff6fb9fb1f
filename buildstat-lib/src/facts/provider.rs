use super::{Collector, CombinedRecord, RunContext};
use crate::Result;
use crate::summary::Summary;
use core::fmt::Debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A source of one metric snapshot per run.
pub trait Provider {
    /// The snapshot this provider produces. It is persisted as loosely typed JSON, so it must
    /// survive a serialize/deserialize round trip unchanged.
    type Data: Serialize + DeserializeOwned;

    /// The stable name of this provider, used as its key in the run history.
    fn identifier(&self) -> &str;

    /// Produce this run's snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be produced at all, e.g. a required tool or file
    /// is missing or its output is malformed. Such errors abort the whole run.
    fn extract(&self, context: &RunContext) -> Result<Self::Data>;

    /// Describe how `current` differs from the `previous` run's snapshot, if there is one.
    fn summarize(&self, current: &Self::Data, previous: Option<&Self::Data>) -> Summary;
}

/// Object-safe view of a [`Provider`], so providers with different data types can share a registry.
pub trait DynProvider: Debug {
    fn identifier(&self) -> &str;

    /// Run this provider end to end through `collector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to extract its data.
    fn collect(&self, collector: &Collector<'_>) -> Result<CombinedRecord>;
}

impl<P> DynProvider for P
where
    P: Provider + Debug,
{
    fn identifier(&self) -> &str {
        Provider::identifier(self)
    }

    fn collect(&self, collector: &Collector<'_>) -> Result<CombinedRecord> {
        collector.run(self)
    }
}
