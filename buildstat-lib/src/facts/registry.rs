use super::DynProvider;
use crate::Result;
use crate::history::HistoryRecord;
use ohno::bail;

/// The providers taking part in a run, in the order they execute.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn DynProvider>>,
}

impl ProviderRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self { providers: Vec::new() }
    }

    /// Add a provider after all previously registered ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty, reserved for run metadata, or already taken.
    pub fn register(&mut self, provider: Box<dyn DynProvider>) -> Result<()> {
        let identifier = provider.identifier();

        if identifier.is_empty() {
            bail!("provider identifiers cannot be empty");
        }

        if HistoryRecord::is_reserved_key(identifier) {
            bail!("provider identifier '{identifier}' is reserved");
        }

        if self.get(identifier).is_some() {
            bail!("provider identifier '{identifier}' is registered more than once");
        }

        self.providers.push(provider);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&dyn DynProvider> {
        self.providers.iter().find(|p| p.identifier() == identifier).map(AsRef::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn DynProvider> {
        self.providers.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
