use crate::domain::model::FundraiserCreated;

/// Receiver of creation notifications.
///
/// `publish` runs while the registry holds its write lock, so an event is
/// only ever observed after its fundraiser has been appended. Implementations
/// must not block and must not call back into the registry.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &FundraiserCreated);

    /// Returning `false` lets the registry drop a sink nobody listens to anymore.
    fn is_open(&self) -> bool {
        true
    }
}

/// Anything that can hand out the registry's runtime settings.
pub trait RegistrySettings: Send + Sync {
    fn authority(&self) -> &str;
}
