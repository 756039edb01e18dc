use crate::core::events::ChannelSink;
use crate::core::pagination::PageRequest;
use crate::core::{EventSink, RegistrySettings};
use crate::domain::model::{Fundraiser, FundraiserCreated, Identity, NewFundraiser};
use crate::utils::error::Result;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc::UnboundedReceiver;

pub const DEFAULT_AUTHORITY: &str = "factory";

struct RegistryState {
    records: Vec<Arc<Fundraiser>>,
    sinks: Vec<Box<dyn EventSink>>,
}

/// Append-only collection of fundraisers created on behalf of one authority.
///
/// Records and subscribers live behind a single `RwLock`: creations are
/// serialized, reads run concurrently and always see `count == records.len()`.
pub struct FundraiserRegistry {
    authority: Identity,
    state: RwLock<RegistryState>,
}

impl FundraiserRegistry {
    pub fn new(authority: impl Into<Identity>) -> Self {
        Self {
            authority: authority.into(),
            state: RwLock::new(RegistryState {
                records: Vec::new(),
                sinks: Vec::new(),
            }),
        }
    }

    pub fn from_settings<C: RegistrySettings>(settings: &C) -> Self {
        Self::new(settings.authority())
    }

    pub fn authority(&self) -> &Identity {
        &self.authority
    }

    // The only mutation is an infallible push, so a poisoned lock still
    // guards consistent data.
    fn read_state(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a fundraiser at the next free index and notifies every sink.
    ///
    /// Validation runs before anything is appended; on error the registry is
    /// left untouched and no event is published.
    pub fn create_fundraiser(&self, draft: NewFundraiser) -> Result<usize> {
        let mut state = self.write_state();
        let index = state.records.len();

        let fundraiser = match Fundraiser::create(index, draft, self.authority.clone()) {
            Ok(fundraiser) => fundraiser,
            Err(e) => {
                tracing::warn!("Rejected fundraiser #{}: {}", index, e);
                return Err(e);
            }
        };

        let event = FundraiserCreated::from(&fundraiser);
        state.records.push(Arc::new(fundraiser));

        state.sinks.retain(|sink| sink.is_open());
        for sink in &state.sinks {
            sink.publish(&event);
        }

        tracing::debug!(
            "Created fundraiser #{} for {} ({} sinks notified)",
            index,
            event.beneficiary,
            state.sinks.len()
        );
        Ok(index)
    }

    pub fn fundraisers_count(&self) -> usize {
        self.read_state().records.len()
    }

    /// Returns up to `limit` fundraisers starting at `offset`, in creation order.
    ///
    /// `limit` is clamped to [`MAX_PAGE_SIZE`](crate::core::pagination::MAX_PAGE_SIZE);
    /// an offset past the end yields an empty page.
    pub fn fundraisers(&self, limit: usize, offset: usize) -> Vec<Arc<Fundraiser>> {
        self.page(PageRequest::new(limit, offset))
    }

    pub fn page(&self, request: PageRequest) -> Vec<Arc<Fundraiser>> {
        let state = self.read_state();
        let window = request.window(state.records.len());
        tracing::debug!(
            "Page limit={} offset={} -> {:?} of {}",
            request.limit,
            request.offset,
            window,
            state.records.len()
        );
        state.records[window].to_vec()
    }

    pub fn fundraiser(&self, index: usize) -> Option<Arc<Fundraiser>> {
        self.read_state().records.get(index).cloned()
    }

    pub fn add_sink<S: EventSink + 'static>(&self, sink: S) {
        self.write_state().sinks.push(Box::new(sink));
    }

    #[cfg(test)]
    fn sink_count(&self) -> usize {
        self.read_state().sinks.len()
    }

    /// Subscribes to every creation that happens after this call.
    pub fn subscribe(&self) -> UnboundedReceiver<FundraiserCreated> {
        let (sink, receiver) = ChannelSink::channel();
        self.add_sink(sink);
        receiver
    }
}

impl Default for FundraiserRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHORITY)
    }
}

impl std::fmt::Debug for FundraiserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_state();
        f.debug_struct("FundraiserRegistry")
            .field("authority", &self.authority)
            .field("count", &state.records.len())
            .field("sinks", &state.sinks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RegistryError;
    use std::sync::Mutex;

    fn draft(i: usize) -> NewFundraiser {
        NewFundraiser::new(
            format!("Beneficiary {}", i),
            format!("beneficiary{}.com", i),
            format!("beneficiary{}.png", i),
            format!("Description for Beneficiary {}", i),
            "0xbeneficiary",
        )
    }

    fn registry_with(count: usize) -> FundraiserRegistry {
        let registry = FundraiserRegistry::default();
        for i in 0..count {
            registry.create_fundraiser(draft(i)).unwrap();
        }
        registry
    }

    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<FundraiserCreated>>>);

    impl EventSink for RecordingSink {
        fn publish(&self, event: &FundraiserCreated) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_create_increments_count() {
        let registry = registry_with(3);
        let before = registry.fundraisers_count();

        let index = registry.create_fundraiser(draft(3)).unwrap();

        assert_eq!(index, before);
        assert_eq!(registry.fundraisers_count(), before + 1);
    }

    #[test]
    fn test_indices_follow_creation_order() {
        let registry = registry_with(5);
        for (i, fundraiser) in registry.fundraisers(20, 0).iter().enumerate() {
            assert_eq!(fundraiser.index(), i);
            assert_eq!(fundraiser.name(), format!("Beneficiary {}", i));
            assert_eq!(fundraiser.custodian().as_str(), DEFAULT_AUTHORITY);
        }
    }

    #[test]
    fn test_emits_one_event_per_creation() {
        let registry = FundraiserRegistry::new("factory-owner");
        let sink = RecordingSink::default();
        registry.add_sink(sink.clone());

        registry.create_fundraiser(draft(0)).unwrap();
        registry.create_fundraiser(draft(1)).unwrap();

        let events = sink.0.lock().unwrap();
        assert_eq!(events.len(), 2);
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.index, i);
            assert_eq!(event.beneficiary.as_str(), "0xbeneficiary");
            assert_eq!(event.custodian.as_str(), "factory-owner");
            assert_eq!(registry.fundraisers(1, event.index)[0].index(), event.index);
        }
    }

    #[test]
    fn test_failed_creation_changes_nothing() {
        let registry = registry_with(2);
        let sink = RecordingSink::default();
        registry.add_sink(sink.clone());

        let mut bad = draft(2);
        bad.description.clear();
        let result = registry.create_fundraiser(bad);

        assert!(matches!(result, Err(RegistryError::InvalidInput { .. })));
        assert_eq!(registry.fundraisers_count(), 2);
        assert!(sink.0.lock().unwrap().is_empty());

        // 失敗後下一筆仍取得連續的索引
        assert_eq!(registry.create_fundraiser(draft(2)).unwrap(), 2);
    }

    #[test]
    fn test_empty_registry_pages_are_empty() {
        let registry = FundraiserRegistry::default();
        for limit in [0, 1, 10, 20, 100] {
            assert!(registry.fundraisers(limit, 0).is_empty());
        }
        assert_eq!(registry.fundraisers_count(), 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        let registry = registry_with(30);
        assert_eq!(registry.fundraisers(10, 0).len(), 10);
        assert_eq!(registry.fundraisers(20, 0).len(), 20);
        assert_eq!(registry.fundraisers(30, 0).len(), 20);
        assert!(registry.fundraisers(0, 0).is_empty());
    }

    #[test]
    fn test_offset_selects_window() {
        let registry = registry_with(10);

        let first = registry.fundraisers(1, 0);
        assert!(first[0].name().contains('0'));

        let seventh = registry.fundraisers(1, 7);
        assert_eq!(seventh.len(), 1);
        assert!(seventh[0].name().contains('7'));

        let tail = registry.fundraisers(20, 8);
        let indices: Vec<usize> = tail.iter().map(|f| f.index()).collect();
        assert_eq!(indices, vec![8, 9]);

        assert!(registry.fundraisers(5, 10).is_empty());
        assert!(registry.fundraisers(5, usize::MAX).is_empty());
    }

    #[test]
    fn test_reads_are_idempotent() {
        let registry = registry_with(12);
        let a = registry.fundraisers(5, 3);
        let b = registry.fundraisers(5, 3);
        assert_eq!(a, b);
        assert_eq!(registry.fundraisers_count(), registry.fundraisers_count());
    }

    #[test]
    fn test_fundraiser_lookup() {
        let registry = registry_with(3);
        assert_eq!(registry.fundraiser(2).unwrap().name(), "Beneficiary 2");
        assert!(registry.fundraiser(3).is_none());
    }

    #[test]
    fn test_subscribe_receives_later_events() {
        let registry = registry_with(1);
        let mut rx = registry.subscribe();

        registry.create_fundraiser(draft(1)).unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.index, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let registry = FundraiserRegistry::default();
        let rx = registry.subscribe();
        drop(rx);

        let kept = registry.subscribe();
        assert_eq!(registry.sink_count(), 2);

        registry.create_fundraiser(draft(0)).unwrap();
        assert_eq!(registry.sink_count(), 1);
        drop(kept);
    }
}
