/// Shared point cloud store with last-write-wins replacement
use crate::cloud::PointCloud;
use std::sync::{Arc, Mutex, MutexGuard};

/// Ticket identifying one sampling pass. Tickets are ordered by issue time;
/// a result is only installed if its ticket is still the newest issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleTicket {
    seq: u64,
}

impl SampleTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Default)]
struct StoreState {
    newest_issued: u64,
    current: Option<Arc<PointCloud>>,
}

/// Single-writer, multi-reader holder of the latest sampled cloud.
/// Readers take cheap `Arc` snapshots; replacement is atomic, so a consumer
/// never observes a partially-built cloud. Overlapping background passes are
/// serialised by ticket: the last pass to *start* wins, regardless of which
/// finishes first.
pub struct CloudStore {
    state: Mutex<StoreState>,
}

impl CloudStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Issue the ticket for the next sampling pass, superseding all earlier
    /// tickets immediately
    pub fn begin_sample(&self) -> SampleTicket {
        let mut state = self.lock_state();
        state.newest_issued += 1;
        SampleTicket {
            seq: state.newest_issued,
        }
    }

    /// Install a completed cloud. Returns false (and drops the cloud) when
    /// the ticket has been superseded by a newer pass.
    pub fn publish(&self, ticket: SampleTicket, cloud: PointCloud) -> bool {
        let mut state = self.lock_state();
        if ticket.seq != state.newest_issued {
            return false;
        }
        state.current = Some(Arc::new(cloud));
        true
    }

    /// Snapshot of the current cloud, if any
    pub fn snapshot(&self) -> Option<Arc<PointCloud>> {
        self.lock_state().current.clone()
    }

    /// Drop the current cloud and supersede any in-flight pass, for when the
    /// source raster goes away entirely
    pub fn clear(&self) {
        let mut state = self.lock_state();
        state.newest_issued += 1;
        state.current = None;
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        // A poisoned lock still holds a coherent snapshot: every write under
        // the lock is a single field assignment
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl Default for CloudStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::Point;

    fn cloud_of(n: usize) -> PointCloud {
        PointCloud::new(vec![
            Point {
                position: [0.0, 0.0, 0.0],
                color: [1.0, 1.0, 1.0],
            };
            n
        ])
    }

    #[test]
    fn starts_empty() {
        assert!(CloudStore::new().snapshot().is_none());
    }

    #[test]
    fn newest_ticket_publishes() {
        let store = CloudStore::new();
        let ticket = store.begin_sample();
        assert!(store.publish(ticket, cloud_of(3)));
        assert_eq!(store.snapshot().unwrap().len(), 3);
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let store = CloudStore::new();
        let first = store.begin_sample();
        let second = store.begin_sample();

        // The slower, older pass finishes after the newer one started
        assert!(!store.publish(first, cloud_of(1)));
        assert!(store.snapshot().is_none());

        assert!(store.publish(second, cloud_of(2)));
        assert_eq!(store.snapshot().unwrap().len(), 2);

        // Even after a successful publish, the stale ticket stays dead
        assert!(!store.publish(first, cloud_of(9)));
        assert_eq!(store.snapshot().unwrap().len(), 2);
    }

    #[test]
    fn out_of_order_completion_keeps_newest() {
        let store = CloudStore::new();
        let first = store.begin_sample();
        let second = store.begin_sample();

        assert!(store.publish(second, cloud_of(2)));
        assert!(!store.publish(first, cloud_of(1)));
        assert_eq!(store.snapshot().unwrap().len(), 2);
    }

    #[test]
    fn clear_drops_cloud_and_invalidates_in_flight() {
        let store = CloudStore::new();
        let ticket = store.begin_sample();
        assert!(store.publish(ticket, cloud_of(4)));

        let in_flight = store.begin_sample();
        store.clear();
        assert!(store.snapshot().is_none());

        // The pass that was running when the raster went away must not
        // resurrect a cloud
        assert!(!store.publish(in_flight, cloud_of(4)));
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn tickets_are_strictly_increasing() {
        let store = CloudStore::new();
        let a = store.begin_sample();
        let b = store.begin_sample();
        let c = store.begin_sample();
        assert!(a.seq() < b.seq());
        assert!(b.seq() < c.seq());
    }

    #[test]
    fn snapshots_share_the_same_cloud() {
        let store = CloudStore::new();
        let ticket = store.begin_sample();
        store.publish(ticket, cloud_of(5));
        let a = store.snapshot().unwrap();
        let b = store.snapshot().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
