//! A timer service driven by a virtual clock.
//!
//! [`ManualTimerService`] never fires on its own. Tests move time forward
//! with [`advance`](ManualTimerService::advance), and every registration that
//! falls due inside the advanced window fires on the calling thread, in due
//! order. Capacity limits and one-off failures can be injected to exercise
//! the error paths of [`Ticker`](ticker::Ticker).

use std::collections::BTreeMap;
use std::time::Duration;

use parking_lot::Mutex;
use ticker::{ArgSlot, RepeatMode, ServiceError, TickCallback, TimerService};

/// Registration handed out by [`ManualTimerService`].
#[derive(Debug, PartialEq, Eq)]
pub struct ManualRegistration {
    id: u64,
}

impl ManualRegistration {
    /// Service-unique id of the registration.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug)]
struct Entry {
    due: Duration,
    period: Option<Duration>,
    callback: TickCallback,
    arg: ArgSlot,
    pending: bool,
}

#[derive(Debug, Default)]
struct State {
    now: Duration,
    next_id: u64,
    capacity: Option<usize>,
    fail_next: Option<ServiceError>,
    entries: BTreeMap<u64, Entry>,
    created: u64,
    cancelled: u64,
    destroyed: u64,
    fired: u64,
}

impl State {
    /// Earliest pending entry due at or before `limit`; ties fire in creation order.
    fn next_due(&self, limit: Duration) -> Option<u64> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.pending && entry.due <= limit)
            .min_by_key(|(id, entry)| (entry.due, **id))
            .map(|(id, _)| *id)
    }
}

/// Counters describing what a [`ManualTimerService`] has been asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManualStats {
    /// Registrations created.
    pub created: u64,
    /// Cancel requests received, including repeated ones.
    pub cancelled: u64,
    /// Registrations destroyed.
    pub destroyed: u64,
    /// Callbacks invoked.
    pub fired: u64,
    /// Registrations created and not yet destroyed.
    pub live: usize,
}

/// Deterministic timer service for tests.
#[derive(Debug, Default)]
pub struct ManualTimerService {
    state: Mutex<State>,
}

impl ManualTimerService {
    /// Unbounded service at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Service that holds at most `capacity` live registrations.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let service = Self::new();
        service.state.lock().capacity = Some(capacity);
        service
    }

    /// Make the next `create_registration` call fail with `error`.
    pub fn fail_next_create(&self, error: ServiceError) {
        self.state.lock().fail_next = Some(error);
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Move the clock forward by `by`, firing everything that falls due.
    ///
    /// Returns the number of callbacks invoked. Callbacks run on the calling
    /// thread with the service unlocked.
    pub fn advance(&self, by: Duration) -> u64 {
        let target = self.state.lock().now.saturating_add(by);
        let mut fired = 0;

        loop {
            let (callback, arg) = {
                let mut state = self.state.lock();
                let Some(id) = state.next_due(target) else {
                    state.now = target;
                    break;
                };
                let Some(entry) = state.entries.get_mut(&id) else {
                    break;
                };

                let due = entry.due;
                match entry.period {
                    Some(period) => entry.due = due.saturating_add(period),
                    None => entry.pending = false,
                }
                let fire = (entry.callback, entry.arg);

                state.now = due;
                state.fired = state.fired.saturating_add(1);
                fire
            };

            callback.invoke(arg);
            fired += 1;
        }

        fired
    }

    /// Snapshot of the request counters.
    #[must_use]
    pub fn stats(&self) -> ManualStats {
        let state = self.state.lock();
        ManualStats {
            created: state.created,
            cancelled: state.cancelled,
            destroyed: state.destroyed,
            fired: state.fired,
            live: state.entries.len(),
        }
    }

    /// Number of registrations with a firing still queued.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state
            .lock()
            .entries
            .values()
            .filter(|entry| entry.pending)
            .count()
    }
}

impl TimerService for ManualTimerService {
    type Registration = ManualRegistration;

    fn create_registration(
        &self,
        interval_ms: u32,
        mode: RepeatMode,
        callback: TickCallback,
        arg: ArgSlot,
    ) -> Result<ManualRegistration, ServiceError> {
        let mut state = self.state.lock();

        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }
        if let Some(capacity) = state.capacity
            && state.entries.len() >= capacity
        {
            return Err(ServiceError::exhausted(capacity));
        }

        let interval = Duration::from_millis(u64::from(interval_ms));
        if mode.repeats() && interval.is_zero() {
            return Err(ServiceError::invalid_argument("periodic interval must be non-zero"));
        }

        let id = state.next_id;
        state.next_id = id.saturating_add(1);
        let due = state.now.saturating_add(interval);
        state.entries.insert(
            id,
            Entry {
                due,
                period: mode.repeats().then_some(interval),
                callback,
                arg,
                pending: true,
            },
        );
        state.created = state.created.saturating_add(1);

        Ok(ManualRegistration { id })
    }

    fn cancel_registration(&self, registration: &ManualRegistration) {
        let mut state = self.state.lock();
        state.cancelled = state.cancelled.saturating_add(1);
        if let Some(entry) = state.entries.get_mut(&registration.id) {
            entry.pending = false;
        }
    }

    fn destroy_registration(&self, registration: ManualRegistration) {
        let mut state = self.state.lock();
        if state.entries.remove(&registration.id).is_some() {
            state.destroyed = state.destroyed.saturating_add(1);
        }
    }

    fn is_pending(&self, registration: &ManualRegistration) -> bool {
        self.state
            .lock()
            .entries
            .get(&registration.id)
            .is_some_and(|entry| entry.pending)
    }
}
