//! The daemon timer service.
//!
//! Registrations live in a fixed-size table guarded by one mutex. A single
//! daemon thread sleeps until the earliest pending due time, then runs that
//! callback with the table unlocked. Periodic entries are re-queued one
//! period after their due time; one-shot entries go inert and keep their
//! slot until destroyed.

use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};
use ticker::{ArgSlot, RepeatMode, ServiceError, TickCallback, TimerService};
use tracing::{debug, error, info, warn};

use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};

/// Registration handed out by [`DaemonTimerService`].
///
/// Identifies a table slot plus the generation it was created with, so a
/// stale registration never touches a slot that has since been reused.
#[derive(Debug, PartialEq, Eq)]
pub struct DaemonRegistration {
    index: usize,
    generation: u64,
}

impl DaemonRegistration {
    fn key(&self) -> Key {
        Key {
            index: self.index,
            generation: self.generation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Key {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    due: Instant,
    period: Option<Duration>,
    callback: TickCallback,
    arg: ArgSlot,
    pending: bool,
}

#[derive(Debug)]
struct Table {
    slots: Vec<Option<Slot>>,
    next_generation: u64,
    running: bool,
    in_flight: Option<Key>,
}

impl Table {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            next_generation: 1,
            running: true,
            in_flight: None,
        }
    }

    fn slot(&self, key: Key) -> Option<&Slot> {
        self.slots
            .get(key.index)
            .and_then(Option::as_ref)
            .filter(|slot| slot.generation == key.generation)
    }

    fn slot_mut(&mut self, key: Key) -> Option<&mut Slot> {
        self.slots
            .get_mut(key.index)
            .and_then(Option::as_mut)
            .filter(|slot| slot.generation == key.generation)
    }

    /// Earliest pending slot.
    fn next_due(&self) -> Option<(Key, Instant)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let slot = slot.as_ref()?;
                slot.pending.then_some((
                    Key {
                        index,
                        generation: slot.generation,
                    },
                    slot.due,
                ))
            })
            .min_by_key(|(_, due)| *due)
    }

    fn live(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn pending(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|slot| slot.pending)
            .count()
    }
}

#[derive(Debug)]
struct Shared {
    table: Mutex<Table>,
    /// Signalled when the table changes in a way the daemon must see.
    wake: Condvar,
    /// Signalled when an in-flight callback returns.
    idle: Condvar,
    fired: AtomicU64,
    panicked: AtomicU64,
}

/// Snapshot of the daemon's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaemonStats {
    /// Table size.
    pub capacity: usize,
    /// Registrations created and not yet destroyed.
    pub live: usize,
    /// Registrations with a firing still queued.
    pub pending: usize,
    /// Callbacks invoked since start.
    pub fired: u64,
    /// Callbacks that panicked since start.
    pub panicked: u64,
    /// Whether the daemon thread is accepting registrations.
    pub running: bool,
}

/// Timer service backed by a dedicated daemon thread.
///
/// Implements [`TimerService`], so a [`Ticker`](ticker::Ticker) can borrow
/// it (`Ticker::new(&service)`) or share it through an `Arc`.
///
/// # Cancellation
///
/// `cancel_registration` called from any thread other than the daemon
/// waits for an in-flight firing of that registration to return. Once it
/// returns, the callback is neither running nor queued. Called from inside
/// a callback, it only dequeues.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::time::Duration;
/// use ticker::Ticker;
/// use ticker_daemon::{DaemonConfig, DaemonTimerService};
///
/// static TICKS: AtomicU32 = AtomicU32::new(0);
///
/// let service = DaemonTimerService::start(DaemonConfig::default())?;
/// let mut ticker = Ticker::new(&service);
/// ticker.arm_periodic(10u32, || {
///     TICKS.fetch_add(1, Ordering::Relaxed);
/// })?;
///
/// std::thread::sleep(Duration::from_millis(100));
/// ticker.cancel();
/// assert!(TICKS.load(Ordering::Relaxed) > 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct DaemonTimerService {
    shared: Arc<Shared>,
    capacity: usize,
    daemon_thread: ThreadId,
    join_handle: Mutex<Option<JoinHandle<()>>>,
}

impl DaemonTimerService {
    /// Validate `config` and spawn the daemon thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the thread cannot
    /// be spawned.
    pub fn start(config: DaemonConfig) -> DaemonResult<Self> {
        config.validate()?;

        let shared = Arc::new(Shared {
            table: Mutex::new(Table::with_capacity(config.capacity)),
            wake: Condvar::new(),
            idle: Condvar::new(),
            fired: AtomicU64::new(0),
            panicked: AtomicU64::new(0),
        });

        let mut builder = thread::Builder::new().name(config.thread_name.clone());
        if let Some(stack_size) = config.stack_size {
            builder = builder.stack_size(stack_size);
        }
        let daemon_shared = Arc::clone(&shared);
        let join_handle = builder
            .spawn(move || run_daemon(&daemon_shared))
            .map_err(DaemonError::Spawn)?;

        info!(
            thread = %config.thread_name,
            capacity = config.capacity,
            "timer daemon started"
        );

        Ok(Self {
            shared,
            capacity: config.capacity,
            daemon_thread: join_handle.thread().id(),
            join_handle: Mutex::new(Some(join_handle)),
        })
    }

    /// Stop the daemon and wait for its thread to exit.
    ///
    /// Pending registrations never fire afterwards and new ones are refused
    /// with [`ServiceError::Unavailable`]. Called from inside a callback it
    /// only stops the loop; the thread is joined by the next call from any
    /// other thread, or by `Drop`. Calling it again after the join is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonError::DaemonPanicked`] if the daemon thread died.
    pub fn shutdown(&self) -> DaemonResult<()> {
        {
            let mut table = self.shared.table.lock();
            if table.running {
                table.running = false;
                self.shared.wake.notify_all();
            }
        }

        if self.on_daemon_thread() {
            // The loop exits once the current callback returns.
            return Ok(());
        }

        let Some(join_handle) = self.join_handle.lock().take() else {
            return Ok(());
        };
        if join_handle.join().is_err() {
            return Err(DaemonError::DaemonPanicked);
        }
        info!("timer daemon stopped");
        Ok(())
    }

    /// Whether the daemon is accepting registrations.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.table.lock().running
    }

    /// Snapshot of the registration table and counters.
    #[must_use]
    pub fn stats(&self) -> DaemonStats {
        let table = self.shared.table.lock();
        DaemonStats {
            capacity: self.capacity,
            live: table.live(),
            pending: table.pending(),
            fired: self.shared.fired.load(Ordering::Relaxed),
            panicked: self.shared.panicked.load(Ordering::Relaxed),
            running: table.running,
        }
    }

    fn on_daemon_thread(&self) -> bool {
        thread::current().id() == self.daemon_thread
    }
}

impl TimerService for DaemonTimerService {
    type Registration = DaemonRegistration;

    fn create_registration(
        &self,
        interval_ms: u32,
        mode: RepeatMode,
        callback: TickCallback,
        arg: ArgSlot,
    ) -> Result<DaemonRegistration, ServiceError> {
        let interval = Duration::from_millis(u64::from(interval_ms));
        if mode.repeats() && interval.is_zero() {
            return Err(ServiceError::invalid_argument(
                "periodic interval must be non-zero",
            ));
        }

        let mut table = self.shared.table.lock();
        if !table.running {
            return Err(ServiceError::Unavailable);
        }

        let Some(index) = table.slots.iter().position(Option::is_none) else {
            warn!(capacity = self.capacity, "timer daemon registration table full");
            return Err(ServiceError::exhausted(self.capacity));
        };

        let generation = table.next_generation;
        table.next_generation = generation.wrapping_add(1);
        let slot = Slot {
            generation,
            due: Instant::now() + interval,
            period: mode.repeats().then_some(interval),
            callback,
            arg,
            pending: true,
        };
        if let Some(entry) = table.slots.get_mut(index) {
            *entry = Some(slot);
        }
        self.shared.wake.notify_all();

        debug!(index, generation, interval_ms, ?mode, "registration created");
        Ok(DaemonRegistration { index, generation })
    }

    fn cancel_registration(&self, registration: &DaemonRegistration) {
        let key = registration.key();
        let mut table = self.shared.table.lock();
        if let Some(slot) = table.slot_mut(key) {
            slot.pending = false;
            self.shared.wake.notify_all();
        }

        if !self.on_daemon_thread() {
            while table.in_flight == Some(key) {
                self.shared.idle.wait(&mut table);
            }
        }
        debug!(index = key.index, generation = key.generation, "registration cancelled");
    }

    fn destroy_registration(&self, registration: DaemonRegistration) {
        let key = registration.key();
        let mut table = self.shared.table.lock();
        if table.slot(key).is_some()
            && let Some(entry) = table.slots.get_mut(key.index)
        {
            *entry = None;
            debug!(index = key.index, generation = key.generation, "registration destroyed");
        }
    }

    fn is_pending(&self, registration: &DaemonRegistration) -> bool {
        self.shared
            .table
            .lock()
            .slot(registration.key())
            .is_some_and(|slot| slot.pending)
    }
}

impl Drop for DaemonTimerService {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            error!(error = %e, "timer daemon did not stop cleanly");
        }
    }
}

fn run_daemon(shared: &Shared) {
    let mut table = shared.table.lock();
    while table.running {
        let Some((key, due)) = table.next_due() else {
            shared.wake.wait(&mut table);
            continue;
        };

        let now = Instant::now();
        if due > now {
            let _ = shared.wake.wait_until(&mut table, due);
            continue;
        }

        let Some(slot) = table.slot_mut(key) else {
            continue;
        };
        match slot.period {
            Some(period) => {
                let next = due + period;
                slot.due = if next > now { next } else { now + period };
            }
            None => slot.pending = false,
        }
        let (callback, arg) = (slot.callback, slot.arg);

        table.in_flight = Some(key);
        fire(shared, &mut table, key, callback, arg);
        table.in_flight = None;
        shared.idle.notify_all();
    }
    debug!("timer daemon loop exited");
}

fn fire(
    shared: &Shared,
    table: &mut MutexGuard<'_, Table>,
    key: Key,
    callback: TickCallback,
    arg: ArgSlot,
) {
    let outcome = MutexGuard::unlocked(table, || panic::catch_unwind(move || callback.invoke(arg)));
    shared.fired.fetch_add(1, Ordering::Relaxed);
    if outcome.is_err() {
        shared.panicked.fetch_add(1, Ordering::Relaxed);
        error!(
            index = key.index,
            generation = key.generation,
            arg_kind = callback.arg_kind(),
            "ticker callback panicked"
        );
    }
}
