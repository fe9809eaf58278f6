//! Field change listener
//!
//! A [`Dispatcher`] keeps the last values it has seen for the watched fields
//! and, on every round, calls the listener of each field whose value moved
//! since then. [`Listener::mount`] drives a dispatcher from the form's change
//! notifications on a background task.

use crate::error::FormError;
use crate::hooks::ListenerRegistry;
use crate::state::{FieldName, FormContext, FormValues};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;

/// Lifecycle of a dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Uninitialized,
    Idle,
    Dispatching,
    Unmounted,
}

/// Diff-and-dispatch loop over a fixed listener registry
#[derive(Debug)]
pub struct Dispatcher {
    registry: ListenerRegistry,
    snapshot: Arc<FormValues>,
    phase: DispatchPhase,
    detached: Arc<AtomicBool>,
}

impl Dispatcher {
    pub fn new(registry: ListenerRegistry) -> Self {
        Self {
            registry,
            snapshot: Arc::new(FormValues::new()),
            phase: DispatchPhase::Uninitialized,
            detached: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Take the baseline snapshot; no listener is called
    pub fn initialize(&mut self, values: &FormValues) {
        self.snapshot = Arc::new(self.watched(values));
        self.phase = DispatchPhase::Idle;
    }

    pub fn phase(&self) -> DispatchPhase {
        self.phase
    }

    /// Last values the dispatcher has published for its watched fields
    pub fn snapshot(&self) -> Arc<FormValues> {
        self.snapshot.clone()
    }

    /// Run one round against `current`, returning the fields whose listener fired
    ///
    /// Listeners run one after the other in registry order. The snapshot
    /// entry of a field is replaced right after its listener succeeds. The
    /// first failing listener ends the round and leaves the following fields
    /// stale.
    pub async fn dispatch(&mut self, current: Arc<FormValues>) -> Result<Vec<FieldName>, FormError> {
        if self.phase == DispatchPhase::Uninitialized {
            self.initialize(&current);
            return Ok(Vec::new());
        }

        if !self.is_detached() {
            self.phase = DispatchPhase::Dispatching;
        }
        let mut fired = Vec::new();

        for (name, listener) in self.registry.iter() {
            let value = current.get(name).cloned().unwrap_or_default();
            let previous = self.snapshot.get(name).cloned().unwrap_or_default();
            if previous == value {
                continue;
            }

            tracing::debug!(field = %name, old = %previous, new = %value, "field changed");
            if let Err(err) = listener.on_change(value.clone(), current.clone()).await {
                tracing::error!(field = %name, error = %err, "listener failed, round aborted");
                if !self.is_detached() {
                    self.phase = DispatchPhase::Idle;
                }
                return Err(FormError::CallbackRejected {
                    field: name.to_string(),
                    source: err.into(),
                });
            }

            if !self.is_detached() {
                let mut next = (*self.snapshot).clone();
                next.insert(name.to_string(), value);
                self.snapshot = Arc::new(next);
            }
            fired.push(name.to_string());
        }

        if !self.is_detached() {
            self.phase = DispatchPhase::Idle;
        }
        Ok(fired)
    }

    /// Stop accepting state updates; a round in progress still runs its listeners
    pub fn detach(&mut self) {
        self.detached.store(true, Ordering::SeqCst);
        self.phase = DispatchPhase::Unmounted;
    }

    fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }

    fn watched(&self, values: &FormValues) -> FormValues {
        self.registry
            .names()
            .filter_map(|name| values.get(name).map(|v| (name.to_string(), v.clone())))
            .collect()
    }
}

/// Dispatcher state visible from outside the background task
#[derive(Debug)]
struct Shared {
    snapshot: Mutex<Arc<FormValues>>,
    phase: Mutex<DispatchPhase>,
}

/// A dispatcher subscribed to a form's change notifications
///
/// Dropping the handle unmounts the listener.
#[derive(Debug)]
pub struct Listener {
    shared: Arc<Shared>,
    detached: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    errors: mpsc::UnboundedReceiver<FormError>,
    task: Option<JoinHandle<()>>,
}

impl Listener {
    /// Take the baseline snapshot and start reacting to value changes
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(form: &FormContext, registry: ListenerRegistry) -> Self {
        let mut values = form.subscribe();
        let mut dispatcher = Dispatcher::new(registry);
        dispatcher.initialize(&values.borrow_and_update());

        let shared = Arc::new(Shared {
            snapshot: Mutex::new(dispatcher.snapshot()),
            phase: Mutex::new(dispatcher.phase()),
        });
        let detached = dispatcher.detached.clone();
        let shutdown = Arc::new(Notify::new());
        let (errors_tx, errors) = mpsc::unbounded_channel();

        tracing::debug!(watched = ?dispatcher.registry, "listener mounted");

        let task = tokio::spawn(run(
            dispatcher,
            values,
            shared.clone(),
            shutdown.clone(),
            errors_tx,
        ));

        Self {
            shared,
            detached,
            shutdown,
            errors,
            task: Some(task),
        }
    }

    pub fn phase(&self) -> DispatchPhase {
        *self.shared.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Arc<FormValues> {
        self.shared
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Wait for the next round failure
    pub async fn next_error(&mut self) -> Option<FormError> {
        self.errors.recv().await
    }

    /// Pending round failure, if any
    pub fn try_next_error(&mut self) -> Option<FormError> {
        self.errors.try_recv().ok()
    }

    /// Stop reacting to value changes
    ///
    /// A round already running is left to finish in the background without
    /// touching the published snapshot.
    pub fn unmount(&mut self) {
        if self.detached.swap(true, Ordering::SeqCst) {
            return;
        }
        *self.shared.phase.lock().unwrap_or_else(PoisonError::into_inner) = DispatchPhase::Unmounted;
        self.shutdown.notify_one();
        self.task.take();
        tracing::debug!("listener unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        !self.detached.load(Ordering::SeqCst)
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.unmount();
    }
}

async fn run(
    mut dispatcher: Dispatcher,
    mut values: watch::Receiver<Arc<FormValues>>,
    shared: Arc<Shared>,
    shutdown: Arc<Notify>,
    errors: mpsc::UnboundedSender<FormError>,
) {
    // Watched values as of the last wake-up; changes elsewhere in the form do not start a round
    let mut last_seen = dispatcher.snapshot();
    loop {
        tokio::select! {
            _ = shutdown.notified() => break,
            changed = values.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
        if dispatcher.is_detached() {
            break;
        }

        let current = values.borrow_and_update().clone();
        let watched = Arc::new(dispatcher.watched(&current));
        if watched == last_seen {
            continue;
        }
        last_seen = watched;

        set_phase(&shared, &dispatcher, DispatchPhase::Dispatching);
        let result = dispatcher.dispatch(current).await;

        if dispatcher.is_detached() {
            if let Err(err) = result {
                let _ = errors.send(err);
            }
            break;
        }

        *shared.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = dispatcher.snapshot();
        set_phase(&shared, &dispatcher, DispatchPhase::Idle);
        if let Err(err) = result {
            let _ = errors.send(err);
        }
    }
}

fn set_phase(shared: &Shared, dispatcher: &Dispatcher, phase: DispatchPhase) {
    if !dispatcher.is_detached() {
        *shared.phase.lock().unwrap_or_else(PoisonError::into_inner) = phase;
    }
}
