//! Race-safe per-resource fetching
//!
//! A [`FetchSlot`] is what a detail view observes. Binding it to an
//! identifier starts a load and returns a [`FetchController`]; binding it
//! again, dropping the controller or calling [`FetchController::cancel`]
//! makes any pending load a no-op.
//!
//! Completion order of overlapping loads does not matter: a result is applied
//! only if its generation is still the slot's current one and its controller
//! was not cancelled. Both checks and the write happen under the watch
//! channel's lock, so a superseded result can never land after a newer one.
//! The in-flight request itself is not aborted; when it finishes under a
//! cancelled controller the snapshot is marked `cancelled` instead.
//!
//! # Example
//!
//! ```ignore
//! let slot = FetchSlot::new();
//! let _a = slot.bind(id_a, |id| apartments.load_details(id));
//! let b = slot.bind(id_b, |id| apartments.load_details(id));
//! // Whatever finishes first, the slot ends up showing `id_b`
//! let state = slot.settled().await; // Some(..) unless `b` was cancelled
//! ```

use std::future::Future;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use stayfolio_types::ApartmentId;
use tokio::sync::watch;

use crate::metrics::{self, StaleReason};
use crate::ClientError;

/// Load state of a single resource
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Request issued, no result applied yet
    Loading,
    /// Resource loaded
    Success(T),
    /// The server has no such resource
    NotFound,
    /// Anything else went wrong; the message is never empty
    Error(String),
}

impl<T> FetchState<T> {
    /// Whether a result is still pending
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded resource, if any
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Resolve an API response into a load state.
    ///
    /// 404 is `NotFound`, any other non-2xx is an `Error` naming the status,
    /// and a 2xx body that does not parse is an `Error` too.
    pub async fn from_response(result: Result<Response, ClientError>) -> Self
    where
        T: DeserializeOwned,
    {
        let response = match result {
            Ok(response) => response,
            Err(e) => return Self::Error(non_empty(e.to_string())),
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Self::NotFound;
        }
        if !status.is_success() {
            return Self::Error(format!("Request failed (HTTP {})", status.as_u16()));
        }

        match response.json::<T>().await {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Error(non_empty(ClientError::from(e).to_string())),
        }
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        "Request failed".to_string()
    } else {
        message
    }
}

/// What a slot currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSnapshot<T> {
    /// Bumped on every bind
    pub generation: u64,
    /// Identifier of the latest bind
    pub id: Option<ApartmentId>,
    /// State for that identifier
    pub state: FetchState<T>,
    /// The latest bind's load finished after its controller was cancelled,
    /// so `state` will stay `Loading`
    pub cancelled: bool,
}

/// Observable mount point for one resource at a time
#[derive(Debug)]
pub struct FetchSlot<T> {
    tx: Arc<watch::Sender<FetchSnapshot<T>>>,
    active: Mutex<Option<Arc<AtomicBool>>>,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(FetchSnapshot {
            generation: 0,
            id: None,
            state: FetchState::Loading,
            cancelled: false,
        });
        Self {
            tx: Arc::new(tx),
            active: Mutex::new(None),
        }
    }
}

impl<T> FetchSlot<T>
where
    T: Send + Sync + 'static,
{
    /// Create an unbound slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `id` into this slot.
    ///
    /// The slot switches to `Loading` immediately and any earlier controller
    /// is cancelled. Must be called from within a Tokio runtime.
    pub fn bind<F, Fut>(&self, id: ApartmentId, load: F) -> FetchController<T>
    where
        F: FnOnce(ApartmentId) -> Fut,
        Fut: Future<Output = FetchState<T>> + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));

        let mut generation = 0;
        self.tx.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.id = Some(id.clone());
            snapshot.state = FetchState::Loading;
            snapshot.cancelled = false;
            generation = snapshot.generation;
        });

        if let Some(previous) = self.active.lock().replace(cancelled.clone()) {
            previous.store(true, Ordering::Release);
        }

        tracing::debug!(id = %id, generation, "fetch started");

        let load = load(id.clone());
        let tx = self.tx.clone();
        let flag = cancelled.clone();
        tokio::spawn(async move {
            let outcome = load.await;
            apply(&tx, generation, &flag, outcome);
        });

        FetchController {
            id,
            generation,
            cancelled,
            _state: PhantomData,
        }
    }

    /// Observe state changes
    pub fn subscribe(&self) -> watch::Receiver<FetchSnapshot<T>> {
        self.tx.subscribe()
    }

    /// Identifier of the latest bind
    pub fn current_id(&self) -> Option<ApartmentId> {
        self.tx.borrow().id.clone()
    }

    /// Generation of the latest bind; zero before the first one
    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }
}

impl<T> FetchSlot<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Current state
    pub fn state(&self) -> FetchState<T> {
        self.tx.borrow().state.clone()
    }

    /// Wait until the current bind has a result, then return it.
    ///
    /// Returns `None` once the load finishes if its controller was cancelled
    /// or dropped first.
    pub async fn settled(&self) -> Option<FetchState<T>> {
        let mut rx = self.tx.subscribe();
        let snapshot = rx
            .wait_for(|snapshot| !snapshot.state.is_loading() || snapshot.cancelled)
            .await
            .ok()?;
        if snapshot.state.is_loading() {
            return None;
        }
        Some(snapshot.state.clone())
    }
}

/// Apply a finished load, unless it was superseded or cancelled
fn apply<T>(
    tx: &watch::Sender<FetchSnapshot<T>>,
    generation: u64,
    cancelled: &AtomicBool,
    outcome: FetchState<T>,
) {
    let mut stale = None;
    tx.send_if_modified(|snapshot| {
        if snapshot.generation != generation {
            stale = Some(StaleReason::Superseded);
            return false;
        }
        if cancelled.load(Ordering::Acquire) {
            stale = Some(StaleReason::Cancelled);
            let changed = !snapshot.cancelled;
            snapshot.cancelled = true;
            return changed;
        }
        snapshot.state = outcome;
        true
    });

    match stale {
        Some(reason) => {
            metrics::record_stale_result(reason);
            tracing::debug!(generation, reason = reason.as_str(), "discarded stale fetch result");
        }
        None => tracing::debug!(generation, "fetch result applied"),
    }
}

/// Handle on one load started by [`FetchSlot::bind`].
///
/// Dropping the handle cancels the load.
#[derive(Debug)]
pub struct FetchController<T> {
    id: ApartmentId,
    generation: u64,
    cancelled: Arc<AtomicBool>,
    _state: PhantomData<fn() -> T>,
}

impl<T> FetchController<T> {
    /// Identifier this controller is loading
    pub fn id(&self) -> &ApartmentId {
        &self.id
    }

    /// Generation assigned at bind time
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Suppress the pending result. Has no effect once it was applied.
    ///
    /// Never blocks on the slot, so it is safe to call (or drop the
    /// controller) while holding a borrowed snapshot.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether [`cancel`](Self::cancel) ran or the slot was rebound
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl<T> Drop for FetchController<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
