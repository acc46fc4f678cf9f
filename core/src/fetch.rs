//! Data-fetch controller binding an async call to observable state.
//!
//! # Design
//! A `FetchHandle` owns one fetch function and publishes a `FetchState`
//! through a `tokio::sync::watch` channel. The lifecycle is explicit:
//!
//! - a new handle is `Idle`;
//! - `activate()` / `refresh()` enter `Loading` (error cleared, previous data
//!   kept) and spawn one fetch cycle;
//! - the cycle ends in `Success` (data set, error cleared) or `Error` (error
//!   message set, previous data kept).
//!
//! In-flight cycles are never cancelled. Each cycle takes a ticket from a
//! monotonically increasing counter and its result is applied only if no
//! newer cycle has started since, so a slow superseded call cannot overwrite
//! a fresher one. `deactivate()` (or dropping the handle) marks the handle
//! dead; later results are discarded without publishing anything.
//!
//! Liveness and ticket checks run inside the channel's write lock, the same
//! lock `deactivate()` takes, so teardown and result application never
//! interleave.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::ApiError;

type FetchFn<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// Observable result of a fetch handle.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Success,
    Error,
}

impl<T> FetchState<T> {
    pub fn phase(&self) -> FetchPhase {
        if self.loading {
            FetchPhase::Loading
        } else if self.error.is_some() {
            FetchPhase::Error
        } else if self.data.is_some() {
            FetchPhase::Success
        } else {
            FetchPhase::Idle
        }
    }
}

struct Shared<T> {
    fetch: FetchFn<T>,
    state: watch::Sender<FetchState<T>>,
    latest: AtomicU64,
    alive: AtomicBool,
}

impl<T> Shared<T> {
    fn begin(&self) -> Option<u64> {
        let mut ticket = None;
        self.state.send_if_modified(|state| {
            if !self.alive.load(Ordering::SeqCst) {
                return false;
            }
            ticket = Some(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
            state.loading = true;
            state.error = None;
            true
        });
        ticket
    }

    fn finish(&self, ticket: u64, result: Result<T, ApiError>) {
        self.state.send_if_modified(|state| {
            if !self.alive.load(Ordering::SeqCst) {
                debug!(ticket, "dropping fetch result after teardown");
                return false;
            }
            if self.latest.load(Ordering::SeqCst) != ticket {
                debug!(ticket, "dropping superseded fetch result");
                return false;
            }
            state.loading = false;
            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.error = None;
                }
                Err(err) => {
                    warn!(error = %err, "fetch failed");
                    state.error = Some(err.to_string());
                }
            }
            true
        });
    }

    fn kill(&self) {
        self.state.send_if_modified(|_| {
            self.alive.store(false, Ordering::SeqCst);
            false
        });
    }
}

/// One fetch function plus its `{data, loading, error}` state.
///
/// `activate` and `refresh` spawn onto the current tokio runtime and must be
/// called from within one.
pub struct FetchHandle<T> {
    shared: Arc<Shared<T>>,
}

impl<T> FetchHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            shared: Arc::new(Shared {
                fetch: Box::new(move || fetch().boxed()),
                state,
                latest: AtomicU64::new(0),
                alive: AtomicBool::new(true),
            }),
        }
    }

    /// Start the first fetch cycle. Returns `None` once deactivated.
    pub fn activate(&self) -> Option<JoinHandle<()>> {
        self.start()
    }

    /// Start another cycle from any state; earlier cycles keep running but
    /// their results will be dropped. Returns `None` once deactivated.
    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        self.start()
    }

    fn start(&self) -> Option<JoinHandle<()>> {
        let ticket = self.shared.begin()?;
        let shared = self.shared.clone();
        let fut = (shared.fetch)();
        Some(tokio::spawn(async move {
            let result = fut.await;
            shared.finish(ticket, result);
        }))
    }

    pub fn state(&self) -> FetchState<T> {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.state.subscribe()
    }
}

impl<T> FetchHandle<T> {
    /// Tear down: no state change is published after this returns.
    pub fn deactivate(&self) {
        self.shared.kill();
    }

    pub fn is_active(&self) -> bool {
        self.shared.alive.load(Ordering::SeqCst)
    }
}

impl<T> Drop for FetchHandle<T> {
    fn drop(&mut self) {
        self.deactivate();
    }
}
