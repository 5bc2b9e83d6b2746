//! Session controller — owns the current `AuthState` and mediates every
//! transition.
//!
//! DESIGN
//! ======
//! The snapshot lives in a `watch` channel. The controller holds the only
//! sender, so it is the single writer; observers subscribe and read clones.
//! Every write goes through `send_if_modified`/`send_modify`, which run the
//! closure under the channel's write lock. That makes the in-flight guard
//! and the switch to Loading one atomic step. An authenticated session has
//! no login edge; it must log out first, so Loading never carries
//! `is_authenticated`.
//!
//! CANCELLATION
//! ============
//! Each login attempt is tagged with a generation number. `logout` bumps the
//! generation under the same lock and aborts the in-flight task. A completion
//! is applied only while its generation is still current, so a late result
//! can never overwrite the logged-out state.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::services::session::SessionService;
use crate::state::AuthState;

/// Owns the authentication state and exposes the login/logout commands.
pub struct SessionController {
    inner: Arc<Inner>,
}

struct Inner {
    service: Arc<dyn SessionService>,
    state_tx: watch::Sender<AuthState>,
    /// Bumped on every login start and every logout. Only read or written
    /// inside `state_tx` modify closures.
    generation: AtomicU64,
    /// Latest spawned attempt, tagged with its generation.
    in_flight: Mutex<Option<(u64, JoinHandle<()>)>>,
}

impl SessionController {
    #[must_use]
    pub fn new(service: Arc<dyn SessionService>) -> Self {
        let (state_tx, _) = watch::channel(AuthState::default());
        Self {
            inner: Arc::new(Inner {
                service,
                state_tx,
                generation: AtomicU64::new(0),
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.inner.state_tx.borrow().clone()
    }

    /// Receiver that observes every snapshot the controller publishes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state_tx.subscribe()
    }

    /// Start a login attempt in the background.
    ///
    /// Returns `false` without touching state when an attempt is already in
    /// flight, when the session is already authenticated (log out first), or
    /// when called outside a Tokio runtime. Otherwise the state switches to
    /// Loading before this returns, and the outcome is published when the
    /// service resolves.
    pub fn login(&self, username: &str, credential: &str) -> bool {
        let Ok(runtime) = Handle::try_current() else {
            error!(%username, "login ignored: no Tokio runtime to run the attempt");
            return false;
        };

        let mut generation = 0;
        let mut rejection = None;
        let started = self.inner.state_tx.send_if_modified(|state| {
            if state.is_loading {
                rejection = Some("attempt already in flight");
                return false;
            }
            if state.is_authenticated {
                rejection = Some("already authenticated");
                return false;
            }
            generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = state.begin_attempt();
            true
        });

        if !started {
            debug!(%username, reason = rejection.unwrap_or_default(), "login ignored");
            return false;
        }
        debug!(%username, generation, "login started");

        let inner = Arc::clone(&self.inner);
        let username = username.to_owned();
        let credential = credential.to_owned();
        let handle = runtime.spawn(async move {
            inner.run_attempt(generation, &username, &credential).await;
        });
        self.inner.track(generation, handle);
        true
    }

    /// Clear the session and publish the logged-out snapshot, cancelling any
    /// in-flight attempt.
    pub fn logout(&self) {
        self.inner.service.clear_session();
        self.inner.state_tx.send_modify(|state| {
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            *state = AuthState::logged_out();
        });

        if let Some((generation, handle)) = self.inner.take_in_flight() {
            if !handle.is_finished() {
                debug!(generation, "cancelling in-flight login");
            }
            handle.abort();
        }
        info!("logged out");
    }

    /// Wait until no attempt is in flight and return that snapshot.
    pub async fn settled(&self) -> AuthState {
        let mut rx = self.subscribe();
        // The channel cannot close while `self` holds the sender.
        rx.wait_for(|state| !state.is_loading)
            .await
            .map(|state| state.clone())
            .unwrap_or_else(|_| self.state())
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.inner.take_in_flight() {
            handle.abort();
        }
    }
}

impl Inner {
    async fn run_attempt(&self, generation: u64, username: &str, credential: &str) {
        let outcome = AssertUnwindSafe(self.service.attempt_login(username, credential))
            .catch_unwind()
            .await;

        let next = match outcome {
            Ok(Ok(state)) => state.settled(),
            Ok(Err(err)) => {
                error!(%username, error = %err, "login attempt faulted");
                AuthState::network_error()
            }
            Err(_) => {
                error!(%username, "session service panicked during login");
                AuthState::network_error()
            }
        };
        debug_assert!(!next.is_loading);

        let phase = next.phase();
        let applied = self.state_tx.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next;
            true
        });

        if applied {
            info!(%username, generation, ?phase, "login resolved");
        } else {
            debug!(%username, generation, "discarding stale login result");
        }
    }

    fn track(&self, generation: u64, handle: JoinHandle<()>) {
        let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let newer_registered = slot.as_ref().is_some_and(|(current, _)| *current > generation);
        if newer_registered {
            handle.abort();
        } else {
            *slot = Some((generation, handle));
        }
    }

    fn take_in_flight(&self) -> Option<(u64, JoinHandle<()>)> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
