//! Observable request state for the presentation layer.
//!
//! # Overview
//! Four units wrap `UserService` operations with local state a view can bind
//! to: [`UsersUnit`] (list), [`UserUnit`] (single record), [`CreateUserUnit`]
//! and [`UpdateUserUnit`]. Each unit owns its state in a `watch` channel;
//! views read snapshots with `state()` or `subscribe()` to re-render on
//! change.
//!
//! # Design
//! - Every trigger exists as an awaitable method and as a `spawn_*` method
//!   returning a [`TriggerHandle`]. Dropping the handle aborts the request.
//! - Triggers hold the unit's state weakly. A response that arrives after the
//!   unit is gone is logged at debug level and dropped.
//! - A trigger abandoned mid-flight clears `loading`, so a cancelled request
//!   cannot pin a unit in its loading state.
//! - Overlapping triggers are neither merged nor cancelled. Each resolution
//!   writes the state, so the request that resolves last wins.
//! - Failures of any kind collapse into one [`UnitError`] per operation. The
//!   underlying `ApiError` only reaches the logs.

mod create;
mod update;
mod user;
mod users;

use std::future::Future;
use std::sync::{Arc, Weak};

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::types::User;

pub use create::CreateUserUnit;
pub use update::UpdateUserUnit;
pub use user::{UserState, UserUnit};
pub use users::{UsersState, UsersUnit};

/// What a view gets to know about a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("Failed to fetch users")]
    FetchUsers,
    #[error("Failed to fetch user")]
    FetchUser,
    #[error("Failed to create user")]
    CreateUser,
    #[error("Failed to update user")]
    UpdateUser,
}

/// State shared by the create and update units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationState {
    pub loading: bool,
    pub error: Option<UnitError>,
    pub success: bool,
    /// The server's representation from the last successful submission.
    pub user: Option<User>,
}

impl MutationState {
    fn start(&mut self) {
        self.loading = true;
        self.error = None;
        self.success = false;
    }

    fn succeed(&mut self, user: User) {
        self.success = true;
        self.error = None;
        self.user = Some(user);
    }

    /// `user` keeps the last successful submission.
    fn fail(&mut self, error: UnitError) {
        self.success = false;
        self.error = Some(error);
    }

    /// Clears `error` and `success`; `loading` and `user` are untouched.
    fn reset(&mut self) {
        self.error = None;
        self.success = false;
    }
}

pub(crate) trait UnitState: Clone + Send + Sync + 'static {
    fn is_loading(&self) -> bool;
    fn set_loading(&mut self, loading: bool);
}

impl UnitState for MutationState {
    fn is_loading(&self) -> bool {
        self.loading
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// The owning side of a unit's state.
pub(crate) struct StateCell<S> {
    sender: Arc<watch::Sender<S>>,
}

impl<S: UnitState> StateCell<S> {
    pub(crate) fn new(initial: S) -> Self {
        Self {
            sender: Arc::new(watch::Sender::new(initial)),
        }
    }

    pub(crate) fn snapshot(&self) -> S {
        self.sender.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }

    pub(crate) fn update(&self, apply: impl FnOnce(&mut S)) {
        self.sender.send_modify(apply);
    }

    pub(crate) fn downgrade(&self) -> WeakState<S> {
        WeakState(Arc::downgrade(&self.sender))
    }

    /// Wait until no request is loading and return that state.
    pub(crate) async fn settled(&self) -> S {
        let mut receiver = self.subscribe();
        let settled = match receiver.wait_for(|state| !state.is_loading()).await {
            Ok(state) => (*state).clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }
}

/// The side of a unit's state held by in-flight requests.
pub(crate) struct WeakState<S>(Weak<watch::Sender<S>>);

impl<S> Clone for WeakState<S> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<S: UnitState> WeakState<S> {
    /// Apply `apply` if the unit still exists. Returns whether it did.
    pub(crate) fn update(&self, apply: impl FnOnce(&mut S)) -> bool {
        match self.0.upgrade() {
            Some(sender) => {
                sender.send_modify(apply);
                true
            }
            None => {
                debug!("unit dropped before its request resolved; discarding result");
                false
            }
        }
    }
}

/// One outstanding request against a unit.
///
/// Created by [`InFlight::begin`]; finished by [`InFlight::settle`]. If it is
/// dropped unsettled, the request was cancelled and `loading` is cleared.
pub(crate) struct InFlight<S: UnitState> {
    state: WeakState<S>,
    settled: bool,
}

impl<S: UnitState> InFlight<S> {
    pub(crate) fn begin(state: WeakState<S>, start: impl FnOnce(&mut S)) -> Self {
        state.update(|s| {
            start(s);
            s.set_loading(true);
        });
        Self { state, settled: false }
    }

    pub(crate) fn settle(mut self, finish: impl FnOnce(&mut S)) {
        self.settled = true;
        self.state.update(|s| {
            finish(s);
            s.set_loading(false);
        });
    }
}

impl<S: UnitState> Drop for InFlight<S> {
    fn drop(&mut self) {
        if !self.settled {
            debug!("request cancelled before it resolved");
            self.state.update(|s| s.set_loading(false));
        }
    }
}

/// A spawned trigger. Dropping it aborts the request and suppresses its
/// result; call [`detach`](Self::detach) to let it run on instead.
#[must_use = "dropping a TriggerHandle cancels the request"]
#[derive(Debug)]
pub struct TriggerHandle<T> {
    task: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> TriggerHandle<T> {
    pub(crate) fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            task: Some(tokio::spawn(future)),
        }
    }

    /// Wait for the trigger to resolve. `None` if it was aborted.
    pub async fn join(mut self) -> Option<T> {
        let task = self.task.take()?;
        task.await.ok()
    }

    /// Let the request finish on its own; its result still reaches the unit.
    pub fn detach(mut self) {
        self.task.take();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl<T> Drop for TriggerHandle<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
