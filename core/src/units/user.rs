use tokio::sync::watch;
use tracing::error;

use super::{InFlight, StateCell, TriggerHandle, UnitError, UnitState, WeakState};
use crate::service::UserService;
use crate::types::User;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<UnitError>,
    /// Id of the most recent fetch, used by [`UserUnit::retry`].
    pub requested_id: Option<u64>,
}

impl UnitState for UserState {
    fn is_loading(&self) -> bool {
        self.loading
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// A single user record. Nothing is fetched until [`fetch`](Self::fetch)
/// is called.
pub struct UserUnit {
    service: UserService,
    state: StateCell<UserState>,
}

impl UserUnit {
    pub fn new(service: UserService) -> Self {
        Self {
            service,
            state: StateCell::new(UserState::default()),
        }
    }

    pub fn state(&self) -> UserState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<UserState> {
        self.state.subscribe()
    }

    pub async fn ready(&self) -> UserState {
        self.state.settled().await
    }

    pub async fn fetch(&self, id: u64) {
        fetch_user(self.service.clone(), self.state.downgrade(), id).await;
    }

    pub fn spawn_fetch(&self, id: u64) -> TriggerHandle<()> {
        TriggerHandle::spawn(fetch_user(self.service.clone(), self.state.downgrade(), id))
    }

    /// Fetch the last requested id again. Returns `false` when nothing has
    /// been requested yet.
    pub async fn retry(&self) -> bool {
        match self.state().requested_id {
            Some(id) => {
                self.fetch(id).await;
                true
            }
            None => false,
        }
    }
}

async fn fetch_user(service: UserService, state: WeakState<UserState>, id: u64) {
    let in_flight = InFlight::begin(state, |s| {
        s.error = None;
        s.requested_id = Some(id);
    });
    match service.get_user(id).await {
        Ok(user) => in_flight.settle(|s| {
            s.user = Some(user);
            s.error = None;
        }),
        Err(error) => {
            error!(%error, id, "Error fetching user");
            in_flight.settle(|s| s.error = Some(UnitError::FetchUser));
        }
    }
}
