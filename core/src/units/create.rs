use tokio::sync::watch;
use tracing::error;

use super::{InFlight, MutationState, StateCell, TriggerHandle, UnitError, WeakState};
use crate::service::UserService;
use crate::types::{CreateUser, User};

/// Submits new users. Concurrent submissions are not de-duplicated.
pub struct CreateUserUnit {
    service: UserService,
    state: StateCell<MutationState>,
}

impl CreateUserUnit {
    pub fn new(service: UserService) -> Self {
        Self {
            service,
            state: StateCell::new(MutationState::default()),
        }
    }

    pub fn state(&self) -> MutationState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<MutationState> {
        self.state.subscribe()
    }

    /// Returns the created record, or `None` when the submission failed.
    /// The server may or may not assign an id.
    pub async fn create(&self, draft: CreateUser) -> Option<User> {
        create_user(self.service.clone(), self.state.downgrade(), draft).await
    }

    pub fn spawn_create(&self, draft: CreateUser) -> TriggerHandle<Option<User>> {
        TriggerHandle::spawn(create_user(self.service.clone(), self.state.downgrade(), draft))
    }

    pub fn reset(&self) {
        self.state.update(MutationState::reset);
    }
}

async fn create_user(service: UserService, state: WeakState<MutationState>, draft: CreateUser) -> Option<User> {
    let in_flight = InFlight::begin(state, MutationState::start);
    match service.create_user(&draft).await {
        Ok(user) => {
            in_flight.settle(|s| s.succeed(user.clone()));
            Some(user)
        }
        Err(error) => {
            error!(%error, status = ?error.status(), "Error creating user");
            in_flight.settle(|s| s.fail(UnitError::CreateUser));
            None
        }
    }
}
