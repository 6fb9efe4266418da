use tokio::sync::watch;
use tracing::error;

use super::{InFlight, MutationState, StateCell, TriggerHandle, UnitError, WeakState};
use crate::service::UserService;
use crate::types::{UpdateUser, User};

/// Submits edits to existing users. Same state machine as
/// [`CreateUserUnit`](super::CreateUserUnit).
pub struct UpdateUserUnit {
    service: UserService,
    state: StateCell<MutationState>,
}

impl UpdateUserUnit {
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

    pub async fn update(&self, id: u64, patch: UpdateUser) -> Option<User> {
        update_user(self.service.clone(), self.state.downgrade(), id, patch).await
    }

    pub fn spawn_update(&self, id: u64, patch: UpdateUser) -> TriggerHandle<Option<User>> {
        TriggerHandle::spawn(update_user(self.service.clone(), self.state.downgrade(), id, patch))
    }

    pub fn reset(&self) {
        self.state.update(MutationState::reset);
    }
}

async fn update_user(
    service: UserService,
    state: WeakState<MutationState>,
    id: u64,
    patch: UpdateUser,
) -> Option<User> {
    let in_flight = InFlight::begin(state, MutationState::start);
    match service.update_user(id, &patch).await {
        Ok(user) => {
            in_flight.settle(|s| s.succeed(user.clone()));
            Some(user)
        }
        Err(error) => {
            error!(%error, id, "Error updating user");
            in_flight.settle(|s| s.fail(UnitError::UpdateUser));
            None
        }
    }
}
