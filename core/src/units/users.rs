use tokio::sync::watch;
use tracing::error;

use super::{InFlight, StateCell, TriggerHandle, UnitError, UnitState, WeakState};
use crate::service::UserService;
use crate::types::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersState {
    /// The last fetched collection. Kept while a refresh is loading and
    /// when a refresh fails.
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<UnitError>,
}

impl UnitState for UsersState {
    fn is_loading(&self) -> bool {
        self.loading
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// The user collection, fetched once on construction and on demand after.
pub struct UsersUnit {
    service: UserService,
    state: StateCell<UsersState>,
    _initial: TriggerHandle<()>,
}

impl UsersUnit {
    /// Build the unit and start the initial fetch. Must be called from
    /// within a Tokio runtime. The initial fetch is cancelled if the unit is
    /// dropped first.
    pub fn new(service: UserService) -> Self {
        let state = StateCell::new(UsersState {
            users: Vec::new(),
            loading: true,
            error: None,
        });
        let initial = TriggerHandle::spawn(fetch_users(service.clone(), state.downgrade()));
        Self {
            service,
            state,
            _initial: initial,
        }
    }

    pub fn state(&self) -> UsersState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<UsersState> {
        self.state.subscribe()
    }

    /// Wait for outstanding fetches to settle.
    pub async fn ready(&self) -> UsersState {
        self.state.settled().await
    }

    /// Refetch the collection, replacing it wholesale on success.
    pub async fn fetch(&self) {
        fetch_users(self.service.clone(), self.state.downgrade()).await;
    }

    pub fn spawn_fetch(&self) -> TriggerHandle<()> {
        TriggerHandle::spawn(fetch_users(self.service.clone(), self.state.downgrade()))
    }
}

async fn fetch_users(service: UserService, state: WeakState<UsersState>) {
    let in_flight = InFlight::begin(state, |s| s.error = None);
    match service.list_users().await {
        Ok(users) => in_flight.settle(|s| {
            s.users = users;
            s.error = None;
        }),
        Err(error) => {
            error!(%error, status = ?error.status(), "Error fetching users");
            in_flight.settle(|s| s.error = Some(UnitError::FetchUsers));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ClientConfig;
    use crate::mock::{reply, unreachable, MockTransport};

    const LEANNE: &str = r#"[{"id":1,"name":"Leanne Graham","email":"Sincere@april.biz"}]"#;

    fn service(transport: MockTransport) -> (UserService, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        let service = UserService::with_transport(&ClientConfig::new("http://mock"), transport.clone());
        (service, transport)
    }

    #[tokio::test]
    async fn construction_fetches_exactly_once() {
        let (service, transport) = service(MockTransport::scripted([reply(200, LEANNE)]));
        let unit = UsersUnit::new(service);
        assert!(unit.state().loading);

        let state = unit.ready().await;
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.users.len(), 1);
        assert_eq!(state.users[0].name, "Leanne Graham");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_users() {
        let (service, _) = service(MockTransport::scripted([reply(200, LEANNE), reply(500, "down")]));
        let unit = UsersUnit::new(service);
        unit.ready().await;

        unit.fetch().await;
        let state = unit.state();
        assert!(!state.loading);
        assert_eq!(state.error, Some(UnitError::FetchUsers));
        assert_eq!(state.users.len(), 1);
    }

    #[tokio::test]
    async fn refresh_keeps_old_users_visible_while_loading() {
        let (transport, mut pending) = MockTransport::manual();
        let (service, _) = service(transport);
        let unit = UsersUnit::new(service);
        pending.recv().await.unwrap().respond(reply(200, LEANNE));
        unit.ready().await;

        let refresh = unit.spawn_fetch();
        let second = pending.recv().await.unwrap();
        let during = unit.state();
        assert!(during.loading);
        assert_eq!(during.users.len(), 1);

        second.respond(reply(200, "[]"));
        refresh.join().await;
        let after = unit.state();
        assert!(!after.loading);
        assert!(after.users.is_empty());
    }

    #[tokio::test]
    async fn retry_after_failure_clears_error() {
        let (service, _) = service(MockTransport::scripted([unreachable(), reply(200, LEANNE)]));
        let unit = UsersUnit::new(service);
        assert_eq!(unit.ready().await.error, Some(UnitError::FetchUsers));

        unit.fetch().await;
        let state = unit.state();
        assert!(state.error.is_none());
        assert_eq!(state.users.len(), 1);
    }

    #[tokio::test]
    async fn later_success_clears_earlier_failure() {
        let (transport, mut pending) = MockTransport::manual();
        let (service, _) = service(transport);
        let unit = UsersUnit::new(service);
        let initial = pending.recv().await.unwrap();
        let refresh = unit.spawn_fetch();
        let second = pending.recv().await.unwrap();

        initial.respond(reply(500, "down"));
        let mut states = unit.subscribe();
        states.wait_for(|s| s.error.is_some()).await.unwrap();

        second.respond(reply(200, LEANNE));
        refresh.join().await;
        let state = unit.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.users.len(), 1);
    }

    #[tokio::test]
    async fn dropping_unit_cancels_initial_fetch() {
        let (transport, mut pending) = MockTransport::manual();
        let (service, _) = service(transport);
        let unit = UsersUnit::new(service);
        let request = pending.recv().await.unwrap();
        drop(unit);
        // Answering after the unit is gone must not panic.
        request.respond(reply(200, LEANNE));
    }
}
