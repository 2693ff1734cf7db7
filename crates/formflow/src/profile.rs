//! Read-only account summary loader.
//!
//! The lightweight sibling of the submission machine: no fields, no
//! validation, just `Loading -> Content | Error` with `Error -> Loading` on
//! retry. It reuses the same ingredients (watch channel, ticket fencing,
//! `TaskExecutor` deadline and cancellation).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::core::executor::TaskExecutor;
use crate::core::state::Ticket;
use crate::errors::LoadError;
use crate::settings::ProfileSettings;

pub const PROFILE_FAILED: &str = "Unable to load profile. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileState {
    Loading { ticket: Ticket },
    Content(Profile),
    Error { message: String },
}

impl ProfileState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ProfileState::Loading { .. })
    }
}

#[derive(Debug)]
enum ProfileEvent {
    Retry { ticket: Ticket },
    Loaded {
        ticket: Ticket,
        outcome: Result<Profile, LoadError>,
    },
}

/// Pure transition function. `None` leaves the state as is.
fn reduce(state: &ProfileState, event: ProfileEvent) -> Option<ProfileState> {
    match (state, event) {
        (ProfileState::Error { .. }, ProfileEvent::Retry { ticket }) => {
            Some(ProfileState::Loading { ticket })
        }
        (ProfileState::Loading { ticket: current }, ProfileEvent::Loaded { ticket, outcome })
            if *current == ticket =>
        {
            Some(match outcome {
                Ok(profile) => ProfileState::Content(profile),
                Err(error) => ProfileState::Error {
                    message: error.to_string(),
                },
            })
        }
        _ => None,
    }
}

#[async_trait]
pub trait ProfileLoader: Send + Sync {
    async fn load(&self) -> Result<Profile, LoadError>;
}

#[derive(Debug, Clone, Default)]
pub struct SimulatedProfileLoader {
    settings: ProfileSettings,
}

impl SimulatedProfileLoader {
    pub fn new(settings: ProfileSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ProfileLoader for SimulatedProfileLoader {
    async fn load(&self) -> Result<Profile, LoadError> {
        tokio::time::sleep(self.settings.latency()).await;
        if self.settings.fail {
            return Err(LoadError::Failed(PROFILE_FAILED.into()));
        }
        Ok(Profile {
            full_name: self.settings.full_name.clone(),
            email: self.settings.email.clone(),
        })
    }
}

/// Container for the account summary screen.
pub struct ProfileScreen<L> {
    shared: Arc<Shared<L>>,
}

struct Shared<L> {
    state: watch::Sender<ProfileState>,
    loader: Arc<L>,
    tickets: AtomicU64,
    executor: TaskExecutor,
}

impl<L: ProfileLoader + 'static> ProfileScreen<L> {
    /// Mount the screen; the first load starts immediately.
    /// Must be called inside a Tokio runtime.
    pub fn new(loader: L, deadline: Duration) -> Self {
        let (state, _) = watch::channel(ProfileState::Loading { ticket: 1 });
        let shared = Arc::new(Shared {
            state,
            loader: Arc::new(loader),
            tickets: AtomicU64::new(1),
            executor: TaskExecutor::new("profile", deadline),
        });
        shared.start(1);
        Self { shared }
    }

    /// Reload after an error. Ignored in any other state.
    pub fn retry(&self) {
        let ticket = self.shared.tickets.fetch_add(1, Ordering::Relaxed) + 1;
        if self.shared.dispatch(ProfileEvent::Retry { ticket }) {
            self.shared.start(ticket);
        }
    }

    pub fn snapshot(&self) -> ProfileState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.shared.state.subscribe()
    }

    pub async fn settled(&self) -> ProfileState {
        let mut rx = self.subscribe();
        let settled = rx.wait_for(|state| !state.is_loading()).await;
        match settled {
            Ok(state) => (*state).clone(),
            Err(_) => self.snapshot(),
        }
    }
}

impl<L: ProfileLoader + 'static> Shared<L> {
    fn dispatch(&self, event: ProfileEvent) -> bool {
        self.state.send_if_modified(|state| match reduce(state, event) {
            Some(next) => {
                *state = next;
                true
            }
            None => false,
        })
    }

    fn start(self: &Arc<Self>, ticket: Ticket) {
        info!(ticket, "profile load started");
        let loader = Arc::clone(&self.loader);
        let work = async move { loader.load().await };
        let weak = Arc::downgrade(self);
        self.executor
            .spawn(ticket, work, move |ticket, outcome| Self::finish(weak, ticket, outcome));
    }

    fn finish(weak: Weak<Self>, ticket: Ticket, outcome: Result<Profile, LoadError>) {
        if let Err(error) = &outcome {
            warn!(ticket, %error, "profile load failed");
        }
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if !shared.dispatch(ProfileEvent::Loaded { ticket, outcome }) {
            debug!(ticket, "stale profile result discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            full_name: "Preeti Tundiwala".into(),
            email: "preeti@example.com".into(),
        }
    }

    #[test]
    fn retry_only_from_error() {
        let loading = ProfileState::Loading { ticket: 1 };
        assert!(reduce(&loading, ProfileEvent::Retry { ticket: 2 }).is_none());

        let content = ProfileState::Content(profile());
        assert!(reduce(&content, ProfileEvent::Retry { ticket: 2 }).is_none());

        let error = ProfileState::Error {
            message: PROFILE_FAILED.into(),
        };
        assert_eq!(
            reduce(&error, ProfileEvent::Retry { ticket: 2 }),
            Some(ProfileState::Loading { ticket: 2 })
        );
    }

    #[test]
    fn loaded_result_must_match_ticket() {
        let loading = ProfileState::Loading { ticket: 2 };
        let stale = ProfileEvent::Loaded {
            ticket: 1,
            outcome: Ok(profile()),
        };
        assert!(reduce(&loading, stale).is_none());

        let fresh = ProfileEvent::Loaded {
            ticket: 2,
            outcome: Ok(profile()),
        };
        assert_eq!(
            reduce(&loading, fresh),
            Some(ProfileState::Content(profile()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn screen_loads_fixture_on_mount() {
        let screen = ProfileScreen::new(SimulatedProfileLoader::default(), Duration::from_secs(10));
        assert!(screen.snapshot().is_loading());
        assert_eq!(screen.settled().await, ProfileState::Content(profile()));
    }

    #[tokio::test(start_paused = true)]
    async fn failing_loader_can_be_retried() {
        let settings = ProfileSettings {
            fail: true,
            ..ProfileSettings::default()
        };
        let screen =
            ProfileScreen::new(SimulatedProfileLoader::new(settings), Duration::from_secs(10));
        assert_eq!(
            screen.settled().await,
            ProfileState::Error {
                message: PROFILE_FAILED.into()
            }
        );

        screen.retry();
        assert!(matches!(screen.snapshot(), ProfileState::Loading { ticket: 2 }));
        assert!(matches!(screen.settled().await, ProfileState::Error { .. }));
    }
}
