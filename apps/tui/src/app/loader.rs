use std::fmt::Display;
use std::future::Future;

use fleetwatch::config::CurrentUser;
use fleetwatch::db::Store;
use fleetwatch::fleet::FleetData;
use fleetwatch::FleetResult;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::app::state::AppScreen;

/// A finished background load, stamped with the epoch that requested it.
#[derive(Debug)]
pub struct LoadMessage {
    pub epoch: u64,
    pub result: FleetResult<FleetData>,
}

pub fn spawn_load(
    store: Store,
    user: CurrentUser,
    epoch: u64,
    sender: UnboundedSender<LoadMessage>,
) {
    debug!(epoch, "load started");
    tokio::spawn(async move {
        let result = FleetData::load(&store, &user).await;
        if sender.send(LoadMessage { epoch, result }).is_err() {
            debug!(epoch, "load finished after the app closed");
        }
    });
}

/// Toast to raise once a store write settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionNotice {
    Silent,
    Success { title: &'static str, message: String },
    Failure { title: &'static str, message: String },
}

/// What the app does when a background store write finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub notice: ActionNotice,
    pub reload: bool,
    /// Followed only if the user is still on the screen that started the write.
    pub navigate: Option<AppScreen>,
}

impl ActionOutcome {
    pub const fn silent() -> Self {
        Self {
            notice: ActionNotice::Silent,
            reload: false,
            navigate: None,
        }
    }

    pub fn success(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            notice: ActionNotice::Success {
                title,
                message: message.into(),
            },
            ..Self::silent()
        }
    }

    pub fn failure(title: &'static str, error: &dyn Display) -> Self {
        Self {
            notice: ActionNotice::Failure {
                title,
                message: error.to_string(),
            },
            ..Self::silent()
        }
    }

    #[must_use]
    pub const fn reloading(mut self) -> Self {
        self.reload = true;
        self
    }

    #[must_use]
    pub const fn then_navigate(mut self, screen: AppScreen) -> Self {
        self.navigate = Some(screen);
        self
    }
}

#[derive(Debug)]
pub struct ActionMessage {
    pub started_on: AppScreen,
    pub outcome: ActionOutcome,
}

/// Runs a store write off the draw loop and reports how it went.
pub fn spawn_action<F>(started_on: AppScreen, action: F, sender: UnboundedSender<ActionMessage>)
where
    F: Future<Output = ActionOutcome> + Send + 'static,
{
    debug!(screen = ?started_on, "action started");
    tokio::spawn(async move {
        let outcome = action.await;
        if sender.send(ActionMessage { started_on, outcome }).is_err() {
            debug!("action finished after the app closed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetwatch::db::create_memory_pool;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn load_reports_its_epoch() -> Result<(), Box<dyn std::error::Error>> {
        let store = Store::new(create_memory_pool().await?, false);
        let (sender, mut receiver) = mpsc::unbounded_channel();

        spawn_load(store, CurrentUser::default(), 7, sender);
        let message = receiver.recv().await.ok_or("channel closed")?;

        assert_eq!(message.epoch, 7);
        assert_eq!(message.result?.vessels.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn action_reports_its_outcome_and_screen() -> Result<(), Box<dyn std::error::Error>> {
        let (sender, mut receiver) = mpsc::unbounded_channel();

        spawn_action(
            AppScreen::Services,
            async { ActionOutcome::success("Service updated", "Dredging").reloading() },
            sender,
        );
        let message = receiver.recv().await.ok_or("channel closed")?;

        assert_eq!(message.started_on, AppScreen::Services);
        assert!(message.outcome.reload);
        assert_eq!(
            message.outcome.notice,
            ActionNotice::Success {
                title: "Service updated",
                message: "Dredging".into()
            }
        );
        Ok(())
    }
}
