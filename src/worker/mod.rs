//! Background (service) worker.
//!
//! Each platform event kind maps to one handler; a handler only decides what
//! to do. Doing it, and keeping the worker alive until asynchronous work
//! settles, is the platform adapter's job.

// Only the wasm32 adapter drives these outside of tests.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

#[cfg(target_arch = "wasm32")]
mod runtime;

use crate::models::NotificationPayload;
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
pub use runtime::{handle_worker_event, start_background_worker};

/// Event kinds the worker listens for; the string form is the DOM event name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter, EnumString, IntoStaticStr)]
pub(crate) enum EventKind {
    #[strum(serialize = "install")]
    Install,
    #[strum(serialize = "push")]
    Push,
    #[strum(serialize = "notificationclick")]
    NotificationClick,
}

impl EventKind {
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum WorkerEvent {
    Install,
    /// Text of the push message, if it carried any.
    Push(Option<String>),
    NotificationClick,
}

impl WorkerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Install => EventKind::Install,
            Self::Push(_) => EventKind::Push,
            Self::NotificationClick => EventKind::NotificationClick,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum WorkerAction {
    SkipWaiting,
    ShowNotification(NotificationPayload),
    CloseAndAcknowledge,
}

impl WorkerAction {
    /// Whether the worker must stay alive until this action settles.
    pub fn must_complete(&self) -> bool {
        !matches!(self, Self::SkipWaiting)
    }
}

#[derive(Debug, Error)]
pub(crate) enum WorkerError {
    #[error("push message has no data")]
    MissingPayload,
    #[error("push payload is not a notification: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("platform call failed: {0}")]
    Platform(String),
}

pub(crate) fn decode_payload(text: &str) -> Result<NotificationPayload, WorkerError> {
    Ok(serde_json::from_str(text)?)
}

type Handler = fn(&WorkerEvent) -> Result<WorkerAction, WorkerError>;

fn on_install(_: &WorkerEvent) -> Result<WorkerAction, WorkerError> {
    tracing::info!("Service Worker: Installed");
    Ok(WorkerAction::SkipWaiting)
}

fn on_push(event: &WorkerEvent) -> Result<WorkerAction, WorkerError> {
    tracing::info!("Service Worker: Pushed");
    let WorkerEvent::Push(Some(text)) = event else {
        return Err(WorkerError::MissingPayload);
    };
    decode_payload(text).map(WorkerAction::ShowNotification)
}

fn on_notification_click(_: &WorkerEvent) -> Result<WorkerAction, WorkerError> {
    Ok(WorkerAction::CloseAndAcknowledge)
}

const HANDLERS: [(EventKind, Handler); 3] = [
    (EventKind::Install, on_install),
    (EventKind::Push, on_push),
    (EventKind::NotificationClick, on_notification_click),
];

pub(crate) fn handle(event: &WorkerEvent) -> Result<WorkerAction, WorkerError> {
    let kind = event.kind();
    let (_, handler) = HANDLERS
        .iter()
        .find(|(k, _)| *k == kind)
        .ok_or_else(|| WorkerError::Platform(format!("no handler for `{}`", kind.as_ref())))?;
    handler(event)
}

/// What actions need from the worker's global scope.
pub(crate) trait WorkerPlatform {
    /// Work the event has to be kept alive for.
    type Pending;

    fn skip_waiting(&self) -> Result<(), WorkerError>;
    fn show_notification(&self, payload: &NotificationPayload)
        -> Result<Self::Pending, WorkerError>;
    fn close_notification(&self);
    fn acknowledge_click(&self) -> Self::Pending;
}

/// Carries out `action`. Returns the work to wait for exactly when the
/// action must complete.
pub(crate) fn perform<P: WorkerPlatform>(
    platform: &P,
    action: WorkerAction,
) -> Result<Option<P::Pending>, WorkerError> {
    let tracked = action.must_complete();
    let pending = match action {
        WorkerAction::SkipWaiting => {
            platform.skip_waiting()?;
            None
        }
        WorkerAction::ShowNotification(payload) => Some(platform.show_notification(&payload)?),
        WorkerAction::CloseAndAcknowledge => {
            platform.close_notification();
            Some(platform.acknowledge_click())
        }
    };
    debug_assert_eq!(pending.is_some(), tracked);
    Ok(pending)
}
