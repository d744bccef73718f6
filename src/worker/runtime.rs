use super::{handle, perform, EventKind, WorkerError, WorkerEvent, WorkerPlatform};
use crate::models::NotificationPayload;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{
    ExtendableEvent, NotificationEvent, NotificationOptions, PushEvent, ServiceWorkerGlobalScope,
};

fn platform(e: JsValue) -> WorkerError {
    WorkerError::Platform(format!("{e:?}"))
}

/// Runs once the worker script has loaded the module.
#[wasm_bindgen]
pub fn start_background_worker() {
    console_error_panic_hook::set_once();
    crate::logging::init();
    tracing::debug!("background worker ready");
}

/// Handles one lifecycle event forwarded by the worker script's listeners.
/// The returned promise settles when the event's work is done; the script
/// hands it to `waitUntil`.
#[wasm_bindgen]
pub fn handle_worker_event(event: ExtendableEvent) -> Promise {
    let name = event.type_();
    match on_event(&name, &event) {
        Ok(Some(pending)) => pending,
        Ok(None) => Promise::resolve(&JsValue::UNDEFINED),
        Err(e) => {
            tracing::error!(event = %name, error = %e, "service worker event failed");
            Promise::resolve(&JsValue::UNDEFINED)
        }
    }
}

struct ScopePlatform<'a> {
    scope: ServiceWorkerGlobalScope,
    event: &'a ExtendableEvent,
}

impl WorkerPlatform for ScopePlatform<'_> {
    type Pending = Promise;

    fn skip_waiting(&self) -> Result<(), WorkerError> {
        // Activation proceeds on its own; nothing waits on this promise.
        self.scope.skip_waiting().map_err(platform)?;
        Ok(())
    }

    fn show_notification(&self, payload: &NotificationPayload) -> Result<Promise, WorkerError> {
        let options = NotificationOptions::new();
        options.set_body(&payload.options.body);
        if let Some(icon) = &payload.options.icon {
            options.set_icon(icon);
        }
        if let Some(image) = &payload.options.image {
            options.set_image(image);
        }

        self.scope
            .registration()
            .show_notification_with_options(&payload.title, &options)
            .map_err(platform)
    }

    fn close_notification(&self) {
        if let Some(click) = self.event.dyn_ref::<NotificationEvent>() {
            click.notification().close();
        }
    }

    fn acknowledge_click(&self) -> Promise {
        future_to_promise(async {
            tracing::info!("Notification has been clicked");
            Ok(JsValue::UNDEFINED)
        })
    }
}

fn read_event(kind: EventKind, event: &ExtendableEvent) -> WorkerEvent {
    match kind {
        EventKind::Install => WorkerEvent::Install,
        EventKind::Push => WorkerEvent::Push(
            event
                .dyn_ref::<PushEvent>()
                .and_then(|push| push.data())
                .map(|data| data.text()),
        ),
        EventKind::NotificationClick => WorkerEvent::NotificationClick,
    }
}

fn on_event(name: &str, event: &ExtendableEvent) -> Result<Option<Promise>, WorkerError> {
    let kind = EventKind::from_name(name)
        .ok_or_else(|| WorkerError::Platform(format!("unexpected event `{name}`")))?;
    let scope = js_sys::global()
        .dyn_into::<ServiceWorkerGlobalScope>()
        .map_err(|global| platform(global.into()))?;

    let action = handle(&read_event(kind, event))?;
    perform(&ScopePlatform { scope, event }, action)
}
