use crate::components::notes::NoteList;
use crate::components::ui::{Alert, AlertDescription, Spinner};
use crate::dashboard::{DashboardView, HandlerBinding, NoteListing};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Signal-backed adapter: the controller writes, the page renders.
#[derive(Clone, Copy)]
struct SignalView {
    listing: RwSignal<Option<NoteListing>>,
    error: RwSignal<Option<String>>,
}

impl DashboardView for SignalView {
    fn replace_listing(&self, listing: NoteListing) {
        self.error.set(None);
        self.listing.set(Some(listing));
    }

    fn alert(&self, message: &str) {
        if let Err(e) = window().alert_with_message(message) {
            tracing::warn!(error = ?e, "window.alert failed");
        }
    }

    fn show_error(&self, message: String) {
        self.error.set(Some(message));
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let dashboard = app_state.0.dashboard;

    let view_state = SignalView {
        listing: RwSignal::new(None),
        error: RwSignal::new(None),
    };
    let listing = view_state.listing;
    let error = view_state.error;

    // Runs once the skeleton below is mounted; nothing is fetched before that.
    Effect::new(move |_| {
        tracing::info!("dashboard page");
        let controller = dashboard.get_value();
        spawn_local(async move {
            controller.reload(&view_state).await;
        });
    });

    let on_action = Callback::new(move |binding: HandlerBinding| {
        let controller = dashboard.get_value();
        spawn_local(async move {
            controller.dispatch(binding, &view_state).await;
        });
    });

    let loading = move || listing.with(Option::is_none) && error.with(Option::is_none);

    view! {
        <div class="content mx-auto w-full max-w-[960px] px-4 py-8">
            <div class="flex items-center gap-2">
                <h1 class="text-xl font-semibold">"Dashboard"</h1>
                <Show when=loading fallback=|| ().into_view()>
                    <Spinner />
                </Show>
            </div>

            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    error.get().map(|e| view! {
                        <Alert class="mt-4">
                            <AlertDescription>{e}</AlertDescription>
                        </Alert>
                    })
                }}
            </Show>

            <div id="notesList" class="mt-4 grid gap-4">
                {move || listing.get().map(|l| view! { <NoteList listing=l on_action=on_action /> })}
            </div>
        </div>
    }
}
