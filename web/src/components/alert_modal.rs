use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Default)]
struct AlertState {
    message: Option<String>,
    on_confirm: Option<Callback<()>>,
}

/// Handle to the single alert surface. Every user-facing message in the
/// booking flow routes through here, optionally with a callback that runs
/// when the user acknowledges the alert.
#[derive(Clone, Copy)]
pub struct Alerter(RwSignal<AlertState>);

impl Alerter {
    pub fn new() -> Self {
        Self(RwSignal::new(AlertState::default()))
    }

    pub fn show(&self, message: impl Into<String>) {
        self.0.set(AlertState {
            message: Some(message.into()),
            on_confirm: None,
        });
    }

    pub fn show_with(&self, message: impl Into<String>, on_confirm: Callback<()>) {
        self.0.set(AlertState {
            message: Some(message.into()),
            on_confirm: Some(on_confirm),
        });
    }
}

impl Default for Alerter {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn AlertModal(alert: Alerter) -> impl IntoView {
    let state = alert.0;

    let acknowledge = move || {
        let confirmed = state.get_untracked().on_confirm;
        state.set(AlertState::default());
        if let Some(callback) = confirmed {
            callback.run(());
        }
    };

    view! {
        <div
            class="modal-overlay alert-modal"
            style:display=move || {
                if state.with(|s| s.message.is_some()) { "flex" } else { "none" }
            }
        >
            <div class="modal-box alert-box">
                <p class="alert-message">
                    {move || state.with(|s| s.message.clone().unwrap_or_default())}
                </p>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| acknowledge()
                >
                    "OK"
                </Button>
            </div>
        </div>
    }
}
