use leptos::prelude::*;
use std::time::Duration;

const ANIMATION_MS: f64 = 1500.0;
const TICK: Duration = Duration::from_millis(16);

/// Counts up from zero to `target` over ~1.5s once the page is interactive.
#[component]
fn AnimatedCounter(
    target: u32,
    label: &'static str,
    #[prop(optional)] suffix: &'static str,
) -> impl IntoView {
    let current = RwSignal::new(0u32);
    let progress = StoredValue::new(0.0f64);
    let handle = StoredValue::new(None::<IntervalHandle>);

    // Effects only run client-side, so SSR renders the zero and the
    // animation starts after hydration.
    Effect::new(move |_| {
        if handle.get_value().is_some() {
            return;
        }
        let step = (target as f64 / (ANIMATION_MS / TICK.as_millis() as f64)).max(1.0);
        let started = set_interval_with_handle(
            move || {
                let next = progress.get_value() + step;
                progress.set_value(next);
                if next >= target as f64 {
                    current.set(target);
                    if let Some(h) = handle.get_value() {
                        h.clear();
                    }
                } else {
                    current.set(next as u32);
                }
            },
            TICK,
        );
        match started {
            Ok(h) => handle.set_value(Some(h)),
            Err(err) => {
                leptos::logging::error!("failed to start counter animation: {err:?}");
                current.set(target);
            }
        }
    });

    view! {
        <div class="stat">
            <span class="stat-number">{move || current.get()}{suffix}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}

#[component]
pub fn StatsSection() -> impl IntoView {
    view! {
        <section class="stats" id="sobre">
            <AnimatedCounter target=1250 label="Tatuagens feitas" suffix="+"/>
            <AnimatedCounter target=12 label="Anos de experiência"/>
            <AnimatedCounter target=98 label="Clientes satisfeitos" suffix="%"/>
        </section>
    }
}
