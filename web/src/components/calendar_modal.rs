use booking_core::{
    build_grid, iso_date, weekday_label_pt, BookingStage, CalendarSession, SlotRow, SlotStatus,
};
use chrono::{Datelike, Local, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::components::{ErrorView, LoadingView};
use crate::config::WORK_HOURS;
use crate::server::{fetch_window_availability, server_error_message};

/// The 3-day slot grid. Availability is fetched once per render generation;
/// navigation and invalidation bump the generation, and responses that come
/// back for a superseded generation are dropped so a stale fetch can never
/// overwrite a newer window.
#[component]
pub fn CalendarModal(
    stage: RwSignal<BookingStage>,
    session: RwSignal<CalendarSession>,
    on_pick: Callback<(NaiveDate, String)>,
) -> impl IntoView {
    let grid_rows = RwSignal::new(None::<Result<Vec<SlotRow>, String>>);
    let is_loading = RwSignal::new(false);
    let last_requested = StoredValue::new(None::<u64>);

    let load_window = move |generation: u64| {
        let window = session.with_untracked(|s| s.window());
        is_loading.set(true);
        spawn_local(async move {
            let result = fetch_window_availability(iso_date(window.start())).await;
            if session.with_untracked(|s| s.generation()) != generation {
                // A navigation superseded this request while it was in
                // flight; a newer fetch owns the grid now.
                return;
            }
            match result {
                Ok(days) => {
                    // One clock read per render pass keeps every past/future
                    // decision in the grid consistent.
                    let now = Local::now().naive_local();
                    grid_rows.set(Some(Ok(build_grid(window, WORK_HOURS, &days, now))));
                    session.update(|s| s.complete(generation, true));
                }
                Err(err) => {
                    leptos::logging::error!("failed to load availability: {err}");
                    let message = server_error_message(&err).unwrap_or_else(|| {
                        "Erro ao carregar horários. Tente novamente mais tarde.".to_string()
                    });
                    grid_rows.set(Some(Err(message)));
                    session.update(|s| s.complete(generation, false));
                }
            }
            is_loading.set(false);
        });
    };

    // One fetch per render generation, and only while the grid is open.
    Effect::new(move |_| {
        let open = stage.get() == BookingStage::Grid;
        let generation = session.with(|s| s.generation());
        if open && last_requested.get_value() != Some(generation) {
            last_requested.set_value(Some(generation));
            load_window(generation);
        }
    });

    let close = move |_| stage.set(BookingStage::Closed);
    let go_prev = move |_| session.update(|s| s.rewind());
    let go_next = move |_| session.update(|s| s.advance());
    let prev_disabled = Signal::derive(move || {
        session.with(|s| s.window().rewind_disabled(Local::now().date_naive()))
    });

    view! {
        <div
            class="modal-overlay calendar-modal"
            style:display=move || {
                if stage.get() == BookingStage::Grid { "flex" } else { "none" }
            }
            on:click=close
        >
            <div class="modal-box calendar-box" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>"Agende seu horário"</h2>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=close
                        class="close-button"
                    >
                        "×"
                    </Button>
                </div>

                <div class="calendar-navigation">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        size=ButtonSize::Small
                        disabled=prev_disabled
                        on_click=go_prev
                    >
                        "← Anteriores"
                    </Button>
                    <span class="current-window">
                        {move || session.with(|s| s.window().header_label())}
                    </span>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        size=ButtonSize::Small
                        on_click=go_next
                    >
                        "Próximos →"
                    </Button>
                </div>

                {move || {
                    if is_loading.get() {
                        return view! {
                            <LoadingView message="Carregando horários...".to_string()/>
                        }
                        .into_any();
                    }
                    match grid_rows.get() {
                        None => view! {}.into_any(),
                        Some(Err(message)) => view! {
                            <div class="calendar-error">
                                <ErrorView message=message/>
                            </div>
                        }
                        .into_any(),
                        Some(Ok(rows)) => {
                            let days = session.with_untracked(|s| s.window().days());
                            view! {
                                <div class="calendar-grid">
                                    <div class="grid-header"></div>
                                    {days
                                        .iter()
                                        .map(|day| {
                                            view! {
                                                <div class="grid-header">
                                                    {weekday_label_pt(*day)}
                                                    <br/>
                                                    <span class="grid-header-day">{day.day()}</span>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                    {rows
                                        .into_iter()
                                        .map(|row| {
                                            view! {
                                                <div class="time-label">{row.label.clone()}</div>
                                                {row
                                                    .cells
                                                    .into_iter()
                                                    .map(|cell| {
                                                        let css = match cell.status {
                                                            SlotStatus::Past => "time-slot past-day",
                                                            SlotStatus::Unavailable => "time-slot unavailable",
                                                            SlotStatus::Bookable => "time-slot",
                                                        };
                                                        let text = match cell.status {
                                                            SlotStatus::Past => "---",
                                                            SlotStatus::Unavailable => "Ocupado",
                                                            SlotStatus::Bookable => "Agendar",
                                                        };
                                                        let bookable = cell.status.is_bookable();
                                                        let date = cell.date;
                                                        let time = cell.label;
                                                        view! {
                                                            <div
                                                                class=css
                                                                on:click=move |_| {
                                                                    if bookable {
                                                                        on_pick.run((date, time.clone()));
                                                                    }
                                                                }
                                                            >
                                                                {text}
                                                            </div>
                                                        }
                                                    })
                                                    .collect_view()}
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }
                            .into_any()
                        }
                    }
                }}
            </div>
        </div>
    }
}
