use base64::Engine as _;
use booking_core::{iso_date, long_date_pt, phone, BookingStage, CalendarSession};
use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use thaw::*;
use wasm_bindgen::JsCast;

use crate::components::Alerter;
use crate::server::{
    server_error_message, submit_booking, BookingOutcome, BookingSubmission, ImageAttachment,
};
use crate::whatsapp;

/// The slot the user clicked in the grid; the booking being filled in is
/// bound to it until the form closes.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingSlot {
    pub date: NaiveDate,
    pub time: String,
}

const NO_FILE_SELECTED: &str = "Nenhum arquivo selecionado";

#[component]
pub fn BookingFormModal(
    stage: RwSignal<BookingStage>,
    session: RwSignal<CalendarSession>,
    alert: Alerter,
    pending: RwSignal<Option<PendingSlot>>,
) -> impl IntoView {
    // Form state
    let nome = RwSignal::new(String::new());
    let telefone = RwSignal::new(String::new());
    let ideia = RwSignal::new(String::new());
    let tamanho = RwSignal::new(String::new());
    let local = RwSignal::new(String::new());
    let attachment = RwSignal::new(None::<ImageAttachment>);
    let is_submitting = RwSignal::new(false);

    // Picking a slot starts a fresh booking: clear whatever a previous
    // attempt left behind.
    Effect::new(move |_| {
        if pending.get().is_some() {
            nome.set(String::new());
            telefone.set(String::new());
            ideia.set(String::new());
            tamanho.set(String::new());
            local.set(String::new());
            attachment.set(None);
        }
    });

    // Live input mask: whatever lands in the field is reformatted into the
    // national pattern. The formatter is idempotent, so this settles in one
    // pass instead of looping.
    Effect::new(move |_| {
        let raw = telefone.get();
        let formatted = phone::format_partial(&raw);
        if formatted != raw {
            telefone.set(formatted);
        }
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        let file = input.and_then(|input| input.files()).and_then(|f| f.get(0));
        let Some(file) = file else {
            attachment.set(None);
            return;
        };
        let file_name = file.name();
        let mime = file.type_();
        let content_type = if mime.is_empty() {
            "application/octet-stream".to_string()
        } else {
            mime
        };
        spawn_local(async move {
            match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
                Ok(buffer) => {
                    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                    let data_base64 = base64::engine::general_purpose::STANDARD.encode(bytes);
                    attachment.set(Some(ImageAttachment {
                        file_name,
                        content_type,
                        data_base64,
                    }));
                }
                Err(err) => {
                    leptos::logging::error!("failed to read attachment: {err:?}");
                    attachment.set(None);
                    alert.show("Não foi possível ler a imagem selecionada.");
                }
            }
        });
    };

    let handle_submit = move || {
        let Some(slot) = pending.get_untracked() else {
            leptos::logging::error!("booking form submitted without a selected slot");
            alert.show("Erro ao tentar agendar. Escolha um horário novamente.");
            stage.set(BookingStage::Grid);
            return;
        };

        // Validated locally; an invalid number never reaches the network.
        if let Err(e) = phone::validate(&telefone.get_untracked()) {
            leptos::logging::warn!("rejected booking submission: {e}");
            alert.show(
                "Por favor, insira um número de telefone válido com DDD (10 ou 11 dígitos).",
            );
            return;
        }

        let date = iso_date(slot.date);
        let time = slot.time.clone();
        let client_name = nome.get_untracked();
        let request = BookingSubmission {
            date: date.clone(),
            time: time.clone(),
            nome: client_name.clone(),
            telefone: telefone.get_untracked(),
            ideia: ideia.get_untracked(),
            tamanho: tamanho.get_untracked(),
            local: local.get_untracked(),
            imagem: attachment.get_untracked(),
        };

        is_submitting.set(true);
        spawn_local(async move {
            let result = submit_booking(request).await;
            is_submitting.set(false);
            match result {
                Ok(BookingOutcome::Confirmed { whatsapp_number }) => {
                    stage.set(BookingStage::Closed);
                    // Force a re-fetch the next time the grid opens; the
                    // booked slot is gone.
                    session.update(|s| s.invalidate());
                    let link =
                        whatsapp::confirmation_link(&whatsapp_number, &date, &time, &client_name);
                    alert.show_with(
                        "Agendamento confirmado! Redirecionando para o WhatsApp...",
                        Callback::new(move |_| {
                            let link = link.clone();
                            set_timeout(move || redirect(&link), Duration::from_millis(500));
                        }),
                    );
                }
                Ok(BookingOutcome::SlotTaken { message }) => {
                    // Someone got there first: back to a fresh grid.
                    stage.set(BookingStage::Grid);
                    session.update(|s| s.invalidate());
                    alert.show(message);
                }
                Err(err) => {
                    leptos::logging::error!("booking submission failed: {err}");
                    let message = server_error_message(&err).unwrap_or_else(|| {
                        "Ocorreu um erro inesperado ao agendar. Verifique sua conexão.".to_string()
                    });
                    // The form stays open with its data so the user can retry.
                    alert.show(message);
                }
            }
        });
    };

    let close = move |_| stage.set(BookingStage::Closed);

    view! {
        <div
            class="modal-overlay booking-modal"
            style:display=move || {
                if stage.get() == BookingStage::Form { "flex" } else { "none" }
            }
            on:click=close
        >
            <div class="modal-box booking-box" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>"Detalhes do agendamento"</h2>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=close
                        class="close-button"
                    >
                        "×"
                    </Button>
                </div>

                <p class="modal-info">
                    {move || {
                        pending
                            .get()
                            .map(|slot| {
                                format!(
                                    "Você está agendando para {} às {}.",
                                    long_date_pt(slot.date),
                                    slot.time,
                                )
                            })
                            .unwrap_or_default()
                    }}
                </p>

                <form
                    class="booking-form"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        handle_submit();
                    }
                >
                    <div class="form-group">
                        <label for="nome">"Nome completo"</label>
                        <Input id="nome" placeholder="Seu nome" value=nome/>
                    </div>
                    <div class="form-group">
                        <label for="telefone">"Telefone/WhatsApp"</label>
                        <Input
                            id="telefone"
                            input_type=InputType::Tel
                            placeholder="(47) 99999-9999"
                            value=telefone
                        />
                    </div>
                    <div class="form-group">
                        <label for="ideia">"Descreva sua ideia"</label>
                        <Textarea
                            id="ideia"
                            placeholder="Conte o que você quer tatuar..."
                            value=ideia
                        />
                    </div>
                    <div class="form-group">
                        <label for="tamanho">"Tamanho aproximado"</label>
                        <Input id="tamanho" placeholder="ex: 15cm" value=tamanho/>
                    </div>
                    <div class="form-group">
                        <label for="local">"Local do corpo"</label>
                        <Input id="local" placeholder="ex: antebraço" value=local/>
                    </div>
                    <div class="form-group">
                        <label for="ideia-imagem" class="file-label">
                            "Imagem de referência (opcional)"
                        </label>
                        <input
                            id="ideia-imagem"
                            type="file"
                            accept="image/*"
                            on:change=on_file_change
                        />
                        <span class="file-name">
                            {move || {
                                attachment
                                    .get()
                                    .map(|a| a.file_name)
                                    .unwrap_or_else(|| NO_FILE_SELECTED.to_string())
                            }}
                        </span>
                    </div>

                    <div class="form-actions">
                        <Button
                            button_type=ButtonType::Submit
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || is_submitting.get())
                            loading=is_submitting
                        >
                            {move || {
                                if is_submitting.get() {
                                    "Agendando..."
                                } else {
                                    "Confirmar Agendamento"
                                }
                            }}
                        </Button>
                    </div>
                </form>
            </div>
        </div>
    }
}

fn redirect(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(url) {
            leptos::logging::error!("failed to open WhatsApp link: {err:?}");
        }
    }
}
