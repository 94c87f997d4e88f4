use booking_core::DayAvailability;
use leptos::prelude::*;
use leptos::server;
use serde::{Deserialize, Serialize};

#[cfg(feature = "ssr")]
use booking_core::{iso_date, parse_base_date, BookingWindow};

/// Error body the scheduling API attaches to non-2xx responses.
#[cfg(feature = "ssr")]
#[derive(Deserialize)]
struct ApiError {
    error: String,
}

#[cfg(feature = "ssr")]
#[derive(Deserialize)]
struct BookingConfirmation {
    #[serde(rename = "whatsappNumber")]
    whatsapp_number: String,
}

const GENERIC_FETCH_ERROR: &str = "Erro ao carregar horários. Tente novamente mais tarde.";

/// Availability for the 3-day window starting at `start` (`YYYY-MM-DD`),
/// one set of open `HH:MM` labels per day, in day order.
///
/// The three upstream requests run concurrently and the whole call fails as
/// soon as any of them does, so the grid is never drawn from partial data.
#[server]
pub async fn fetch_window_availability(
    start: String,
) -> Result<Vec<DayAvailability>, ServerFnError> {
    let base = parse_base_date(&start).map_err(|e| {
        tracing::warn!(%start, "rejected availability request: {e}");
        ServerFnError::new(GENERIC_FETCH_ERROR)
    })?;
    let window = BookingWindow::containing(base);

    let api = crate::config::scheduling_api_url();
    let client = reqwest::Client::new();
    let [first, second, third] = window.days();
    let (a, b, c) = tokio::try_join!(
        fetch_day_availability(&client, &api, first),
        fetch_day_availability(&client, &api, second),
        fetch_day_availability(&client, &api, third),
    )?;
    Ok(vec![a, b, c])
}

#[cfg(feature = "ssr")]
async fn fetch_day_availability(
    client: &reqwest::Client,
    api: &str,
    date: chrono::NaiveDate,
) -> Result<DayAvailability, ServerFnError> {
    let url = format!("{api}/api/horarios?date={}", iso_date(date));
    let response = client.get(&url).send().await.map_err(|e| {
        tracing::error!(%url, "availability request failed: {e}");
        ServerFnError::new(GENERIC_FETCH_ERROR)
    })?;

    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ApiError>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("Erro {}.", status.as_u16()));
        tracing::error!(%status, %message, "scheduling API refused availability request");
        return Err(ServerFnError::new(message));
    }

    response.json::<DayAvailability>().await.map_err(|e| {
        tracing::error!("malformed availability payload: {e}");
        ServerFnError::new(GENERIC_FETCH_ERROR)
    })
}

/// One booking attempt, bound to the slot the user picked in the grid.
/// `telefone` carries the formatted national number; the image crosses the
/// wire base64-encoded because the server-function codec cannot carry a
/// browser `File`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct BookingSubmission {
    pub date: String,
    pub time: String,
    pub nome: String,
    pub telefone: String,
    pub ideia: String,
    pub tamanho: String,
    pub local: String,
    pub imagem: Option<ImageAttachment>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub data_base64: String,
}

/// A lost slot is a flow transition (back to the grid), not an error, so it
/// comes back typed instead of as a message to be string-matched.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum BookingOutcome {
    Confirmed { whatsapp_number: String },
    SlotTaken { message: String },
}

#[server]
pub async fn submit_booking(request: BookingSubmission) -> Result<BookingOutcome, ServerFnError> {
    use base64::Engine as _;
    use reqwest::multipart::{Form, Part};

    let mut form = Form::new()
        .text("date", request.date)
        .text("time", request.time)
        .text("nome", request.nome)
        .text("telefone", request.telefone)
        .text("ideia", request.ideia)
        .text("tamanho", request.tamanho)
        .text("local", request.local);

    if let Some(imagem) = request.imagem {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&imagem.data_base64)
            .map_err(|e| {
                tracing::warn!("unreadable attachment: {e}");
                ServerFnError::new("Não foi possível ler a imagem anexada.")
            })?;
        let part = Part::bytes(bytes)
            .file_name(imagem.file_name)
            .mime_str(&imagem.content_type)
            .map_err(|e| {
                tracing::warn!("unreadable attachment type: {e}");
                ServerFnError::new("Não foi possível ler a imagem anexada.")
            })?;
        form = form.part("ideia-imagem", part);
    }

    let api = crate::config::scheduling_api_url();
    let response = reqwest::Client::new()
        .post(format!("{api}/api/agendar"))
        .multipart(form)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("booking request failed: {e}");
            ServerFnError::new(
                "Ocorreu um erro inesperado ao agendar. Verifique sua conexão.",
            )
        })?;

    let status = response.status();
    if status == reqwest::StatusCode::CONFLICT {
        let message = response
            .json::<ApiError>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| "Este horário foi ocupado. Escolha outro.".to_string());
        tracing::info!(%message, "slot taken between render and submission");
        return Ok(BookingOutcome::SlotTaken { message });
    }
    if !status.is_success() {
        let message = response
            .json::<ApiError>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("Erro {}.", status.as_u16()));
        tracing::error!(%status, %message, "scheduling API refused booking");
        return Err(ServerFnError::new(message));
    }

    let confirmation = response.json::<BookingConfirmation>().await.map_err(|e| {
        tracing::error!("malformed booking confirmation: {e}");
        ServerFnError::new("Ocorreu um erro inesperado ao agendar. Verifique sua conexão.")
    })?;
    Ok(BookingOutcome::Confirmed {
        whatsapp_number: confirmation.whatsapp_number,
    })
}

/// Pulls the server-supplied message out of a failed server-function call,
/// if there is one; callers fall back to a generic connectivity text.
pub fn server_error_message(err: &ServerFnError) -> Option<String> {
    match err {
        ServerFnError::ServerError(message) => Some(message.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_message_prefers_the_server_text() {
        let err = ServerFnError::new("Horário indisponível.");
        assert_eq!(
            server_error_message(&err).as_deref(),
            Some("Horário indisponível.")
        );
    }

    #[test]
    fn transport_errors_yield_no_message() {
        let err: ServerFnError = ServerFnError::Request("connection reset".into());
        assert_eq!(server_error_message(&err), None);
    }
}
