/// Deep link to WhatsApp pre-filled with the booking confirmation text the
/// studio expects from clients.
pub fn confirmation_link(number: &str, date: &str, time: &str, nome: &str) -> String {
    let text = format!("Olá! Confirmei agendamento {date} {time}. Nome {nome}.");
    format!("https://wa.me/{number}?text={}", urlencoding::encode(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_embeds_slot_and_name_url_encoded() {
        let link = confirmation_link("5547999887766", "2024-06-10", "09:30", "Ana Souza");
        assert!(link.starts_with("https://wa.me/5547999887766?text="));
        assert!(link.contains("2024-06-10%2009%3A30"));
        assert!(link.contains("Ana%20Souza"));
        assert!(!link.contains(' '));
    }
}
