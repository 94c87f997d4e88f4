use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

#[component]
pub fn ErrorView(#[prop(optional, into)] message: Option<String>) -> impl IntoView {
    view! {
        <MessageBar intent=MessageBarIntent::Error>
            {message.unwrap_or_else(|| "Ocorreu um erro. Tente novamente.".to_string())}
        </MessageBar>
    }
}
