use leptos::prelude::*;

/// Fixed site header with the mobile hamburger menu. Links are plain
/// anchors into the page sections; clicking any of them closes the menu.
#[component]
pub fn Navbar(on_schedule: Callback<()>) -> impl IntoView {
    let menu_open = RwSignal::new(false);
    let close_menu = move |_| menu_open.set(false);

    view! {
        <header class="header">
            <div class="header__container">
                <a href="#inicio" class="header__logo">"Lucas Martins Tattoo"</a>

                <nav class="header__links">
                    <a href="#inicio">"Início"</a>
                    <a href="#galeria">"Galeria"</a>
                    <a href="#sobre">"Sobre"</a>
                    <a href="#feedbacks">"Feedbacks"</a>
                    <a href="#contato">"Contato"</a>
                    <button
                        class="header__cta"
                        on:click=move |_| on_schedule.run(())
                    >
                        "Agendar"
                    </button>
                </nav>

                <button
                    class="hamburger-menu"
                    aria-label="Abrir menu"
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { "✕" } else { "☰" }}
                </button>
            </div>

            <nav class=move || {
                if menu_open.get() { "mobile-menu active" } else { "mobile-menu" }
            }>
                <a href="#inicio" on:click=close_menu>"Início"</a>
                <a href="#galeria" on:click=close_menu>"Galeria"</a>
                <a href="#sobre" on:click=close_menu>"Sobre"</a>
                <a href="#feedbacks" on:click=close_menu>"Feedbacks"</a>
                <a href="#contato" on:click=close_menu>"Contato"</a>
            </nav>
            <div
                class=move || {
                    if menu_open.get() { "menu-overlay active" } else { "menu-overlay" }
                }
                on:click=close_menu
            ></div>
        </header>
    }
}
