use leptos::prelude::*;

static GALLERY: [(&str, &str); 6] = [
    ("/images/galeria-01.svg", "Fineline floral no antebraço"),
    ("/images/galeria-02.svg", "Leão realista no peito"),
    ("/images/galeria-03.svg", "Mandala pontilhismo"),
    ("/images/galeria-04.svg", "Lettering gótico"),
    ("/images/galeria-05.svg", "Fechamento blackwork"),
    ("/images/galeria-06.svg", "Retrato em preto e cinza"),
];

#[component]
pub fn GallerySection(selected: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <section class="gallery" id="galeria">
            <h2>"Trabalhos recentes"</h2>
            <div class="gallery-grid">
                {GALLERY
                    .iter()
                    .map(|(src, alt)| {
                        let src = *src;
                        view! {
                            <button
                                class="gallery-item"
                                on:click=move |_| selected.set(Some(src.to_string()))
                            >
                                <img src=src alt=*alt loading="lazy"/>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

/// Full-screen view of a gallery image; closes on the button or a click
/// outside the image.
#[component]
pub fn Lightbox(selected: RwSignal<Option<String>>) -> impl IntoView {
    let close = move |_| selected.set(None);

    view! {
        <div
            class=move || {
                if selected.get().is_some() { "lightbox active" } else { "lightbox" }
            }
            on:click=close
        >
            <button class="lightbox-close" aria-label="Fechar" on:click=close>
                "✕"
            </button>
            <div class="lightbox-content" on:click=move |ev| ev.stop_propagation()>
                {move || {
                    selected
                        .get()
                        .map(|src| view! { <img src=src alt="Tatuagem em destaque"/> })
                }}
            </div>
        </div>
    }
}
