use leptos::prelude::*;

struct Feedback {
    user: &'static str,
    stars: usize,
    text: &'static str,
}

static FEEDBACKS: [Feedback; 5] = [
    Feedback {
        user: "@mari.tavares",
        stars: 5,
        text: "O Lucas transformou minha ideia em uma arte única. Traço perfeito!",
    },
    Feedback {
        user: "@joaopedro.ink",
        stars: 5,
        text: "Traço firme, sombreamento top e estúdio super profissional.",
    },
    Feedback {
        user: "@carla_fs",
        stars: 5,
        text: "Já tinha tatuagem, mas nenhuma com a vibe e a qualidade do Lucas.",
    },
    Feedback {
        user: "@rafael.mota",
        stars: 4,
        text: "Atendimento excelente e cicatrização impecável. Recomendo muito.",
    },
    Feedback {
        user: "@bea.santana",
        stars: 5,
        text: "Fechei o braço inteiro com ele. Cada sessão melhor que a outra.",
    },
];

const VISIBLE_CARDS: usize = 3;

/// Circular testimonial carousel: the window of visible cards wraps around
/// the fixed list instead of cloning cards at the edges.
#[component]
pub fn FeedbackCarousel() -> impl IntoView {
    let start = RwSignal::new(0usize);

    let next = move |_| start.update(|i| *i = (*i + 1) % FEEDBACKS.len());
    let prev = move |_| start.update(|i| *i = (*i + FEEDBACKS.len() - 1) % FEEDBACKS.len());

    view! {
        <section class="feedbacks" id="feedbacks">
            <h2>"O que dizem os clientes"</h2>
            <div class="carousel">
                <button class="carousel-button prev-button" aria-label="Anterior" on:click=prev>
                    "‹"
                </button>
                <div class="carousel-track">
                    {move || {
                        (0..VISIBLE_CARDS)
                            .map(|offset| {
                                let feedback =
                                    &FEEDBACKS[(start.get() + offset) % FEEDBACKS.len()];
                                let stars = "★".repeat(feedback.stars)
                                    + &"☆".repeat(5 - feedback.stars);
                                view! {
                                    <div class="feedback-card">
                                        <p class="feedback-username">{feedback.user}</p>
                                        <div class="feedback-stars">{stars}</div>
                                        <p class="feedback-text">"\"" {feedback.text} "\""</p>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
                <button class="carousel-button next-button" aria-label="Próximo" on:click=next>
                    "›"
                </button>
            </div>
        </section>
    }
}
