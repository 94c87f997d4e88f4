use booking_core::{BookingStage, CalendarSession};
use chrono::{Local, NaiveDate};
use leptos::prelude::*;
use thaw::*;

use crate::components::{
    AlertModal, Alerter, BookingFormModal, CalendarModal, FeedbackCarousel, GallerySection,
    Lightbox, Navbar, PendingSlot, StatsSection,
};

/// The studio's single page. Owns the booking-flow state (stage, calendar
/// session, pending slot, alerts) and hands it to the modals.
#[component]
pub fn HomePage() -> impl IntoView {
    let stage = RwSignal::new(BookingStage::Closed);
    let session = RwSignal::new(CalendarSession::new(Local::now().date_naive()));
    let pending = RwSignal::new(None::<PendingSlot>);
    let alert = Alerter::new();
    let lightbox_image = RwSignal::new(None::<String>);

    let open_calendar = Callback::new(move |_: ()| {
        // After a failed render or a confirmed booking the session is
        // stale; bump the generation so opening re-fetches.
        if !session.with_untracked(|s| s.is_rendered()) {
            session.update(|s| s.invalidate());
        }
        stage.set(BookingStage::Grid);
    });

    let on_pick = Callback::new(move |(date, time): (NaiveDate, String)| {
        pending.set(Some(PendingSlot { date, time }));
        stage.set(BookingStage::Form);
    });

    view! {
        <Navbar on_schedule=open_calendar/>

        <section class="hero" id="inicio">
            <h1>"Lucas Martins Tattoo"</h1>
            <p class="hero-subtitle">
                "Arte na pele, do fineline ao blackwork. Estúdio privado em Joinville."
            </p>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| open_calendar.run(())
            >
                "Agendar Horário"
            </Button>
        </section>

        <GallerySection selected=lightbox_image/>
        <StatsSection/>
        <FeedbackCarousel/>

        <footer class="footer" id="contato">
            <p>"Rua das Palmeiras, 123 · Joinville/SC"</p>
            <p>"Atendimento com hora marcada, das 9h às 21h."</p>
        </footer>

        <CalendarModal stage=stage session=session on_pick=on_pick/>
        <BookingFormModal stage=stage session=session alert=alert pending=pending/>
        <Lightbox selected=lightbox_image/>
        <AlertModal alert=alert/>
    }
}
