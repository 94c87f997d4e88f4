pub mod alert_modal;
pub mod booking_form_modal;
pub mod calendar_modal;
pub mod error;
pub mod feedback_carousel;
pub mod lightbox;
pub mod loading;
pub mod navbar;
pub mod stats;

// Re-export commonly used types
pub use alert_modal::{AlertModal, Alerter};
pub use booking_form_modal::{BookingFormModal, PendingSlot};
pub use calendar_modal::CalendarModal;
pub use error::ErrorView;
pub use feedback_carousel::FeedbackCarousel;
pub use lightbox::{GallerySection, Lightbox};
pub use loading::LoadingView;
pub use navbar::Navbar;
pub use stats::StatsSection;
