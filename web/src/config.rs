use booking_core::WorkHours;

/// Studio opening hours; slots are generated in half-hour steps inside this
/// half-open interval.
pub const WORK_HOURS: WorkHours = WorkHours {
    start_hour: 9,
    end_hour: 21,
};

/// Base origin of the remote scheduling API. Overridable per environment.
#[cfg(feature = "ssr")]
pub fn scheduling_api_url() -> String {
    std::env::var("SCHEDULING_API_URL")
        .unwrap_or_else(|_| "https://calendar-production.vercel.app".to_string())
}
