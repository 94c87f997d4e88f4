//! Domain logic for the studio's appointment booking: the rolling 3-day
//! window, slot classification, phone handling and the calendar view state.
//! Everything here is presentation-free so it can be exercised without a
//! browser or a live page.

pub mod phone;
pub mod schedule;
pub mod session;

pub use schedule::{
    build_grid, iso_date, long_date_pt, parse_base_date, weekday_label_pt, BookingWindow,
    DayAvailability, ScheduleError, SlotCell, SlotRow, SlotStatus, WorkHours, SLOT_MINUTES,
    WINDOW_DAYS,
};
pub use session::{BookingStage, CalendarSession};
