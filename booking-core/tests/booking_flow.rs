use booking_core::{
    build_grid, BookingWindow, CalendarSession, DayAvailability, SlotStatus, WorkHours,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn avail(labels: &[&str]) -> DayAvailability {
    labels.iter().map(|s| s.to_string()).collect()
}

#[test]
fn window_is_anchored_at_midnight_whatever_the_time_of_day() {
    // The base arrives as a full instant; only its calendar date matters.
    let late_evening = date(2024, 6, 10).and_hms_opt(23, 55, 1).unwrap();
    let w = BookingWindow::containing(late_evening.date());
    assert_eq!(w.start(), date(2024, 6, 10));
    assert_eq!(w.end(), date(2024, 6, 13));
    assert_eq!(
        w.days(),
        [date(2024, 6, 10), date(2024, 6, 11), date(2024, 6, 12)]
    );
}

#[test]
fn monday_scenario_yields_exactly_two_bookable_cells() {
    // Base 2024-06-10 (Monday); the server opens two Monday slots and
    // nothing on Tuesday/Wednesday. Evaluated before opening hours.
    let session = CalendarSession::new(date(2024, 6, 10));
    let now = date(2024, 6, 10).and_hms_opt(8, 0, 0).unwrap();
    let days = [
        avail(&["09:00", "09:30"]),
        DayAvailability::default(),
        DayAvailability::default(),
    ];

    let grid = build_grid(session.window(), WorkHours::default(), &days, now);

    let cells: Vec<_> = grid.iter().flat_map(|row| row.cells.iter()).collect();
    assert_eq!(cells.len(), 24 * 3);

    let bookable: Vec<_> = cells
        .iter()
        .filter(|c| c.status == SlotStatus::Bookable)
        .collect();
    assert_eq!(bookable.len(), 2);
    assert!(bookable
        .iter()
        .all(|c| c.date == date(2024, 6, 10) && (c.label == "09:00" || c.label == "09:30")));

    // Nothing is past at 08:00 on the first day, so everything else is
    // unavailable.
    assert!(cells
        .iter()
        .filter(|c| c.status != SlotStatus::Bookable)
        .all(|c| c.status == SlotStatus::Unavailable));
}

#[test]
fn statuses_are_mutually_exclusive_and_exhaustive() {
    let session = CalendarSession::new(date(2024, 6, 10));
    let now = date(2024, 6, 11).and_hms_opt(14, 7, 30).unwrap();
    let days = [
        avail(&["10:00", "15:00"]),
        avail(&["09:00", "14:00", "18:30"]),
        avail(&[]),
    ];

    let grid = build_grid(session.window(), WorkHours::default(), &days, now);

    // Half-hour labels sort lexicographically, so comparing against the
    // evaluation minute is enough to pin down the past boundary.
    for cell in grid.iter().flat_map(|r| r.cells.iter()) {
        let in_the_past = cell.date < now.date()
            || (cell.date == now.date() && cell.label.as_str() <= "14:07");
        assert_eq!(cell.status == SlotStatus::Past, in_the_past);
    }

    // The 14:00 slot on the evaluation day started 7 minutes ago: past wins
    // over its presence in the availability set.
    let day_two: Vec<_> = grid
        .iter()
        .flat_map(|r| r.cells.iter())
        .filter(|c| c.date == date(2024, 6, 11))
        .collect();
    let at_1400 = day_two.iter().find(|c| c.label == "14:00").unwrap();
    assert_eq!(at_1400.status, SlotStatus::Past);
    let at_1430 = day_two.iter().find(|c| c.label == "14:30").unwrap();
    assert_eq!(at_1430.status, SlotStatus::Unavailable);
    let at_1830 = day_two.iter().find(|c| c.label == "18:30").unwrap();
    assert_eq!(at_1830.status, SlotStatus::Bookable);
}

#[test]
fn conflict_recovery_refetches_the_same_window() {
    // A 409 on submission invalidates the session: same window, new
    // generation, so the grid re-fetches instead of reusing its snapshot.
    let mut session = CalendarSession::new(date(2024, 6, 10));
    session.complete(session.generation(), true);
    assert!(session.is_rendered());

    let before = session.generation();
    session.invalidate();
    assert_eq!(session.base_date(), date(2024, 6, 10));
    assert!(session.generation() > before);
    assert!(!session.is_rendered());
}

#[test]
fn failed_fetch_leaves_no_rendered_state_behind() {
    // One of the 3 availability requests failing aborts the whole render;
    // the session stays retryable and a later success lands normally.
    let mut session = CalendarSession::new(date(2024, 6, 10));
    let gen = session.generation();
    session.complete(gen, false);
    assert!(!session.is_rendered());

    session.invalidate();
    session.complete(session.generation(), true);
    assert!(session.is_rendered());
}
