//! Explicit view state for the calendar, instead of ambient globals: the
//! currently selected base date, whether the grid has been successfully
//! rendered, and a render generation used to discard responses from
//! superseded fetches.

use chrono::NaiveDate;

use crate::schedule::BookingWindow;

/// Where the booking flow currently is. `Submitting` is a transient UI flag
/// on top of `Form`; a confirmed booking collapses back to `Closed` with the
/// grid invalidated so the next open re-fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    Closed,
    Grid,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarSession {
    base_date: NaiveDate,
    generation: u64,
    rendered: bool,
}

impl CalendarSession {
    pub fn new(base_date: NaiveDate) -> Self {
        Self {
            base_date,
            generation: 0,
            rendered: false,
        }
    }

    pub fn base_date(&self) -> NaiveDate {
        self.base_date
    }

    pub fn window(&self) -> BookingWindow {
        BookingWindow::containing(self.base_date)
    }

    /// Identifies the render pass a fetch belongs to. Anything that changes
    /// what the grid should show bumps it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once the current window has been drawn from a successful fetch.
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Marks the current window stale so the next open re-fetches.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.rendered = false;
    }

    pub fn advance(&mut self) {
        self.base_date = self.window().advanced().start();
        self.generation += 1;
        self.rendered = false;
    }

    pub fn rewind(&mut self) {
        self.base_date = self.window().rewound().start();
        self.generation += 1;
        self.rendered = false;
    }

    /// Records the outcome of a fetch. A completion for any generation other
    /// than the current one belongs to a superseded render and is ignored.
    pub fn complete(&mut self, generation: u64, ok: bool) {
        if generation == self.generation {
            self.rendered = ok;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session() -> CalendarSession {
        CalendarSession::new(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
    }

    #[test]
    fn navigation_moves_in_three_day_steps_and_supersedes_renders() {
        let mut s = session();
        let g0 = s.generation();
        s.advance();
        assert_eq!(
            s.base_date(),
            NaiveDate::from_ymd_opt(2024, 6, 13).unwrap()
        );
        assert!(s.generation() > g0);
        s.rewind();
        assert_eq!(
            s.base_date(),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
    }

    #[test]
    fn successful_completion_marks_rendered() {
        let mut s = session();
        let gen = s.generation();
        s.complete(gen, true);
        assert!(s.is_rendered());
    }

    #[test]
    fn failed_completion_leaves_session_retryable() {
        let mut s = session();
        let gen = s.generation();
        s.complete(gen, true);
        s.invalidate();
        s.complete(s.generation(), false);
        assert!(!s.is_rendered());
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut s = session();
        let stale = s.generation();
        s.advance();
        s.complete(stale, true);
        assert!(!s.is_rendered());

        let current = s.generation();
        s.complete(current, true);
        assert!(s.is_rendered());
    }

    #[test]
    fn invalidate_forces_a_refetch_on_next_open() {
        let mut s = session();
        s.complete(s.generation(), true);
        assert!(s.is_rendered());
        s.invalidate();
        assert!(!s.is_rendered());
    }
}
