use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slot granularity. The scheduling API only deals in half-hour slots.
pub const SLOT_MINUTES: u32 = 30;

/// The calendar always shows a rolling window of 3 consecutive days.
pub const WINDOW_DAYS: i64 = 3;

const MONTHS_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid base date: {0}")]
    InvalidBaseDate(String),
}

/// Parses a `YYYY-MM-DD` base date coming from an untrusted boundary.
pub fn parse_base_date(raw: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidBaseDate(raw.to_string()))
}

/// Working hours as a half-open interval of hours of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 21,
        }
    }
}

impl WorkHours {
    /// All half-hour labels from the start hour (inclusive) to the end hour
    /// (exclusive), e.g. `09:00`, `09:30`, ..., `20:30`.
    pub fn time_labels(&self) -> Vec<String> {
        self.slots().map(|(h, m)| format_label(h, m)).collect()
    }

    fn slots(&self) -> impl Iterator<Item = (u32, u32)> {
        let end = self.end_hour.min(24);
        (self.start_hour..end).flat_map(|h| [(h, 0), (h, SLOT_MINUTES)])
    }
}

fn format_label(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

/// Formats a date the way the scheduling API expects it.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Long pt-BR form used in the booking form header, e.g. `10 de Junho de 2024`.
pub fn long_date_pt(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS_PT[date.month0() as usize],
        date.year()
    )
}

/// Abbreviated pt-BR weekday used in the grid header, e.g. `SEG`.
pub fn weekday_label_pt(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "SEG",
        Weekday::Tue => "TER",
        Weekday::Wed => "QUA",
        Weekday::Thu => "QUI",
        Weekday::Fri => "SEX",
        Weekday::Sat => "SÁB",
        Weekday::Sun => "DOM",
    }
}

/// The 3-day span currently displayed, anchored at the base date's midnight.
/// Using `NaiveDate` makes the midnight normalization structural: whatever
/// time-of-day the caller started from cannot leak into the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    start: NaiveDate,
}

impl BookingWindow {
    pub fn containing(base: NaiveDate) -> Self {
        Self { start: base }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive end of the window.
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(WINDOW_DAYS)
    }

    /// The 3 days covered, in order.
    pub fn days(&self) -> [NaiveDate; WINDOW_DAYS as usize] {
        [
            self.start,
            self.start + Duration::days(1),
            self.start + Duration::days(2),
        ]
    }

    pub fn advanced(&self) -> Self {
        Self {
            start: self.start + Duration::days(WINDOW_DAYS),
        }
    }

    pub fn rewound(&self) -> Self {
        Self {
            start: self.start - Duration::days(WINDOW_DAYS),
        }
    }

    /// Backwards navigation is disabled once the window starts on-or-before
    /// today, so the user cannot page into the past.
    pub fn rewind_disabled(&self, today: NaiveDate) -> bool {
        self.start <= today
    }

    /// Header label in pt-BR, with the cross-month form when the window
    /// spans two months.
    pub fn header_label(&self) -> String {
        let last = self.start + Duration::days(WINDOW_DAYS - 1);
        let start_month = MONTHS_PT[self.start.month0() as usize];
        let end_month = MONTHS_PT[last.month0() as usize];
        if self.start.month() == last.month() {
            format!("De {} a {} de {}", self.start.day(), last.day(), start_month)
        } else {
            format!(
                "De {} de {} a {} de {}",
                self.start.day(),
                start_month,
                last.day(),
                end_month
            )
        }
    }
}

/// The set of time labels the server currently reports open for one date.
/// On the wire this is the scheduling API's bare label array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayAvailability {
    open: BTreeSet<String>,
}

impl DayAvailability {
    pub fn allows(&self, label: &str) -> bool {
        self.open.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

impl FromIterator<String> for DayAvailability {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            open: iter.into_iter().collect(),
        }
    }
}

/// Exactly one of these applies to every rendered cell; `Past` takes
/// precedence over `Unavailable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Bookable,
    Unavailable,
    Past,
}

impl SlotStatus {
    pub fn is_bookable(&self) -> bool {
        matches!(self, SlotStatus::Bookable)
    }
}

fn classify(
    slot_start: NaiveDateTime,
    label: &str,
    availability: &DayAvailability,
    now: NaiveDateTime,
) -> SlotStatus {
    // A slot starting at the current minute already counts as past,
    // whatever the seconds say.
    let now_minute = now
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);
    if slot_start <= now_minute {
        SlotStatus::Past
    } else if !availability.allows(label) {
        SlotStatus::Unavailable
    } else {
        SlotStatus::Bookable
    }
}

/// One rendered cell: a date, a time label and its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCell {
    pub date: NaiveDate,
    pub label: String,
    pub status: SlotStatus,
}

/// One grid row: a time label and its cell per day of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub label: String,
    pub cells: Vec<SlotCell>,
}

/// Builds the full grid model for a window. `now` is captured once by the
/// caller so every past/future decision in a render pass agrees.
pub fn build_grid(
    window: BookingWindow,
    hours: WorkHours,
    availability: &[DayAvailability],
    now: NaiveDateTime,
) -> Vec<SlotRow> {
    let days = window.days();
    hours
        .slots()
        .map(|(h, m)| {
            let label = format_label(h, m);
            let cells = days
                .iter()
                .enumerate()
                .map(|(i, &date)| {
                    let empty = DayAvailability::default();
                    let open = availability.get(i).unwrap_or(&empty);
                    let status = match date.and_hms_opt(h, m, 0) {
                        Some(slot_start) => classify(slot_start, &label, open, now),
                        None => SlotStatus::Unavailable,
                    };
                    SlotCell {
                        date,
                        label: label.clone(),
                        status,
                    }
                })
                .collect();
            SlotRow { label, cells }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn time_labels_cover_half_hours_end_exclusive() {
        let labels = WorkHours {
            start_hour: 9,
            end_hour: 11,
        }
        .time_labels();
        assert_eq!(labels, vec!["09:00", "09:30", "10:00", "10:30"]);
    }

    #[test]
    fn default_work_hours_yield_24_slots() {
        assert_eq!(WorkHours::default().time_labels().len(), 24);
    }

    #[test]
    fn window_spans_three_days_from_midnight() {
        let w = BookingWindow::containing(date(2024, 6, 10));
        assert_eq!(
            w.days(),
            [date(2024, 6, 10), date(2024, 6, 11), date(2024, 6, 12)]
        );
        assert_eq!(w.end(), date(2024, 6, 13));
    }

    #[test]
    fn header_label_same_month() {
        let w = BookingWindow::containing(date(2024, 6, 10));
        assert_eq!(w.header_label(), "De 10 a 12 de Junho");
    }

    #[test]
    fn header_label_cross_month() {
        let w = BookingWindow::containing(date(2024, 6, 30));
        assert_eq!(w.header_label(), "De 30 de Junho a 2 de Julho");
    }

    #[test]
    fn rewind_disabled_when_window_starts_today_or_earlier() {
        let today = date(2024, 6, 10);
        assert!(BookingWindow::containing(today).rewind_disabled(today));
        assert!(BookingWindow::containing(date(2024, 6, 9)).rewind_disabled(today));
        assert!(!BookingWindow::containing(date(2024, 6, 11)).rewind_disabled(today));
    }

    #[test]
    fn slot_at_current_minute_is_past() {
        let avail: DayAvailability = ["09:00".to_string()].into_iter().collect();
        let now = date(2024, 6, 10).and_hms_opt(9, 0, 0).unwrap();
        let slot = date(2024, 6, 10).and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(classify(slot, "09:00", &avail, now), SlotStatus::Past);
    }

    #[test]
    fn slot_later_today_is_not_past() {
        let avail: DayAvailability = ["09:30".to_string()].into_iter().collect();
        let now = date(2024, 6, 10).and_hms_opt(9, 15, 59).unwrap();
        let slot = date(2024, 6, 10).and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(classify(slot, "09:30", &avail, now), SlotStatus::Bookable);
    }

    #[test]
    fn past_takes_precedence_over_unavailable() {
        let avail = DayAvailability::default();
        let now = date(2024, 6, 10).and_hms_opt(12, 0, 0).unwrap();
        let slot = date(2024, 6, 10).and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(classify(slot, "09:00", &avail, now), SlotStatus::Past);
    }

    #[test]
    fn future_slot_missing_from_availability_is_unavailable() {
        let avail: DayAvailability = ["10:00".to_string()].into_iter().collect();
        let now = date(2024, 6, 10).and_hms_opt(8, 0, 0).unwrap();
        let slot = date(2024, 6, 10).and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(classify(slot, "09:30", &avail, now), SlotStatus::Unavailable);
    }

    #[test]
    fn day_availability_maps_to_the_bare_label_array() {
        let avail: DayAvailability =
            serde_json::from_str(r#"["09:30", "09:00", "14:00"]"#).unwrap();
        assert!(avail.allows("09:00"));
        assert!(!avail.allows("10:00"));
        // Serializes back as the same bare array, deduplicated and ordered.
        assert_eq!(
            serde_json::to_string(&avail).unwrap(),
            r#"["09:00","09:30","14:00"]"#
        );
    }

    #[test]
    fn parse_base_date_rejects_garbage() {
        assert!(parse_base_date("not-a-date").is_err());
        assert!(parse_base_date("2024-13-01").is_err());
        assert_eq!(parse_base_date("2024-06-10").unwrap(), date(2024, 6, 10));
    }

    #[test]
    fn long_date_is_capitalized_pt_br() {
        assert_eq!(long_date_pt(date(2024, 6, 10)), "10 de Junho de 2024");
    }

    #[test]
    fn weekday_labels() {
        assert_eq!(weekday_label_pt(date(2024, 6, 10)), "SEG");
        assert_eq!(weekday_label_pt(date(2024, 6, 15)), "SÁB");
        assert_eq!(weekday_label_pt(date(2024, 6, 16)), "DOM");
    }
}
