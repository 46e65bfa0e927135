//! What a date picker looks like, as plain data.
//!
//! [`DatePickerView::build`] has no side effects; the egui widget paints whatever it returns.

use std::ops::RangeInclusive;

use chrono::{Datelike as _, NaiveDate};

use crate::{
    DatePickerState, SelectedDate, ViewCursor, YEARS,
    calendar::{WEEKDAY_NAMES, days_in_month},
};

/// Shown in the empty text field.
pub const PLACEHOLDER: &str = "MM/DD/YYYY";

/// One cell of the day grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayCell {
    /// Padding before the first or after the last day of the month.
    Blank,

    Day {
        day: u32,
        selected: bool,
        today: bool,
        weekend: bool,
    },
}

impl DayCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            Self::Blank => None,
            Self::Day { day, .. } => Some(*day),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputView {
    pub text: String,
    pub placeholder: &'static str,
    pub valid: bool,
}

/// The popover contents: month/year selectors and the day grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelView {
    pub cursor: ViewCursor,

    /// Choices of the year dropdown.
    pub years: RangeInclusive<i32>,

    pub weekdays: [&'static str; 7],

    /// Row-major, seven per row, a multiple of seven in total.
    pub cells: Vec<DayCell>,
}

impl PanelView {
    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell> {
        self.cells.chunks(7)
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| **cell == DayCell::Blank)
            .count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatePickerView {
    pub input: InputView,

    /// Whether the trigger button shows as pressed.
    pub trigger_open: bool,

    /// Only present while the popover is visible.
    pub panel: Option<PanelView>,
}

impl DatePickerView {
    /// `year_window` is how many years before and after `today` the year dropdown offers.
    pub fn build(state: &DatePickerState, today: NaiveDate, year_window: i32) -> Self {
        let visible = state.is_popover_visible();
        let panel = visible.then(|| {
            let cursor = state.calendar().cursor();
            PanelView {
                cursor,
                years: year_options(today, year_window, cursor.year()),
                weekdays: WEEKDAY_NAMES,
                cells: day_cells(cursor, state.selected(), today),
            }
        });

        Self {
            input: InputView {
                text: state.text().to_owned(),
                placeholder: PLACEHOLDER,
                valid: state.is_field_valid(),
            },
            trigger_open: visible,
            panel,
        }
    }
}

/// `window` years around today, always including `cursor_year`, never leaving [`YEARS`].
pub fn year_options(today: NaiveDate, window: i32, cursor_year: i32) -> RangeInclusive<i32> {
    let window = window.max(0);
    let start = today.year().saturating_sub(window).min(cursor_year);
    let end = today.year().saturating_add(window).max(cursor_year);
    start.max(*YEARS.start())..=end.min(*YEARS.end())
}

/// The grid of a month, starting on Sunday, padded with blanks to whole weeks.
pub fn day_cells(
    cursor: ViewCursor,
    selected: Option<SelectedDate>,
    today: NaiveDate,
) -> Vec<DayCell> {
    let leading = cursor.first_weekday();
    let days = days_in_month(cursor.year(), cursor.month());
    let total = (leading + days).div_ceil(7) * 7;

    let mut cells = Vec::with_capacity(total as usize);
    cells.extend((0..leading).map(|_| DayCell::Blank));
    let selected_day = selected
        .filter(|selected| cursor.contains(selected.date()))
        .map(|selected| selected.day());
    let today_day = cursor.contains(today).then(|| today.day());
    for day in 1..=days {
        let weekday = (leading + day - 1) % 7;
        cells.push(DayCell::Day {
            day,
            selected: selected_day == Some(day),
            today: today_day == Some(day),
            weekend: weekday == 0 || weekday == 6,
        });
    }
    cells.resize(total as usize, DayCell::Blank);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn cursor(year: i32, month: u32) -> ViewCursor {
        ViewCursor::new(year, month).unwrap()
    }

    #[test]
    fn month_starting_on_wednesday_has_three_leading_blanks() {
        // 2023-11-01 is a Wednesday.
        let cells = day_cells(cursor(2023, 11), None, date(2000, 1, 1));
        assert_eq!(&cells[..3], &[DayCell::Blank; 3]);
        assert_eq!(cells[3].day(), Some(1));
        assert_eq!(cells.len() % 7, 0);
        assert_eq!(cells.len(), 35);
        assert_eq!(cells.iter().filter_map(DayCell::day).count(), 30);
        assert_eq!(cells.last(), Some(&DayCell::Blank));
    }

    #[test]
    fn month_filling_exact_weeks_has_no_padding() {
        // February 2015 starts on a Sunday and has 28 days.
        let cells = day_cells(cursor(2015, 2), None, date(2000, 1, 1));
        assert_eq!(cells.len(), 28);
        assert!(cells.iter().all(|cell| *cell != DayCell::Blank));
    }

    #[test]
    fn cells_know_selection_today_and_weekends() {
        let selected = SelectedDate::new(2024, 1, 15).ok();
        let cells = day_cells(cursor(2024, 1), selected, date(2024, 1, 20));

        let flags = |day: u32| {
            cells
                .iter()
                .find(|cell| cell.day() == Some(day))
                .copied()
                .unwrap()
        };
        assert_eq!(
            flags(15),
            DayCell::Day {
                day: 15,
                selected: true,
                today: false,
                weekend: false
            }
        );
        assert_eq!(
            flags(20),
            DayCell::Day {
                day: 20,
                selected: false,
                today: true,
                weekend: true
            }
        );
        assert!(matches!(flags(21), DayCell::Day { weekend: true, .. }));
        assert!(matches!(flags(22), DayCell::Day { weekend: false, .. }));
    }

    #[test]
    fn selection_in_another_month_is_not_highlighted() {
        let selected = SelectedDate::new(2024, 2, 15).ok();
        let cells = day_cells(cursor(2024, 1), selected, date(2024, 1, 20));
        assert!(!cells
            .iter()
            .any(|cell| matches!(cell, DayCell::Day { selected: true, .. })));
    }

    #[test]
    fn year_options_cover_the_window_and_the_cursor() {
        let today = date(2024, 6, 1);
        assert_eq!(year_options(today, 500, 2024), 1524..=2524);
        assert_eq!(year_options(today, 10, 1900), 1900..=2034);
        assert_eq!(year_options(today, 10, 2100), 2014..=2100);
        assert_eq!(year_options(today, 5000, 2024), 1..=7024);
        assert_eq!(year_options(today, 10_000, 2024), 1..=9999);
    }

    #[test]
    fn panel_only_exists_while_open() {
        let today = date(2024, 5, 10);
        let mut state = DatePickerState::new(today);
        *state.text_mut() = "nope".to_owned();
        state.commit_text();

        let view = DatePickerView::build(&state, today, 500);
        assert_eq!(view.panel, None);
        assert!(!view.trigger_open);
        assert_eq!(view.input.text, "nope");
        assert!(!view.input.valid);
        assert_eq!(view.input.placeholder, "MM/DD/YYYY");

        state.toggle_popover();
        let view = DatePickerView::build(&state, today, 500);
        let panel = view.panel.unwrap();
        assert_eq!(panel.cursor, cursor(2024, 5));
        assert_eq!(panel.weekdays[0], "Su");
        // May 2024 starts on a Wednesday.
        assert_eq!(panel.leading_blanks(), 3);
        assert_eq!(panel.weeks().count(), 5);
    }
}
