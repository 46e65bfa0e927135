//! Gregorian calendar arithmetic and the (view, selection) state of a date picker.

use std::ops::RangeInclusive;

use chrono::{Datelike as _, NaiveDate};

use crate::DateInputError;

/// The `strftime` format of the text shown in the input field.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Years a date picker can show or select. Every one of them fits the `YYYY` field.
pub const YEARS: RangeInclusive<i32> = 1..=9999;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Column headers of the day grid, starting on Sunday.
pub const WEEKDAY_NAMES: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// English name of a month in `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = month.checked_sub(1)?;
    MONTH_NAMES.get(index as usize).copied()
}

/// Number of days in the given month, or 0 if `month` is not in `1..=12`
/// or the year is beyond what [`NaiveDate`] can hold.
///
/// This is the day before the first of the next month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    let next = if month == 12 {
        year.checked_add(1).map(|year| (year, 1))
    } else {
        Some((year, month + 1))
    };
    next.and_then(|(year, month)| NaiveDate::from_ymd_opt(year, month, 1))
        .and_then(|first| first.pred_opt())
        .map_or(0, |last| last.day())
}

/// Day of the week, `0` being Sunday and `6` Saturday.
pub fn weekday_of(year: i32, month: u32, day: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.weekday().num_days_from_sunday())
}

/// Formats a date the way the input field shows it: `MM/DD/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ----------------------------------------------------------------------------

/// A date the user has picked or typed.
///
/// Wraps a [`NaiveDate`], so the day is always valid for its month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectedDate(NaiveDate);

impl SelectedDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateInputError> {
        if !YEARS.contains(&year) {
            return Err(DateInputError::YearOutOfRange(year));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateInputError::ImpossibleDate { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `MM/DD/YYYY`
    pub fn formatted(&self) -> String {
        format_date(self.0)
    }
}

impl TryFrom<NaiveDate> for SelectedDate {
    type Error = DateInputError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl From<SelectedDate> for NaiveDate {
    fn from(date: SelectedDate) -> Self {
        date.0
    }
}

impl std::fmt::Display for SelectedDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

// ----------------------------------------------------------------------------

/// The month currently shown in the popover.
///
/// `month` is always in `1..=12` and `year` in [`YEARS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewCursor {
    year: i32,
    month: u32,
}

impl ViewCursor {
    pub fn new(year: i32, month: u32) -> Result<Self, DateInputError> {
        if !(1..=12).contains(&month) {
            return Err(DateInputError::MonthOutOfRange(month));
        }
        if !YEARS.contains(&year) {
            return Err(DateInputError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`, clamped into [`YEARS`].
    pub fn containing(date: NaiveDate) -> Self {
        Self::from_month_index(i64::from(date.year()) * 12 + i64::from(date.month0()))
    }

    /// Months since January of year 0.
    fn month_index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month - 1)
    }

    fn from_month_index(index: i64) -> Self {
        let first = i64::from(*YEARS.start()) * 12;
        let last = i64::from(*YEARS.end()) * 12 + 11;
        let index = index.clamp(first, last);
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or_default()
    }

    /// Moves by `delta` months, rolling the year over in both directions.
    #[must_use]
    pub fn advanced_by_months(self, delta: i32) -> Self {
        Self::from_month_index(self.month_index() + i64::from(delta))
    }

    #[must_use]
    pub fn advanced_by_years(self, delta: i32) -> Self {
        self.advanced_by_months(delta.saturating_mul(12))
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Weekday of the first of the month, which is the number of blank cells before it.
    pub fn first_weekday(&self) -> u32 {
        weekday_of(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

// ----------------------------------------------------------------------------

/// What the calendar shows and what has been selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarState {
    cursor: ViewCursor,
    selected: Option<SelectedDate>,
}

impl Default for CalendarState {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

impl CalendarState {
    /// Shows the month of `today`, with nothing selected.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            cursor: ViewCursor::containing(today),
            selected: None,
        }
    }

    pub fn cursor(&self) -> ViewCursor {
        self.cursor
    }

    pub fn selected(&self) -> Option<SelectedDate> {
        self.selected
    }

    pub fn advance_month(&mut self, delta: i32) {
        self.cursor = self.cursor.advanced_by_months(delta);
    }

    pub fn advance_year(&mut self, delta: i32) {
        self.cursor = self.cursor.advanced_by_years(delta);
    }

    /// Jump to another month of the displayed year.
    pub fn set_view_month(&mut self, month: u32) -> Result<(), DateInputError> {
        self.cursor = ViewCursor::new(self.cursor.year, month)?;
        Ok(())
    }

    pub fn set_view_year(&mut self, year: i32) -> Result<(), DateInputError> {
        self.cursor = ViewCursor::new(year, self.cursor.month)?;
        Ok(())
    }

    /// Selects `day` of the displayed month.
    pub fn set_day(&mut self, day: u32) -> Result<SelectedDate, DateInputError> {
        let ViewCursor { year, month } = self.cursor;
        let last = self.cursor.days_in_month();
        if !(1..=last).contains(&day) {
            return Err(DateInputError::DayOutOfRange {
                year,
                month,
                day,
                last,
            });
        }
        let selected = SelectedDate::new(year, month, day)?;
        self.selected = Some(selected);
        Ok(selected)
    }

    /// Selects `date` and moves the view to its month.
    pub fn select(&mut self, date: SelectedDate) {
        self.selected = Some(date);
        self.cursor = ViewCursor::containing(date.date());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn days_in_month_follows_gregorian_rules() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(9999, 12), 31);
        assert_eq!(days_in_month(2023, 0), 0);
        assert_eq!(days_in_month(2023, 13), 0);
    }

    #[test]
    fn days_in_month_of_unrepresentable_years_is_zero() {
        assert_eq!(days_in_month(i32::MAX, 12), 0);
        assert_eq!(days_in_month(i32::MAX, 1), 0);
        assert_eq!(days_in_month(i32::MIN, 12), 0);
    }

    #[test]
    fn cursor_contains_only_its_own_month() {
        let cursor = ViewCursor::new(2024, 2).unwrap();
        assert!(cursor.contains(date(2024, 2, 1)));
        assert!(cursor.contains(date(2024, 2, 29)));
        assert!(!cursor.contains(date(2024, 3, 1)));
        assert!(!cursor.contains(date(2023, 2, 15)));
    }

    #[test]
    fn days_in_month_agrees_with_chrono_over_four_centuries() {
        for year in 1800..2200 {
            for month in 1..=12 {
                let last = days_in_month(year, month);
                assert!(NaiveDate::from_ymd_opt(year, month, last).is_some());
                assert!(NaiveDate::from_ymd_opt(year, month, last + 1).is_none());
            }
        }
    }

    #[test]
    fn weekday_is_zero_based_from_sunday() {
        assert_eq!(weekday_of(2024, 1, 1), Some(1)); // Monday
        assert_eq!(weekday_of(2023, 10, 1), Some(0)); // Sunday
        assert_eq!(weekday_of(2023, 9, 30), Some(6)); // Saturday
        assert_eq!(weekday_of(2023, 2, 29), None);
    }

    #[test]
    fn month_navigation_rolls_the_year() {
        let mut state = CalendarState::new(date(2024, 1, 20));
        state.advance_month(-1);
        assert_eq!(state.cursor(), ViewCursor::new(2023, 12).unwrap());

        let mut state = CalendarState::new(date(2024, 12, 3));
        state.advance_month(1);
        assert_eq!(state.cursor(), ViewCursor::new(2025, 1).unwrap());

        state.advance_month(-25);
        assert_eq!(state.cursor(), ViewCursor::new(2022, 12).unwrap());
    }

    #[test]
    fn year_navigation_keeps_the_month() {
        let mut state = CalendarState::new(date(2024, 2, 29));
        state.advance_year(1);
        assert_eq!(state.cursor(), ViewCursor::new(2025, 2).unwrap());
        state.advance_year(-10);
        assert_eq!(state.cursor(), ViewCursor::new(2015, 2).unwrap());
    }

    #[test]
    fn navigation_stops_at_the_supported_years() {
        let mut state = CalendarState::new(date(9999, 11, 1));
        state.advance_month(5);
        assert_eq!(state.cursor(), ViewCursor::new(9999, 12).unwrap());

        let mut state = CalendarState::new(date(1, 2, 1));
        state.advance_year(-3);
        assert_eq!(state.cursor(), ViewCursor::new(1, 1).unwrap());
    }

    #[test]
    fn set_day_selects_in_the_displayed_month() {
        let mut state = CalendarState::new(date(2024, 3, 9));
        state.advance_month(-1);
        let selected = state.set_day(15).unwrap();
        assert_eq!(selected.formatted(), "02/15/2024");
        assert_eq!(state.selected(), Some(selected));
    }

    #[test]
    fn set_day_rejects_days_the_month_does_not_have() {
        let mut state = CalendarState::new(date(2023, 2, 1));
        assert_eq!(
            state.set_day(29),
            Err(DateInputError::DayOutOfRange {
                year: 2023,
                month: 2,
                day: 29,
                last: 28,
            })
        );
        assert!(state.set_day(0).is_err());
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn view_setters_validate() {
        let mut state = CalendarState::new(date(2024, 5, 5));
        assert_eq!(state.set_view_month(13), Err(DateInputError::MonthOutOfRange(13)));
        assert_eq!(state.set_view_year(0), Err(DateInputError::YearOutOfRange(0)));
        state.set_view_month(8).unwrap();
        state.set_view_year(1999).unwrap();
        assert_eq!(state.cursor(), ViewCursor::new(1999, 8).unwrap());
    }

    #[test]
    fn select_moves_the_view() {
        let mut state = CalendarState::new(date(2024, 5, 5));
        state.select(SelectedDate::new(2020, 2, 29).unwrap());
        assert_eq!(state.cursor(), ViewCursor::new(2020, 2).unwrap());
        state.clear_selection();
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn formatting_pads_every_field() {
        let selected = SelectedDate::new(987, 3, 4).unwrap();
        assert_eq!(selected.to_string(), "03/04/0987");
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(0), None);
    }
}
