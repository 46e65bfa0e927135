/// Everything that can go wrong when turning user input into a date.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DateInputError {
    /// The text does not have the `MM/DD/YYYY` shape.
    #[error("expected a date formatted as MM/DD/YYYY, got {0:?}")]
    MalformedInput(String),

    /// The text has the right shape but names a day that does not exist, like `02/30/2023`.
    #[error("{month:02}/{day:02}/{year:04} is not a date in the Gregorian calendar")]
    ImpossibleDate { year: i32, month: u32, day: u32 },

    #[error("day {day} is out of range for {year:04}-{month:02} (1..={last})")]
    DayOutOfRange {
        year: i32,
        month: u32,
        day: u32,
        last: u32,
    },

    #[error("month {0} is out of range (1..=12)")]
    MonthOutOfRange(u32),

    #[error("year {0} is out of range (1..=9999)")]
    YearOutOfRange(i32),

    /// Failed to read [`crate::DatePickerProps`] from RON.
    #[error("invalid date picker properties: {0}")]
    Props(String),
}
