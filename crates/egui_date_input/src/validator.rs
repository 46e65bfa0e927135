use std::sync::LazyLock;

use chrono::{NaiveDate, TimeDelta};
use regex::Regex;

use crate::{DateInputError, SelectedDate};

/// Two digits, slash, two digits, slash, four digits. Nothing before or after.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").expect("DATE_PATTERN is a valid regex")
});

/// What to do with typed text that has the right shape but names a day that does not exist,
/// like `02/30/2024`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum DateOverflow {
    /// Treat it as invalid input.
    #[default]
    Reject,

    /// Roll over into the following days and months, so `02/30/2024` becomes `03/01/2024`.
    Roll,
}

/// The numbers of a `MM/DD/YYYY` string, not yet checked against the calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypedDate {
    pub month: u32,
    pub day: u32,
    pub year: i32,
}

impl TypedDate {
    /// The date, if it exists.
    pub fn to_date(&self) -> Result<SelectedDate, DateInputError> {
        SelectedDate::new(self.year, self.month, self.day)
    }

    /// Counts months from January and days from the first of the month, so out-of-range
    /// fields spill into their neighbors: `02/30/2024` is March 1st, `13/01/2024` is
    /// January 1st 2025 and `03/00/2024` is February 29th.
    pub fn to_date_lenient(&self) -> Result<SelectedDate, DateInputError> {
        let month_index = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let impossible = DateInputError::ImpossibleDate {
            year: self.year,
            month: self.month,
            day: self.day,
        };
        let year = i32::try_from(month_index.div_euclid(12)).map_err(|_err| impossible.clone())?;
        let first = NaiveDate::from_ymd_opt(year, month_index.rem_euclid(12) as u32 + 1, 1)
            .ok_or_else(|| impossible.clone())?;
        let date = first
            .checked_add_signed(TimeDelta::days(i64::from(self.day) - 1))
            .ok_or(impossible)?;
        SelectedDate::try_from(date)
    }

    pub fn resolve(&self, overflow: DateOverflow) -> Result<SelectedDate, DateInputError> {
        match overflow {
            DateOverflow::Reject => self.to_date(),
            DateOverflow::Roll => self.to_date_lenient(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
    Valid(TypedDate),
    Invalid,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Checks typed text against the `MM/DD/YYYY` shape.
///
/// This is a purely syntactic check: `02/30/2024` is valid here.
/// Use [`TypedDate::resolve`] to turn it into a date.
pub struct InputValidator;

impl InputValidator {
    pub fn validate(text: &str) -> Validation {
        let Some(captures) = DATE_PATTERN.captures(text.trim()) else {
            return Validation::Invalid;
        };
        let field = |i: usize| captures.get(i).map(|m| m.as_str()).unwrap_or_default();
        match (
            field(1).parse::<u32>(),
            field(2).parse::<u32>(),
            field(3).parse::<i32>(),
        ) {
            (Ok(month), Ok(day), Ok(year)) => Validation::Valid(TypedDate { month, day, year }),
            _ => Validation::Invalid,
        }
    }

    /// Validates and resolves in one go.
    pub fn parse(text: &str, overflow: DateOverflow) -> Result<SelectedDate, DateInputError> {
        match Self::validate(text) {
            Validation::Valid(typed) => typed.resolve(overflow),
            Validation::Invalid => Err(DateInputError::MalformedInput(text.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TypedDate {
        match InputValidator::validate(text) {
            Validation::Valid(typed) => typed,
            Validation::Invalid => panic!("{text:?} should be valid"),
        }
    }

    #[test]
    fn accepts_exactly_two_two_four_digits() {
        assert_eq!(
            typed("12/25/2023"),
            TypedDate {
                month: 12,
                day: 25,
                year: 2023
            }
        );
        assert!(InputValidator::validate("  01/02/2003 ").is_valid());

        for text in [
            "2/3/2024",
            "02/03/24",
            "02-03-2024",
            "02/03/20245",
            "x02/03/2024",
            "02/03/2024x",
            "",
            "02/ 3/2024",
            "٠٢/٠٣/٢٠٢٤",
        ] {
            assert_eq!(InputValidator::validate(text), Validation::Invalid, "{text:?}");
        }
    }

    #[test]
    fn february_30th_has_the_right_shape() {
        let feb30 = typed("02/30/2024");
        assert_eq!(feb30.to_date_lenient().unwrap().formatted(), "03/01/2024");
        assert_eq!(
            feb30.to_date(),
            Err(DateInputError::ImpossibleDate {
                year: 2024,
                month: 2,
                day: 30
            })
        );
    }

    #[test]
    fn lenient_construction_rolls_in_both_directions() {
        assert_eq!(typed("13/01/2024").to_date_lenient().unwrap().formatted(), "01/01/2025");
        assert_eq!(typed("03/00/2024").to_date_lenient().unwrap().formatted(), "02/29/2024");
        assert_eq!(typed("00/15/2024").to_date_lenient().unwrap().formatted(), "12/15/2023");
        assert_eq!(typed("12/99/2023").to_date_lenient().unwrap().formatted(), "03/08/2024");
        assert!(typed("01/00/0001").to_date_lenient().is_err());
    }

    #[test]
    fn parse_combines_shape_and_calendar() {
        assert_eq!(
            InputValidator::parse("07/04/1776", DateOverflow::Reject)
                .unwrap()
                .formatted(),
            "07/04/1776"
        );
        assert_eq!(
            InputValidator::parse("2/3/2024", DateOverflow::Roll),
            Err(DateInputError::MalformedInput("2/3/2024".to_owned()))
        );
        assert!(InputValidator::parse("02/29/2023", DateOverflow::Reject).is_err());
        assert_eq!(
            InputValidator::parse("02/29/2023", DateOverflow::Roll)
                .unwrap()
                .formatted(),
            "03/01/2023"
        );
        assert!(InputValidator::parse("01/01/0000", DateOverflow::Reject).is_err());
    }
}
