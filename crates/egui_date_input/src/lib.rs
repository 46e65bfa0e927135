//! A date input for [`egui`](https://github.com/emilk/egui): a text field for `MM/DD/YYYY`
//! dates paired with a button that opens a calendar popover.
//!
//! ```
//! # egui::__run_test_ui(|ui| {
//! # let mut date: Option<chrono::NaiveDate> = None;
//! let output = egui_date_input::DatePicker::new(&mut date)
//!     .id_salt("birthday")
//!     .show(ui);
//! for event in &output.events {
//!     log::info!("{event:?}");
//! }
//! # });
//! ```
//!
//! The pieces can also be used without egui's widget:
//! [`CalendarState`] does the calendar arithmetic, [`InputValidator`] checks typed text,
//! [`PopoverController`] decides whether and where the calendar shows,
//! and [`DatePickerView::build`] turns a [`DatePickerState`] into something to draw.

#![forbid(unsafe_code)]

mod calendar;
mod error;
mod popover;
mod props;
mod state;
mod validator;
mod view;
mod widget;

pub use crate::calendar::{
    CalendarState, DATE_FORMAT, MONTH_NAMES, SelectedDate, ViewCursor, WEEKDAY_NAMES, YEARS,
    days_in_month, format_date, month_name, weekday_of,
};
pub use crate::error::DateInputError;
pub use crate::popover::{AlignedPlacement, Placement, PopoverController};
pub use crate::props::DatePickerProps;
pub use crate::state::{DatePickerEvent, DatePickerState, InvalidInputPolicy};
pub use crate::validator::{DateOverflow, InputValidator, TypedDate, Validation};
pub use crate::view::{
    DatePickerView, DayCell, InputView, PLACEHOLDER, PanelView, day_cells, year_options,
};
pub use crate::widget::{DatePicker, DatePickerOutput};
