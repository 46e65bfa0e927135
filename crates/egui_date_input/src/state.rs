use chrono::NaiveDate;

use crate::{
    CalendarState, DateInputError, DateOverflow, DatePickerProps, InputValidator,
    PopoverController, SelectedDate,
};

/// What to do with the text field when the typed text is not a date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum InvalidInputPolicy {
    /// Keep the text so the user can correct it, and mark the field as invalid.
    #[default]
    Flag,

    /// Empty the field.
    Clear,
}

/// Something the user did that changed the selected date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatePickerEvent {
    /// A day was clicked in the calendar.
    DatePicked(SelectedDate),

    /// A date was typed into the field.
    DateTyped(SelectedDate),

    /// The field was emptied.
    Cleared,

    /// The field lost focus holding something that is not a date.
    InputRejected { text: String, error: DateInputError },
}

impl DatePickerEvent {
    /// The selection after this event.
    pub fn date(&self) -> Option<SelectedDate> {
        match self {
            Self::DatePicked(date) | Self::DateTyped(date) => Some(*date),
            Self::Cleared | Self::InputRejected { .. } => None,
        }
    }
}

/// All the state of one date picker, and the handlers that change it.
///
/// The egui widget keeps one of these per instance; it can also be driven directly.
#[derive(Clone, Debug)]
pub struct DatePickerState {
    calendar: CalendarState,
    popover: PopoverController,

    /// Contents of the text field.
    text: String,

    /// Result of the last validation. Starts out `true`.
    field_valid: bool,

    pub invalid_input: InvalidInputPolicy,
    pub date_overflow: DateOverflow,
}

impl Default for DatePickerState {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

impl DatePickerState {
    /// Nothing selected, popover closed, showing the month of `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            calendar: CalendarState::new(today),
            popover: PopoverController::default(),
            text: String::new(),
            field_valid: true,
            invalid_input: InvalidInputPolicy::default(),
            date_overflow: DateOverflow::default(),
        }
    }

    /// Restores the state described by `props`, resolving `selectedDate` with `date_overflow`.
    ///
    /// `isFieldValid` follows from `selectedDate`: a date that does not parse is kept as text
    /// and the field starts out invalid, anything else starts out valid.
    pub fn from_props(
        props: &DatePickerProps,
        today: NaiveDate,
        date_overflow: DateOverflow,
    ) -> Self {
        let mut state = Self::new(today);
        state.date_overflow = date_overflow;
        state.text.clone_from(&props.selected_date);
        if props.is_popper_visible {
            state.popover.open();
        }
        if !props.selected_date.trim().is_empty() {
            match InputValidator::parse(&props.selected_date, date_overflow) {
                Ok(date) => {
                    state.calendar.select(date);
                    state.text = date.formatted();
                }
                Err(err) => {
                    log::warn!("Ignoring initial date {:?}: {err}", props.selected_date);
                    state.field_valid = false;
                }
            }
        }
        state
    }

    /// A snapshot of the public properties.
    pub fn props(&self, div_id: &str, button_id: &str) -> DatePickerProps {
        DatePickerProps {
            selected_date: self.text.clone(),
            div_id: div_id.to_owned(),
            button_id: button_id.to_owned(),
            is_popper_visible: self.popover.is_visible(),
            is_field_valid: self.field_valid,
        }
    }

    pub fn calendar(&self) -> &CalendarState {
        &self.calendar
    }

    pub fn popover(&self) -> &PopoverController {
        &self.popover
    }

    pub fn popover_mut(&mut self) -> &mut PopoverController {
        &mut self.popover
    }

    pub fn selected(&self) -> Option<SelectedDate> {
        self.calendar.selected()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The buffer the text field edits. Call [`Self::commit_text`] when it loses focus.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn is_field_valid(&self) -> bool {
        self.field_valid
    }

    pub fn is_popover_visible(&self) -> bool {
        self.popover.is_visible()
    }

    pub fn toggle_popover(&mut self) {
        self.popover.toggle();
    }

    pub fn close_popover(&mut self) {
        self.popover.close();
    }

    pub fn advance_month(&mut self, delta: i32) {
        self.calendar.advance_month(delta);
    }

    pub fn advance_year(&mut self, delta: i32) {
        self.calendar.advance_year(delta);
    }

    pub fn set_view_month(&mut self, month: u32) -> Result<(), DateInputError> {
        self.calendar.set_view_month(month)
    }

    pub fn set_view_year(&mut self, year: i32) -> Result<(), DateInputError> {
        self.calendar.set_view_year(year)
    }

    /// Selects `day` of the displayed month, writes it into the field and closes the popover.
    pub fn pick_day(&mut self, day: u32) -> Result<DatePickerEvent, DateInputError> {
        let date = self.calendar.set_day(day)?;
        self.text = date.formatted();
        self.field_valid = true;
        self.popover.close();
        log::debug!("Picked {date}");
        Ok(DatePickerEvent::DatePicked(date))
    }

    /// Validates the field. Call this when it loses focus.
    ///
    /// Returns an event if the selection changed or the text was rejected.
    pub fn commit_text(&mut self) -> Option<DatePickerEvent> {
        if self.text.trim().is_empty() {
            self.text.clear();
            self.field_valid = true;
            let had_selection = self.calendar.selected().is_some();
            self.calendar.clear_selection();
            return had_selection.then_some(DatePickerEvent::Cleared);
        }

        match InputValidator::parse(&self.text, self.date_overflow) {
            Ok(date) => {
                let unchanged = self.calendar.selected() == Some(date);
                self.calendar.select(date);
                self.text = date.formatted();
                self.field_valid = true;
                (!unchanged).then_some(DatePickerEvent::DateTyped(date))
            }
            Err(error) => {
                log::warn!("Rejected date input {:?}: {error}", self.text);
                self.field_valid = false;
                self.calendar.clear_selection();
                let text = match self.invalid_input {
                    InvalidInputPolicy::Flag => self.text.clone(),
                    InvalidInputPolicy::Clear => std::mem::take(&mut self.text),
                };
                Some(DatePickerEvent::InputRejected { text, error })
            }
        }
    }

    /// Replaces the selection from outside, e.g. when the bound value changed.
    pub fn set_selection(&mut self, date: Option<SelectedDate>) {
        match date {
            Some(date) => {
                self.calendar.select(date);
                self.text = date.formatted();
            }
            None => {
                self.calendar.clear_selection();
                self.text.clear();
            }
        }
        self.field_valid = true;
    }
}
