use crate::DateInputError;

/// The public properties of a date picker.
///
/// Field names are camelCase when serialized:
///
/// ```text
/// (
///     selectedDate: "05/17/2024",
///     divId: "start-date",
///     buttonId: "start-date-button",
///     isPopperVisible: false,
///     isFieldValid: true,
/// )
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct DatePickerProps {
    /// Contents of the text field, normally `MM/DD/YYYY` or empty.
    pub selected_date: String,

    /// Id salt of the input container. The popover is anchored to it.
    pub div_id: String,

    /// Id salt of the button that opens the popover.
    pub button_id: String,

    pub is_popper_visible: bool,

    pub is_field_valid: bool,
}

impl Default for DatePickerProps {
    fn default() -> Self {
        Self {
            selected_date: String::new(),
            div_id: "my-div".to_owned(),
            button_id: "my-button".to_owned(),
            is_popper_visible: false,
            is_field_valid: true,
        }
    }
}

impl DatePickerProps {
    /// Parses properties written in [RON](https://github.com/ron-rs/ron).
    /// Missing fields get their default value.
    pub fn from_ron(text: &str) -> Result<Self, DateInputError> {
        ron::from_str(text).map_err(|err| DateInputError::Props(err.to_string()))
    }

    pub fn to_ron(&self) -> Result<String, DateInputError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|err| DateInputError::Props(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_ron() {
        let props = DatePickerProps::from_ron(
            r#"(selectedDate: "05/17/2024", divId: "start", isPopperVisible: true)"#,
        )
        .unwrap();
        assert_eq!(
            props,
            DatePickerProps {
                selected_date: "05/17/2024".to_owned(),
                div_id: "start".to_owned(),
                is_popper_visible: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn written_ron_uses_the_public_names() {
        let text = DatePickerProps::default().to_ron().unwrap();
        for name in [
            "selectedDate",
            "divId",
            "buttonId",
            "isPopperVisible",
            "isFieldValid",
        ] {
            assert!(text.contains(name), "{name} missing from {text}");
        }
    }

    #[test]
    fn unknown_fields_are_an_error() {
        let err = DatePickerProps::from_ron("(colour: \"red\")");
        assert!(matches!(err, Err(DateInputError::Props(_))));
    }
}
