use std::sync::Arc;

use chrono::NaiveDate;
use egui::{
    Area, Button, Color32, ComboBox, Frame, Grid, Id, Key, Label, Order, Response, RichText,
    Stroke, StrokeKind, TextEdit, Ui, UiKind, Vec2, Widget, vec2,
};

use crate::{
    DateOverflow, DatePickerEvent, DatePickerProps, DatePickerState, DatePickerView, DayCell,
    InvalidInputPolicy, PanelView, Placement, SelectedDate, calendar::MONTH_NAMES,
};

const CELL_SIZE: f32 = 26.0;

/// Everything a date picker remembers between frames.
#[derive(Clone)]
struct DatePickerMemory {
    state: DatePickerState,

    /// Size of the popover last frame, used to place it this frame.
    panel_size: Vec2,
}

enum PanelAction {
    AdvanceYear(i32),
    AdvanceMonth(i32),
    SetMonth(u32),
    SetYear(i32),
    PickDay(u32),
}

/// The result of [`DatePicker::show`].
pub struct DatePickerOutput {
    /// The text field and trigger button together.
    /// [`Response::changed`] is set whenever a date is picked, typed or cleared.
    pub response: Response,

    /// What happened this frame, in order.
    pub events: Vec<DatePickerEvent>,

    /// The properties after this frame.
    pub props: DatePickerProps,
}

/// A text field for `MM/DD/YYYY` dates with a button that opens a calendar.
///
/// ```
/// # egui::__run_test_ui(|ui| {
/// # let mut date: Option<chrono::NaiveDate> = None;
/// if ui.add(egui_date_input::DatePicker::new(&mut date)).changed() {
///     // `date` was picked, typed or cleared.
/// }
/// # });
/// ```
pub struct DatePicker<'a> {
    selection: &'a mut Option<NaiveDate>,
    div_id: String,
    button_id: String,
    initial: Option<&'a DatePickerProps>,
    today: Option<NaiveDate>,
    arrows: bool,
    combo_boxes: bool,
    show_icon: bool,
    year_window: i32,
    desired_width: Option<f32>,
    invalid_input: InvalidInputPolicy,
    date_overflow: DateOverflow,
    placement: Option<Arc<dyn Placement>>,
}

impl<'a> DatePicker<'a> {
    pub fn new(selection: &'a mut Option<NaiveDate>) -> Self {
        let defaults = DatePickerProps::default();
        Self {
            selection,
            div_id: defaults.div_id,
            button_id: defaults.button_id,
            initial: None,
            today: None,
            arrows: true,
            combo_boxes: true,
            show_icon: true,
            year_window: 500,
            desired_width: None,
            invalid_input: InvalidInputPolicy::default(),
            date_overflow: DateOverflow::default(),
            placement: None,
        }
    }

    /// Takes ids from `props`, and the rest of `props` as the starting state
    /// the first time this picker is shown.
    pub fn with_props(selection: &'a mut Option<NaiveDate>, props: &'a DatePickerProps) -> Self {
        Self {
            div_id: props.div_id.clone(),
            button_id: props.button_id.clone(),
            initial: Some(props),
            ..Self::new(selection)
        }
    }

    /// Id salt of the whole picker.
    /// Must be set if multiple date pickers are in the same Ui.
    #[inline]
    pub fn id_salt(mut self, id_salt: impl Into<String>) -> Self {
        self.div_id = id_salt.into();
        self
    }

    /// Id salt of the trigger button.
    #[inline]
    pub fn button_id_salt(mut self, id_salt: impl Into<String>) -> Self {
        self.button_id = id_salt.into();
        self
    }

    /// The day to highlight and to open the calendar on. (Default: today, local time)
    #[inline]
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Show the `<<` `<` `>` `>>` buttons. (Default: true)
    #[inline]
    pub fn arrows(mut self, arrows: bool) -> Self {
        self.arrows = arrows;
        self
    }

    /// Show month and year dropdowns. (Default: true)
    #[inline]
    pub fn combo_boxes(mut self, combo_boxes: bool) -> Self {
        self.combo_boxes = combo_boxes;
        self
    }

    /// Show a calendar icon on the trigger button. (Default: true)
    #[inline]
    pub fn show_icon(mut self, show_icon: bool) -> Self {
        self.show_icon = show_icon;
        self
    }

    /// How many years before and after today the year dropdown offers. (Default: 500)
    #[inline]
    pub fn year_window(mut self, years: i32) -> Self {
        self.year_window = years;
        self
    }

    #[inline]
    pub fn desired_width(mut self, desired_width: f32) -> Self {
        self.desired_width = Some(desired_width);
        self
    }

    /// What to do with text that is not a date. (Default: [`InvalidInputPolicy::Flag`])
    #[inline]
    pub fn invalid_input(mut self, policy: InvalidInputPolicy) -> Self {
        self.invalid_input = policy;
        self
    }

    /// What to do with typed days that do not exist. (Default: [`DateOverflow::Reject`])
    #[inline]
    pub fn date_overflow(mut self, overflow: DateOverflow) -> Self {
        self.date_overflow = overflow;
        self
    }

    /// Where to put the calendar. (Default: centered below the field)
    #[inline]
    pub fn placement(mut self, placement: impl Placement + 'static) -> Self {
        self.placement = Some(Arc::new(placement));
        self
    }

    pub fn show(self, ui: &mut Ui) -> DatePickerOutput {
        profiling::function_scope!();

        let Self {
            selection,
            div_id,
            button_id,
            initial,
            today,
            arrows,
            combo_boxes,
            show_icon,
            year_window,
            desired_width,
            invalid_input,
            date_overflow,
            placement,
        } = self;

        let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
        let id = ui.make_persistent_id(&div_id);

        let mut memory = ui
            .data_mut(|data| data.get_temp::<DatePickerMemory>(id))
            .unwrap_or_else(|| {
                let state = match initial {
                    Some(props) => {
                        let state = DatePickerState::from_props(props, today, date_overflow);
                        *selection = state.selected().map(NaiveDate::from);
                        state
                    }
                    None => DatePickerState::new(today),
                };
                DatePickerMemory {
                    state,
                    panel_size: Vec2::ZERO,
                }
            });

        let state = &mut memory.state;
        state.invalid_input = invalid_input;
        state.date_overflow = date_overflow;
        if let Some(placement) = placement {
            state.popover_mut().set_shared_placement(placement);
        }

        let external = selection.and_then(|date| SelectedDate::try_from(date).ok());
        if external != state.selected() {
            state.set_selection(external);
        }

        let mut events = Vec::new();
        let view = DatePickerView::build(state, today, year_window);

        let row = ui.horizontal(|ui| {
            let mut edit = TextEdit::singleline(state.text_mut())
                .id(id.with("input"))
                .hint_text(view.input.placeholder);
            if let Some(width) = desired_width {
                edit = edit.desired_width(width);
            }
            let mut text_response = ui.add(edit);

            if !view.input.valid {
                let stroke = Stroke::new(1.0, ui.visuals().error_fg_color);
                ui.painter().rect_stroke(
                    text_response.rect,
                    ui.visuals().widgets.inactive.corner_radius,
                    stroke,
                    StrokeKind::Outside,
                );
                text_response = text_response.on_hover_text("Expected a date like 12/31/2024");
            }

            let button_response = ui
                .push_id(&button_id, |ui| trigger_button(ui, show_icon, view.trigger_open))
                .inner;

            (text_response, button_response)
        });
        let (text_response, button_response) = row.inner;

        if text_response.lost_focus() {
            events.extend(state.commit_text());
        }
        if button_response.clicked() {
            state.toggle_popover();
        }

        let mut actions = Vec::new();
        if let Some(panel) = DatePickerView::build(state, today, year_window).panel {
            let pos = state
                .popover()
                .place(row.response.rect, memory.panel_size, ui.clip_rect());

            let area = Area::new(id.with("popover"))
                .kind(UiKind::Picker)
                .order(Order::Foreground)
                .fixed_pos(pos)
                .show(ui.ctx(), |ui| {
                    Frame::popup(ui.style())
                        .show(ui, |ui| panel_ui(ui, id, &panel, arrows, combo_boxes, &mut actions))
                        .inner
                });
            memory.panel_size = area.response.rect.size();

            // Picking from one of our dropdowns happens outside the panel.
            let dropdown_open = area.inner;
            let escape = ui.input(|i| i.key_pressed(Key::Escape));
            if !button_response.clicked()
                && !dropdown_open
                && (escape || area.response.clicked_elsewhere())
            {
                memory.state.close_popover();
            }
        }

        let state = &mut memory.state;
        let interacted = button_response.clicked() || !actions.is_empty() || !events.is_empty();
        for action in actions {
            match action {
                PanelAction::AdvanceYear(delta) => state.advance_year(delta),
                PanelAction::AdvanceMonth(delta) => state.advance_month(delta),
                PanelAction::SetMonth(month) => {
                    if let Err(err) = state.set_view_month(month) {
                        log::warn!("{err}");
                    }
                }
                PanelAction::SetYear(year) => {
                    if let Err(err) = state.set_view_year(year) {
                        log::warn!("{err}");
                    }
                }
                PanelAction::PickDay(day) => match state.pick_day(day) {
                    Ok(event) => events.push(event),
                    Err(err) => log::warn!("{err}"),
                },
            }
        }

        let mut response = text_response | button_response;
        let picked = state.selected().map(NaiveDate::from);
        if picked != *selection {
            *selection = picked;
            response.mark_changed();
        }
        if events.iter().any(|event| event.date().is_some()) {
            // Re-picking the same day still counts as input.
            response.mark_changed();
        }
        if interacted {
            ui.ctx().request_repaint();
        }

        let props = state.props(&div_id, &button_id);
        ui.data_mut(|data| data.insert_temp(id, memory));

        DatePickerOutput {
            response,
            events,
            props,
        }
    }
}

impl Widget for DatePicker<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui).response
    }
}

fn trigger_button(ui: &mut Ui, show_icon: bool, open: bool) -> Response {
    let text = if show_icon { "📆" } else { "Pick" };
    ui.add(Button::new(text).selected(open))
        .on_hover_text("Open the calendar")
}

/// Returns `true` while one of the dropdowns is open.
fn panel_ui(
    ui: &mut Ui,
    id: Id,
    panel: &PanelView,
    arrows: bool,
    combo_boxes: bool,
    actions: &mut Vec<PanelAction>,
) -> bool {
    let mut dropdown_open = false;
    let cursor = panel.cursor;

    ui.horizontal(|ui| {
        if arrows {
            if ui.button("<<").on_hover_text("Previous year").clicked() {
                actions.push(PanelAction::AdvanceYear(-1));
            }
            if ui.button("<").on_hover_text("Previous month").clicked() {
                actions.push(PanelAction::AdvanceMonth(-1));
            }
        }

        if combo_boxes {
            let mut month = cursor.month();
            dropdown_open |= ComboBox::from_id_salt(id.with("month"))
                .selected_text(cursor.month_name())
                .show_ui(ui, |ui| {
                    for (number, name) in (1..).zip(MONTH_NAMES) {
                        ui.selectable_value(&mut month, number, name);
                    }
                })
                .inner
                .is_some();
            if month != cursor.month() {
                actions.push(PanelAction::SetMonth(month));
            }

            let mut year = cursor.year();
            dropdown_open |= ComboBox::from_id_salt(id.with("year"))
                .selected_text(year.to_string())
                .width(60.0)
                .show_ui(ui, |ui| {
                    for option in panel.years.clone() {
                        ui.selectable_value(&mut year, option, option.to_string());
                    }
                })
                .inner
                .is_some();
            if year != cursor.year() {
                actions.push(PanelAction::SetYear(year));
            }
        } else {
            ui.label(format!("{} {}", cursor.month_name(), cursor.year()));
        }

        if arrows {
            if ui.button(">").on_hover_text("Next month").clicked() {
                actions.push(PanelAction::AdvanceMonth(1));
            }
            if ui.button(">>").on_hover_text("Next year").clicked() {
                actions.push(PanelAction::AdvanceYear(1));
            }
        }
    });

    let cell_size = Vec2::splat(CELL_SIZE);
    Grid::new(id.with("days"))
        .num_columns(7)
        .spacing(vec2(2.0, 2.0))
        .show(ui, |ui| {
            for name in panel.weekdays {
                ui.add_sized(cell_size, Label::new(RichText::new(name).weak()));
            }
            ui.end_row();

            for week in panel.weeks() {
                for cell in week {
                    match *cell {
                        DayCell::Blank => {
                            ui.allocate_space(cell_size);
                        }
                        DayCell::Day {
                            day,
                            selected,
                            today,
                            weekend,
                        } => {
                            if day_button(ui, cell_size, day, selected, today, weekend).clicked() {
                                actions.push(PanelAction::PickDay(day));
                            }
                        }
                    }
                }
                ui.end_row();
            }
        });

    dropdown_open
}

fn day_button(
    ui: &mut Ui,
    size: Vec2,
    day: u32,
    selected: bool,
    today: bool,
    weekend: bool,
) -> Response {
    let fill = if selected {
        ui.visuals().selection.bg_fill
    } else if weekend {
        if ui.visuals().dark_mode {
            Color32::DARK_RED
        } else {
            Color32::LIGHT_RED
        }
    } else {
        ui.visuals().extreme_bg_color
    };

    let response = ui.add_sized(size, Button::new(day.to_string()).fill(fill));

    if today {
        // Encircle today's date
        let stroke = ui.visuals().widgets.inactive.fg_stroke;
        ui.painter()
            .circle_stroke(response.rect.center(), 0.4 * size.x, stroke);
    }

    response
}
