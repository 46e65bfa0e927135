#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![expect(rustdoc::missing_crate_level_docs)] // it's an example

use chrono::NaiveDate;
use eframe::egui;
use egui_date_input::{
    DateOverflow, DatePicker, DatePickerEvent, DatePickerProps, InvalidInputPolicy,
};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    // Optionally start from a RON file, e.g. `crates/date_input_demo/start_date.ron`.
    let props = std::env::args()
        .nth(1)
        .map(|path| load_props(&path))
        .unwrap_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([420.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "egui date input",
        options,
        Box::new(|_cc| Ok(Box::new(DemoApp::new(props)))),
    )
}

fn load_props(path: &str) -> DatePickerProps {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            log::error!("Failed to read {path:?}: {err}");
            return DatePickerProps::default();
        }
    };
    DatePickerProps::from_ron(&text).unwrap_or_else(|err| {
        log::error!("{path:?}: {err}");
        DatePickerProps::default()
    })
}

struct DemoApp {
    start_props: DatePickerProps,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    invalid_input: InvalidInputPolicy,
    date_overflow: DateOverflow,
    history: Vec<String>,
    current_props: String,
}

impl DemoApp {
    fn new(start_props: DatePickerProps) -> Self {
        Self {
            start_props,
            start: None,
            end: None,
            invalid_input: InvalidInputPolicy::default(),
            date_overflow: DateOverflow::default(),
            history: Vec::new(),
            current_props: String::new(),
        }
    }

    fn record(&mut self, label: &str, events: Vec<DatePickerEvent>) {
        for event in events {
            log::info!("{label}: {event:?}");
            let line = match event {
                DatePickerEvent::DatePicked(date) => format!("{label}: picked {date}"),
                DatePickerEvent::DateTyped(date) => format!("{label}: typed {date}"),
                DatePickerEvent::Cleared => format!("{label}: cleared"),
                DatePickerEvent::InputRejected { text, error } => {
                    format!("{label}: rejected {text:?} ({error})")
                }
            };
            self.history.push(line);
        }
    }
}

impl eframe::App for DemoApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.heading("Date input");

            ui.horizontal(|ui| {
                ui.label("Invalid text:");
                ui.radio_value(&mut self.invalid_input, InvalidInputPolicy::Flag, "Flag");
                ui.radio_value(&mut self.invalid_input, InvalidInputPolicy::Clear, "Clear");
            });
            ui.horizontal(|ui| {
                ui.label("Impossible days:");
                ui.radio_value(&mut self.date_overflow, DateOverflow::Reject, "Reject");
                ui.radio_value(&mut self.date_overflow, DateOverflow::Roll, "Roll over");
            });
            ui.separator();

            let start = ui
                .horizontal(|ui| {
                    ui.label("Start:");
                    DatePicker::with_props(&mut self.start, &self.start_props)
                        .invalid_input(self.invalid_input)
                        .date_overflow(self.date_overflow)
                        .show(ui)
                })
                .inner;

            let end = ui
                .horizontal(|ui| {
                    ui.label("End:");
                    DatePicker::new(&mut self.end)
                        .id_salt("end-date")
                        .button_id_salt("end-date-button")
                        .invalid_input(self.invalid_input)
                        .date_overflow(self.date_overflow)
                        .show(ui)
                })
                .inner;

            self.current_props = start.props.to_ron().unwrap_or_else(|err| err.to_string());
            self.record("start", start.events);
            self.record("end", end.events);

            if let (Some(start), Some(end)) = (self.start, self.end) {
                let days = (end - start).num_days();
                if days < 0 {
                    ui.colored_label(ui.visuals().warn_fg_color, "End is before start");
                } else {
                    ui.label(format!("{days} days"));
                }
            }

            if ui.button("Clear both").clicked() {
                self.start = None;
                self.end = None;
            }

            ui.separator();
            ui.label("Start properties:");
            ui.code(&self.current_props);

            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, true])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.history {
                        ui.label(line);
                    }
                });
        });
    }
}
