//! Calculations form: combination, calculation type and mode inputs.

use eframe::egui;
use egui_phosphor::regular::CALCULATOR;

use crate::config::Messages;
use crate::controllers::FormEvent;
use crate::data::calculation::CalcType;
use crate::data::form::{CalcInputs, CalculationsForm};

fn calc_label(calc_type: CalcType, messages: &Messages) -> &str {
    match calc_type {
        CalcType::XRange => &messages.calc_x,
        CalcType::YValue => &messages.calc_y,
    }
}

pub fn calculations_ui(
    ui: &mut egui::Ui,
    form: &mut CalculationsForm,
    messages: &Messages,
) -> Vec<FormEvent> {
    let mut events = Vec::new();
    ui.heading(&messages.calculations_title);

    let mut selected = form.calc_type;
    egui::Grid::new("calculations_grid")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label(&messages.combination);
            ui.add(
                egui::TextEdit::singleline(&mut form.combination)
                    .hint_text(&messages.combination_hint)
                    .desired_width(200.0),
            );
            ui.end_row();

            ui.label(&messages.calc_type);
            egui::ComboBox::from_id_salt("calc_type")
                .selected_text(calc_label(selected, messages))
                .show_ui(ui, |ui| {
                    for calc_type in CalcType::all() {
                        ui.selectable_value(
                            &mut selected,
                            *calc_type,
                            calc_label(*calc_type, messages),
                        );
                    }
                });
            ui.end_row();

            match form.visible_inputs() {
                CalcInputs::XRange => {
                    ui.label(&messages.x_min);
                    ui.add(egui::TextEdit::singleline(&mut form.x_min).desired_width(120.0));
                    ui.end_row();
                    ui.label(&messages.x_max);
                    ui.add(egui::TextEdit::singleline(&mut form.x_max).desired_width(120.0));
                    ui.end_row();
                }
                CalcInputs::YValue => {
                    ui.label(&messages.y_value);
                    ui.add(egui::TextEdit::singleline(&mut form.y).desired_width(120.0));
                    ui.end_row();
                }
            }
        });
    if selected != form.calc_type {
        events.push(FormEvent::CalcTypeChanged(selected));
    }

    ui.add_space(4.0);
    if ui
        .button(format!("{CALCULATOR} {}", messages.calculate))
        .clicked()
    {
        events.push(FormEvent::SubmitCalculation);
    }
    events
}
