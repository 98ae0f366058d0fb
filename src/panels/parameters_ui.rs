//! Parameters form: one group per distribution slot.

use eframe::egui;
use egui_phosphor::regular::FLOPPY_DISK;

use crate::config::Messages;
use crate::controllers::FormEvent;
use crate::data::distribution::DistributionType;
use crate::data::form::{DistributionSlot, ParamBlock, ParametersForm};

fn type_label(kind: DistributionType, messages: &Messages) -> &str {
    match kind {
        DistributionType::Normal => &messages.normal,
        DistributionType::Exponential => &messages.exponential,
    }
}

/// Draw the parameters form. Field edits go straight into `form`; type
/// changes and the submit button are returned as events.
pub fn parameters_ui(
    ui: &mut egui::Ui,
    form: &mut ParametersForm,
    messages: &Messages,
) -> Vec<FormEvent> {
    let mut events = Vec::new();
    ui.heading(&messages.parameters_title);

    for (index, slot) in form.slots.iter_mut().enumerate() {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.strong(messages.format_slot_title(index));
            if let Some(kind) = slot_ui(ui, index, slot, messages) {
                events.push(FormEvent::DistributionTypeChanged { index, kind });
            }
        });
    }

    ui.add_space(4.0);
    if ui
        .button(format!("{FLOPPY_DISK} {}", messages.save))
        .clicked()
    {
        events.push(FormEvent::SubmitParameters);
    }
    events
}

/// Returns the newly selected type, if the selector changed.
fn slot_ui(
    ui: &mut egui::Ui,
    index: usize,
    slot: &mut DistributionSlot,
    messages: &Messages,
) -> Option<DistributionType> {
    let mut selected = slot.kind;
    egui::Grid::new(("slot_grid", index))
        .num_columns(2)
        .show(ui, |ui| {
            ui.label(&messages.distribution_type);
            egui::ComboBox::from_id_salt(("slot_type", index))
                .selected_text(type_label(selected, messages))
                .show_ui(ui, |ui| {
                    for kind in DistributionType::all() {
                        ui.selectable_value(&mut selected, *kind, type_label(*kind, messages));
                    }
                });
            ui.end_row();

            // Only the block of the selected type is shown.
            match slot.visible_block() {
                ParamBlock::Normal => {
                    ui.label(&messages.mean);
                    ui.add(egui::TextEdit::singleline(&mut slot.mean).desired_width(120.0));
                    ui.end_row();
                    ui.label(&messages.std);
                    ui.add(egui::TextEdit::singleline(&mut slot.std).desired_width(120.0));
                    ui.end_row();
                }
                ParamBlock::Exponential => {
                    ui.label(&messages.lambda);
                    ui.add(egui::TextEdit::singleline(&mut slot.lambda).desired_width(120.0));
                    ui.end_row();
                }
            }
        });
    (selected != slot.kind).then_some(selected)
}
