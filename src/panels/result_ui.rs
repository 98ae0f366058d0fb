//! Result panel: solved range, probability, or the "no range" warning.

use eframe::egui;
use egui_phosphor::regular::{INFO, WARNING};

use crate::color_scheme::ColorScheme;
use crate::config::Messages;
use crate::data::feedback::{NoticeLevel, ResultView};

pub(crate) fn banner(ui: &mut egui::Ui, scheme: ColorScheme, level: NoticeLevel, text: &str) {
    let colors = scheme.banner(level);
    egui::Frame::default()
        .fill(colors.fill)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(text).color(colors.text));
        });
}

pub fn result_ui(ui: &mut egui::Ui, view: &ResultView, messages: &Messages, scheme: ColorScheme) {
    match view {
        ResultView::Empty => {}
        ResultView::Range { x_min, x_max } => {
            let text = format!("{INFO} {}", messages.format_range(x_min, x_max));
            banner(ui, scheme, NoticeLevel::Info, &text);
        }
        ResultView::NoRange => {
            let text = format!("{WARNING} {}", messages.no_suitable_range);
            banner(ui, scheme, NoticeLevel::Warning, &text);
        }
        ResultView::Probability { value } => {
            let text = format!("{INFO} {}", messages.format_probability(value));
            banner(ui, scheme, NoticeLevel::Info, &text);
        }
    }
}
