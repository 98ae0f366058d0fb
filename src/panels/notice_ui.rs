//! Alert window and status line.

use eframe::egui;
use egui_phosphor::regular::{CHECK_CIRCLE, WARNING, X_CIRCLE};

use crate::color_scheme::ColorScheme;
use crate::config::Messages;
use crate::controllers::FormEvent;
use crate::data::feedback::{NoticeLevel, Notifications};

use super::result_ui::banner;

fn icon(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => CHECK_CIRCLE,
        NoticeLevel::Warning => WARNING,
        NoticeLevel::Error => X_CIRCLE,
    }
}

/// Show the oldest unacknowledged alert in a centered window.
pub fn notice_window(
    ctx: &egui::Context,
    notifications: &Notifications,
    messages: &Messages,
    scheme: ColorScheme,
) -> Option<FormEvent> {
    let notice = notifications.current()?;
    let mut event = None;
    egui::Window::new("notice")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.set_min_width(280.0);
            banner(
                ui,
                scheme,
                notice.level,
                &format!("{} {}", icon(notice.level), notice.text),
            );
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if notifications.pending_len() > 1 {
                    ui.weak(format!("+{}", notifications.pending_len() - 1));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(&messages.ok).clicked() {
                        event = Some(FormEvent::DismissNotice);
                    }
                });
            });
        });
    if ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)) {
        event = Some(FormEvent::DismissNotice);
    }
    event
}

/// One-line status: requests in flight and the latest notice.
pub fn status_line(ui: &mut egui::Ui, notifications: &Notifications, in_flight: usize, messages: &Messages) {
    ui.horizontal(|ui| {
        if in_flight > 0 {
            ui.spinner();
            ui.label(format!("{in_flight} {}", messages.pending_requests));
            ui.separator();
        }
        if let Some(latest) = notifications.latest() {
            ui.weak(format!(
                "{} {} {}",
                latest.at.format("%H:%M:%S"),
                icon(latest.level),
                latest.text
            ));
        }
    });
}
