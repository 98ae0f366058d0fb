//! Standalone application wrapper.
//!
//! [`DistCalcApp`] owns the [`FormController`] and implements [`eframe::App`]:
//! forms on the left, result and figure in the centre, status at the bottom,
//! and the pending alert on top of everything.

use eframe::egui;

use crate::color_scheme::ColorScheme;
use crate::config::DistCalcConfig;
use crate::controllers::{FormController, FormEvent};
use crate::panels::{calculations_ui, notice_window, parameters_ui, plot_ui, result_ui, status_line};

// ─────────────────────────────────────────────────────────────────────────────
// DistCalcApp
// ─────────────────────────────────────────────────────────────────────────────

pub struct DistCalcApp {
    pub controller: FormController,
    /// Optional heading text shown at the top of the window.
    pub headline: Option<String>,
    pub color_scheme: ColorScheme,
    /// Flag so we only apply the color scheme on the very first frame.
    color_scheme_applied: bool,
}

impl DistCalcApp {
    pub fn new(controller: FormController, cfg: &DistCalcConfig) -> Self {
        Self {
            controller,
            headline: cfg.headline.clone(),
            color_scheme: cfg.color_scheme,
            color_scheme_applied: false,
        }
    }

    /// Draw the whole window and return the events raised this frame.
    fn ui(&mut self, ctx: &egui::Context) -> Vec<FormEvent> {
        let mut events = Vec::new();
        let controller = &mut self.controller;
        let messages = controller.messages().clone();

        if let Some(h) = &self.headline {
            egui::TopBottomPanel::top("distcalc_headline").show(ctx, |ui| {
                ui.heading(h);
            });
        }

        let scheme_before = self.color_scheme;
        let color_scheme = &mut self.color_scheme;
        egui::TopBottomPanel::bottom("distcalc_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                egui::ComboBox::from_id_salt("distcalc_color_scheme")
                    .selected_text(color_scheme.label())
                    .show_ui(ui, |ui| {
                        for s in ColorScheme::all() {
                            ui.selectable_value(color_scheme, *s, s.label());
                        }
                    });
                ui.separator();
                status_line(ui, &controller.notifications, controller.in_flight(), &messages);
            });
        });
        if self.color_scheme != scheme_before {
            self.color_scheme_applied = false;
        }

        egui::SidePanel::left("distcalc_forms")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    events.extend(parameters_ui(ui, &mut controller.parameters, &messages));
                    ui.separator();
                    events.extend(calculations_ui(ui, &mut controller.calculations, &messages));
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&messages.result_title);
            result_ui(ui, &controller.result, &messages, self.color_scheme);
            ui.add_space(6.0);
            plot_ui(
                ui,
                controller.figure.as_ref(),
                controller.figure_generation(),
                &messages,
            );
        });

        events.extend(notice_window(
            ctx,
            &controller.notifications,
            &messages,
            self.color_scheme,
        ));
        events
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eframe integration
// ─────────────────────────────────────────────────────────────────────────────

impl eframe::App for DistCalcApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.color_scheme_applied {
            self.color_scheme.apply(ctx);
            self.color_scheme_applied = true;
        }

        // Results first, so this frame already shows them.
        self.controller.pump();

        for event in self.ui(ctx) {
            self.controller.handle(event);
        }

        // Keep the spinner moving while requests are out.
        if self.controller.in_flight() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
