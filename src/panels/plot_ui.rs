//! Figure rendering with egui_plot.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoint, Points, Text, VLine};

use crate::config::Messages;
use crate::data::figure::{Figure, FigureTrace};

/// Draw the last received figure, or a placeholder when there is none.
///
/// `generation` identifies the figure; a new value starts the plot with fresh
/// bounds instead of the pan/zoom state of the previous figure.
pub fn plot_ui(ui: &mut egui::Ui, figure: Option<&Figure>, generation: u64, messages: &Messages) {
    let Some(figure) = figure else {
        ui.centered_and_justified(|ui| {
            ui.weak(&messages.plot_placeholder);
        });
        return;
    };

    if let Some(title) = &figure.title {
        ui.vertical_centered(|ui| ui.strong(title));
    }

    let mut plot = Plot::new(("figure_plot", generation))
        .legend(Legend::default())
        .allow_scroll(false);
    if let Some(x_title) = &figure.x_title {
        plot = plot.x_axis_label(x_title.clone());
    }
    if let Some(y_title) = &figure.y_title {
        plot = plot.y_axis_label(y_title.clone());
    }

    plot.show(ui, |plot_ui| {
        for trace in &figure.traces {
            draw_trace(plot_ui, trace);
        }
        let top = plot_ui.plot_bounds().max()[1];
        for marker in &figure.markers {
            let name = marker.label.clone().unwrap_or_else(|| format!("x = {}", marker.x));
            plot_ui.vline(
                VLine::new(name.clone(), marker.x)
                    .color(marker.look.color)
                    .width(marker.look.width)
                    .style(marker.look.style),
            );
            if let Some(label) = &marker.label {
                plot_ui.text(
                    Text::new(name, PlotPoint::new(marker.x, top), label.clone())
                        .color(marker.look.color)
                        .anchor(egui::Align2::LEFT_TOP),
                );
            }
        }
    });
}

fn draw_trace(plot_ui: &mut egui_plot::PlotUi, trace: &FigureTrace) {
    let look = &trace.look;
    for segment in &trace.segments {
        // Fill first so the outline stays on top.
        if let Some((fill, alpha)) = look.fill_parts() {
            plot_ui.line(
                Line::new(trace.name.clone(), segment.clone())
                    .color(fill)
                    .width(0.0)
                    .fill(0.0)
                    .fill_alpha(alpha),
            );
        }
        if look.show_line {
            plot_ui.line(
                Line::new(trace.name.clone(), segment.clone())
                    .color(look.color)
                    .width(look.width)
                    .style(look.style),
            );
        }
        if look.show_points {
            plot_ui.points(
                Points::new(trace.name.clone(), segment.clone())
                    .radius(look.point_size)
                    .shape(look.marker)
                    .color(look.color),
            );
        }
    }
}
