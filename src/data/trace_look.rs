//! TraceLook: visual styling for figure traces and markers.

use eframe::egui;
use egui_plot::{LineStyle, MarkerShape};

/// How a trace is drawn (colour, line, fill and point markers).
#[derive(Debug, Clone, PartialEq)]
pub struct TraceLook {
    pub color: egui::Color32,
    pub width: f32,
    pub style: LineStyle,
    pub show_line: bool,
    pub show_points: bool,
    pub point_size: f32,
    pub marker: MarkerShape,
    /// Fill between the line and `y = 0` with this colour.
    pub fill: Option<egui::Color32>,
}

impl Default for TraceLook {
    fn default() -> Self {
        Self {
            color: egui::Color32::GRAY,
            width: 2.0,
            style: LineStyle::Solid,
            show_line: true,
            show_points: false,
            point_size: 3.0,
            marker: MarkerShape::Circle,
            fill: None,
        }
    }
}

impl TraceLook {
    /// Create a TraceLook with a colour allocated from the trace index.
    pub fn new(index: usize) -> Self {
        Self {
            color: Self::alloc_color(index),
            ..Default::default()
        }
    }

    /// Default colour for the trace at `index` when the figure names none.
    pub fn alloc_color(index: usize) -> egui::Color32 {
        const PALETTE: [egui::Color32; 10] = [
            egui::Color32::from_rgb(31, 119, 180),
            egui::Color32::from_rgb(255, 127, 14),
            egui::Color32::from_rgb(44, 160, 44),
            egui::Color32::from_rgb(214, 39, 40),
            egui::Color32::from_rgb(148, 103, 189),
            egui::Color32::from_rgb(140, 86, 75),
            egui::Color32::from_rgb(227, 119, 194),
            egui::Color32::from_rgb(127, 127, 127),
            egui::Color32::from_rgb(188, 189, 34),
            egui::Color32::from_rgb(23, 190, 207),
        ];
        PALETTE[index % PALETTE.len()]
    }

    /// Line style for a figure dash name (`"dash"`, `"dot"`, ...).
    pub fn style_for_dash(dash: &str) -> LineStyle {
        match dash {
            "dash" | "longdash" | "dashdot" | "longdashdot" => LineStyle::Dashed { length: 8.0 },
            "dot" => LineStyle::Dotted { spacing: 4.0 },
            _ => LineStyle::Solid,
        }
    }

    /// Fill colour with a translucent default when the figure gives none.
    pub fn default_fill(color: egui::Color32) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 50)
    }

    /// Fill as an opaque colour plus its opacity in `0..=1`.
    ///
    /// egui_plot takes the fill opacity separately from the line colour.
    pub fn fill_parts(&self) -> Option<(egui::Color32, f32)> {
        self.fill.map(|c| (c.to_opaque(), f32::from(c.a()) / 255.0))
    }
}
