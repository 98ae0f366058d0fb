//! Color schemes for the calculator window.
//!
//! A scheme sets the egui visuals and the colours of the result banners.

use eframe::egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

use crate::data::feedback::NoticeLevel;

/// Visual theme of the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
    /// Light grey plot background with white windows.
    GgPlot,
}

/// Fill and text colour of a banner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BannerColors {
    pub fill: Color32,
    pub text: Color32,
}

impl ColorScheme {
    pub fn all() -> &'static [ColorScheme] {
        &[ColorScheme::Dark, ColorScheme::Light, ColorScheme::GgPlot]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Dark => "Dark",
            ColorScheme::Light => "Light",
            ColorScheme::GgPlot => "ggplot",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }

    pub fn apply(&self, ctx: &Context) {
        match self {
            ColorScheme::Dark => ctx.set_visuals(Visuals::dark()),
            ColorScheme::Light => ctx.set_visuals(Visuals::light()),
            ColorScheme::GgPlot => {
                let mut v = Visuals::light();
                let bg = Color32::from_rgb(229, 229, 229);
                let fg = Color32::from_rgb(51, 51, 51);
                v.panel_fill = bg;
                v.window_fill = Color32::WHITE;
                v.extreme_bg_color = bg;
                v.faint_bg_color = Color32::from_rgb(240, 240, 240);
                v.override_text_color = Some(fg);
                v.widgets.noninteractive.bg_fill = Color32::from_rgb(240, 240, 240);
                v.widgets.noninteractive.fg_stroke.color = fg;
                ctx.set_visuals(v);
            }
        }
    }

    /// Banner colours for a notice level; `Info` is also used for results.
    pub fn banner(&self, level: NoticeLevel) -> BannerColors {
        let dark = self.is_dark();
        match (level, dark) {
            (NoticeLevel::Info, false) => BannerColors {
                fill: Color32::from_rgb(207, 244, 252),
                text: Color32::from_rgb(5, 81, 96),
            },
            (NoticeLevel::Info, true) => BannerColors {
                fill: Color32::from_rgb(3, 40, 48),
                text: Color32::from_rgb(110, 223, 246),
            },
            (NoticeLevel::Warning, false) => BannerColors {
                fill: Color32::from_rgb(255, 243, 205),
                text: Color32::from_rgb(102, 77, 3),
            },
            (NoticeLevel::Warning, true) => BannerColors {
                fill: Color32::from_rgb(51, 39, 1),
                text: Color32::from_rgb(255, 218, 106),
            },
            (NoticeLevel::Error, false) => BannerColors {
                fill: Color32::from_rgb(248, 215, 218),
                text: Color32::from_rgb(88, 21, 28),
            },
            (NoticeLevel::Error, true) => BannerColors {
                fill: Color32::from_rgb(44, 11, 14),
                text: Color32::from_rgb(234, 134, 143),
            },
        }
    }
}
