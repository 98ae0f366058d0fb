//! CSS colour strings, as they appear in figure JSON.

use std::collections::HashMap;

use eframe::egui::Color32;
use once_cell::sync::Lazy;

static NAMED_COLORS: Lazy<HashMap<&'static str, Color32>> = Lazy::new(|| {
    let table: &[(&str, [u8; 3])] = &[
        ("black", [0, 0, 0]),
        ("white", [255, 255, 255]),
        ("red", [255, 0, 0]),
        ("green", [0, 128, 0]),
        ("lime", [0, 255, 0]),
        ("blue", [0, 0, 255]),
        ("yellow", [255, 255, 0]),
        ("cyan", [0, 255, 255]),
        ("aqua", [0, 255, 255]),
        ("magenta", [255, 0, 255]),
        ("fuchsia", [255, 0, 255]),
        ("gray", [128, 128, 128]),
        ("grey", [128, 128, 128]),
        ("lightgray", [211, 211, 211]),
        ("lightgrey", [211, 211, 211]),
        ("darkgray", [169, 169, 169]),
        ("darkgrey", [169, 169, 169]),
        ("dimgray", [105, 105, 105]),
        ("silver", [192, 192, 192]),
        ("orange", [255, 165, 0]),
        ("purple", [128, 0, 128]),
        ("violet", [238, 130, 238]),
        ("indigo", [75, 0, 130]),
        ("pink", [255, 192, 203]),
        ("brown", [165, 42, 42]),
        ("maroon", [128, 0, 0]),
        ("olive", [128, 128, 0]),
        ("navy", [0, 0, 128]),
        ("teal", [0, 128, 128]),
        ("gold", [255, 215, 0]),
        ("coral", [255, 127, 80]),
        ("salmon", [250, 128, 114]),
        ("tomato", [255, 99, 71]),
        ("crimson", [220, 20, 60]),
        ("darkred", [139, 0, 0]),
        ("darkgreen", [0, 100, 0]),
        ("darkblue", [0, 0, 139]),
        ("lightblue", [173, 216, 230]),
        ("lightgreen", [144, 238, 144]),
        ("skyblue", [135, 206, 235]),
        ("royalblue", [65, 105, 225]),
        ("steelblue", [70, 130, 180]),
        ("firebrick", [178, 34, 34]),
        ("orangered", [255, 69, 0]),
    ];
    table
        .iter()
        .map(|(name, [r, g, b])| (*name, Color32::from_rgb(*r, *g, *b)))
        .collect()
});

/// Parse a CSS colour: a named colour, `#rgb`, `#rrggbb`, `rgb(r, g, b)` or
/// `rgba(r, g, b, a)` with `a` in `0..=1`. Names are case-insensitive.
pub fn parse_css_color(text: &str) -> Option<Color32> {
    let s = text.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        let parts = split_args(args)?;
        let &[r, g, b, a] = parts.as_slice() else {
            return None;
        };
        let alpha = (a.clamp(0.0, 1.0) * 255.0).round() as u8;
        return Some(Color32::from_rgba_unmultiplied(
            channel(r),
            channel(g),
            channel(b),
            alpha,
        ));
    }
    if let Some(args) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        let parts = split_args(args)?;
        let &[r, g, b] = parts.as_slice() else {
            return None;
        };
        return Some(Color32::from_rgb(channel(r), channel(g), channel(b)));
    }
    NAMED_COLORS.get(s.as_str()).copied()
}

fn parse_hex(hex: &str) -> Option<Color32> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color32::from_rgb(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
        )),
        6 => Some(Color32::from_rgb(pair(0)?, pair(2)?, pair(4)?)),
        _ => None,
    }
}

fn split_args(args: &str) -> Option<Vec<f64>> {
    args.split(',')
        .map(|p| p.trim().parse::<f64>().ok())
        .collect()
}

fn channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hex_expands_each_digit() {
        assert_eq!(parse_hex("f0a"), Some(Color32::from_rgb(255, 0, 170)));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert_eq!(parse_hex("12345"), None);
        assert_eq!(parse_hex("zzzzzz"), None);
    }
}
