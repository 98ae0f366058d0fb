//! Figures returned by the `calculate` endpoint.
//!
//! The backend sends a JSON-encoded figure `{"data": [...], "layout": {...}}`
//! inside a string field. Only the parts needed to redraw it are decoded:
//! scatter traces (lines, markers, fill to zero), the titles, and vertical
//! line shapes with their annotation labels. Unknown keys are ignored.

use eframe::egui::Color32;
use serde_json::{Map, Value};

use super::color::parse_css_color;
use super::trace_look::TraceLook;

#[derive(Debug, thiserror::Error)]
pub enum FigureError {
    #[error("figure is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("figure is not a JSON object")]
    NotAnObject,
    #[error("figure has no `data` array")]
    MissingData,
    #[error("trace {index}: {reason}")]
    BadTrace { index: usize, reason: String },
}

/// One drawable trace. `null` values split the trace into segments.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureTrace {
    pub name: String,
    pub segments: Vec<Vec<[f64; 2]>>,
    pub look: TraceLook,
}

impl FigureTrace {
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

/// A vertical line at `x`, e.g. the solved bound of a `y` calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalMarker {
    pub x: f64,
    pub label: Option<String>,
    pub look: TraceLook,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    pub traces: Vec<FigureTrace>,
    pub title: Option<String>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub markers: Vec<VerticalMarker>,
}

impl Figure {
    pub fn from_json_str(text: &str) -> Result<Self, FigureError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, FigureError> {
        let obj = value.as_object().ok_or(FigureError::NotAnObject)?;
        let data = obj
            .get("data")
            .and_then(Value::as_array)
            .ok_or(FigureError::MissingData)?;

        let traces = data
            .iter()
            .enumerate()
            .map(|(index, t)| parse_trace(index, t))
            .collect::<Result<Vec<_>, _>>()?;

        let empty = Map::new();
        let layout = obj
            .get("layout")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        Ok(Figure {
            traces,
            title: layout.get("title").and_then(title_text),
            x_title: axis_title(layout, "xaxis"),
            y_title: axis_title(layout, "yaxis"),
            markers: parse_markers(layout),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.traces.iter().all(|t| t.point_count() == 0) && self.markers.is_empty()
    }
}

fn parse_trace(index: usize, value: &Value) -> Result<FigureTrace, FigureError> {
    let bad = |reason: &str| FigureError::BadTrace {
        index,
        reason: reason.to_string(),
    };
    let obj = value.as_object().ok_or_else(|| bad("not an object"))?;

    let ys = obj
        .get("y")
        .map(|v| numeric_array(v).ok_or_else(|| bad("`y` is not a plain array")))
        .transpose()?
        .ok_or_else(|| bad("missing `y` values"))?;
    // Without `x`, points are placed at their index.
    let xs = match obj.get("x") {
        Some(v) => numeric_array(v).ok_or_else(|| bad("`x` is not a plain array"))?,
        None => (0..ys.len()).map(|i| Some(i as f64)).collect(),
    };

    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (x, y) in xs.iter().zip(ys.iter()) {
        match (x, y) {
            (Some(x), Some(y)) => current.push([*x, *y]),
            _ if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            _ => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    let mut look = TraceLook::new(index);
    let line = obj.get("line").and_then(Value::as_object);
    if let Some(line) = line {
        if let Some(c) = line.get("color").and_then(Value::as_str).and_then(parse_css_color) {
            look.color = c;
        }
        if let Some(w) = line.get("width").and_then(Value::as_f64) {
            look.width = w as f32;
        }
        if let Some(dash) = line.get("dash").and_then(Value::as_str) {
            look.style = TraceLook::style_for_dash(dash);
        }
    }
    let mode = obj.get("mode").and_then(Value::as_str).unwrap_or("lines");
    look.show_line = mode.contains("lines");
    look.show_points = mode.contains("markers");
    if let Some(size) = obj
        .get("marker")
        .and_then(|m| m.get("size"))
        .and_then(Value::as_f64)
    {
        look.point_size = (size / 2.0) as f32;
    }
    if obj.get("fill").and_then(Value::as_str) == Some("tozeroy") {
        let fill = obj
            .get("fillcolor")
            .and_then(Value::as_str)
            .and_then(parse_css_color)
            .unwrap_or_else(|| TraceLook::default_fill(look.color));
        look.fill = Some(fill);
    }

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("trace {index}"));

    Ok(FigureTrace {
        name,
        segments,
        look,
    })
}

/// Plain JSON array of numbers or nulls. Anything else in the array is a gap;
/// non-arrays (such as binary-encoded typed arrays) yield `None`.
fn numeric_array(value: &Value) -> Option<Vec<Option<f64>>> {
    let arr = value.as_array()?;
    Some(arr.iter().map(Value::as_f64).collect())
}

/// Titles are either a plain string or `{"text": ...}`.
fn title_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => o.get("text").and_then(Value::as_str).map(str::to_string),
        _ => None,
    };
    text.filter(|s| !s.is_empty())
}

fn axis_title(layout: &Map<String, Value>, axis: &str) -> Option<String> {
    layout
        .get(axis)
        .and_then(|a| a.get("title"))
        .and_then(title_text)
}

fn parse_markers(layout: &Map<String, Value>) -> Vec<VerticalMarker> {
    let Some(shapes) = layout.get("shapes").and_then(Value::as_array) else {
        return Vec::new();
    };
    let annotations: Vec<(f64, String)> = layout
        .get("annotations")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|a| {
                    let x = a.get("x")?.as_f64()?;
                    let text = a.get("text")?.as_str()?;
                    Some((x, text.to_string()))
                })
                .collect()
        })
        .unwrap_or_default();

    shapes
        .iter()
        .filter(|s| s.get("type").and_then(Value::as_str).unwrap_or("line") == "line")
        .filter_map(|s| {
            let x0 = s.get("x0")?.as_f64()?;
            let x1 = s.get("x1")?.as_f64()?;
            if (x0 - x1).abs() > f64::EPSILON * x0.abs().max(1.0) {
                return None;
            }
            let mut look = TraceLook {
                color: Color32::RED,
                ..Default::default()
            };
            if let Some(line) = s.get("line") {
                if let Some(c) = line.get("color").and_then(Value::as_str).and_then(parse_css_color)
                {
                    look.color = c;
                }
                if let Some(dash) = line.get("dash").and_then(Value::as_str) {
                    look.style = TraceLook::style_for_dash(dash);
                }
            }
            let label = annotations
                .iter()
                .find(|(ax, _)| (ax - x0).abs() <= 1e-9 * x0.abs().max(1.0))
                .map(|(_, text)| text.clone());
            Some(VerticalMarker { x: x0, label, look })
        })
        .collect()
}
