use distcalc::data::figure::{Figure, FigureError};
use eframe::egui::Color32;
use egui_plot::LineStyle;

const DENSITY_FIGURE: &str = r##"{
  "data": [
    {"type": "scatter", "mode": "lines", "name": "density",
     "x": [0, 1, 2, 3], "y": [0.1, 0.4, 0.3, 0.05],
     "line": {"color": "blue", "width": 3}},
    {"type": "scatter", "mode": "lines", "name": "mass",
     "x": [1, 1.5, 2], "y": [0.4, 0.35, 0.3],
     "fill": "tozeroy", "fillcolor": "rgba(255, 0, 0, 0.5)"}
  ],
  "layout": {
    "title": {"text": "Combined density"},
    "xaxis": {"title": "x"},
    "yaxis": {"title": {"text": "f(x)"}},
    "shapes": [
      {"type": "line", "x0": 1, "x1": 1, "y0": 0, "y1": 1, "line": {"color": "#00ff00", "dash": "dash"}},
      {"type": "line", "x0": 2, "x1": 2, "y0": 0, "y1": 1},
      {"type": "rect", "x0": 0, "x1": 3, "y0": 0, "y1": 1}
    ],
    "annotations": [{"x": 1, "y": 1, "text": "x_min"}]
  }
}"##;

#[test]
fn decodes_traces_titles_and_markers() {
    let fig = Figure::from_json_str(DENSITY_FIGURE).unwrap();
    assert_eq!(fig.traces.len(), 2);
    assert_eq!(fig.title.as_deref(), Some("Combined density"));
    assert_eq!(fig.x_title.as_deref(), Some("x"));
    assert_eq!(fig.y_title.as_deref(), Some("f(x)"));
    assert!(!fig.is_empty());

    let density = &fig.traces[0];
    assert_eq!(density.name, "density");
    assert_eq!(density.segments, vec![vec![[0.0, 0.1], [1.0, 0.4], [2.0, 0.3], [3.0, 0.05]]]);
    assert_eq!(density.look.color, Color32::from_rgb(0, 0, 255));
    assert_eq!(density.look.width, 3.0);
    assert!(density.look.show_line);
    assert!(!density.look.show_points);
    assert_eq!(density.look.fill, None);

    let mass = &fig.traces[1];
    assert_eq!(mass.point_count(), 3);
    assert_eq!(
        mass.look.fill,
        Some(Color32::from_rgba_unmultiplied(255, 0, 0, 128))
    );

    assert_eq!(fig.markers.len(), 2);
    assert_eq!(fig.markers[0].x, 1.0);
    assert_eq!(fig.markers[0].label.as_deref(), Some("x_min"));
    assert_eq!(fig.markers[0].look.color, Color32::from_rgb(0, 255, 0));
    assert_eq!(fig.markers[0].look.style, LineStyle::Dashed { length: 8.0 });
    assert_eq!(fig.markers[1].x, 2.0);
    assert_eq!(fig.markers[1].label, None);
    assert_eq!(fig.markers[1].look.color, Color32::RED);
}

#[test]
fn nulls_split_a_trace_into_segments() {
    let fig = Figure::from_json_str(
        r#"{"data": [{"x": [0, 1, 2, 3, 4], "y": [1, 2, null, 4, 5]}]}"#,
    )
    .unwrap();
    let trace = &fig.traces[0];
    assert_eq!(trace.segments, vec![vec![[0.0, 1.0], [1.0, 2.0]], vec![[3.0, 4.0], [4.0, 5.0]]]);
    assert_eq!(trace.name, "trace 0");
}

#[test]
fn missing_x_uses_point_index() {
    let fig = Figure::from_json_str(r#"{"data": [{"y": [5, 6], "mode": "lines+markers"}]}"#).unwrap();
    let trace = &fig.traces[0];
    assert_eq!(trace.segments, vec![vec![[0.0, 5.0], [1.0, 6.0]]]);
    assert!(trace.look.show_line);
    assert!(trace.look.show_points);
}

#[test]
fn fill_without_colour_uses_translucent_trace_colour() {
    let fig = Figure::from_json_str(
        r#"{"data": [{"y": [1, 2], "fill": "tozeroy", "line": {"color": "red"}}]}"#,
    )
    .unwrap();
    assert_eq!(
        fig.traces[0].look.fill,
        Some(Color32::from_rgba_unmultiplied(255, 0, 0, 50))
    );
}

#[test]
fn figure_without_layout_has_no_titles() {
    let fig = Figure::from_json_str(r#"{"data": []}"#).unwrap();
    assert!(fig.traces.is_empty());
    assert!(fig.title.is_none());
    assert!(fig.markers.is_empty());
    assert!(fig.is_empty());
}

#[test]
fn malformed_figures_are_rejected() {
    assert!(matches!(Figure::from_json_str("not json"), Err(FigureError::Json(_))));
    assert!(matches!(Figure::from_json_str("[]"), Err(FigureError::NotAnObject)));
    assert!(matches!(
        Figure::from_json_str(r#"{"layout": {}}"#),
        Err(FigureError::MissingData)
    ));
    assert!(matches!(
        Figure::from_json_str(r#"{"data": [{"x": [1, 2]}]}"#),
        Err(FigureError::BadTrace { index: 0, .. })
    ));
    assert!(matches!(
        Figure::from_json_str(r#"{"data": [{"y": [1]}, {"y": {"bdata": "AAA="}}]}"#),
        Err(FigureError::BadTrace { index: 1, .. })
    ));
}

#[test]
fn fill_opacity_follows_fillcolor_alpha() {
    let fig = Figure::from_json_str(
        r#"{"data": [{"y": [1, 2], "fill": "tozeroy", "fillcolor": "rgba(0, 176, 246, 0.2)"}]}"#,
    )
    .unwrap();
    let (color, alpha) = fig.traces[0].look.fill_parts().unwrap();
    assert!((alpha - 0.2).abs() < 0.01);
    assert_eq!(color.a(), 255);
    assert!(color.b() > color.g() && color.g() > color.r());

    let opaque = Figure::from_json_str(
        r#"{"data": [{"y": [1, 2], "fill": "tozeroy", "fillcolor": "blue"}]}"#,
    )
    .unwrap();
    assert_eq!(
        opaque.traces[0].look.fill_parts(),
        Some((Color32::from_rgb(0, 0, 255), 1.0))
    );
    assert_eq!(fig.traces[0].look.fill.map(|c| c.a()), Some(51));
}
