//! egui rendering of the forms, the result panel, the figure and alerts.
//!
//! Panels draw from explicit references to the state they show and report
//! user actions as [`FormEvent`](crate::controllers::FormEvent)s.

pub mod calculations_ui;
pub mod notice_ui;
pub mod parameters_ui;
pub mod plot_ui;
pub mod result_ui;

pub use calculations_ui::calculations_ui;
pub use notice_ui::{notice_window, status_line};
pub use parameters_ui::parameters_ui;
pub use plot_ui::plot_ui;
pub use result_ui::result_ui;
