//! Native window for the calculator.
//!
//! | Sub-module         | Responsibility |
//! | ------------------ | -------------- |
//! | [`distcalc_app`]   | [`DistCalcApp`] (eframe) wrapper around the form controller |
//! | [`run`]            | [`run_distcalc()`] entry point |

mod distcalc_app;
mod run;

pub use distcalc_app::DistCalcApp;
pub use run::{run_distcalc, run_distcalc_with_client, RunError};
