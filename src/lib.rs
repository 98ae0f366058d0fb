//! distcalc crate root: re-exports and module wiring.
//!
//! A desktop client for a distribution calculator service. Four distribution
//! slots (normal or exponential) are saved to the backend, then combined in a
//! calculation that returns either a figure or a solved X range.
//!
//! - `data`: form state, wire types, figure decoding (no UI)
//! - `client`: typed HTTP client over a pluggable transport
//! - `controllers`: form events, async dispatch, result handling
//! - `panels`: egui rendering
//! - `app`: native window and `run_distcalc`
//! - `config`: configuration, YAML config file, messages

pub mod app;
pub mod client;
pub mod color_scheme;
pub mod config;
pub mod controllers;
pub mod data;
pub mod panels;

pub use app::{run_distcalc, run_distcalc_with_client, DistCalcApp, RunError};
pub use client::{ApiClient, ClientError, HttpReply, HttpTransport, Transport, TransportFuture};
pub use color_scheme::ColorScheme;
pub use config::{ConfigError, DistCalcConfig, Language, Messages, ServerConfig};
pub use controllers::{Completion, FormController, FormEvent, Outcome};
pub use data::calculation::{parse_combination, CalcType, CalculationRequest, CalculationResult};
pub use data::distribution::{DistributionType, ParameterEntry, ParameterSet, SLOT_COUNT};
pub use data::figure::{Figure, FigureError};
pub use data::form::{CalcInputs, CalculationsForm, ParamBlock, ParametersForm, Parsed};
