//! Requests to and responses from the `calculate` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::numeric::{parse_strict, serialize_number, serialize_numbers};

/// Which calculation the backend should run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalcType {
    /// Plot the combined density and the probability mass over `[x_min, x_max]`.
    #[default]
    #[serde(rename = "x")]
    XRange,
    /// Find the X range whose cumulative probability reaches `y`.
    #[serde(rename = "y")]
    YValue,
}

impl CalcType {
    pub fn all() -> &'static [CalcType] {
        &[CalcType::XRange, CalcType::YValue]
    }

    /// Tag used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            CalcType::XRange => "x",
            CalcType::YValue => "y",
        }
    }
}

/// Mode-specific inputs; serialized flat next to `calc_type`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "calc_type")]
pub enum CalcBounds {
    #[serde(rename = "x")]
    XRange {
        #[serde(serialize_with = "serialize_number")]
        x_min: f64,
        #[serde(serialize_with = "serialize_number")]
        x_max: f64,
    },
    #[serde(rename = "y")]
    YValue {
        #[serde(serialize_with = "serialize_number")]
        y: f64,
    },
}

/// Body of a `calculate` request.
///
/// `{"combination": [..], "calc_type": "x", "x_min": .., "x_max": ..}` or
/// `{"combination": [..], "calc_type": "y", "y": ..}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationRequest {
    #[serde(serialize_with = "serialize_numbers")]
    pub combination: Vec<f64>,
    #[serde(flatten)]
    pub bounds: CalcBounds,
}

impl CalculationRequest {
    pub fn x_range(combination: Vec<f64>, x_min: f64, x_max: f64) -> Self {
        Self {
            combination,
            bounds: CalcBounds::XRange { x_min, x_max },
        }
    }

    pub fn y_value(combination: Vec<f64>, y: f64) -> Self {
        Self {
            combination,
            bounds: CalcBounds::YValue { y },
        }
    }

    pub fn calc_type(&self) -> CalcType {
        match self.bounds {
            CalcBounds::XRange { .. } => CalcType::XRange,
            CalcBounds::YValue { .. } => CalcType::YValue,
        }
    }
}

/// Split the combination field on whitespace and read every token strictly.
///
/// `"1 2 3"` gives `[1, 2, 3]`, `"1 x 3"` gives `[1, NaN, 3]`.
pub fn parse_combination(text: &str) -> Vec<f64> {
    text.split_whitespace().map(parse_strict).collect()
}

/// Response body that does not fit the expected shape.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ResponseError {
    #[error("response body is not a JSON object")]
    NotAnObject,
    #[error("response has no `plot` field")]
    MissingPlot,
    #[error("response field `{0}` has an unexpected type")]
    InvalidField(&'static str),
}

/// Interpreted response of the `calculate` endpoint.
#[derive(Clone, Debug, PartialEq)]
pub enum CalculationResult {
    /// The backend reported `status: "error"`.
    Failed { message: Option<String> },
    /// Mode `x`: a JSON-encoded figure and, if reported, the probability mass.
    Figure {
        plot: String,
        probability: Option<f64>,
    },
    /// Mode `y`: the bounds found (either may be missing) and an optional figure.
    Range {
        x_min: Option<f64>,
        x_max: Option<f64>,
        plot: Option<String>,
    },
}

impl CalculationResult {
    /// Interpret a decoded response body for a request of type `calc_type`.
    pub fn interpret(calc_type: CalcType, body: &Value) -> Result<Self, ResponseError> {
        let obj = body.as_object().ok_or(ResponseError::NotAnObject)?;

        if obj.get("status").and_then(Value::as_str) == Some("error") {
            let message = obj
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string);
            return Ok(CalculationResult::Failed { message });
        }

        match calc_type {
            CalcType::XRange => {
                let plot = optional_str(obj.get("plot"), "plot")?
                    .ok_or(ResponseError::MissingPlot)?;
                let probability = optional_number(obj.get("probability"), "probability")?;
                Ok(CalculationResult::Figure { plot, probability })
            }
            CalcType::YValue => Ok(CalculationResult::Range {
                x_min: optional_number(obj.get("x_min"), "x_min")?,
                x_max: optional_number(obj.get("x_max"), "x_max")?,
                plot: optional_str(obj.get("plot"), "plot")?,
            }),
        }
    }
}

fn optional_number(v: Option<&Value>, field: &'static str) -> Result<Option<f64>, ResponseError> {
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or(ResponseError::InvalidField(field)),
    }
}

fn optional_str(v: Option<&Value>, field: &'static str) -> Result<Option<String>, ResponseError> {
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ResponseError::InvalidField(field)),
    }
}
