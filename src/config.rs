//! Configuration types for the calculator client.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color_scheme::ColorScheme;
use crate::data::calculation::CalcType;
use crate::data::distribution::ParameterSet;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid parameters file: {0}")]
    Json(#[from] serde_json::Error),
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Server endpoints
// ─────────────────────────────────────────────────────────────────────────────

/// Where the calculator backend lives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Scheme, host and port, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    pub save_parameters_path: String,
    pub calculate_path: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<f64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            save_parameters_path: "/save_parameters".to_string(),
            calculate_path: "/calculate".to_string(),
            timeout_secs: None,
        }
    }
}

impl ServerConfig {
    /// Absolute URL of an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Russian,
}

/// Every user-facing string. Missing keys in a config file fall back to English.
///
/// `range` uses the placeholders `{from}` and `{to}`, `probability` uses
/// `{value}`, `unparsed_fields` uses `{fields}`, `slot_title` uses `{n}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub parameters_saved: String,
    pub parameters_save_failed: String,
    pub send_failed: String,
    pub calculation_error: String,
    pub calculation_failed: String,
    pub no_suitable_range: String,
    pub range: String,
    pub probability: String,
    pub unparsed_fields: String,

    pub parameters_title: String,
    pub slot_title: String,
    pub distribution_type: String,
    pub normal: String,
    pub exponential: String,
    pub mean: String,
    pub std: String,
    pub lambda: String,
    pub save: String,

    pub calculations_title: String,
    pub combination: String,
    pub combination_hint: String,
    pub calc_type: String,
    pub calc_x: String,
    pub calc_y: String,
    pub x_min: String,
    pub x_max: String,
    pub y_value: String,
    pub calculate: String,

    pub result_title: String,
    pub plot_placeholder: String,
    pub ok: String,
    pub pending_requests: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

impl Messages {
    pub fn english() -> Self {
        Self {
            parameters_saved: "Parameters saved".into(),
            parameters_save_failed: "Failed to save parameters".into(),
            send_failed: "Failed to send data".into(),
            calculation_error: "An error occurred during the calculation".into(),
            calculation_failed: "Failed to perform the calculation".into(),
            no_suitable_range: "No suitable X range was found".into(),
            range: "X range: from {from} to {to}".into(),
            probability: "Probability: {value}".into(),
            unparsed_fields: "These fields are not numbers and will be sent empty: {fields}"
                .into(),

            parameters_title: "Distribution parameters".into(),
            slot_title: "Distribution {n}".into(),
            distribution_type: "Type".into(),
            normal: "Normal".into(),
            exponential: "Exponential".into(),
            mean: "Mean".into(),
            std: "Standard deviation".into(),
            lambda: "Lambda".into(),
            save: "Save parameters".into(),

            calculations_title: "Calculations".into(),
            combination: "Combination".into(),
            combination_hint: "Distribution indices separated by spaces, e.g. 0 1 1".into(),
            calc_type: "Calculation".into(),
            calc_x: "Probability over an X range".into(),
            calc_y: "X range for a probability".into(),
            x_min: "X min".into(),
            x_max: "X max".into(),
            y_value: "Probability".into(),
            calculate: "Calculate".into(),

            result_title: "Result".into(),
            plot_placeholder: "Run an X range calculation to see the plot".into(),
            ok: "OK".into(),
            pending_requests: "requests in flight".into(),
        }
    }

    pub fn russian() -> Self {
        Self {
            parameters_saved: "Параметры сохранены".into(),
            parameters_save_failed: "Ошибка при сохранении параметров".into(),
            send_failed: "Ошибка при отправке данных".into(),
            calculation_error: "Произошла ошибка при расчетах".into(),
            calculation_failed: "Ошибка при выполнении расчетов".into(),
            no_suitable_range: "Не удалось найти подходящий диапазон X".into(),
            range: "Диапазон X: от {from} до {to}".into(),
            probability: "Вероятность: {value}".into(),
            unparsed_fields: "Эти поля не являются числами и будут отправлены пустыми: {fields}"
                .into(),

            parameters_title: "Параметры распределений".into(),
            slot_title: "Распределение {n}".into(),
            distribution_type: "Тип".into(),
            normal: "Нормальное".into(),
            exponential: "Экспоненциальное".into(),
            mean: "Среднее".into(),
            std: "Стандартное отклонение".into(),
            lambda: "Лямбда".into(),
            save: "Сохранить параметры".into(),

            calculations_title: "Расчеты".into(),
            combination: "Комбинация".into(),
            combination_hint: "Индексы распределений через пробел, например 0 1 1".into(),
            calc_type: "Тип расчета".into(),
            calc_x: "Вероятность на диапазоне X".into(),
            calc_y: "Диапазон X по вероятности".into(),
            x_min: "X мин".into(),
            x_max: "X макс".into(),
            y_value: "Вероятность".into(),
            calculate: "Рассчитать".into(),

            result_title: "Результат".into(),
            plot_placeholder: "Выполните расчет по диапазону X, чтобы увидеть график".into(),
            ok: "OK".into(),
            pending_requests: "запросов выполняется".into(),
        }
    }

    pub fn for_language(language: Language) -> Self {
        match language {
            Language::English => Self::english(),
            Language::Russian => Self::russian(),
        }
    }

    pub fn format_range(&self, from: &str, to: &str) -> String {
        self.range.replace("{from}", from).replace("{to}", to)
    }

    pub fn format_probability(&self, value: &str) -> String {
        self.probability.replace("{value}", value)
    }

    pub fn format_unparsed(&self, fields: &[String]) -> String {
        self.unparsed_fields.replace("{fields}", &fields.join(", "))
    }

    /// Slot titles count from 1.
    pub fn format_slot_title(&self, index: usize) -> String {
        self.slot_title.replace("{n}", &(index + 1).to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DistCalcConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration of the calculator window.
#[derive(Clone)]
pub struct DistCalcConfig {
    /// Native window title.
    pub title: String,
    /// Optional headline rendered above the forms.
    pub headline: Option<String>,
    pub server: ServerConfig,
    pub messages: Messages,
    /// Values the parameters form starts with.
    pub initial_parameters: ParameterSet,
    pub initial_calc_type: CalcType,
    pub color_scheme: ColorScheme,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
}

impl std::fmt::Debug for DistCalcConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `eframe::NativeOptions` does not implement `Debug`.
        f.debug_struct("DistCalcConfig")
            .field("title", &self.title)
            .field("headline", &self.headline)
            .field("server", &self.server)
            .field("messages", &self.messages)
            .field("initial_parameters", &self.initial_parameters)
            .field("initial_calc_type", &self.initial_calc_type)
            .field("color_scheme", &self.color_scheme)
            .field("native_options", &self.native_options.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Default for DistCalcConfig {
    fn default() -> Self {
        Self {
            title: "Distribution calculator".to_string(),
            headline: None,
            server: ServerConfig::default(),
            messages: Messages::default(),
            initial_parameters: ParameterSet::standard(),
            initial_calc_type: CalcType::XRange,
            color_scheme: ColorScheme::default(),
            native_options: None,
        }
    }
}

/// Serializable mirror of [`DistCalcConfig`]; every key is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub title: Option<String>,
    pub headline: Option<String>,
    pub server: Option<ServerConfig>,
    pub language: Option<Language>,
    /// Overrides the language catalogue when present.
    pub messages: Option<Messages>,
    /// Same shape as a `save_parameters` request body. Slot keys may be
    /// quoted (`"0"`) or bare (`0`).
    pub initial_parameters: Option<ParameterSet>,
    pub initial_calc_type: Option<CalcType>,
    pub color_scheme: Option<ColorScheme>,
}

impl ConfigFile {
    /// Apply every key present in the file on top of `cfg`.
    pub fn apply_to(self, cfg: &mut DistCalcConfig) {
        if let Some(title) = self.title {
            cfg.title = title;
        }
        if self.headline.is_some() {
            cfg.headline = self.headline;
        }
        if let Some(server) = self.server {
            cfg.server = server;
        }
        if let Some(language) = self.language {
            cfg.messages = Messages::for_language(language);
        }
        if let Some(messages) = self.messages {
            cfg.messages = messages;
        }
        if let Some(mut params) = self.initial_parameters {
            params.retain_slots();
            cfg.initial_parameters = params;
        }
        if let Some(calc_type) = self.initial_calc_type {
            cfg.initial_calc_type = calc_type;
        }
        if let Some(scheme) = self.color_scheme {
            cfg.color_scheme = scheme;
        }
    }
}

impl DistCalcConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_yaml::from_str(text)?;
        let mut cfg = Self::default();
        file.apply_to(&mut cfg);
        Ok(cfg)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = read_file(path)?;
        log::info!("loading configuration from {}", path.display());
        Self::from_yaml_str(&text)
    }

    /// Use a stored parameters file (the JSON the backend keeps for saved
    /// parameters, same shape as a `save_parameters` body) as initial values.
    pub fn load_initial_parameters(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = read_file(path)?;
        let mut params: ParameterSet = serde_json::from_str(&text)?;
        params.retain_slots();
        log::info!(
            "loaded {} initial parameter entries from {}",
            params.len(),
            path.display()
        );
        self.initial_parameters = params;
        Ok(())
    }
}
