//! The form controller: reacts to form events, runs requests off the UI
//! thread, and applies their results to the views.
//!
//! Requests are spawned on a small tokio runtime owned by the controller.
//! Each finished request sends a [`Completion`] back over a channel; the UI
//! drains it with [`FormController::pump`] at the start of every frame, so all
//! view state is only ever touched from the UI thread. Overlapping requests
//! are not coordinated: whichever completes last writes last.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use crate::client::{ApiClient, ClientError};
use crate::config::{DistCalcConfig, Messages};
use crate::data::calculation::{CalcType, CalculationResult};
use crate::data::distribution::DistributionType;
use crate::data::feedback::{NoticeLevel, Notifications, ResultView};
use crate::data::figure::Figure;
use crate::data::form::{CalculationsForm, ParametersForm, Parsed};

/// Something the user did in the forms.
#[derive(Clone, Debug, PartialEq)]
pub enum FormEvent {
    DistributionTypeChanged {
        index: usize,
        kind: DistributionType,
    },
    CalcTypeChanged(CalcType),
    SubmitParameters,
    SubmitCalculation,
    DismissNotice,
}

/// A finished request, as delivered to the UI thread.
#[derive(Debug)]
pub enum Completion {
    ParametersSaved(Result<(), ClientError>),
    Calculated {
        calc_type: CalcType,
        result: Result<CalculationResult, ClientError>,
    },
}

/// What applying a [`Completion`] did to the views. Published to subscribers.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    ParametersSaved,
    ParametersRejected { status: u16 },
    SendFailed,
    /// Alert shown, views untouched.
    CalculationFailed { message: String },
    PlotShown,
    RangeShown { x_min: String, x_max: String },
    NoRange,
}

/// Callback asking the UI to redraw (e.g. `egui::Context::request_repaint`).
pub type RepaintFn = Arc<dyn Fn() + Send + Sync>;

pub struct FormController {
    pub parameters: ParametersForm,
    pub calculations: CalculationsForm,
    pub result: ResultView,
    pub figure: Option<Figure>,
    pub notifications: Notifications,
    messages: Messages,
    client: ApiClient,
    runtime: tokio::runtime::Runtime,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    repaint: Option<RepaintFn>,
    listeners: Vec<Sender<Outcome>>,
    in_flight: usize,
    figure_generation: u64,
}

impl FormController {
    pub fn new(cfg: &DistCalcConfig, client: ApiClient) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("distcalc-net")
            .enable_all()
            .build()?;
        let (tx, rx) = std::sync::mpsc::channel();
        Ok(Self {
            parameters: ParametersForm::from_parameter_set(&cfg.initial_parameters),
            calculations: CalculationsForm::with_calc_type(cfg.initial_calc_type),
            result: ResultView::Empty,
            figure: None,
            notifications: Notifications::new(),
            messages: cfg.messages.clone(),
            client,
            runtime,
            tx,
            rx,
            repaint: None,
            listeners: Vec::new(),
            in_flight: 0,
            figure_generation: 0,
        })
    }

    pub fn set_repaint(&mut self, repaint: RepaintFn) {
        self.repaint = Some(repaint);
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Bumped every time a new figure replaces the shown one.
    pub fn figure_generation(&self) -> u64 {
        self.figure_generation
    }

    /// Number of requests sent but not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Subscribe to outcomes. The receiver gets one [`Outcome`] per applied completion.
    pub fn subscribe(&mut self) -> Receiver<Outcome> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    pub fn handle(&mut self, event: FormEvent) {
        match event {
            FormEvent::DistributionTypeChanged { index, kind } => {
                self.parameters.set_distribution_type(index, kind);
            }
            FormEvent::CalcTypeChanged(calc_type) => self.calculations.set_calc_type(calc_type),
            FormEvent::SubmitParameters => self.submit_parameters(),
            FormEvent::SubmitCalculation => self.submit_calculation(),
            FormEvent::DismissNotice => {
                self.notifications.dismiss();
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────────

    fn submit_parameters(&mut self) {
        let parameters = self.parameters.build();
        self.flag_unparsed(&parameters);
        let parameters = parameters.value;
        log::info!("saving parameters for {} slots", parameters.len());

        let client = self.client.clone();
        self.dispatch(async move {
            Completion::ParametersSaved(client.save_parameters(&parameters).await)
        });
    }

    fn submit_calculation(&mut self) {
        let request = self.calculations.build();
        self.flag_unparsed(&request);
        let request = request.value;
        let calc_type = request.calc_type();
        log::info!(
            "requesting calculation `{}` over {} combination entries",
            calc_type.as_str(),
            request.combination.len()
        );

        let client = self.client.clone();
        self.dispatch(async move {
            Completion::Calculated {
                calc_type,
                result: client.calculate(&request).await,
            }
        });
    }

    /// Unreadable fields still go out (as `null`), but the user is told.
    fn flag_unparsed<T>(&mut self, parsed: &Parsed<T>) {
        if parsed.is_clean() {
            return;
        }
        log::warn!("fields sent as null: {}", parsed.unparsed.join(", "));
        let text = self.messages.format_unparsed(&parsed.unparsed);
        self.notifications.push(NoticeLevel::Warning, text);
    }

    fn dispatch<F>(&mut self, request: F)
    where
        F: std::future::Future<Output = Completion> + Send + 'static,
    {
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        self.in_flight += 1;
        self.runtime.spawn(async move {
            let completion = request.await;
            // The controller may be gone; nothing to deliver to then.
            if tx.send(completion).is_ok() {
                if let Some(repaint) = repaint {
                    repaint();
                }
            }
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Completion handling
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply every completion that has arrived. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Wait up to `timeout` for at least one completion, then apply all that
    /// have arrived. For callers without a frame loop.
    pub fn pump_timeout(&mut self, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => {
                self.apply(completion);
                1 + self.pump()
            }
            Err(_) => 0,
        }
    }

    fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let outcome = match completion {
            Completion::ParametersSaved(result) => self.apply_saved(result),
            Completion::Calculated { calc_type, result } => self.apply_calculated(calc_type, result),
        };
        log::info!("request finished: {outcome:?}");
        self.listeners.retain(|l| l.send(outcome.clone()).is_ok());
    }

    fn apply_saved(&mut self, result: Result<(), ClientError>) -> Outcome {
        match result {
            Ok(()) => {
                self.notifications
                    .push(NoticeLevel::Info, self.messages.parameters_saved.clone());
                Outcome::ParametersSaved
            }
            Err(ClientError::Status(status)) => {
                log::warn!("saving parameters rejected with status {status}");
                self.notifications
                    .push(NoticeLevel::Error, self.messages.parameters_save_failed.clone());
                Outcome::ParametersRejected { status }
            }
            Err(e) => {
                log::error!("saving parameters failed: {e}");
                self.notifications
                    .push(NoticeLevel::Error, self.messages.send_failed.clone());
                Outcome::SendFailed
            }
        }
    }

    fn apply_calculated(
        &mut self,
        calc_type: CalcType,
        result: Result<CalculationResult, ClientError>,
    ) -> Outcome {
        let result = match result {
            Ok(result) => result,
            Err(e) => {
                log::error!("calculation request failed: {e}");
                return self.calculation_failed(self.messages.calculation_failed.clone());
            }
        };

        match (calc_type, result) {
            (_, CalculationResult::Failed { message }) => {
                let message = message.unwrap_or_else(|| self.messages.calculation_error.clone());
                log::warn!("calculation rejected by server: {message}");
                self.calculation_failed(message)
            }
            (CalcType::XRange, CalculationResult::Figure { plot, probability }) => {
                match Figure::from_json_str(&plot) {
                    Ok(figure) => {
                        log::debug!("figure with {} traces", figure.traces.len());
                        self.show_figure(figure);
                        self.result = ResultView::from_probability(probability);
                        Outcome::PlotShown
                    }
                    Err(e) => {
                        log::error!("cannot decode figure: {e}");
                        self.calculation_failed(self.messages.calculation_failed.clone())
                    }
                }
            }
            (CalcType::YValue, CalculationResult::Range { x_min, x_max, plot }) => {
                if let Some(plot) = plot {
                    match Figure::from_json_str(&plot) {
                        Ok(figure) => self.show_figure(figure),
                        Err(e) => log::warn!("ignoring undecodable figure: {e}"),
                    }
                }
                self.result = ResultView::from_bounds(x_min, x_max);
                match &self.result {
                    ResultView::Range { x_min, x_max } => Outcome::RangeShown {
                        x_min: x_min.clone(),
                        x_max: x_max.clone(),
                    },
                    _ => Outcome::NoRange,
                }
            }
            (calc_type, other) => {
                log::error!(
                    "result {other:?} does not match calculation `{}`",
                    calc_type.as_str()
                );
                self.calculation_failed(self.messages.calculation_failed.clone())
            }
        }
    }

    fn show_figure(&mut self, figure: Figure) {
        self.figure = Some(figure);
        self.figure_generation += 1;
    }

    fn calculation_failed(&mut self, message: String) -> Outcome {
        self.notifications.push(NoticeLevel::Error, message.clone());
        Outcome::CalculationFailed { message }
    }
}
