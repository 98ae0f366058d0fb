//! What the user is told: queued alerts and the result panel.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use super::numeric::format_fixed;

/// Number of past notices kept for the status bar.
const HISTORY_LEN: usize = 20;

/// Decimal places shown for solved bounds and probabilities.
pub const RESULT_DECIMALS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub at: DateTime<Local>,
}

/// Alerts waiting to be acknowledged, oldest first, plus a short history.
#[derive(Debug, Default)]
pub struct Notifications {
    pending: VecDeque<Notice>,
    history: VecDeque<Notice>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: NoticeLevel, text: impl Into<String>) {
        let notice = Notice {
            level,
            text: text.into(),
            at: Local::now(),
        };
        self.history.push_back(notice.clone());
        while self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }
        self.pending.push_back(notice);
    }

    /// The alert currently on screen.
    pub fn current(&self) -> Option<&Notice> {
        self.pending.front()
    }

    /// Acknowledge the current alert.
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.pending.pop_front()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Most recent notice last.
    pub fn history(&self) -> impl DoubleEndedIterator<Item = &Notice> {
        self.history.iter()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.history.back()
    }
}

/// Content of the result panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResultView {
    #[default]
    Empty,
    /// Solved X range, already formatted.
    Range { x_min: String, x_max: String },
    /// The backend found no X range for the requested probability.
    NoRange,
    /// Probability mass over the requested X range, already formatted.
    Probability { value: String },
}

impl ResultView {
    /// View for the bounds of a `y` calculation; a missing bound means no range.
    pub fn from_bounds(x_min: Option<f64>, x_max: Option<f64>) -> Self {
        match (x_min, x_max) {
            (Some(lo), Some(hi)) => ResultView::Range {
                x_min: format_fixed(lo, RESULT_DECIMALS),
                x_max: format_fixed(hi, RESULT_DECIMALS),
            },
            _ => ResultView::NoRange,
        }
    }

    pub fn from_probability(probability: Option<f64>) -> Self {
        match probability {
            Some(p) => ResultView::Probability {
                value: format_fixed(p, RESULT_DECIMALS),
            },
            None => ResultView::Empty,
        }
    }
}
