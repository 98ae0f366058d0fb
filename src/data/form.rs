//! Editable form state for the two forms.
//!
//! Fields keep the raw text the user typed; numbers are only read when a
//! request is built. Which sub-form is visible follows the selectors: each
//! slot shows exactly one parameter block, and the calculation form shows
//! either the X range inputs or the Y input.

use super::calculation::{parse_combination, CalcType, CalculationRequest};
use super::distribution::{DistributionType, ParameterEntry, ParameterSet, SLOT_COUNT};
use super::numeric::{format_plain, parse_lenient};

/// A value built from form text, plus the fields whose text was not a number.
///
/// Unreadable fields are carried as `NaN` in `value`. Infinite values are
/// listed as well, since they travel as `null` too.
#[derive(Clone, Debug)]
pub struct Parsed<T> {
    pub value: T,
    pub unparsed: Vec<String>,
}

impl<T> Parsed<T> {
    pub fn is_clean(&self) -> bool {
        self.unparsed.is_empty()
    }
}

/// Parameter block of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamBlock {
    Normal,
    Exponential,
}

impl ParamBlock {
    pub fn for_type(kind: DistributionType) -> Self {
        match kind {
            DistributionType::Normal => ParamBlock::Normal,
            DistributionType::Exponential => ParamBlock::Exponential,
        }
    }
}

/// Input group of the calculation form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalcInputs {
    XRange,
    YValue,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parameters form
// ─────────────────────────────────────────────────────────────────────────────

/// Form fields of one distribution slot. Text of the hidden block is kept.
#[derive(Clone, Debug, PartialEq)]
pub struct DistributionSlot {
    pub kind: DistributionType,
    pub mean: String,
    pub std: String,
    pub lambda: String,
}

impl Default for DistributionSlot {
    fn default() -> Self {
        Self {
            kind: DistributionType::Normal,
            mean: "0".to_string(),
            std: "1".to_string(),
            lambda: "1".to_string(),
        }
    }
}

impl DistributionSlot {
    /// Prefill from a stored entry; the other block keeps its defaults.
    pub fn from_entry(entry: &ParameterEntry) -> Self {
        let mut slot = Self::default();
        match *entry {
            ParameterEntry::Normal { mean, std } => {
                slot.kind = DistributionType::Normal;
                slot.mean = format_plain(mean);
                slot.std = format_plain(std);
            }
            ParameterEntry::Exponential { lambda } => {
                slot.kind = DistributionType::Exponential;
                slot.lambda = format_plain(lambda);
            }
        }
        slot
    }

    pub fn visible_block(&self) -> ParamBlock {
        ParamBlock::for_type(self.kind)
    }

    pub fn is_visible(&self, block: ParamBlock) -> bool {
        self.visible_block() == block
    }

    /// Read the visible block only.
    fn build(&self, index: usize, unparsed: &mut Vec<String>) -> ParameterEntry {
        let mut read = |name: &str, text: &str| {
            let v = parse_lenient(text);
            if !v.is_finite() {
                unparsed.push(format!("{name}-{index}"));
            }
            v
        };
        match self.kind {
            DistributionType::Normal => {
                let mean = read("mean", &self.mean);
                let std = read("std", &self.std);
                ParameterEntry::Normal { mean, std }
            }
            DistributionType::Exponential => ParameterEntry::Exponential {
                lambda: read("lambda", &self.lambda),
            },
        }
    }
}

/// The parameters form: one [`DistributionSlot`] per slot index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParametersForm {
    pub slots: [DistributionSlot; SLOT_COUNT],
}

impl ParametersForm {
    /// Prefill from a parameter set; missing slots get the defaults.
    pub fn from_parameter_set(set: &ParameterSet) -> Self {
        let mut form = Self::default();
        for (index, entry) in set.iter() {
            if let Some(slot) = form.slots.get_mut(index) {
                *slot = DistributionSlot::from_entry(entry);
            }
        }
        form
    }

    /// Switch the type of slot `index`. Returns `false` for an unknown slot.
    pub fn set_distribution_type(&mut self, index: usize, kind: DistributionType) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                slot.kind = kind;
                true
            }
            None => {
                log::warn!("ignoring type change for unknown slot {index}");
                false
            }
        }
    }

    pub fn visible_block(&self, index: usize) -> Option<ParamBlock> {
        self.slots.get(index).map(DistributionSlot::visible_block)
    }

    /// Build the parameter set from the current field texts.
    pub fn build(&self) -> Parsed<ParameterSet> {
        let mut unparsed = Vec::new();
        let mut set = ParameterSet::new();
        for (index, slot) in self.slots.iter().enumerate() {
            set.insert(index, slot.build(index, &mut unparsed));
        }
        Parsed {
            value: set,
            unparsed,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Calculations form
// ─────────────────────────────────────────────────────────────────────────────

/// The calculations form.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationsForm {
    pub calc_type: CalcType,
    /// Whitespace-separated combination, e.g. `"0 1 1"`.
    pub combination: String,
    pub x_min: String,
    pub x_max: String,
    pub y: String,
}

impl Default for CalculationsForm {
    fn default() -> Self {
        Self {
            calc_type: CalcType::XRange,
            combination: String::new(),
            x_min: String::new(),
            x_max: String::new(),
            y: String::new(),
        }
    }
}

impl CalculationsForm {
    pub fn with_calc_type(calc_type: CalcType) -> Self {
        Self {
            calc_type,
            ..Default::default()
        }
    }

    pub fn set_calc_type(&mut self, calc_type: CalcType) {
        self.calc_type = calc_type;
    }

    pub fn visible_inputs(&self) -> CalcInputs {
        match self.calc_type {
            CalcType::XRange => CalcInputs::XRange,
            CalcType::YValue => CalcInputs::YValue,
        }
    }

    /// Build the request from the current field texts.
    ///
    /// Only the inputs of the selected mode are read.
    pub fn build(&self) -> Parsed<CalculationRequest> {
        let mut unparsed = Vec::new();
        let combination = parse_combination(&self.combination);
        for (i, v) in combination.iter().enumerate() {
            if !v.is_finite() {
                unparsed.push(format!("combination[{i}]"));
            }
        }

        let mut read = |name: &str, text: &str| {
            let v = parse_lenient(text);
            if !v.is_finite() {
                unparsed.push(name.to_string());
            }
            v
        };
        let value = match self.calc_type {
            CalcType::XRange => {
                let x_min = read("x-min", &self.x_min);
                let x_max = read("x-max", &self.x_max);
                CalculationRequest::x_range(combination, x_min, x_max)
            }
            CalcType::YValue => {
                let y = read("y-value", &self.y);
                CalculationRequest::y_value(combination, y)
            }
        };
        Parsed { value, unparsed }
    }
}
