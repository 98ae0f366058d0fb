//! Distribution parameter sets exchanged with the `save_parameters` endpoint.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::numeric::{deserialize_number, serialize_number};

/// Number of distribution slots the backend knows about.
pub const SLOT_COUNT: usize = 4;

/// Probability law used by one slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionType {
    #[default]
    Normal,
    Exponential,
}

impl DistributionType {
    pub fn all() -> &'static [DistributionType] {
        &[DistributionType::Normal, DistributionType::Exponential]
    }

    /// Tag used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionType::Normal => "normal",
            DistributionType::Exponential => "exponential",
        }
    }
}

/// One slot of a [`ParameterSet`].
///
/// Serialized as `{"type": "normal", "params": {"mean": .., "std": ..}}` or
/// `{"type": "exponential", "params": {"lambda": ..}}`. Values that could not
/// be read are `NaN` and travel as `null`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "lowercase")]
pub enum ParameterEntry {
    Normal {
        #[serde(serialize_with = "serialize_number", deserialize_with = "deserialize_number")]
        mean: f64,
        #[serde(serialize_with = "serialize_number", deserialize_with = "deserialize_number")]
        std: f64,
    },
    Exponential {
        #[serde(serialize_with = "serialize_number", deserialize_with = "deserialize_number")]
        lambda: f64,
    },
}

impl Default for ParameterEntry {
    /// Standard normal, the backend's own default for a fresh slot.
    fn default() -> Self {
        ParameterEntry::Normal {
            mean: 0.0,
            std: 1.0,
        }
    }
}

impl ParameterEntry {
    pub fn normal(mean: f64, std: f64) -> Self {
        ParameterEntry::Normal { mean, std }
    }

    pub fn exponential(lambda: f64) -> Self {
        ParameterEntry::Exponential { lambda }
    }

    pub fn distribution_type(&self) -> DistributionType {
        match self {
            ParameterEntry::Normal { .. } => DistributionType::Normal,
            ParameterEntry::Exponential { .. } => DistributionType::Exponential,
        }
    }

    /// Named parameter values in wire order.
    pub fn values(&self) -> Vec<(&'static str, f64)> {
        match *self {
            ParameterEntry::Normal { mean, std } => vec![("mean", mean), ("std", std)],
            ParameterEntry::Exponential { lambda } => vec![("lambda", lambda)],
        }
    }
}

/// Parameters for all slots, keyed by slot index.
///
/// JSON object keys are the decimal indices (`"0"` .. `"3"`), in ascending order.
/// When reading, keys may also be plain integers (bare YAML keys).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    #[serde(deserialize_with = "deserialize_slots")]
    entries: BTreeMap<usize, ParameterEntry>,
}

/// Slot index written either as an integer or as its decimal text.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct SlotKey(usize);

impl<'de> Deserialize<'de> for SlotKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SlotKeyVisitor;

        impl Visitor<'_> for SlotKeyVisitor {
            type Value = SlotKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a slot index such as 0 or \"0\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<SlotKey, E> {
                usize::try_from(v)
                    .map(SlotKey)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<SlotKey, E> {
                usize::try_from(v)
                    .map(SlotKey)
                    .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SlotKey, E> {
                v.trim()
                    .parse()
                    .map(SlotKey)
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(SlotKeyVisitor)
    }
}

fn deserialize_slots<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<usize, ParameterEntry>, D::Error> {
    let raw = BTreeMap::<SlotKey, ParameterEntry>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k.0, v)).collect())
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The backend's default: every slot a standard normal.
    pub fn standard() -> Self {
        let mut set = Self::new();
        for index in 0..SLOT_COUNT {
            set.entries.insert(index, ParameterEntry::default());
        }
        set
    }

    /// Set the entry for `index`. Returns `false` (and stores nothing) when the
    /// index is not a valid slot.
    pub fn insert(&mut self, index: usize, entry: ParameterEntry) -> bool {
        if index >= SLOT_COUNT {
            return false;
        }
        self.entries.insert(index, entry);
        true
    }

    pub fn get(&self, index: usize) -> Option<&ParameterEntry> {
        self.entries.get(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ParameterEntry)> {
        self.entries.iter().map(|(i, e)| (*i, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only the valid slot indices; files written by other tools may carry more.
    pub fn retain_slots(&mut self) {
        self.entries.retain(|i, _| *i < SLOT_COUNT);
    }
}
