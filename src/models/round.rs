//! Round tag value type
//!
//! A tag labels one stage of a company's interview pipeline: a numbered
//! round (`Round 1`, `Round 2`, ...) or the terminal `Selected` outcome.
//! The wire format is the display label itself, so parsing and formatting
//! must round-trip exactly.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Label of the terminal selection sentinel
pub const SELECTED_LABEL: &str = "Selected";

/// Matches numbered round labels, e.g. "Round 3"
static ROUND_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Round ([1-9][0-9]*)$").expect("round label pattern is valid"));

/// Error returned when a wire label is not a recognized round tag
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized round tag label: {0:?}")]
pub struct ParseTagError(pub String);

/// A pipeline stage label: a numbered interview round or the terminal
/// `Selected` state.
///
/// Tags are pure values; whether `Round N` is meaningful for a given
/// company (`N <= total_rounds`) is validated by the store, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundTag {
    /// Numbered interview round (1-based)
    Round(u32),
    /// Terminal selection sentinel
    Selected,
}

impl RoundTag {
    /// Tag for a 0-based round index (index 0 -> `Round 1`)
    pub fn from_index(round_index: u32) -> Self {
        RoundTag::Round(round_index + 1)
    }

    /// True for numbered round tags, false for `Selected`
    pub fn is_round(&self) -> bool {
        matches!(self, RoundTag::Round(_))
    }

    /// Display label used on the wire ("Round 3", "Selected")
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Ordering used for emitted report series: `Round 1` first, all
    /// remaining labels in lexicographic order. This keeps `Selected`
    /// last and sorts `Round 10` before `Round 2`, matching the dashboard
    /// series the reports feed.
    pub fn series_cmp(a: &str, b: &str) -> Ordering {
        if a == b {
            Ordering::Equal
        } else if a == "Round 1" {
            Ordering::Less
        } else if b == "Round 1" {
            Ordering::Greater
        } else {
            a.cmp(b)
        }
    }
}

impl fmt::Display for RoundTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundTag::Round(n) => write!(f, "Round {}", n),
            RoundTag::Selected => f.write_str(SELECTED_LABEL),
        }
    }
}

impl FromStr for RoundTag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == SELECTED_LABEL {
            return Ok(RoundTag::Selected);
        }
        let captures = ROUND_LABEL
            .captures(s)
            .ok_or_else(|| ParseTagError(s.to_string()))?;
        let number: u32 = captures[1]
            .parse()
            .map_err(|_| ParseTagError(s.to_string()))?;
        Ok(RoundTag::Round(number))
    }
}

impl Serialize for RoundTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for RoundTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(de::Error::custom)
    }
}
