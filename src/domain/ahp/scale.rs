//! AHP intensity scale (1/5 to 5) with semantic labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the 1-5 AHP intensity scale, including reciprocals.
///
/// Variants are ordered from "extremely less important" to "extremely more
/// important", so `Ord` follows the numeric value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Intensity {
    ExtremelyLess,
    StronglyLess,
    ClearlyLess,
    SlightlyLess,
    #[default]
    Equal,
    Slightly,
    Clearly,
    Strongly,
    Extremely,
}

/// Every scale step in ascending numeric order.
pub const AHP_SCALE: [Intensity; 9] = [
    Intensity::ExtremelyLess,
    Intensity::StronglyLess,
    Intensity::ClearlyLess,
    Intensity::SlightlyLess,
    Intensity::Equal,
    Intensity::Slightly,
    Intensity::Clearly,
    Intensity::Strongly,
    Intensity::Extremely,
];

/// Tolerance used when matching a raw number against a scale step.
const SCALE_MATCH_TOLERANCE: f64 = 1e-9;

impl Intensity {
    /// Returns the numeric matrix entry for this step.
    pub fn value(&self) -> f64 {
        match self {
            Intensity::ExtremelyLess => 1.0 / 5.0,
            Intensity::StronglyLess => 1.0 / 4.0,
            Intensity::ClearlyLess => 1.0 / 3.0,
            Intensity::SlightlyLess => 1.0 / 2.0,
            Intensity::Equal => 1.0,
            Intensity::Slightly => 2.0,
            Intensity::Clearly => 3.0,
            Intensity::Strongly => 4.0,
            Intensity::Extremely => 5.0,
        }
    }

    /// Returns the semantic meaning of this step.
    pub fn label(&self) -> &'static str {
        match self {
            Intensity::ExtremelyLess => "Extremely less important",
            Intensity::StronglyLess => "Strongly less important",
            Intensity::ClearlyLess => "Clearly less important",
            Intensity::SlightlyLess => "Slightly less important",
            Intensity::Equal => "Equally important",
            Intensity::Slightly => "Slightly more important",
            Intensity::Clearly => "Clearly more important",
            Intensity::Strongly => "Strongly more important",
            Intensity::Extremely => "Extremely more important",
        }
    }

    /// Returns the step whose value is `1 / self.value()`.
    pub fn reciprocal(&self) -> Self {
        match self {
            Intensity::ExtremelyLess => Intensity::Extremely,
            Intensity::StronglyLess => Intensity::Strongly,
            Intensity::ClearlyLess => Intensity::Clearly,
            Intensity::SlightlyLess => Intensity::Slightly,
            Intensity::Equal => Intensity::Equal,
            Intensity::Slightly => Intensity::SlightlyLess,
            Intensity::Clearly => Intensity::ClearlyLess,
            Intensity::Strongly => Intensity::StronglyLess,
            Intensity::Extremely => Intensity::ExtremelyLess,
        }
    }

    /// Returns the step with exactly this value, if any.
    pub fn from_value(value: f64) -> Option<Self> {
        AHP_SCALE
            .iter()
            .copied()
            .find(|step| (step.value() - value).abs() < SCALE_MATCH_TOLERANCE)
    }

    /// Returns the step closest to `value`.
    ///
    /// Used to map a previously stored matrix entry back onto the scale when
    /// an expert re-edits a level. Non-finite input maps to `Equal`.
    pub fn nearest(value: f64) -> Self {
        if !value.is_finite() {
            return Intensity::Equal;
        }
        let mut best = Intensity::Equal;
        let mut best_distance = f64::INFINITY;
        for step in AHP_SCALE {
            let distance = (step.value() - value).abs();
            if distance < best_distance {
                best = step;
                best_distance = distance;
            }
        }
        best
    }

    /// Returns the fraction notation used in the scale legend ("1/3", "4").
    pub fn notation(&self) -> String {
        let value = self.value();
        if value < 1.0 {
            format!("1/{}", (1.0 / value).round() as u32)
        } else {
            format!("{}", value.round() as u32)
        }
    }

    /// Returns the legend entry, e.g. `"1/3 - Clearly less important"`.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.notation(), self.label())
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}
