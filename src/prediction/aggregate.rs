//! Turns leaf label distributions into percentages and scalar estimates.

use crate::core::constants::{CALCULATED_VALUE_DECIMALS, POINT_ESTIMATE_DECIMALS};
use crate::core::error::{CartError, Result};
use crate::core::types::Value;
use crate::tree::distribution::Distribution;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label → `"<int>%"` mapping produced by exact classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentageMap {
    entries: Vec<(Value, String)>,
}

impl PercentageMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the percentage string of a label, replacing any earlier entry.
    pub fn insert<S: Into<String>>(&mut self, label: Value, percentage: S) {
        let percentage = percentage.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = percentage,
            None => self.entries.push((label, percentage)),
        }
    }

    /// Percentage string recorded for a label.
    pub fn get(&self, label: &Value) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, pct)| pct.as_str())
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(label, "<int>%")` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &str)> + '_ {
        self.entries.iter().map(|(label, pct)| (label, pct.as_str()))
    }

    /// Iterates `(label, percent)` pairs with the percent parsed back.
    pub fn percentages(&self) -> impl Iterator<Item = Result<(&Value, f64)>> + '_ {
        self.entries
            .iter()
            .map(|(label, pct)| parse_percentage(pct).map(|p| (label, p)))
    }
}

impl FromIterator<(Value, String)> for PercentageMap {
    fn from_iter<I: IntoIterator<Item = (Value, String)>>(iter: I) -> Self {
        let mut map = PercentageMap::new();
        for (label, pct) in iter {
            map.insert(label, pct);
        }
        map
    }
}

impl fmt::Display for PercentageMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (label, pct)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", label, pct)?;
        }
        write!(f, "}}")
    }
}

fn parse_percentage(raw: &str) -> Result<f64> {
    raw.trim()
        .strip_suffix('%')
        .and_then(|digits| digits.trim().parse::<f64>().ok())
        .ok_or_else(|| CartError::invalid_parameter("percentage", raw, "expected \"<int>%\""))
}

fn checked_total(distribution: &Distribution) -> Result<f64> {
    let total = distribution.total();
    if total > 0.0 && total.is_finite() {
        Ok(total)
    } else {
        Err(CartError::MalformedLeafDistribution { total })
    }
}

fn numeric_label(label: &Value) -> Result<f64> {
    label
        .as_f64()
        .ok_or_else(|| CartError::non_numeric_label(label.to_string()))
}

/// Rounds to `decimals` places, sending exact halves to the even neighbour.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Converts counts into truncated integer percentages of the total.
pub fn prediction(distribution: &Distribution) -> Result<PercentageMap> {
    let total = checked_total(distribution)?;
    Ok(distribution
        .iter()
        .map(|(label, count)| {
            let percent = (count / total * 100.0).trunc() as i64;
            (label.clone(), format!("{}%", percent))
        })
        .collect())
}

/// Count-weighted mean of the numeric labels, rounded to 2 decimals.
pub fn point_estimate(distribution: &Distribution) -> Result<f64> {
    let total = checked_total(distribution)?;
    let mut weighted = 0.0;
    for (label, count) in distribution.iter() {
        weighted += count * numeric_label(label)?;
    }
    Ok(round_to(weighted / total, POINT_ESTIMATE_DECIMALS))
}

/// Percentage-weighted mean of the numeric labels, rounded to 1 decimal.
pub fn calculate_value(percentages: &PercentageMap) -> Result<f64> {
    let mut total = 0.0;
    for entry in percentages.percentages() {
        let (label, percent) = entry?;
        total += numeric_label(label)? * (percent / 100.0);
    }
    Ok(round_to(total, CALCULATED_VALUE_DECIMALS))
}
