//! Score extraction and badge tier classification.

use std::collections::BTreeMap;

use crate::report::CategoryScore;

/// Badge color tier for a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Scores below 50.
    Red,
    /// Scores from 50 through 89.
    Orange,
    /// Scores of 90 and above.
    Green,
}

impl Tier {
    /// Classify a percentage score.
    ///
    /// NaN fails both threshold comparisons and lands on green, which is the
    /// long-standing behavior for categories absent from a report.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 50.0 {
            Tier::Red
        } else if percentage < 90.0 {
            Tier::Orange
        } else {
            Tier::Green
        }
    }

    /// Color name understood by the badge renderer.
    pub fn color(&self) -> &'static str {
        match self {
            Tier::Red => "red",
            Tier::Orange => "orange",
            Tier::Green => "green",
        }
    }
}

/// Percentage score for `label`, rounded up to the next whole point.
///
/// A label missing from `categories` yields NaN rather than an error; the
/// degenerate value flows through to the badge text untouched.
pub fn percentage(categories: &BTreeMap<String, CategoryScore>, label: &str) -> f64 {
    let score = categories
        .get(label)
        .map(|category| category.score)
        .unwrap_or(f64::NAN);
    (score * 100.0).ceil()
}

/// Badge status text for a percentage, e.g. `93%` or `NaN%`.
pub fn status_text(percentage: f64) -> String {
    format!("{percentage}%")
}
