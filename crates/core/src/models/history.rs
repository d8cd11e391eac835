use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single data point for portfolio value charts.
///
/// The core computes these — the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePoint {
    /// The date for this data point
    pub date: NaiveDate,

    /// Total portfolio value in the display currency at this date
    pub value: f64,
}
