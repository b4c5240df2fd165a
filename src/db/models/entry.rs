//! Day entry data model.
//!
//! One row per calendar day, identified by the natural key (year, month,
//! day). Months are 0-based to match the controller's selection state. All
//! three measured fields are optional; a row may exist with no readings at
//! all after a month is materialized.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub id: Option<i64>,
    pub year: i32,
    /// 0-based month, 0 = January.
    pub month: u32,
    /// 1-based day of month.
    pub day: u32,
    pub morning_weight: Option<f64>,
    pub evening_weight: Option<f64>,
    pub steps: Option<u32>,
}

impl DayEntry {
    /// A row with no readings, as inserted by month materialization.
    pub fn blank(year: i32, month: u32, day: u32) -> Self {
        Self {
            id: None,
            year,
            month,
            day,
            morning_weight: None,
            evening_weight: None,
            steps: None,
        }
    }
}

/// One of the three independently upserted columns of a day entry.
///
/// `None` clears the column; unparsable user input is mapped to `None` by the
/// presentation layer before it reaches the write path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryField {
    MorningWeight(Option<f64>),
    EveningWeight(Option<f64>),
    Steps(Option<u32>),
}

impl EntryField {
    pub fn column(&self) -> &'static str {
        match self {
            EntryField::MorningWeight(_) => "morning_weight",
            EntryField::EveningWeight(_) => "evening_weight",
            EntryField::Steps(_) => "steps",
        }
    }
}
