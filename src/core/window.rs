use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// The span of days requested from gridMET. Exactly one mode is active, so the
/// bound that belongs to the other mode cannot be carried along by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExtractionWindow {
    /// `days` days ending at the latest complete gridMET day
    ByDayCount { days: u32 },
    /// Inclusive date range with `start < end`
    ByDateRange { start: NaiveDate, end: NaiveDate },
}

impl ExtractionWindow {
    pub fn day_count(&self) -> Option<u32> {
        match self {
            ExtractionWindow::ByDayCount { days } => Some(*days),
            ExtractionWindow::ByDateRange { .. } => None,
        }
    }

    /// Number of daily time steps the window covers
    pub fn expected_days(&self) -> u32 {
        match self {
            ExtractionWindow::ByDayCount { days } => *days,
            ExtractionWindow::ByDateRange { start, end } => {
                (*end - *start).num_days().max(0) as u32 + 1
            }
        }
    }

    /// Concrete first and last day of the window. Day-count windows end the day
    /// before `today`, the most recent day gridMET publishes.
    pub fn date_bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ExtractionWindow::ByDateRange { start, end } => (*start, *end),
            ExtractionWindow::ByDayCount { days } => {
                let end = today.checked_sub_days(Days::new(1)).unwrap_or(today);
                let back = u64::from(days.saturating_sub(1));
                let start = end.checked_sub_days(Days::new(back)).unwrap_or(end);
                (start, end)
            }
        }
    }
}

impl std::fmt::Display for ExtractionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionWindow::ByDayCount { days } => write!(f, "last {} days", days),
            ExtractionWindow::ByDateRange { start, end } => {
                write!(f, "{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
            }
        }
    }
}
