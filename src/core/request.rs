//! Extraction request resolution: turns the user's raw window selection into
//! one validated `ExtractionRequest`, or a `ConfigError` naming the conflict.
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::window::ExtractionWindow;
use crate::types::{ExtractType, Variable};

/// Contradictions in the user's extraction arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("either the --days or --period option must be specified, not both")]
    BothSpecified,

    #[error("either the --days or --period option must be specified")]
    NeitherSpecified,

    #[error("--extract_type must be specified")]
    ExtractTypeRequired,

    #[error("if -t/--extract_type is days then -d/--days must be specified")]
    DaysRequired,

    #[error("if -t/--extract_type is date then -p/--period must be specified")]
    DatePairRequired,

    #[error("when using -p the first date ({start}) must occur before the second ({end})")]
    InvalidDateOrder { start: NaiveDate, end: NaiveDate },

    #[error("number of days must be greater than 0")]
    NonPositiveDays,

    #[error("at least one variable must be requested")]
    NoVariables,
}

/// Raw user selection, before any validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSelection {
    pub extract_type: Option<ExtractType>,
    pub days: Option<u32>,
    pub period: Option<(NaiveDate, NaiveDate)>,
    /// `None` means "use the default variables"
    pub variables: Option<Vec<Variable>>,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub weights_file: PathBuf,
    pub file_prefix: String,
    pub verbose: bool,
}

/// Validated description of what to extract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub window: ExtractionWindow,
    pub variables: Vec<Variable>,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub weights_file: PathBuf,
    #[serde(default)]
    pub file_prefix: String,
    #[serde(default)]
    pub verbose: bool,
}

impl ExtractionRequest {
    /// Resolve a raw selection. Pure: the same selection always yields the same request.
    pub fn resolve(selection: ExtractionSelection) -> Result<Self, ConfigError> {
        let window = resolve_window(
            selection.extract_type,
            selection.days,
            selection.period,
        )?;

        let variables = match selection.variables {
            None => Variable::defaults(),
            Some(vars) => {
                let mut unique: Vec<Variable> = Vec::with_capacity(vars.len());
                for var in vars {
                    if !unique.contains(&var) {
                        unique.push(var);
                    }
                }
                if unique.is_empty() {
                    return Err(ConfigError::NoVariables);
                }
                unique
            }
        };

        Ok(Self {
            window,
            variables,
            input_path: selection.input_path,
            output_path: selection.output_path,
            weights_file: selection.weights_file,
            file_prefix: selection.file_prefix,
            verbose: selection.verbose,
        })
    }

    pub fn extract_type(&self) -> ExtractType {
        match self.window {
            ExtractionWindow::ByDayCount { .. } => ExtractType::Days,
            ExtractionWindow::ByDateRange { .. } => ExtractType::Date,
        }
    }

    /// Shorten a day-count window by one day and return the revised count,
    /// or `None` for date ranges. A one-day window revises to 0 but the stored
    /// window keeps its single day.
    pub fn shorten_window(&mut self) -> Option<u32> {
        match &mut self.window {
            ExtractionWindow::ByDayCount { days } => {
                let revised = *days - 1;
                if revised > 0 {
                    *days = revised;
                }
                Some(revised)
            }
            ExtractionWindow::ByDateRange { .. } => None,
        }
    }
}

fn resolve_window(
    extract_type: Option<ExtractType>,
    days: Option<u32>,
    period: Option<(NaiveDate, NaiveDate)>,
) -> Result<ExtractionWindow, ConfigError> {
    match (&days, &period) {
        (Some(_), Some(_)) => return Err(ConfigError::BothSpecified),
        (None, None) => return Err(ConfigError::NeitherSpecified),
        _ => {}
    }

    match extract_type.ok_or(ConfigError::ExtractTypeRequired)? {
        ExtractType::Days => {
            let days = days.ok_or(ConfigError::DaysRequired)?;
            if days == 0 {
                return Err(ConfigError::NonPositiveDays);
            }
            Ok(ExtractionWindow::ByDayCount { days })
        }
        ExtractType::Date => {
            let (start, end) = period.ok_or(ConfigError::DatePairRequired)?;
            if start >= end {
                return Err(ConfigError::InvalidDateOrder { start, end });
            }
            Ok(ExtractionWindow::ByDateRange { start, end })
        }
    }
}
