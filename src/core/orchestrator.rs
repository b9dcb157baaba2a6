//! Drives an `Engine` through initialize, compute and finalize, with a single
//! bounded fallback when gridMET has not yet published the whole window.
//!
//! The fallback does not recompute. Under a day-count window it shortens the
//! window by one day, tells the engine, and finalizes: the shorter window is
//! picked up by the next scheduled run. Date-range windows have no fallback.
use serde::Serialize;
use tracing::{error, info, warn};

use crate::core::engine::Engine;
use crate::core::request::ExtractionRequest;
use crate::error::{Error, Result};

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every phase ran over the full window
    Completed { days: u32 },
    /// Data was not ready; the day count was shortened and compute was skipped
    FellBack { requested: u32, revised: u32 },
}

/// Run one extraction. The request is only mutated by the day-count fallback.
pub fn run<E: Engine + ?Sized>(engine: &mut E, request: &mut ExtractionRequest) -> Result<RunOutcome> {
    info!("Initializing extraction for {}", request.window);
    let ready = engine.initialize(request)?;

    if ready {
        info!("Initialized");
        info!("Running");
        engine.compute_and_write()?;
        info!("Finished running");
        engine.finalize()?;
        info!("Finalized");
        return Ok(RunOutcome::Completed {
            days: request.window.expected_days(),
        });
    }

    let requested = request.window.day_count();
    match (requested, request.shorten_window()) {
        (Some(requested), Some(revised)) => {
            warn!(
                "gridMET not updated, continuing with {} days instead of {}",
                revised, requested
            );
            engine.set_day_count(revised);
            engine.finalize()?;
            info!("Finalized");
            Ok(RunOutcome::FellBack { requested, revised })
        }
        _ => {
            let window = request.window.to_string();
            error!("Extract did not return period specified ({}), gridMET not updated", window);
            Err(Error::NotReady { window })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::EngineError;
    use crate::core::window::ExtractionWindow;
    use crate::exitcode;
    use crate::types::Variable;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Initialize,
        SetDayCount(u32),
        Compute,
        Finalize,
    }

    struct Scripted {
        ready: bool,
        fail_compute: bool,
        calls: Vec<Call>,
    }

    impl Scripted {
        fn new(ready: bool) -> Self {
            Self { ready, fail_compute: false, calls: Vec::new() }
        }
    }

    impl Engine for Scripted {
        fn initialize(&mut self, _request: &ExtractionRequest) -> std::result::Result<bool, EngineError> {
            self.calls.push(Call::Initialize);
            Ok(self.ready)
        }

        fn set_day_count(&mut self, days: u32) {
            self.calls.push(Call::SetDayCount(days));
        }

        fn compute_and_write(&mut self) -> std::result::Result<(), EngineError> {
            self.calls.push(Call::Compute);
            if self.fail_compute {
                return Err(EngineError::Grid("corrupt grid".into()));
            }
            Ok(())
        }

        fn finalize(&mut self) -> std::result::Result<(), EngineError> {
            self.calls.push(Call::Finalize);
            Ok(())
        }
    }

    fn request(window: ExtractionWindow) -> ExtractionRequest {
        ExtractionRequest {
            window,
            variables: vec![Variable::Tmax],
            input_path: PathBuf::from("in"),
            output_path: PathBuf::from("out"),
            weights_file: PathBuf::from("weights.csv"),
            file_prefix: String::new(),
            verbose: false,
        }
    }

    fn date_range() -> ExtractionWindow {
        ExtractionWindow::ByDateRange {
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
        }
    }

    #[test]
    fn ready_runs_every_phase_once() {
        let mut engine = Scripted::new(true);
        let mut req = request(ExtractionWindow::ByDayCount { days: 5 });
        let outcome = run(&mut engine, &mut req).unwrap();
        assert_eq!(outcome, RunOutcome::Completed { days: 5 });
        assert_eq!(engine.calls, vec![Call::Initialize, Call::Compute, Call::Finalize]);
        assert_eq!(req.window.day_count(), Some(5));
    }

    #[test]
    fn not_ready_day_count_falls_back_without_compute() {
        let mut engine = Scripted::new(false);
        let mut req = request(ExtractionWindow::ByDayCount { days: 5 });
        let outcome = run(&mut engine, &mut req).unwrap();
        assert_eq!(outcome, RunOutcome::FellBack { requested: 5, revised: 4 });
        assert_eq!(
            engine.calls,
            vec![Call::Initialize, Call::SetDayCount(4), Call::Finalize]
        );
        assert_eq!(req.window.day_count(), Some(4));
    }

    #[test]
    fn not_ready_date_range_fails_without_finalize() {
        let mut engine = Scripted::new(false);
        let mut req = request(date_range());
        let err = run(&mut engine, &mut req).unwrap_err();
        assert!(matches!(err, Error::NotReady { .. }));
        assert_eq!(err.exit_code(), exitcode::NOT_READY);
        assert_eq!(engine.calls, vec![Call::Initialize]);
        assert_eq!(req.window, date_range());
    }

    #[test]
    fn not_ready_single_day_falls_back_to_zero() {
        let mut engine = Scripted::new(false);
        let mut req = request(ExtractionWindow::ByDayCount { days: 1 });
        let outcome = run(&mut engine, &mut req).unwrap();
        assert_eq!(outcome, RunOutcome::FellBack { requested: 1, revised: 0 });
        assert_eq!(
            engine.calls,
            vec![Call::Initialize, Call::SetDayCount(0), Call::Finalize]
        );
        assert_eq!(req.window.day_count(), Some(1));
    }

    #[test]
    fn compute_failure_propagates_and_skips_finalize() {
        let mut engine = Scripted::new(true);
        engine.fail_compute = true;
        let mut req = request(date_range());
        let err = run(&mut engine, &mut req).unwrap_err();
        assert!(matches!(err, Error::Engine(EngineError::Grid(_))));
        assert_eq!(err.exit_code(), exitcode::SOFTWARE);
        assert_eq!(engine.calls, vec![Call::Initialize, Call::Compute]);
    }
}
