//! Resolution plus orchestration through the public API, with a stand-in engine

use std::path::PathBuf;

use chrono::NaiveDate;
use rstest::rstest;

use gridmet_etl::{
    ConfigError, Engine, EngineError, Error, ExtractType, ExtractionRequest, ExtractionSelection,
    RunOutcome, exitcode, run,
};

#[derive(Default)]
struct Recorder {
    ready: bool,
    fail_initialize: bool,
    initialized_with: Option<ExtractionRequest>,
    day_counts: Vec<u32>,
    computes: usize,
    finalizes: usize,
}

impl Engine for Recorder {
    fn initialize(&mut self, request: &ExtractionRequest) -> Result<bool, EngineError> {
        self.initialized_with = Some(request.clone());
        if self.fail_initialize {
            return Err(EngineError::MissingPath {
                kind: "weights file",
                path: request.weights_file.clone(),
            });
        }
        Ok(self.ready)
    }

    fn set_day_count(&mut self, days: u32) {
        self.day_counts.push(days);
    }

    fn compute_and_write(&mut self) -> Result<(), EngineError> {
        self.computes += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), EngineError> {
        self.finalizes += 1;
        Ok(())
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn selection(extract_type: ExtractType, days: Option<u32>, period: Option<(&str, &str)>) -> ExtractionSelection {
    ExtractionSelection {
        extract_type: Some(extract_type),
        days,
        period: period.map(|(s, e)| (date(s), date(e))),
        input_path: PathBuf::from("/data/hru"),
        output_path: PathBuf::from("/data/out"),
        weights_file: PathBuf::from("/data/weights.csv"),
        file_prefix: "nhm_".to_string(),
        ..Default::default()
    }
}

/// Resolve, then run only if resolution succeeded, as the CLI does
fn resolve_and_run(sel: ExtractionSelection, engine: &mut Recorder) -> Result<RunOutcome, Error> {
    let mut request = ExtractionRequest::resolve(sel)?;
    run(engine, &mut request)
}

#[rstest]
#[case::both(selection(ExtractType::Days, Some(5), Some(("2020-01-01", "2020-01-09"))))]
#[case::neither(selection(ExtractType::Date, None, None))]
#[case::days_without_count(selection(ExtractType::Days, None, Some(("2020-01-01", "2020-01-09"))))]
#[case::date_without_pair(selection(ExtractType::Date, Some(5), None))]
#[case::equal_dates(selection(ExtractType::Date, None, Some(("2020-01-01", "2020-01-01"))))]
fn given_invalid_selection_when_running_then_engine_is_never_called(#[case] sel: ExtractionSelection) {
    let mut engine = Recorder { ready: true, ..Default::default() };

    let err = resolve_and_run(sel, &mut engine).unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(engine.initialized_with.is_none());
    assert_eq!(engine.computes + engine.finalizes, 0);
}

#[test]
fn given_ready_day_count_when_running_then_computes_once_and_finalizes() {
    let mut engine = Recorder { ready: true, ..Default::default() };

    let outcome = resolve_and_run(selection(ExtractType::Days, Some(5), None), &mut engine).unwrap();

    assert_eq!(outcome, RunOutcome::Completed { days: 5 });
    assert_eq!(engine.computes, 1);
    assert_eq!(engine.finalizes, 1);
    assert!(engine.day_counts.is_empty());
    let seen = engine.initialized_with.unwrap();
    assert_eq!(seen.file_prefix, "nhm_");
    assert_eq!(seen.window.day_count(), Some(5));
}

#[test]
fn given_unready_day_count_when_running_then_falls_back_one_day() {
    let mut engine = Recorder::default();

    let outcome = resolve_and_run(selection(ExtractType::Days, Some(5), None), &mut engine).unwrap();

    assert_eq!(outcome, RunOutcome::FellBack { requested: 5, revised: 4 });
    assert_eq!(engine.day_counts, vec![4]);
    assert_eq!(engine.computes, 0);
    assert_eq!(engine.finalizes, 1);
}

#[test]
fn given_unready_single_day_when_running_then_falls_back_to_zero_and_finalizes() {
    let mut engine = Recorder::default();

    let outcome = resolve_and_run(selection(ExtractType::Days, Some(1), None), &mut engine).unwrap();

    assert_eq!(outcome, RunOutcome::FellBack { requested: 1, revised: 0 });
    assert_eq!(engine.day_counts, vec![0]);
    assert_eq!(engine.computes, 0);
    assert_eq!(engine.finalizes, 1);
}

#[test]
fn given_unready_date_range_when_running_then_exits_one_without_finalize() {
    let mut engine = Recorder::default();

    let err = resolve_and_run(
        selection(ExtractType::Date, None, Some(("2020-01-01", "2020-01-09"))),
        &mut engine,
    )
    .unwrap_err();

    assert!(matches!(err, Error::NotReady { .. }));
    assert_eq!(err.exit_code(), exitcode::NOT_READY);
    assert!(engine.day_counts.is_empty());
    assert_eq!(engine.computes, 0);
    assert_eq!(engine.finalizes, 0);
}

#[test]
fn given_engine_failure_when_initializing_then_error_keeps_its_detail() {
    let mut engine = Recorder { fail_initialize: true, ..Default::default() };

    let err = resolve_and_run(selection(ExtractType::Days, Some(3), None), &mut engine).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::SOFTWARE);
    assert!(err.to_string().contains("/data/weights.csv"));
    assert_eq!(engine.finalizes, 0);
}

#[test]
fn given_same_selection_when_resolving_twice_then_requests_are_equal() {
    let sel = selection(ExtractType::Date, None, Some(("2019-10-01", "2020-09-30")));

    let first = ExtractionRequest::resolve(sel.clone()).unwrap();
    let second = ExtractionRequest::resolve(sel).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.window.expected_days(), 366);
}

#[test]
fn given_config_error_when_displayed_then_names_the_conflict() {
    let err = ExtractionRequest::resolve(selection(ExtractType::Days, None, None)).unwrap_err();
    assert_eq!(err, ConfigError::NeitherSpecified);
    assert!(err.to_string().contains("--days or --period"));
}
