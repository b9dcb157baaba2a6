use clap::CommandFactory;
use clap::error::ErrorKind;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gridmet_etl::{
    ConfigError, Error, ExtractionRequest, GridMetEngine, RunOutcome, exitcode, run as run_extraction,
};

use super::args::CliArgs;

/// Progress goes to stdout at `info` with --verbose, otherwise only warnings.
/// RUST_LOG overrides both.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();
}

fn config_error_kind(err: &ConfigError) -> ErrorKind {
    match err {
        ConfigError::BothSpecified => ErrorKind::ArgumentConflict,
        ConfigError::InvalidDateOrder { .. }
        | ConfigError::NonPositiveDays
        | ConfigError::NoVariables => ErrorKind::ValueValidation,
        ConfigError::NeitherSpecified
        | ConfigError::ExtractTypeRequired
        | ConfigError::DaysRequired
        | ConfigError::DatePairRequired => ErrorKind::MissingRequiredArgument,
    }
}

/// Exit status for a finished run. Both successful outcomes exit 0.
fn exit_status(result: &gridmet_etl::Result<RunOutcome>) -> i32 {
    match result {
        Ok(RunOutcome::Completed { days }) => {
            info!("Extraction complete: {} days", days);
            exitcode::OK
        }
        Ok(RunOutcome::FellBack { requested, revised }) => {
            info!(
                "gridMET not updated for {} days; finished with day count {}",
                requested, revised
            );
            exitcode::OK
        }
        // already logged by the orchestrator
        Err(Error::NotReady { .. }) => exitcode::NOT_READY,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

/// Resolve the arguments, run the extraction and return the process exit code.
/// Argument contradictions exit through clap before any engine call.
pub fn run(args: CliArgs) -> i32 {
    init_logging(args.verbose);

    let mut request = match ExtractionRequest::resolve(args.selection()) {
        Ok(request) => request,
        Err(e) => CliArgs::command().error(config_error_kind(&e), e).exit(),
    };
    info!("Starting extraction of {:?} for {}", request.variables, request.window);

    let result = GridMetEngine::new()
        .map_err(Error::from)
        .and_then(|mut engine| {
            info!("Engine instantiated");
            run_extraction(&mut engine, &mut request)
        });

    exit_status(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gridmet_etl::EngineError;
    use rstest::rstest;

    #[rstest]
    #[case::completed(Ok(RunOutcome::Completed { days: 5 }), exitcode::OK)]
    #[case::fell_back(Ok(RunOutcome::FellBack { requested: 5, revised: 4 }), exitcode::OK)]
    #[case::fell_back_to_zero(Ok(RunOutcome::FellBack { requested: 1, revised: 0 }), exitcode::OK)]
    #[case::not_ready(Err(Error::NotReady { window: "2020-01-01 to 2020-01-31".into() }), exitcode::NOT_READY)]
    #[case::engine(Err(Error::Engine(EngineError::Grid("corrupt grid".into()))), exitcode::SOFTWARE)]
    #[case::config(Err(Error::Config(ConfigError::NeitherSpecified)), exitcode::USAGE)]
    fn run_results_map_to_exit_codes(
        #[case] result: gridmet_etl::Result<RunOutcome>,
        #[case] expected: i32,
    ) {
        assert_eq!(exit_status(&result), expected);
    }

    #[test]
    fn conflicts_and_omissions_map_to_clap_kinds() {
        assert_eq!(
            config_error_kind(&ConfigError::BothSpecified),
            ErrorKind::ArgumentConflict
        );
        assert_eq!(
            config_error_kind(&ConfigError::DaysRequired),
            ErrorKind::MissingRequiredArgument
        );
        let d = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(
            config_error_kind(&ConfigError::InvalidDateOrder { start: d, end: d }),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn clap_usage_errors_share_the_usage_exit_code() {
        let err = CliArgs::command().error(ErrorKind::ArgumentConflict, ConfigError::BothSpecified);
        assert_eq!(err.exit_code(), exitcode::USAGE);
    }
}
