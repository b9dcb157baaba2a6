//! Command Line Interface (CLI) layer for gridmet-etl.
//!
//! This module defines argument parsing (`args`) and the run logic
//! (`runner`): resolve the arguments into an extraction request, drive the
//! gridMET engine, and turn the outcome into a process exit code.
//!
//! If you are embedding the extraction into another application, prefer the
//! library API (`gridmet_etl::run` with your own `Engine`) over the CLI code.
pub mod args;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
