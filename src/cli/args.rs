use clap::Parser;
use std::path::PathBuf;

use chrono::NaiveDate;
use gridmet_etl::{ExtractType, ExtractionSelection, Variable};

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("Not a valid date: '{}'", s))
}

fn existing_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("Path does not exist: {}", s))
    }
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("File does not exist: {}", s))
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "gridmet-etl",
    about = "Map gridded climate data to polygons using a zonal area-weighted mean"
)]
pub struct CliArgs {
    /// Extract method: days (most recent N days) or date (explicit period)
    #[arg(short = 't', long = "extract_type", value_enum)]
    pub extract_type: ExtractType,

    /// Start and end date of retrieval (YYYY-MM-DD); required with -t date
    #[arg(short = 'p', long, num_args = 2, action = clap::ArgAction::Set, value_names = ["START", "END"], value_parser = parse_date)]
    pub period: Option<Vec<NaiveDate>>,

    /// Number of days to retrieve; required with -t days
    #[arg(short = 'd', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Prefix for downloaded and output files
    #[arg(short = 'f', long = "file_prefix", default_value = "")]
    pub file_prefix: String,

    /// Input path (location of HRU shapefiles; downloads are saved here)
    #[arg(short = 'i', long, value_parser = existing_dir)]
    pub inpath: PathBuf,

    /// Output path (location of netCDF output files)
    #[arg(short = 'o', long, value_parser = existing_dir)]
    pub outpath: PathBuf,

    /// Path/name of the weights file (CSV)
    #[arg(short = 'w', long, value_parser = existing_file)]
    pub weightsfile: PathBuf,

    /// Override default variables (tmax tmin ppt rhmax rhmin ws)
    #[arg(short = 'v', long, value_enum, num_args = 1..)]
    pub variables: Option<Vec<Variable>>,

    /// Output progress messages
    #[arg(short = 'V', long, default_value_t = false)]
    pub verbose: bool,
}

impl CliArgs {
    /// Raw selection handed to request resolution
    pub fn selection(&self) -> ExtractionSelection {
        let period = self.period.as_ref().and_then(|p| match p.as_slice() {
            [start, end] => Some((*start, *end)),
            _ => None,
        });
        ExtractionSelection {
            extract_type: Some(self.extract_type),
            days: self.days,
            period,
            variables: self.variables.clone(),
            input_path: self.inpath.clone(),
            output_path: self.outpath.clone(),
            weights_file: self.weightsfile.clone(),
            file_prefix: self.file_prefix.clone(),
            verbose: self.verbose,
        }
    }
}
