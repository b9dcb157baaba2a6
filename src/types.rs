//! Shared types and enums used across gridmet-etl.
//! Includes `Variable` (the gridMET climate variables that can be extracted)
//! and `ExtractType` (how the extraction window is selected).
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the user selects the extraction window
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractType {
    /// A number of days ending at the most recent gridMET day
    Days,
    /// An explicit start/end date pair
    Date,
}

impl std::fmt::Display for ExtractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractType::Days => write!(f, "days"),
            ExtractType::Date => write!(f, "date"),
        }
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    Tmax,
    Tmin,
    Ppt,
    Rhmax,
    Rhmin,
    Ws,
    Srad,
}

/// Attributes of a variable as written to the output netCDF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputMeta {
    pub name: &'static str,
    pub long_name: &'static str,
    pub units: &'static str,
    pub standard_name: &'static str,
}

impl Variable {
    pub const ALL: [Variable; 7] = [
        Variable::Tmax,
        Variable::Tmin,
        Variable::Ppt,
        Variable::Rhmax,
        Variable::Rhmin,
        Variable::Ws,
        Variable::Srad,
    ];

    /// Variables extracted when the user does not choose any (everything but `srad`)
    pub fn defaults() -> Vec<Variable> {
        vec![
            Variable::Tmax,
            Variable::Tmin,
            Variable::Ppt,
            Variable::Rhmax,
            Variable::Rhmin,
            Variable::Ws,
        ]
    }

    /// Short code used on the command line and in downloaded file names
    pub fn code(&self) -> &'static str {
        match self {
            Variable::Tmax => "tmax",
            Variable::Tmin => "tmin",
            Variable::Ppt => "ppt",
            Variable::Rhmax => "rhmax",
            Variable::Rhmin => "rhmin",
            Variable::Ws => "ws",
            Variable::Srad => "srad",
        }
    }

    /// Aggregated THREDDS dataset code (`agg_met_<code>_1979_CurrentYear_daily.nc`)
    pub fn dataset_code(&self) -> &'static str {
        match self {
            Variable::Tmax => "tmmx",
            Variable::Tmin => "tmmn",
            Variable::Ppt => "pr",
            Variable::Rhmax => "rmax",
            Variable::Rhmin => "rmin",
            Variable::Ws => "vs",
            Variable::Srad => "srad",
        }
    }

    /// Name of the data variable inside a gridMET subset file
    pub fn gridmet_name(&self) -> &'static str {
        match self {
            Variable::Tmax => "daily_maximum_temperature",
            Variable::Tmin => "daily_minimum_temperature",
            Variable::Ppt => "precipitation_amount",
            Variable::Rhmax => "daily_maximum_relative_humidity",
            Variable::Rhmin => "daily_minimum_relative_humidity",
            Variable::Ws => "daily_mean_wind_speed",
            Variable::Srad => "daily_mean_shortwave_radiation_at_surface",
        }
    }

    /// gridMET serves temperatures in Kelvin; output is Celsius
    pub fn is_temperature(&self) -> bool {
        matches!(self, Variable::Tmax | Variable::Tmin)
    }

    pub fn output_meta(&self) -> OutputMeta {
        match self {
            Variable::Tmax => OutputMeta {
                name: "tmax",
                long_name: "Maximum daily air temperature",
                units: "degree_Celsius",
                standard_name: "maximum_daily_air_temperature",
            },
            Variable::Tmin => OutputMeta {
                name: "tmin",
                long_name: "Minimum daily air temperature",
                units: "degree_Celsius",
                standard_name: "minimum_daily_air_temperature",
            },
            Variable::Ppt => OutputMeta {
                name: "prcp",
                long_name: "Daily Accumulated Precipitation",
                units: "mm",
                standard_name: "prcp",
            },
            Variable::Rhmax => OutputMeta {
                name: "rhmax",
                long_name: "Daily Maximum Relative Humidity",
                units: "percent",
                standard_name: "rhmax",
            },
            Variable::Rhmin => OutputMeta {
                name: "rhmin",
                long_name: "Daily Minimum Relative Humidity",
                units: "percent",
                standard_name: "rhmin",
            },
            Variable::Ws => OutputMeta {
                name: "ws",
                long_name: "Daily Mean Wind Speed",
                units: "m/s",
                standard_name: "ws",
            },
            Variable::Srad => OutputMeta {
                name: "srad",
                long_name: "surface_downwelling_shortwave_flux_in_air",
                units: "W m-2",
                standard_name: "srad",
            },
        }
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
