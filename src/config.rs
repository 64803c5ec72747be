use crate::error::{EntryLabError, EntryResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Samples further than this many standard deviations from the mean are dropped.
    #[arg(long, default_value_t = 2.0)]
    pub outlier_m: f64,

    /// Count Practice challenges in the statistics.
    #[arg(long, default_value_t = false)]
    pub include_practice: bool,

    #[command(flatten)]
    pub calibration: Calibration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            outlier_m: 2.0,
            include_practice: false,
            calibration: Calibration::default(),
        }
    }
}

/// Physical size of each layout's input range, used to turn coordinate deltas into travel.
#[derive(Args, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    // ArcType: degrees of arc across all bins
    #[arg(long, default_value_t = 60.0)]
    pub arc_x_range: f64,

    // TiltType: degrees across rows (x) and columns (z)
    #[arg(long, default_value_t = 335.0)]
    pub tilt_x_range: f64,
    #[arg(long, default_value_t = 343.0)]
    pub tilt_z_range: f64,

    // Raycast: key pitch in world units
    #[arg(long, default_value_t = 0.701)]
    pub raycast_key_width: f64,
    #[arg(long, default_value_t = 0.461)]
    pub raycast_key_height: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            arc_x_range: 60.0,
            tilt_x_range: 175.0 + 160.0,
            tilt_z_range: 168.0 + 175.0,
            raycast_key_width: 0.701,
            raycast_key_height: 0.461,
        }
    }
}

impl AnalysisConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EntryResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EntryResult<()> {
        if !(self.outlier_m.is_finite() && self.outlier_m > 0.0) {
            return Err(EntryLabError::Config(format!(
                "outlier_m must be a positive number, got {}",
                self.outlier_m
            )));
        }

        let c = &self.calibration;
        let ranges = [
            ("arc_x_range", c.arc_x_range),
            ("tilt_x_range", c.tilt_x_range),
            ("tilt_z_range", c.tilt_z_range),
            ("raycast_key_width", c.raycast_key_width),
            ("raycast_key_height", c.raycast_key_height),
        ];
        for (name, v) in ranges {
            if !(v.is_finite() && v >= 0.0) {
                return Err(EntryLabError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, v
                )));
            }
        }
        Ok(())
    }

    /// Overwrites fields the user passed explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli: &AnalysisConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($($field:ident).+, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$($field).+ = cli.$($field).+.clone();
                }
            };
        }

        update_if_present!(outlier_m, "outlier_m");
        update_if_present!(include_practice, "include_practice");

        update_if_present!(calibration.arc_x_range, "arc_x_range");
        update_if_present!(calibration.tilt_x_range, "tilt_x_range");
        update_if_present!(calibration.tilt_z_range, "tilt_z_range");
        update_if_present!(calibration.raycast_key_width, "raycast_key_width");
        update_if_present!(calibration.raycast_key_height, "raycast_key_height");
    }
}
