mod files;
mod tables;

pub use self::files::{write_challenges_csv, write_positions_csv, write_summary_csv};
pub use self::tables::{
    errors as print_error_report, speed as print_speed_report, travel as print_travel_report,
};
