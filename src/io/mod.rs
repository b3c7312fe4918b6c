pub mod csv;
pub mod json;

pub use json::{read_roster, read_roster_from, write_report, write_report_file, TraceSummary};
