use thiserror::Error;

#[derive(Error, Debug)]
pub enum BallisticsError {
    #[error("invalid shell: {field} = {value} (must be positive and finite)")]
    InvalidShell { field: &'static str, value: f64 },

    #[error("invalid target range: {range_m} m")]
    InvalidTarget { range_m: f64 },

    #[error("target {target_m:.0} m is beyond maximum range {max_range_m:.0} m")]
    UnreachableRange { target_m: f64, max_range_m: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
