use chrono::{DateTime, Local};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error(
        "no feasible trajectory: interval #{interval} starting at {timestamp} cannot be kept \
         within the battery limits"
    )]
    InfeasibleScenario { interval: usize, timestamp: DateTime<Local> },

    #[error("intervals #{start}..#{end} cannot be scheduled with the given controllers")]
    UnschedulableRegion { start: usize, end: usize },

    #[error("failed to read the scenario")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}

/// Fail with [`Error::InvalidParameter`] unless the condition holds.
macro_rules! ensure_parameter {
    ($condition:expr, $name:literal, $($reason:tt)+) => {
        if !$condition {
            return Err($crate::core::error::Error::invalid_parameter($name, format!($($reason)+)));
        }
    };
}

pub(crate) use ensure_parameter;
