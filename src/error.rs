use thiserror::Error;

/// Crate specific Errors implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronError {
    /// Cron expression has more fields than the schedule has.
    #[error("invalid cron expression: {0}")]
    InvalidCronSchedule(String),
    /// Numeric value expected but something else found.
    #[error("invalid numeric value: {0}")]
    InvalidDigitalValue(String),
    /// Invalid repeating pattern specified.
    #[error("invalid repeating pattern: {0}")]
    InvalidRepeatingPattern(String),
    /// Search crossed the start or end bound of the validity window.
    #[error("out of the timespan range")]
    OutOfTimespan,
    /// No matching time found within the iterations limit.
    #[error("invalid expression, loop limit exceeded")]
    LoopLimitExceeded,
    /// Timestamp can't be represented as a calendar time.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

impl CronError {
    /// Returns `true` if the error was caused by an unparsable cron expression or timestamp.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::InvalidCronSchedule(_)
                | Self::InvalidDigitalValue(_)
                | Self::InvalidRepeatingPattern(_)
                | Self::InvalidTimestamp(_)
        )
    }

    /// Returns `true` if the search went beyond the validity window.
    pub fn is_out_of_window(&self) -> bool {
        matches!(self, Self::OutOfTimespan)
    }

    /// Returns `true` if the search gave up, usually because the expression can never match.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::LoopLimitExceeded)
    }
}
