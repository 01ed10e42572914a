use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount error: {0}")]
    InvalidFormat(String)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Date error: Value is an empty string")]
    Empty,
    #[error("Date error: Expected 8, 12 or 14 digits but found {0}")]
    InvalidLength(usize),
    #[error("Date error: Value contains a non-digit character in '{0}'")]
    InvalidDigits(String),
    #[error("Date error: Fractional seconds '{0}' are not valid")]
    InvalidFraction(String),
    #[error("Date error: {year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidCalendarDate {
        year: i32,
        month: u32,
        day: u32
    },
    #[error("Date error: {hour:02}:{minute:02}:{second:02} is not a time of day")]
    InvalidTime {
        hour: u32,
        minute: u32,
        second: u32
    },
    #[error("Date error: Timezone suffix is missing its closing bracket")]
    UnterminatedZone,
    #[error("Date error: Timezone offset '{0}' is not a valid number of hours")]
    InvalidOffset(String),
    #[error("Date error: Overflow")]
    Overflow
}
