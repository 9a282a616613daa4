//! Error types for capitalization accrual.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccrualError {
    #[error("arithmetic overflow")] ArithmeticOverflow,
    #[error("division by zero")] DivisionByZero,
    #[error("clock regression: now {now} is before last update {last_update}")] ClockRegression { now: u64, last_update: u64 },
    #[error("invalid decimal: {0}")] InvalidDecimal(String),
    #[error("invalid config: {0}")] InvalidConfig(String),
}
