pub mod config;
pub mod decimal;
pub mod errors;
pub mod schedule;

// re-export key types
pub use config::{LoanParameters, ScheduleStart};
pub use decimal::{Money, Rate};
pub use errors::{ParameterViolation, Result, ScheduleError};
pub use schedule::{
    BalancePoint, PayoffOutcome, PayoffSchedule, PeriodEntry, ScheduleTotals, MAX_SCHEDULE_YEAR,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
