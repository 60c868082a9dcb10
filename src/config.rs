use chrono::Datelike;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{ParameterViolation, Result, ScheduleError};

/// calendar month in which repayment begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStart {
    /// calendar month, 1-12
    pub month: u32,
    pub year: i32,
}

impl ScheduleStart {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// start at the month the time provider reports
    pub fn current(time: &SafeTimeProvider) -> Self {
        let now = time.now();
        Self {
            month: now.month(),
            year: now.year(),
        }
    }

    /// calendar position a number of whole periods after the start
    pub(crate) fn position(&self, periods: u32) -> (u32, i32) {
        let offset = self.month as i64 - 1 + periods as i64;
        ((offset % 12 + 1) as u32, self.year + (offset / 12) as i32)
    }
}

/// immutable input for one payoff computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub opening_balance: Money,
    pub annual_rate: Rate,
    pub monthly_payment: Money,
    pub start: ScheduleStart,
}

impl LoanParameters {
    pub fn new(
        opening_balance: Money,
        annual_rate: Rate,
        monthly_payment: Money,
        start: ScheduleStart,
    ) -> Self {
        Self {
            opening_balance,
            annual_rate,
            monthly_payment,
            start,
        }
    }

    /// parameters whose schedule starts at the current calendar month
    pub fn starting_now(
        opening_balance: Money,
        annual_rate: Rate,
        monthly_payment: Money,
        time: &SafeTimeProvider,
    ) -> Self {
        Self::new(
            opening_balance,
            annual_rate,
            monthly_payment,
            ScheduleStart::current(time),
        )
    }

    /// check every precondition, reporting all violated fields together
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();

        if self.opening_balance <= Money::ZERO {
            violations.push(ParameterViolation::NonPositiveOpeningBalance {
                amount: self.opening_balance,
            });
        }

        if self.annual_rate < Rate::ZERO {
            violations.push(ParameterViolation::NegativeAnnualRate {
                rate: self.annual_rate,
            });
        }

        if self.monthly_payment <= Money::ZERO {
            violations.push(ParameterViolation::NonPositiveMonthlyPayment {
                amount: self.monthly_payment,
            });
        }

        if !(1..=12).contains(&self.start.month) {
            violations.push(ParameterViolation::StartMonthOutOfRange {
                month: self.start.month,
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ScheduleError::InvalidParameters { violations })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn valid_params() -> LoanParameters {
        LoanParameters::new(
            Money::from_str_exact("3494.83").unwrap(),
            Rate::from_percentage(dec!(10.00)),
            Money::from_str_exact("155.16").unwrap(),
            ScheduleStart::new(1, 2024),
        )
    }

    #[test]
    fn test_valid_parameters_pass() {
        assert!(valid_params().validate().is_ok());
    }

    #[test]
    fn test_zero_balance_rejected() {
        let mut params = valid_params();
        params.opening_balance = Money::ZERO;

        let err = params.validate().unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidParameters {
                violations: vec![ParameterViolation::NonPositiveOpeningBalance {
                    amount: Money::ZERO,
                }],
            }
        );
    }

    #[test]
    fn test_all_violations_reported_together() {
        let params = LoanParameters::new(
            Money::ZERO,
            Rate::from_percentage(dec!(-1)),
            Money::from_major(-1),
            ScheduleStart::new(13, 2024),
        );

        match params.validate().unwrap_err() {
            ScheduleError::InvalidParameters { violations } => {
                assert_eq!(violations.len(), 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_start_month_bounds() {
        let mut params = valid_params();

        params.start = ScheduleStart::new(0, 2024);
        assert!(params.validate().is_err());

        params.start = ScheduleStart::new(12, 2024);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_start_from_time_provider() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap(),
        ));

        let start = ScheduleStart::current(&time);
        assert_eq!(start, ScheduleStart::new(7, 2024));
    }

    #[test]
    fn test_position_rolls_over_year_boundary() {
        let start = ScheduleStart::new(11, 2024);

        assert_eq!(start.position(0), (11, 2024));
        assert_eq!(start.position(1), (12, 2024));
        assert_eq!(start.position(2), (1, 2025));
        assert_eq!(start.position(14), (1, 2026));
    }
}
