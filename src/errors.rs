use thiserror::Error;

use crate::decimal::{Money, Rate};

/// a single violated precondition on the loan parameters
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterViolation {
    #[error("opening balance must be positive, got {amount}")]
    NonPositiveOpeningBalance { amount: Money },

    #[error("annual rate must not be negative, got {rate}")]
    NegativeAnnualRate { rate: Rate },

    #[error("monthly payment must be positive, got {amount}")]
    NonPositiveMonthlyPayment { amount: Money },

    #[error("start month must be between 1 and 12, got {month}")]
    StartMonthOutOfRange { month: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid loan parameters: {}", list_violations(.violations))]
    InvalidParameters { violations: Vec<ParameterViolation> },

    #[error("monthly payment {payment} does not cover first-period interest {first_interest}")]
    PaymentDoesNotAmortize {
        payment: Money,
        first_interest: Money,
    },
}

fn list_violations(violations: &[ParameterViolation]) -> String {
    violations
        .iter()
        .map(ParameterViolation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameters_lists_every_violation() {
        let err = ScheduleError::InvalidParameters {
            violations: vec![
                ParameterViolation::NonPositiveOpeningBalance {
                    amount: Money::ZERO,
                },
                ParameterViolation::StartMonthOutOfRange { month: 13 },
            ],
        };

        let message = err.to_string();
        assert!(message.contains("opening balance must be positive"));
        assert!(message.contains("start month must be between 1 and 12, got 13"));
    }
}
