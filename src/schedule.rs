use chrono::NaiveDate;
use log::{debug, trace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanParameters;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};

/// last calendar year the engine will project into
pub const MAX_SCHEDULE_YEAR: i32 = 9999;

/// one billing period of a payoff schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodEntry {
    pub period_index: u32,
    pub calendar_month: u32,
    pub calendar_year: i32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

impl PeriodEntry {
    /// first day of the entry's calendar month
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.calendar_year, self.calendar_month, 1)
    }
}

/// how the period loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffOutcome {
    /// balance reached zero
    PaidOff,
    /// projection stopped at the year cap with balance remaining
    HorizonExceeded,
}

/// aggregate totals over the whole schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub periods: u32,
    /// periods times the fixed monthly payment, capped remainder included
    pub total_payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    /// zero by construction
    pub closing_balance: Money,
}

/// time-series point for charting balances over the life of the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub calendar_month: u32,
    pub calendar_year: i32,
    pub closing_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// payoff schedule for a fixed-payment installment loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSchedule {
    pub parameters: LoanParameters,
    pub monthly_rate: Rate,
    pub entries: Vec<PeriodEntry>,
    pub totals: ScheduleTotals,
    pub outcome: PayoffOutcome,
}

impl PayoffSchedule {
    /// generate the full payoff schedule for the given parameters
    pub fn generate(params: &LoanParameters) -> Result<Self> {
        params.validate()?;

        let monthly_rate = params.annual_rate.monthly_30_365();
        debug!(
            "generating payoff schedule: balance {} rate {} payment {}",
            params.opening_balance, monthly_rate, params.monthly_payment
        );

        // a payment that fails to beat the first interest charge can never
        // reduce the balance, so reject it before emitting any entry
        let first_interest = params.opening_balance * monthly_rate.as_decimal();
        if params.monthly_payment <= first_interest {
            return Err(ScheduleError::PaymentDoesNotAmortize {
                payment: params.monthly_payment,
                first_interest,
            });
        }

        let mut entries = Vec::new();
        let mut balance = params.opening_balance;
        let mut cumulative_interest = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;
        let mut period_index: u32 = 0;
        let mut outcome = PayoffOutcome::PaidOff;

        while balance > Money::ZERO {
            let (calendar_month, calendar_year) = params.start.position(period_index);
            if calendar_year > MAX_SCHEDULE_YEAR {
                outcome = PayoffOutcome::HorizonExceeded;
                break;
            }

            let interest = balance * monthly_rate.as_decimal();
            // cap the principal portion so the final period never pays
            // more than the remaining balance
            let principal = (params.monthly_payment - interest).min(balance);
            let opening_balance = balance;
            balance = (balance - principal).max(Money::ZERO);

            cumulative_interest += interest;
            cumulative_principal += principal;

            trace!(
                "period {}: {}/{} interest {} principal {} closing {}",
                period_index,
                calendar_month,
                calendar_year,
                interest,
                principal,
                balance
            );

            entries.push(PeriodEntry {
                period_index,
                calendar_month,
                calendar_year,
                opening_balance,
                payment: params.monthly_payment,
                interest,
                principal,
                closing_balance: balance,
                cumulative_interest,
                cumulative_principal,
            });

            period_index += 1;
        }

        let totals = ScheduleTotals {
            periods: period_index,
            total_payment: params.monthly_payment * Decimal::from(period_index),
            total_interest: cumulative_interest,
            total_principal: cumulative_principal,
            closing_balance: Money::ZERO,
        };

        Ok(Self {
            parameters: *params,
            monthly_rate,
            entries,
            totals,
            outcome,
        })
    }

    /// get the entry for a specific period
    pub fn entry(&self, period_index: u32) -> Option<&PeriodEntry> {
        self.entries.get(period_index as usize)
    }

    /// last entry of the schedule
    pub fn final_entry(&self) -> Option<&PeriodEntry> {
        self.entries.last()
    }

    /// whether the balance reached zero within the projection horizon
    pub fn is_paid_off(&self) -> bool {
        self.outcome == PayoffOutcome::PaidOff
    }

    /// payoff duration as whole years plus remaining months
    pub fn duration(&self) -> (u32, u32) {
        (self.totals.periods / 12, self.totals.periods % 12)
    }

    /// plot-ready series of balances over time, totals excluded
    pub fn balance_series(&self) -> Vec<BalancePoint> {
        self.entries
            .iter()
            .map(|e| BalancePoint {
                calendar_month: e.calendar_month,
                calendar_year: e.calendar_year,
                closing_balance: e.closing_balance,
                cumulative_interest: e.cumulative_interest,
                cumulative_principal: e.cumulative_principal,
            })
            .collect()
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
