//! Fixed-rate loan EMI (equated monthly installment) calculation.
//!
//! Periods are monthly: the annual percentage rate is divided by 12 and the
//! term in years is multiplied by 12. Fractional terms give a fractional
//! period count which is used as-is. Nothing here rounds; display rounding
//! belongs to the caller.

use crate::utils::error::Result;
use crate::utils::validation::{
    parse_amount, validate_non_negative_amount, validate_positive_amount,
};
use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Validated loan parameters. Only the constructors below can build one, so a
/// `LoanInputs` value always satisfies `principal > 0`, `rate >= 0`, `term > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanInputs {
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub periodic_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

impl LoanInputs {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: f64) -> Result<Self> {
        validate_positive_amount("principal", principal)?;
        validate_non_negative_amount("annual_rate_percent", annual_rate_percent)?;
        validate_positive_amount("term_years", term_years)?;

        Ok(Self {
            principal,
            annual_rate_percent,
            term_years,
        })
    }

    /// Builds inputs from raw text fields (loan amount, annual rate, term in years).
    pub fn parse(principal: &str, annual_rate_percent: &str, term_years: &str) -> Result<Self> {
        let principal = parse_amount("principal", principal)?;
        let annual_rate_percent = parse_amount("annual_rate_percent", annual_rate_percent)?;
        let term_years = parse_amount("term_years", term_years)?;
        Self::new(principal, annual_rate_percent, term_years)
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn term_years(&self) -> f64 {
        self.term_years
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / MONTHS_PER_YEAR
    }

    pub fn number_of_payments(&self) -> f64 {
        self.term_years * MONTHS_PER_YEAR
    }
}

/// Below this, `growth - 1` has lost too many digits to cancellation.
const SMALL_GROWTH: f64 = 1e-6;

fn straight_split(principal: f64, periods: f64) -> LoanResult {
    LoanResult {
        periodic_payment: principal / periods,
        total_payment: principal,
        total_interest: 0.0,
    }
}

fn from_payment(principal: f64, periods: f64, periodic_payment: f64) -> LoanResult {
    let total_payment = periodic_payment * periods;
    LoanResult {
        periodic_payment,
        total_payment,
        total_interest: total_payment - principal,
    }
}

/// Computes the payment summary for already-validated inputs.
pub fn calculate_emi(inputs: &LoanInputs) -> LoanResult {
    let principal = inputs.principal();
    let rate = inputs.monthly_rate();
    let periods = inputs.number_of_payments();

    if rate == 0.0 {
        // The closed form is 0/0 at rate 0; the limit is a straight split.
        return straight_split(principal, periods);
    }

    let growth = (1.0 + rate).powf(periods);
    if !growth.is_finite() {
        // growth / (growth - 1) tends to 1.
        return from_payment(principal, periods, principal * rate);
    }

    if growth - 1.0 < SMALL_GROWTH {
        let excess = (periods * rate.ln_1p()).exp_m1();
        if excess <= 0.0 {
            return straight_split(principal, periods);
        }
        // Payments this close to the split can round below it; hold the floor.
        let periodic_payment =
            (principal * rate * (1.0 + excess) / excess).max(principal / periods);
        let total_payment = (periodic_payment * periods).max(principal);
        return LoanResult {
            periodic_payment,
            total_payment,
            total_interest: total_payment - principal,
        };
    }

    let periodic_payment = principal * rate * growth / (growth - 1.0);
    if !periodic_payment.is_finite() {
        return from_payment(principal, periods, principal * rate * (growth / (growth - 1.0)));
    }
    from_payment(principal, periods, periodic_payment)
}

/// Validates the three values and computes the payment summary.
pub fn calculate(principal: f64, annual_rate_percent: f64, term_years: f64) -> Result<LoanResult> {
    let inputs = LoanInputs::new(principal, annual_rate_percent, term_years)?;
    let result = calculate_emi(&inputs);
    tracing::debug!(
        monthly_rate = inputs.monthly_rate(),
        periods = inputs.number_of_payments(),
        payment = result.periodic_payment,
        "Calculated loan EMI"
    );
    Ok(result)
}
