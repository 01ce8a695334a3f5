use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{compound_factor, monthly_rate, Money, Rate};

/// Balances at or below this are treated as fully repaid and the remaining
/// months are not generated. Currency-rounding tolerance, not a tunable
/// business parameter.
pub const RESIDUAL_BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Repayment method for a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Constant total payment; the interest/principal split shifts over time.
    Annuity,
    /// Constant principal portion; the total payment decreases over time.
    Differentiated,
}

/// A loan as received from a caller (CLI flags, JSON payload). The term may
/// be split across years and months; [`LoanRequest::resolve`] normalizes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Total loan amount.
    pub amount: Money,
    /// Term years, added to `term_months`.
    #[serde(default)]
    pub term_years: u32,
    /// Term months, added to `term_years`.
    #[serde(default)]
    pub term_months: u32,
    /// Annual interest rate in percent (e.g. 12 for 12%).
    pub interest_rate: Rate,
    /// Up-front payment deducted from the financed amount.
    pub down_payment: Option<Money>,
    /// Fixed extra payment applied every month on top of the base payment.
    pub extra_payment: Option<Money>,
    pub method: PaymentMethod,
}

impl LoanRequest {
    /// Total term in months across the years/months split.
    pub fn total_term_months(&self) -> u32 {
        self.term_years * 12 + self.term_months
    }

    /// Normalize into a [`LoanDefinition`]. Callers are expected to run
    /// [`validate_loan`] first; resolution itself never fails.
    pub fn resolve(&self) -> LoanDefinition {
        LoanDefinition {
            principal: self.amount,
            term_months: self.total_term_months(),
            interest_rate: self.interest_rate,
            down_payment: self.down_payment.unwrap_or(Decimal::ZERO),
            extra_payment: self.extra_payment.unwrap_or(Decimal::ZERO),
            method: self.method,
        }
    }
}

/// A validated, normalized loan. No identity beyond its field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDefinition {
    pub principal: Money,
    /// Resolved total term, 1..=360.
    pub term_months: u32,
    /// Annual interest rate in percent.
    pub interest_rate: Rate,
    pub down_payment: Money,
    pub extra_payment: Money,
    pub method: PaymentMethod,
}

impl LoanDefinition {
    /// The amount actually financed: principal minus the down payment.
    pub fn effective_principal(&self) -> Money {
        self.principal - self.down_payment
    }
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    /// 1-based month index.
    pub month: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Remaining balance after this payment. Never negative.
    pub balance: Money,
}

/// Aggregate result of a schedule computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// The constant payment for annuity loans; the first (largest) payment
    /// for differentiated loans.
    pub monthly_payment: Money,
    pub total_payments: Money,
    pub total_interest: Money,
    /// Months actually elapsed. Shorter than the nominal term when extra
    /// payments retire the balance early.
    pub effective_term: u32,
    pub schedule: Vec<PaymentScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Build the month-by-month payment schedule for a loan.
///
/// Pure and stateless: identical input yields identical output. Assumes the
/// definition passed [`validate_loan`]; in particular `term_months >= 1` and
/// `down_payment < principal` are preconditions, not re-checked here.
pub fn compute_schedule(loan: &LoanDefinition) -> LoanResult {
    match loan.method {
        PaymentMethod::Annuity => annuity_schedule(loan),
        PaymentMethod::Differentiated => differentiated_schedule(loan),
    }
}

/// Annuity method: constant total payment from the standard annuity formula
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, falling back to linear `P / n` when the
/// rate is zero.
fn annuity_schedule(loan: &LoanDefinition) -> LoanResult {
    let rate = monthly_rate(loan.interest_rate);
    let n = loan.term_months;
    let effective_principal = loan.effective_principal();

    let base_payment = if rate.is_zero() {
        effective_principal / Decimal::from(n)
    } else {
        let factor = compound_factor(rate, n);
        effective_principal * rate * factor / (factor - Decimal::ONE)
    };
    let total_payment = base_payment + loan.extra_payment;

    let mut schedule = Vec::with_capacity(n as usize);
    let mut balance = effective_principal;
    let mut total_payments = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=n {
        let interest = balance * rate;
        // The min guards the final month against overpaying the remaining
        // balance (rounding drift, extra payments).
        let principal = (total_payment - interest).min(balance);
        let payment = principal + interest;

        balance -= principal;
        total_payments += payment;
        total_interest += interest;

        schedule.push(PaymentScheduleEntry {
            month,
            payment: payment.round_dp(2),
            interest: interest.round_dp(2),
            principal: principal.round_dp(2),
            balance: balance.max(Decimal::ZERO).round_dp(2),
        });

        if balance <= RESIDUAL_BALANCE_EPSILON {
            break;
        }
    }

    LoanResult {
        monthly_payment: total_payment.round_dp(2),
        total_payments: total_payments.round_dp(2),
        total_interest: total_interest.round_dp(2),
        effective_term: schedule.len() as u32,
        schedule,
    }
}

/// Differentiated method: constant principal portion `P / n`, interest on the
/// current balance, so the total payment decreases month over month. The
/// extra payment is applied as additional principal, capped so the balance
/// never goes negative.
fn differentiated_schedule(loan: &LoanDefinition) -> LoanResult {
    let rate = monthly_rate(loan.interest_rate);
    let n = loan.term_months;
    let effective_principal = loan.effective_principal();
    let base_principal = effective_principal / Decimal::from(n);

    let mut schedule = Vec::with_capacity(n as usize);
    let mut balance = effective_principal;
    let mut total_payments = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=n {
        let interest = balance * rate;
        let principal = base_principal.min(balance);
        let extra = loan.extra_payment.min(balance - principal);
        let paid_principal = principal + extra;
        let payment = paid_principal + interest;

        balance -= paid_principal;
        total_payments += payment;
        total_interest += interest;

        schedule.push(PaymentScheduleEntry {
            month,
            payment: payment.round_dp(2),
            interest: interest.round_dp(2),
            principal: paid_principal.round_dp(2),
            balance: balance.max(Decimal::ZERO).round_dp(2),
        });

        if balance <= RESIDUAL_BALANCE_EPSILON {
            break;
        }
    }

    // Payments are not constant; report the first (largest) one.
    let monthly_payment = schedule
        .first()
        .map(|entry| entry.payment)
        .unwrap_or_default();

    LoanResult {
        monthly_payment,
        total_payments: total_payments.round_dp(2),
        total_interest: total_interest.round_dp(2),
        effective_term: schedule.len() as u32,
        schedule,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a loan request. Returns an ordered list of human-readable error
/// messages; empty means valid. Domain errors are never thrown.
pub fn validate_loan(request: &LoanRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if request.amount <= Decimal::ZERO {
        errors.push("Loan amount must be greater than 0".to_string());
    }

    let total_term = request.total_term_months();
    if !(1..=360).contains(&total_term) {
        errors.push("Loan term must be between 1 month and 30 years".to_string());
    }

    if request.interest_rate < Decimal::ZERO || request.interest_rate > dec!(100) {
        errors.push("Interest rate must be between 0% and 100%".to_string());
    }

    if let Some(down_payment) = request.down_payment {
        if down_payment < Decimal::ZERO {
            errors.push("Down payment cannot be negative".to_string());
        }
        if down_payment >= request.amount {
            errors.push(
                "Down payment cannot be greater than or equal to loan amount".to_string(),
            );
        }
    }

    if let Some(extra_payment) = request.extra_payment {
        if extra_payment < Decimal::ZERO {
            errors.push("Additional payment cannot be negative".to_string());
        }
    }

    errors
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Serialize a payment schedule to the row-oriented export format. The
/// delimiter and column order are a compatibility contract with existing
/// download consumers.
pub fn schedule_to_csv(schedule: &[PaymentScheduleEntry]) -> String {
    let mut lines = Vec::with_capacity(schedule.len() + 1);
    lines.push("Month,Payment,Interest,Principal,Balance".to_string());
    for entry in schedule {
        lines.push(format!(
            "{},{:.2},{:.2},{:.2},{:.2}",
            entry.month, entry.payment, entry.interest, entry.principal, entry.balance
        ));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
