use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::{self, LoanDefinition, PaymentScheduleEntry};
use crate::types::{Money, Rate};

/// Cost-of-credit breakdown derived from an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpaymentResult {
    // Echoed inputs
    pub principal: Money,
    /// Principal minus the down payment — the amount actually financed.
    pub effective_principal: Money,
    pub term_months: u32,
    pub interest_rate: Rate,
    pub down_payment: Money,

    // Schedule aggregates
    pub monthly_payment: Money,
    pub total_payments: Money,
    pub total_interest: Money,
    pub effective_term: u32,

    // Overpayment derivations
    /// Total interest paid over the life of the loan.
    pub overpayment: Money,
    /// Overpayment relative to the *effective* principal, in percent.
    pub overpayment_percentage: Money,
    /// Nominal principal plus overpayment. The down payment is a sunk cost
    /// the borrower pays directly, not financed, so it is not double-counted.
    pub total_cost: Money,

    pub schedule: Vec<PaymentScheduleEntry>,
}

/// Derive overpayment figures for a loan. Delegates the schedule itself to
/// [`loan::compute_schedule`]; same preconditions apply.
pub fn compute_overpayment(loan: &LoanDefinition) -> OverpaymentResult {
    let result = loan::compute_schedule(loan);
    let effective_principal = loan.effective_principal();

    // The principal fully amortizes, so the only extra money paid is interest.
    let overpayment = result.total_interest;
    let overpayment_percentage = if effective_principal > Decimal::ZERO {
        (overpayment / effective_principal * dec!(100)).round_dp(2)
    } else {
        Decimal::ZERO
    };
    let total_cost = (loan.principal + overpayment).round_dp(2);

    OverpaymentResult {
        principal: loan.principal,
        effective_principal,
        term_months: loan.term_months,
        interest_rate: loan.interest_rate,
        down_payment: loan.down_payment,
        monthly_payment: result.monthly_payment,
        total_payments: result.total_payments,
        total_interest: result.total_interest,
        effective_term: result.effective_term,
        overpayment,
        overpayment_percentage,
        total_cost,
        schedule: result.schedule,
    }
}
