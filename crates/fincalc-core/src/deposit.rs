use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{compound_factor, monthly_rate, Money, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How a deposit accrues interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositKind {
    /// Interest on the initial amount only; accrued interest never
    /// compounds.
    Simple,
    /// Interest accrues on the principal and is credited to it at the
    /// capitalization period.
    Capitalized,
    /// Interest credited to the balance every month.
    Compound,
}

/// Interval at which a capitalized deposit credits accrued interest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapitalizationPeriod {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl CapitalizationPeriod {
    fn months(self) -> u32 {
        match self {
            CapitalizationPeriod::Monthly => 1,
            CapitalizationPeriod::Quarterly => 3,
            CapitalizationPeriod::Yearly => 12,
        }
    }
}

/// A bank deposit with optional monthly additions and withdrawals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositDefinition {
    pub amount: Money,
    /// Term in months, 1..=600.
    pub term_months: u32,
    /// Annual interest rate in percent, 0 < rate <= 100.
    pub interest_rate: Rate,
    pub kind: DepositKind,
    /// Only consulted for the capitalized kind.
    #[serde(default)]
    pub capitalization: CapitalizationPeriod,
    pub monthly_addition: Option<Money>,
    pub monthly_withdrawal: Option<Money>,
}

/// One row of a deposit growth schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositScheduleEntry {
    /// 1-based month index.
    pub month: u32,
    pub start_amount: Money,
    pub interest: Money,
    pub addition: Money,
    pub withdrawal: Money,
    pub end_amount: Money,
}

/// Aggregate result of a deposit projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositResult {
    pub final_amount: Money,
    pub total_interest: Money,
    /// Effective annual rate in percent, derived from the nominal rate and
    /// the capitalization frequency (independent of additions and
    /// withdrawals).
    pub effective_rate: Rate,
    pub schedule: Vec<DepositScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project a deposit month by month.
///
/// Pure and stateless. Assumes the definition passed [`validate_deposit`];
/// in particular `term_months >= 1` and `amount > 0` are preconditions, not
/// re-checked here.
pub fn compute_deposit(deposit: &DepositDefinition) -> DepositResult {
    let rate = monthly_rate(deposit.interest_rate);
    let addition = deposit.monthly_addition.unwrap_or(Decimal::ZERO);
    let withdrawal = deposit.monthly_withdrawal.unwrap_or(Decimal::ZERO);
    let capitalization_months = match deposit.kind {
        // Compound is monthly capitalization by definition
        DepositKind::Compound => 1,
        _ => deposit.capitalization.months(),
    };

    let mut schedule = Vec::with_capacity(deposit.term_months as usize);
    // Principal earns interest; the accrued pot holds interest not yet
    // credited (empty for simple deposits, where interest never compounds).
    let mut principal = deposit.amount;
    let mut accrued = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=deposit.term_months {
        let start = principal + accrued;
        let interest = match deposit.kind {
            DepositKind::Simple => deposit.amount * rate,
            DepositKind::Capitalized | DepositKind::Compound => principal * rate,
        };
        accrued += interest;
        total_interest += interest;

        if deposit.kind != DepositKind::Simple && month % capitalization_months == 0 {
            principal += accrued;
            accrued = Decimal::ZERO;
        }
        principal += addition - withdrawal;

        let end = principal + accrued;
        schedule.push(DepositScheduleEntry {
            month,
            start_amount: start.round_dp(2),
            interest: interest.round_dp(2),
            addition: addition.round_dp(2),
            withdrawal: withdrawal.round_dp(2),
            end_amount: end.round_dp(2),
        });
    }

    // Whatever is still accrued pays out when the deposit closes.
    let final_amount = (principal + accrued).round_dp(2);

    DepositResult {
        final_amount,
        total_interest: total_interest.round_dp(2),
        effective_rate: effective_annual_rate(deposit.kind, rate, capitalization_months),
        schedule,
    }
}

/// Effective annual rate in percent: nominal for simple deposits,
/// `((1 + r*m)^(12/m) - 1) * 100` for interest credited every m months.
fn effective_annual_rate(kind: DepositKind, rate: Decimal, capitalization_months: u32) -> Rate {
    match kind {
        DepositKind::Simple => (rate * dec!(12) * dec!(100)).round_dp(2),
        DepositKind::Capitalized | DepositKind::Compound => {
            let period_rate = rate * Decimal::from(capitalization_months);
            let periods_per_year = 12 / capitalization_months;
            ((compound_factor(period_rate, periods_per_year) - Decimal::ONE) * dec!(100))
                .round_dp(2)
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a deposit. Returns an ordered list of human-readable error
/// messages; empty means valid.
pub fn validate_deposit(deposit: &DepositDefinition) -> Vec<String> {
    let mut errors = Vec::new();

    if deposit.amount <= Decimal::ZERO {
        errors.push("Deposit amount must be greater than 0".to_string());
    }

    if deposit.term_months < 1 {
        errors.push("Deposit term must be greater than 0".to_string());
    }
    if deposit.term_months > 600 {
        errors.push("Deposit term cannot exceed 50 years (600 months)".to_string());
    }

    if deposit.interest_rate <= Decimal::ZERO {
        errors.push("Interest rate must be greater than 0".to_string());
    }
    if deposit.interest_rate > dec!(100) {
        errors.push("Interest rate cannot exceed 100%".to_string());
    }

    if let Some(addition) = deposit.monthly_addition {
        if addition < Decimal::ZERO {
            errors.push("Monthly addition cannot be negative".to_string());
        }
    }

    if let Some(withdrawal) = deposit.monthly_withdrawal {
        if withdrawal < Decimal::ZERO {
            errors.push("Monthly withdrawal cannot be negative".to_string());
        }
    }

    errors
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Serialize a deposit schedule to the row-oriented export format. The
/// delimiter and column order are a compatibility contract with existing
/// download consumers.
pub fn schedule_to_csv(schedule: &[DepositScheduleEntry]) -> String {
    let mut lines = Vec::with_capacity(schedule.len() + 1);
    lines.push("Month,Start Amount,Interest Earned,Addition,Withdrawal,End Amount".to_string());
    for entry in schedule {
        lines.push(format!(
            "{},{:.2},{:.2},{:.2},{:.2},{:.2}",
            entry.month,
            entry.start_amount,
            entry.interest,
            entry.addition,
            entry.withdrawal,
            entry.end_amount
        ));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn deposit(kind: DepositKind) -> DepositDefinition {
        DepositDefinition {
            amount: dec!(10_000),
            term_months: 12,
            interest_rate: dec!(12),
            kind,
            capitalization: CapitalizationPeriod::Monthly,
            monthly_addition: None,
            monthly_withdrawal: None,
        }
    }

    // ---------------------------------------------------------------
    // 1. Simple: flat interest on the initial amount
    // ---------------------------------------------------------------
    #[test]
    fn test_simple_deposit() {
        let result = compute_deposit(&deposit(DepositKind::Simple));

        assert_eq!(result.final_amount, dec!(11_200.00));
        assert_eq!(result.total_interest, dec!(1200.00));
        assert_eq!(result.effective_rate, dec!(12.00));
        for entry in &result.schedule {
            assert_eq!(entry.interest, dec!(100.00));
        }
    }

    // ---------------------------------------------------------------
    // 2. Compound: monthly compounding
    // ---------------------------------------------------------------
    #[test]
    fn test_compound_deposit() {
        let result = compute_deposit(&deposit(DepositKind::Compound));

        // 10,000 * 1.01^12
        assert_eq!(result.final_amount, dec!(11_268.25));
        assert_eq!(result.total_interest, dec!(1268.25));
        // (1.01^12 - 1) * 100
        assert_eq!(result.effective_rate, dec!(12.68));
    }

    // ---------------------------------------------------------------
    // 3. Capitalized quarterly: between compound and simple
    // ---------------------------------------------------------------
    #[test]
    fn test_capitalized_quarterly_deposit() {
        let mut d = deposit(DepositKind::Capitalized);
        d.capitalization = CapitalizationPeriod::Quarterly;
        let result = compute_deposit(&d);

        // Quarter by quarter: 10,000 -> 10,300 -> 10,609 -> 10,927.27 -> 11,255.09
        assert_eq!(result.final_amount, dec!(11_255.09));
        assert_eq!(result.total_interest, dec!(1255.09));
        // (1.03^4 - 1) * 100
        assert_eq!(result.effective_rate, dec!(12.55));

        let simple = compute_deposit(&deposit(DepositKind::Simple));
        let compound = compute_deposit(&deposit(DepositKind::Compound));
        assert!(result.final_amount > simple.final_amount);
        assert!(result.final_amount < compound.final_amount);
    }

    // ---------------------------------------------------------------
    // 4. Yearly capitalization over one year equals simple growth
    // ---------------------------------------------------------------
    #[test]
    fn test_capitalized_yearly_single_year() {
        let mut d = deposit(DepositKind::Capitalized);
        d.capitalization = CapitalizationPeriod::Yearly;
        let result = compute_deposit(&d);

        // Interest only credits once, at month 12
        assert_eq!(result.final_amount, dec!(11_200.00));
        assert_eq!(result.effective_rate, dec!(12.00));
    }

    // ---------------------------------------------------------------
    // 5. Additions and withdrawals flow through each row
    // ---------------------------------------------------------------
    #[test]
    fn test_additions_and_withdrawals() {
        let mut d = deposit(DepositKind::Compound);
        d.monthly_addition = Some(dec!(500));
        d.monthly_withdrawal = Some(dec!(200));
        let result = compute_deposit(&d);

        for entry in &result.schedule {
            assert_eq!(entry.addition, dec!(500.00));
            assert_eq!(entry.withdrawal, dec!(200.00));
            let expected =
                entry.start_amount + entry.interest + entry.addition - entry.withdrawal;
            assert!((entry.end_amount - expected).abs() <= dec!(0.02));
        }
        // Net 300/month inflow on top of interest
        assert!(result.final_amount > dec!(10_000) + dec!(3600));
    }

    // ---------------------------------------------------------------
    // 6. Idempotence
    // ---------------------------------------------------------------
    #[test]
    fn test_idempotent() {
        let d = deposit(DepositKind::Capitalized);
        assert_eq!(compute_deposit(&d), compute_deposit(&d));
    }

    // ---------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------
    #[test]
    fn test_validate_accepts_valid_deposit() {
        assert_eq!(
            validate_deposit(&deposit(DepositKind::Simple)),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        let mut d = deposit(DepositKind::Simple);
        d.amount = Decimal::ZERO;
        let errors = validate_deposit(&d);
        assert!(errors.contains(&"Deposit amount must be greater than 0".to_string()));
    }

    #[test]
    fn test_validate_rejects_term_out_of_bounds() {
        let mut d = deposit(DepositKind::Simple);
        d.term_months = 0;
        let errors = validate_deposit(&d);
        assert!(errors.contains(&"Deposit term must be greater than 0".to_string()));

        d.term_months = 601;
        let errors = validate_deposit(&d);
        assert!(errors.contains(&"Deposit term cannot exceed 50 years (600 months)".to_string()));
    }

    #[test]
    fn test_validate_rejects_rate_out_of_bounds() {
        let mut d = deposit(DepositKind::Simple);
        d.interest_rate = Decimal::ZERO;
        let errors = validate_deposit(&d);
        assert!(errors.contains(&"Interest rate must be greater than 0".to_string()));

        d.interest_rate = dec!(101);
        let errors = validate_deposit(&d);
        assert!(errors.contains(&"Interest rate cannot exceed 100%".to_string()));
    }

    #[test]
    fn test_validate_rejects_negative_flows() {
        let mut d = deposit(DepositKind::Simple);
        d.monthly_addition = Some(dec!(-1));
        d.monthly_withdrawal = Some(dec!(-1));
        let errors = validate_deposit(&d);
        assert!(errors.contains(&"Monthly addition cannot be negative".to_string()));
        assert!(errors.contains(&"Monthly withdrawal cannot be negative".to_string()));
    }

    // ---------------------------------------------------------------
    // Export
    // ---------------------------------------------------------------
    #[test]
    fn test_schedule_to_csv_exact_format() {
        let d = DepositDefinition {
            amount: dec!(1000),
            term_months: 2,
            interest_rate: dec!(12),
            kind: DepositKind::Simple,
            capitalization: CapitalizationPeriod::Monthly,
            monthly_addition: None,
            monthly_withdrawal: None,
        };
        let result = compute_deposit(&d);
        let csv = schedule_to_csv(&result.schedule);

        assert_eq!(
            csv,
            "Month,Start Amount,Interest Earned,Addition,Withdrawal,End Amount\n\
             1,1000.00,10.00,0.00,0.00,1010.00\n\
             2,1010.00,10.00,0.00,0.00,1020.00"
        );
    }
}
