use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{compound_factor, monthly_rate, Money, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How interest accrues on a savings plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestRegime {
    /// Pure linear accumulation, no interest at all.
    None,
    /// Interest on the original initial balance only, never on
    /// contributions or prior interest.
    Simple,
    /// Interest on the running balance, compounding monthly.
    Compound,
}

/// A savings plan. At least one of `target_amount` / `monthly_contribution`
/// must be present; a target without an explicit contribution causes the
/// contribution to be derived by inverting the growth formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsDefinition {
    pub target_amount: Option<Money>,
    pub initial_amount: Money,
    /// Term in months, 1..=600.
    pub term_months: u32,
    /// Fixed monthly contribution. An explicit value is always respected,
    /// including an explicit zero; `None` triggers derivation from the
    /// target.
    pub monthly_contribution: Option<Money>,
    /// Annual interest rate in percent. Ignored for the `none` regime.
    pub interest_rate: Rate,
    pub regime: InterestRegime,
}

/// One row of a savings growth schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsScheduleEntry {
    /// 1-based month index.
    pub month: u32,
    pub start_amount: Money,
    pub contribution: Money,
    pub interest: Money,
    pub end_amount: Money,
}

/// Aggregate result of a savings projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsResult {
    pub final_amount: Money,
    /// Everything the saver paid in, including the initial balance.
    pub total_contributions: Money,
    pub total_interest: Money,
    /// The contribution actually applied: explicit, or derived from the
    /// target.
    pub monthly_contribution: Money,
    /// True when no target was given, or the final amount meets it.
    pub achieved: bool,
    /// First month whose ending balance meets the target.
    pub achievement_month: Option<u32>,
    pub schedule: Vec<SavingsScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project a savings plan month by month.
///
/// Pure and stateless. Assumes the definition passed [`validate_savings`];
/// in particular `term_months >= 1` is a precondition, not re-checked here.
pub fn compute_savings(plan: &SavingsDefinition) -> SavingsResult {
    let contribution = resolved_contribution(plan);
    let rate = monthly_rate(plan.interest_rate);

    let mut schedule = Vec::with_capacity(plan.term_months as usize);
    let mut balance = plan.initial_amount;
    let mut total_contributions = plan.initial_amount;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=plan.term_months {
        let start = balance;
        let interest = match plan.regime {
            InterestRegime::None => Decimal::ZERO,
            InterestRegime::Simple => plan.initial_amount * rate,
            InterestRegime::Compound => balance * rate,
        };
        let end = start + contribution + interest;

        schedule.push(SavingsScheduleEntry {
            month,
            start_amount: start.round_dp(2),
            contribution: contribution.round_dp(2),
            interest: interest.round_dp(2),
            end_amount: end.round_dp(2),
        });

        balance = end;
        total_contributions += contribution;
        total_interest += interest;
    }

    let final_amount = balance.round_dp(2);
    let achieved = plan
        .target_amount
        .map_or(true, |target| final_amount >= target);
    let achievement_month = plan.target_amount.and_then(|target| {
        schedule
            .iter()
            .find(|entry| entry.end_amount >= target)
            .map(|entry| entry.month)
    });

    SavingsResult {
        final_amount,
        total_contributions: total_contributions.round_dp(2),
        total_interest: total_interest.round_dp(2),
        monthly_contribution: contribution.round_dp(2),
        achieved,
        achievement_month,
        schedule,
    }
}

/// The contribution to apply each month: the explicit one when present,
/// otherwise derived from the target by inverting the regime's growth
/// formula. Zero when neither is given (validation rejects that case).
fn resolved_contribution(plan: &SavingsDefinition) -> Money {
    if let Some(contribution) = plan.monthly_contribution {
        return contribution;
    }
    let Some(target) = plan.target_amount else {
        return Decimal::ZERO;
    };

    let months = Decimal::from(plan.term_months);
    match plan.regime {
        // target = initial + c * n
        InterestRegime::None => (target - plan.initial_amount) / months,
        // target = initial * (1 + rate * n / 12 / 100) + c * n
        InterestRegime::Simple => {
            let growth = Decimal::ONE + plan.interest_rate * months / dec!(12) / dec!(100);
            (target - plan.initial_amount * growth) / months
        }
        // Future value of annuity: c = (target - initial * (1+r)^n) / (((1+r)^n - 1) / r)
        InterestRegime::Compound => {
            let rate = monthly_rate(plan.interest_rate);
            if rate.is_zero() {
                (target - plan.initial_amount) / months
            } else {
                let factor = compound_factor(rate, plan.term_months);
                (target - plan.initial_amount * factor) / ((factor - Decimal::ONE) / rate)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a savings plan. Returns an ordered list of human-readable error
/// messages; empty means valid.
pub fn validate_savings(plan: &SavingsDefinition) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(target) = plan.target_amount {
        if target <= Decimal::ZERO {
            errors.push("Target amount must be greater than 0".to_string());
        }
    }

    if plan.initial_amount < Decimal::ZERO {
        errors.push("Initial amount must be 0 or greater".to_string());
    }

    if plan.term_months < 1 {
        errors.push("Term must be greater than 0".to_string());
    }
    if plan.term_months > 600 {
        errors.push("Term cannot exceed 50 years (600 months)".to_string());
    }

    if let Some(contribution) = plan.monthly_contribution {
        if contribution < Decimal::ZERO {
            errors.push("Monthly contribution cannot be negative".to_string());
        }
    }

    if plan.regime != InterestRegime::None {
        if plan.interest_rate < Decimal::ZERO {
            errors.push("Interest rate must be 0 or greater".to_string());
        }
        if plan.interest_rate > dec!(100) {
            errors.push("Interest rate cannot exceed 100%".to_string());
        }
    }

    if plan.target_amount.is_none() && plan.monthly_contribution.is_none() {
        errors.push("Either target amount or monthly contribution must be specified".to_string());
    }

    errors
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Serialize a savings schedule to the row-oriented export format. The
/// delimiter and column order are a compatibility contract with existing
/// download consumers.
pub fn schedule_to_csv(schedule: &[SavingsScheduleEntry]) -> String {
    let mut lines = Vec::with_capacity(schedule.len() + 1);
    lines.push("Month,Start Amount,Contribution,Interest,End Amount".to_string());
    for entry in schedule {
        lines.push(format!(
            "{},{:.2},{:.2},{:.2},{:.2}",
            entry.month, entry.start_amount, entry.contribution, entry.interest, entry.end_amount
        ));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
