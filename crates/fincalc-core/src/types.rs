use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual interest rates, expressed in percent (12 = 12% p.a.).
pub type Rate = Decimal;

/// Convert an annual percentage rate into the monthly decimal rate used by
/// the schedule loops. Nominal division by 12, not an effective-rate
/// conversion.
pub(crate) fn monthly_rate(annual_pct: Rate) -> Decimal {
    annual_pct / dec!(12) / dec!(100)
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub(crate) fn compound_factor(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}
