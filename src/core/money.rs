use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for every displayed and submitted total
pub const MONEY_SCALE: u32 = 2;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Round to `scale` decimal places, half away from zero
pub fn round_to(amount: Decimal, scale: u32) -> Decimal {
    amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to the cent, half away from zero (2.345 -> 2.35, -2.345 -> -2.35)
pub fn round2(amount: Decimal) -> Decimal {
    round_to(amount, MONEY_SCALE)
}

/// `a * b`, clamped to zero when the product cannot be represented
pub fn mul_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::ZERO)
}

/// `a + b`, clamped to zero when the sum cannot be represented
pub fn add_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::ZERO)
}

/// `a - b`, clamped to zero when the difference cannot be represented
pub fn sub_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or(Decimal::ZERO)
}

/// `amount * (percent / 100)`
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    percent
        .checked_div(ONE_HUNDRED)
        .map(|fraction| mul_or_zero(amount, fraction))
        .unwrap_or(Decimal::ZERO)
}
