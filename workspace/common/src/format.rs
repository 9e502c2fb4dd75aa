use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with thousands separators and two decimals: `-1,234.50`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac_part)
}

/// Formats a signed percentage change: `+1.25%` / `-0.40%`.
pub fn format_change(change: Decimal) -> String {
    let rounded = change.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{:.2}%", rounded)
    } else {
        format!("+{:.2}%", rounded.abs())
    }
}

/// Share of `value` in `total` as a percentage rounded to two decimals.
/// Returns zero for an empty total.
pub fn share_percent(value: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (value / total * Decimal::ONE_HUNDRED).round_dp(2)
}
