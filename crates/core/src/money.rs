//! Money

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Formatter, Money, Params, Position, iso};

/// Currency symbol used for every price in the storefront.
pub const BRL_SYMBOL: &str = "R$";

const BRL_POSITIONS: &[Position] = &[
    Position::Sign,
    Position::Symbol,
    Position::Space,
    Position::Amount,
];

const BRL_GROUPING: &[usize] = &[3; 9];

/// Formats an amount as Brazilian reais, e.g. `R$ 1.234,56`.
///
/// Amounts are rounded half away from zero to two decimal places.
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let money = Money::from_decimal(rounded, iso::BRL);

    Formatter::money(
        &money,
        Params {
            digit_separator: '.',
            exponent_separator: ',',
            separator_pattern: BRL_GROUPING,
            positions: BRL_POSITIONS,
            rounding: Some(2),
            symbol: Some(BRL_SYMBOL),
            code: Some(iso::BRL.iso_alpha_code),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
    }

    #[test]
    fn formats_cents() {
        assert_eq!(format_brl(Decimal::new(1250, 2)), "R$ 12,50");
        assert_eq!(format_brl(Decimal::new(5, 0)), "R$ 5,00");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_brl(Decimal::new(123_456_789, 2)), "R$ 1.234.567,89");
        assert_eq!(format_brl(Decimal::new(100_000, 2)), "R$ 1.000,00");
        assert_eq!(format_brl(Decimal::new(99_999, 2)), "R$ 999,99");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_brl(Decimal::new(12_345, 3)), "R$ 12,35");
        assert_eq!(format_brl(Decimal::new(-12_345, 3)), "-R$ 12,35");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_brl(Decimal::new(-1, 3)), "R$ 0,00");
    }

    #[test]
    fn groups_large_negative_amounts() {
        assert_eq!(
            format_brl(Decimal::new(-987_654_321_055, 2)),
            "-R$ 9.876.543.210,55"
        );
    }
}
