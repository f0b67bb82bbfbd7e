//! Shared conversion helpers for decimal columns.

use rust_decimal::Decimal;

/// Parses a stored decimal string, falling back to zero for unreadable
/// values so a damaged row never poisons a whole listing.
pub(crate) fn parse_amount(value: &str) -> Decimal {
    value.parse().unwrap_or(Decimal::ZERO)
}
