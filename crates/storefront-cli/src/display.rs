//! Shopper-facing formatting helpers.

use chrono::{DateTime, Local, Utc};

/// Formats a whole-dong amount the way the storefront shows prices:
/// `1.250.000 đ`. Zero or negative prices read "Liên hệ" (price on request).
pub(crate) fn format_price(amount: i64) -> String {
    if amount <= 0 {
        return "Liên hệ".to_string();
    }
    format!("{} đ", group_thousands(amount))
}

/// Formats a total, which is shown even when zero.
pub(crate) fn format_total(amount: i64) -> String {
    format!("{}đ", group_thousands(amount))
}

fn group_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_use_dot_grouping() {
        assert_eq!(format_price(250_000), "250.000 đ");
        assert_eq!(format_price(1_250_000), "1.250.000 đ");
        assert_eq!(format_price(999), "999 đ");
    }

    #[test]
    fn non_positive_price_is_on_request() {
        assert_eq!(format_price(0), "Liên hệ");
    }

    #[test]
    fn totals_show_zero() {
        assert_eq!(format_total(0), "0đ");
        assert_eq!(format_total(-1_000), "-1.000đ");
    }
}
