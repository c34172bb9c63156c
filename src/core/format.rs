//! Display formatting for money and dates.

use chrono::{Datelike, NaiveDate};

/// `$12,890.00` for USD; other currencies are prefixed with their code.
pub fn format_balance(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let frac = cents % 100;

    match currency {
        "USD" => format!("{sign}${whole}.{frac:02}"),
        other => format!("{sign}{other} {whole}.{frac:02}"),
    }
}

/// Signed list amount: `+$4500.00` for income, `$125.50` for expenses.
pub fn format_amount(amount: f64) -> String {
    let prefix = if amount >= 0.0 { "+" } else { "" };
    format!("{prefix}${:.2}", amount.abs())
}

/// `Today`, `Yesterday`, or a short calendar date relative to `today`.
pub fn format_date(date: NaiveDate, today: NaiveDate, with_year: bool) -> String {
    if date == today {
        return "Today".into();
    }
    if today.pred_opt() == Some(date) {
        return "Yesterday".into();
    }
    let month = MONTHS[date.month0() as usize];
    if with_year {
        format!("{month} {}, {}", date.day(), date.year())
    } else {
        format!("{month} {}", date.day())
    }
}

/// `•••• •••• •••• 4532`, or `WALLET` for wallets without a card.
pub fn masked_card_number(last_four: Option<&str>) -> String {
    match last_four {
        Some(digits) => format!("•••• •••• •••• {digits}"),
        None => "WALLET".into(),
    }
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn balances_are_grouped() {
        assert_eq!(format_balance(12890.0, "USD"), "$12,890.00");
        assert_eq!(format_balance(850.25, "USD"), "$850.25");
        assert_eq!(format_balance(1_234_567.891, "USD"), "$1,234,567.89");
        assert_eq!(format_balance(-5432.5, "USD"), "-$5,432.50");
        assert_eq!(format_balance(0.0, "EUR"), "EUR 0.00");
    }

    #[test]
    fn amounts_are_signed() {
        assert_eq!(format_amount(4500.0), "+$4500.00");
        assert_eq!(format_amount(-125.5), "$125.50");
        assert_eq!(format_amount(0.0), "+$0.00");
    }

    #[test]
    fn dates_are_relative_to_today() {
        let today = day(2024, 12, 24);
        assert_eq!(format_date(day(2024, 12, 24), today, true), "Today");
        assert_eq!(format_date(day(2024, 12, 23), today, true), "Yesterday");
        assert_eq!(format_date(day(2024, 12, 22), today, true), "Dec 22, 2024");
        assert_eq!(format_date(day(2024, 12, 22), today, false), "Dec 22");
        assert_eq!(format_date(day(2024, 12, 31), day(2025, 1, 1), false), "Yesterday");
    }

    #[test]
    fn card_numbers_are_masked() {
        assert_eq!(masked_card_number(Some("4532")), "•••• •••• •••• 4532");
        assert_eq!(masked_card_number(None), "WALLET");
    }
}
