use chrono::NaiveDate;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: i64, currency: &str) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Whole-unit amounts grouped by thousands with a space, e.g. `-1 250 000 FCFA`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FcfaFormatter;

impl CurrencyFormatter for FcfaFormatter {
    fn format_amount(&self, amount: i64, currency: &str) -> String {
        let digits = amount.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }
        let sign = if amount < 0 { "-" } else { "" };
        if currency.is_empty() {
            format!("{sign}{grouped}")
        } else {
            format!("{sign}{grouped} {currency}")
        }
    }
}

/// `DD/MM/YYYY`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrenchDateFormatter;

impl DateFormatter for FrenchDateFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_spaces() {
        let fmt = FcfaFormatter;
        assert_eq!(fmt.format_amount(0, "FCFA"), "0 FCFA");
        assert_eq!(fmt.format_amount(999, "FCFA"), "999 FCFA");
        assert_eq!(fmt.format_amount(1_000, "FCFA"), "1 000 FCFA");
        assert_eq!(fmt.format_amount(1_000_000, "FCFA"), "1 000 000 FCFA");
        assert_eq!(fmt.format_amount(-400_000, "FCFA"), "-400 000 FCFA");
        assert_eq!(fmt.format_amount(12_345, ""), "12 345");
    }

    #[test]
    fn french_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(FrenchDateFormatter.format_date(date), "09/03/2024");
    }
}
