//! Money Formatting

use rust_decimal::Decimal;

/// Format minor units as Brazilian reais, e.g. `199900` -> `R$ 1.999,00`
pub fn format_cents_brl(cents: i64) -> String {
    let amount = Decimal::new(cents, 2).abs();
    let fixed = format!("{amount:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if cents < 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction}")
}
