//! Monetary balance extraction (bank statements, fee receipts).

use once_cell::sync::Lazy;

use crate::cascade::Cascade;

/// Currency marker that must sit between the label and the amount.
const CURRENCY: &str = r"(?:Rs\.?|INR|₹|\$)";

/// Digits with optional thousands separators (Western or Indian grouping).
const AMOUNT: &str = r"([0-9,]+\.?[0-9]*)";

static BALANCE_CASCADE: Lazy<Cascade> = Lazy::new(|| {
    let labels = [
        ("balance", "Balance"),
        ("available_balance", r"Available\s+Balance"),
        ("current_balance", r"Current\s+Balance"),
        ("amount", "Amount"),
        ("total", "Total"),
        ("fees", "Fee[s]?"),
        ("tuition", "Tuition"),
    ];
    let table: Vec<(&'static str, String)> = labels
        .into_iter()
        .map(|(rule, label)| (rule, format!(r"(?i){label}[:\s]*{CURRENCY}\s*{AMOUNT}")))
        .collect();
    Cascade::new("balance", &table)
});

pub fn balance_cascade() -> &'static Cascade {
    &BALANCE_CASCADE
}

/// Find a positive monetary amount in single-line document text.
///
/// Thousands separators are removed from the stored value.
pub fn extract_balance(raw_text: &str) -> Option<String> {
    BALANCE_CASCADE
        .first_accepted(raw_text, |captured| {
            let amount = captured.replace(',', "");
            let value: f64 = amount.parse().ok()?;
            (value > 0.0).then_some(amount)
        })
        .map(|hit| hit.value)
}
