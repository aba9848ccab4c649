//! Purpose: Turn computed averages into human text and a stable JSON envelope.
//! Exports: `Report`, `report_json`, `format_amount`.
//! Role: Presentation helpers shared by the CLI and library callers.
//! Invariants: Formatting never feeds back into the computed average.
//! Invariants: JSON key names are stable; fields are additive-only.

use crate::core::average::average_order_value;
use crate::core::order::Order;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub orders: usize,
    pub items: usize,
    pub average: f64,
}

impl Report {
    pub fn from_orders(orders: &[Order]) -> Self {
        Self {
            orders: orders.len(),
            items: orders.iter().map(|order| order.items().len()).sum(),
            average: average_order_value(orders),
        }
    }

    pub fn human(&self) -> String {
        format!(
            "The average value of the orders is: {}",
            format_amount(self.average)
        )
    }
}

pub fn report_json(report: &Report) -> Value {
    json!({
        "average": report.average,
        "formatted": format_amount(report.average),
        "orders": report.orders,
        "items": report.items,
    })
}

/// Two decimals with comma thousands separators, e.g. `1,234.50`.
/// Non-finite values render as `NaN`, `inf`, or `-inf`.
pub fn format_amount(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-inf" } else { "inf" }.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // -0.004 rounds to 0.00 and should not print a sign.
    let nonzero = whole.chars().chain(fraction.chars()).any(|c| c != '0');
    if value.is_sign_negative() && nonzero {
        format!("-{grouped}.{fraction}")
    } else {
        format!("{grouped}.{fraction}")
    }
}
