//! Report formatting for terminal output

use std::collections::BTreeMap;

use crate::models::{Money, MonthKey};

/// One `yyyy-MM  amount` line per month, amounts right-aligned
pub fn format_monthly_net(net: &BTreeMap<MonthKey, Money>, symbol: &str) -> String {
    if net.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let amounts: Vec<(String, String)> = net
        .iter()
        .map(|(month, amount)| (month.to_string(), amount.format_with_symbol(symbol)))
        .collect();
    let width = amounts
        .iter()
        .map(|(_, amount)| amount.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for (month, amount) in amounts {
        output.push_str(&format!("{}  {:>width$}\n", month, amount, width = width));
    }
    output
}
