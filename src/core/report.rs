use serde::Serialize;

use super::normalize::NormalizedInput;
use super::types::{RateUnit, SimulationResult, TimeUnit};

/// Two-segment split of the final balance: the user's own money versus the
/// interest on top. The segments always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProportionBar {
    pub invested_pct: f64,
    pub interest_pct: f64,
}

/// Formats a monetary amount the Brazilian way: `R$ 1.234,56`, dot-grouped
/// thousands, comma decimals, sign in front of the symbol.
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as i64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}

/// Splits the final balance into invested vs interest percentages. The
/// denominator is floored to keep the division defined for a zero balance.
pub fn proportion_bar(result: &SimulationResult) -> ProportionBar {
    let denom = result.final_balance.max(0.000001);
    let invested_pct = ((result.total_invested / denom) * 100.0).clamp(0.0, 100.0);
    let interest_pct = (100.0 - invested_pct).max(0.0);

    ProportionBar {
        invested_pct,
        interest_pct,
    }
}

/// Caption under the proportion bar.
pub fn bar_caption(result: &SimulationResult) -> String {
    if result.total_interest >= 0.0 {
        format!(
            "Of the total, {} was your own money and {} was money working for you.",
            format_brl(result.total_invested),
            format_brl(result.total_interest),
        )
    } else {
        "Check the figures: the rate or period may be too low to show an effect.".to_string()
    }
}

fn rate_unit_label(unit: RateUnit) -> &'static str {
    match unit {
        RateUnit::Month => "% per month",
        RateUnit::Year => "% per year",
    }
}

fn time_unit_label(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Month => "months",
        TimeUnit::Year => "years",
    }
}

/// Plain-text summary of a simulation, suitable for copy-to-clipboard.
pub fn build_summary(input: &NormalizedInput, result: &SimulationResult) -> String {
    [
        "Compound interest simulation".to_string(),
        format!("• Initial amount: {}", format_brl(input.input.principal)),
        format!(
            "• Monthly contribution: {}",
            format_brl(input.input.monthly_contribution)
        ),
        format!(
            "• Rate: {}% ({})",
            input.rate_percent,
            rate_unit_label(input.rate_unit)
        ),
        format!(
            "• Period: {} {}",
            input.time_value,
            time_unit_label(input.time_unit)
        ),
        String::new(),
        format!("→ Final balance: {}", format_brl(result.final_balance)),
        format!("→ Total invested: {}", format_brl(result.total_invested)),
        format!("→ Interest earned: {}", format_brl(result.total_interest)),
    ]
    .join("\n")
}
