use super::types::{RateUnit, SimulationInput, TimeUnit};

/// Hard cap on the projection horizon: 100 years of monthly periods.
pub const MAX_MONTHS: i64 = 1200;

/// Raw textual form values, exactly as the user typed them.
#[derive(Debug, Clone)]
pub struct RawInput {
    pub principal: String,
    pub monthly_contribution: String,
    pub rate: String,
    pub rate_unit: RateUnit,
    pub time: String,
    pub time_unit: TimeUnit,
}

/// Normalizer output: the validated engine inputs plus the display-relevant
/// figures the presentation layer echoes back (rate percent, clamped time
/// value, both units) and the empty-state flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedInput {
    pub input: SimulationInput,
    pub rate_percent: f64,
    pub rate_unit: RateUnit,
    pub time_value: i64,
    pub time_unit: TimeUnit,
    pub has_input: bool,
}

/// Parses a monetary string that may use either the comma-decimal or the
/// dot-decimal convention: "1.234,56", "1234,56" and "1234.56" all parse to
/// the same amount. Currency markers and whitespace are ignored. Anything
/// unparseable degrades to 0 rather than failing.
///
/// The comma branch is a deliberate heuristic, not a locale parser: a comma
/// anywhere means dots are thousands separators. "1.234" without a comma
/// stays 1.234.
pub fn parse_money(input: &str) -> f64 {
    let clean: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != 'R' && *c != '$')
        .collect();
    if clean.is_empty() {
        return 0.0;
    }

    let normalized = if clean.contains(',') {
        clean.replace('.', "").replace(',', ".")
    } else {
        clean
    };

    match normalized.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Parses a plain numeric field (rate, time value): trims, accepts a single
/// comma as the decimal separator, and degrades to 0 on anything else.
pub fn parse_number(input: &str) -> f64 {
    let s = input.trim().replacen(',', ".", 1);
    if s.is_empty() {
        return 0.0;
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Truncates toward zero, then clamps into `[min, max]`. NaN truncates to 0.
pub fn clamp_int(value: f64, min: i64, max: i64) -> i64 {
    (value.trunc() as i64).clamp(min, max)
}

/// Converts a rate percentage into the fractional monthly rate. Annual rates
/// use the equivalent-compounding conversion `(1 + r)^(1/12) - 1`, not a
/// division by 12, so twelve monthly applications reproduce the annual
/// growth factor.
pub fn monthly_rate_from(rate_percent: f64, unit: RateUnit) -> f64 {
    let r = rate_percent / 100.0;
    match unit {
        RateUnit::Month => r,
        RateUnit::Year => (1.0 + r).powf(1.0 / 12.0) - 1.0,
    }
}

/// Converts a time value into months.
pub fn months_from(time_value: f64, unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Month => time_value,
        TimeUnit::Year => time_value * 12.0,
    }
}

/// Turns raw form text into validated engine inputs. Total: every string,
/// however malformed, maps to a well-formed `NormalizedInput`.
pub fn normalize(raw: &RawInput) -> NormalizedInput {
    let principal = parse_money(&raw.principal).max(0.0);
    let monthly_contribution = parse_money(&raw.monthly_contribution).max(0.0);
    let rate_percent = parse_number(&raw.rate).max(0.0);
    let time_value = clamp_int(parse_number(&raw.time), 0, MAX_MONTHS);

    let monthly_rate = monthly_rate_from(rate_percent, raw.rate_unit);
    let months = clamp_int(months_from(time_value as f64, raw.time_unit), 0, MAX_MONTHS) as u32;

    let has_input =
        principal > 0.0 || monthly_contribution > 0.0 || rate_percent > 0.0 || months > 0;

    NormalizedInput {
        input: SimulationInput {
            principal,
            monthly_contribution,
            monthly_rate,
            months,
        },
        rate_percent,
        rate_unit: raw.rate_unit,
        time_value,
        time_unit: raw.time_unit,
        has_input,
    }
}
