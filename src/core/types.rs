use serde::Serialize;

/// Unit the interest rate percentage is quoted in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RateUnit {
    Month,
    Year,
}

/// Unit the time horizon is quoted in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TimeUnit {
    Month,
    Year,
}

/// Validated engine inputs. All fields are non-negative and finite by the
/// time they get here; the simulator does not re-check them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationInput {
    pub principal: f64,
    pub monthly_contribution: f64,
    /// Fractional rate applied once per month, e.g. 0.01 for 1%.
    pub monthly_rate: f64,
    pub months: u32,
}

/// One simulated month, 1-indexed. Monetary figures are rounded to two
/// decimal places; `interest` is the running total through this month,
/// not the interest earned in this month alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRow {
    pub month: u32,
    pub balance: f64,
    pub invested: f64,
    pub interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub final_balance: f64,
    pub total_invested: f64,
    pub total_interest: f64,
    pub rows: Vec<MonthRow>,
}
