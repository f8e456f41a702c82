mod engine;
mod normalize;
mod report;
mod types;

pub use engine::{round2, simulate};
pub use normalize::{
    MAX_MONTHS, NormalizedInput, RawInput, clamp_int, monthly_rate_from, months_from, normalize,
    parse_money, parse_number,
};
pub use report::{ProportionBar, bar_caption, build_summary, format_brl, proportion_bar};
pub use types::{MonthRow, RateUnit, SimulationInput, SimulationResult, TimeUnit};
