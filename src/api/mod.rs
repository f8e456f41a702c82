use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    MonthRow, NormalizedInput, RateUnit, RawInput, TimeUnit, bar_caption, build_summary,
    format_brl, normalize, proportion_bar, simulate,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRateUnit {
    Month,
    Year,
}

impl From<CliRateUnit> for RateUnit {
    fn from(value: CliRateUnit) -> Self {
        match value {
            CliRateUnit::Month => RateUnit::Month,
            CliRateUnit::Year => RateUnit::Year,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTimeUnit {
    Month,
    Year,
}

impl From<CliTimeUnit> for TimeUnit {
    fn from(value: CliTimeUnit) -> Self {
        match value {
            CliTimeUnit::Month => TimeUnit::Month,
            CliTimeUnit::Year => TimeUnit::Year,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiRateUnit {
    #[serde(alias = "monthly", alias = "am")]
    Month,
    #[serde(alias = "annual", alias = "aa")]
    Year,
}

impl From<ApiRateUnit> for CliRateUnit {
    fn from(value: ApiRateUnit) -> Self {
        match value {
            ApiRateUnit::Month => CliRateUnit::Month,
            ApiRateUnit::Year => CliRateUnit::Year,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiTimeUnit {
    #[serde(alias = "months")]
    Month,
    #[serde(alias = "years")]
    Year,
}

impl From<ApiTimeUnit> for CliTimeUnit {
    fn from(value: ApiTimeUnit) -> Self {
        match value {
            ApiTimeUnit::Month => CliTimeUnit::Month,
            ApiTimeUnit::Year => CliTimeUnit::Year,
        }
    }
}

/// Raw form values as the web page submits them. Everything is optional and
/// textual: normalization, not deserialization, decides what they mean.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    principal: Option<String>,
    #[serde(alias = "monthly")]
    monthly_contribution: Option<String>,
    rate: Option<String>,
    rate_unit: Option<ApiRateUnit>,
    time: Option<String>,
    time_unit: Option<ApiTimeUnit>,
    #[serde(alias = "schedule")]
    include_schedule: Option<bool>,
}

#[derive(Parser, Debug)]
#[command(
    name = "juros",
    about = "Compound interest projector (monthly compounding, optional monthly contribution)"
)]
struct Cli {
    #[arg(
        long,
        default_value = "",
        help = "Initial amount; accepts \"1.234,56\", \"1234,56\" or \"1234.56\""
    )]
    principal: String,
    #[arg(
        long,
        default_value = "",
        help = "Contribution added at the start of each month"
    )]
    monthly: String,
    #[arg(long, default_value = "", help = "Interest rate in percent, e.g. 1 or 0,5")]
    rate: String,
    #[arg(long, value_enum, default_value_t = CliRateUnit::Month)]
    rate_unit: CliRateUnit,
    #[arg(long, default_value = "", help = "Projection horizon; capped at 100 years")]
    time: String,
    #[arg(long, value_enum, default_value_t = CliTimeUnit::Month)]
    time_unit: CliTimeUnit,
    #[arg(long, help = "Print the full month-by-month schedule")]
    schedule: bool,
}

#[derive(Debug)]
struct ApiRequest {
    raw: RawInput,
    include_schedule: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    has_input: bool,
    months: u32,
    final_balance: f64,
    total_invested: f64,
    total_interest: f64,
    final_balance_brl: String,
    total_invested_brl: String,
    total_interest_brl: String,
    invested_pct: f64,
    interest_pct: f64,
    bar_caption: String,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<Vec<MonthRow>>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn raw_input_from_cli(cli: &Cli) -> RawInput {
    RawInput {
        principal: cli.principal.clone(),
        monthly_contribution: cli.monthly.clone(),
        rate: cli.rate.clone(),
        rate_unit: cli.rate_unit.into(),
        time: cli.time.clone(),
        time_unit: cli.time_unit.into(),
    }
}

fn api_request_from_payload(payload: SimulatePayload) -> ApiRequest {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.principal {
        cli.principal = v;
    }
    if let Some(v) = payload.monthly_contribution {
        cli.monthly = v;
    }
    if let Some(v) = payload.rate {
        cli.rate = v;
    }
    if let Some(v) = payload.rate_unit {
        cli.rate_unit = v.into();
    }
    if let Some(v) = payload.time {
        cli.time = v;
    }
    if let Some(v) = payload.time_unit {
        cli.time_unit = v.into();
    }
    if let Some(v) = payload.include_schedule {
        cli.schedule = v;
    }

    ApiRequest {
        raw: raw_input_from_cli(&cli),
        include_schedule: cli.schedule,
    }
}

fn default_cli_for_api() -> Cli {
    Cli {
        principal: String::new(),
        monthly: String::new(),
        rate: String::new(),
        rate_unit: CliRateUnit::Month,
        time: String::new(),
        time_unit: CliTimeUnit::Month,
        schedule: false,
    }
}

fn build_simulate_response(normalized: &NormalizedInput, include_schedule: bool) -> SimulateResponse {
    if !normalized.has_input {
        return SimulateResponse {
            has_input: false,
            months: 0,
            final_balance: 0.0,
            total_invested: 0.0,
            total_interest: 0.0,
            final_balance_brl: String::new(),
            total_invested_brl: String::new(),
            total_interest_brl: String::new(),
            invested_pct: 0.0,
            interest_pct: 0.0,
            bar_caption: String::new(),
            summary: String::new(),
            rows: None,
        };
    }

    let result = simulate(&normalized.input);
    let bar = proportion_bar(&result);

    SimulateResponse {
        has_input: true,
        months: normalized.input.months,
        final_balance: result.final_balance,
        total_invested: result.total_invested,
        total_interest: result.total_interest,
        final_balance_brl: format_brl(result.final_balance),
        total_invested_brl: format_brl(result.total_invested),
        total_interest_brl: format_brl(result.total_interest),
        invested_pct: bar.invested_pct,
        interest_pct: bar.interest_pct,
        bar_caption: bar_caption(&result),
        summary: build_summary(normalized, &result),
        rows: if include_schedule {
            Some(result.rows)
        } else {
            None
        },
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Compound interest calculator listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

/// One-shot command line run: parse the form-equivalent flags, simulate,
/// print the summary (and the schedule when asked).
pub fn run_cli() {
    let cli = Cli::parse();
    let normalized = normalize(&raw_input_from_cli(&cli));

    if !normalized.has_input {
        println!("Nothing to simulate yet. Pass --principal, --monthly, --rate and --time.");
        return;
    }

    let result = simulate(&normalized.input);
    println!("{}", build_summary(&normalized, &result));
    println!();
    println!("{}", bar_caption(&result));

    if cli.schedule && !result.rows.is_empty() {
        println!();
        print_schedule_table(&result.rows);
    }
}

fn print_schedule_table(rows: &[MonthRow]) {
    println!(
        "{:>5}  {:>18}  {:>18}  {:>18}",
        "month", "balance", "invested", "interest"
    );
    for row in rows {
        println!(
            "{:>5}  {:>18}  {:>18}  {:>18}",
            row.month,
            format_brl(row.balance),
            format_brl(row.invested),
            format_brl(row.interest)
        );
    }
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(Query(payload): Query<SimulatePayload>) -> Response {
    simulate_handler_impl(payload)
}

async fn simulate_post_handler(Json(payload): Json<SimulatePayload>) -> Response {
    simulate_handler_impl(payload)
}

fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let request = api_request_from_payload(payload);
    let normalized = normalize(&request.raw);
    let response = build_simulate_response(&normalized, request.include_schedule);
    json_response(StatusCode::OK, response)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(api_request_from_payload(payload))
}
