//! CDI reference rate from the Banco Central SGS time-series API.
//!
//! One request, no retries and no cache: a failure is reported as
//! `RateUnavailable` and the caller decides whether a manual rate can be used.

use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::CalculatorError;
use crate::utils::parse_decimal_br;

/// SGS series 4389: CDI annualized, 252 business-day basis, last observation
pub const DEFAULT_CDI_URL: &str =
    "https://api.bcb.gov.br/dados/serie/bcdata.sgs.4389/dados/ultimos/1?formato=json";

/// Set to any non-empty value to skip the network call entirely
pub const OFFLINE_ENV: &str = "RENDAFIXA_OFFLINE";

/// Anything at or above this is treated as a unit mix-up, not a rate
const MAX_PLAUSIBLE_CDI_PCT: i64 = 100;

/// CDI annual rate as published on a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CdiRate {
    pub date: NaiveDate,
    pub annual_pct: Decimal,
}

#[derive(Debug, Deserialize)]
struct SgsObservation {
    data: String,
    valor: String,
}

/// Range-check a CDI value in percent: 0 <= cdi < 100
pub fn check_cdi_range(annual_pct: Decimal) -> Result<Decimal, CalculatorError> {
    if annual_pct < Decimal::ZERO || annual_pct >= Decimal::from(MAX_PLAUSIBLE_CDI_PCT) {
        return Err(CalculatorError::invalid(
            "CDI",
            &format!("{} is outside the plausible range 0-100%", annual_pct),
        ));
    }
    Ok(annual_pct)
}

/// Parse an SGS JSON body, taking the most recent observation.
pub fn parse_sgs_response(body: &str) -> Result<CdiRate, CalculatorError> {
    let observations: Vec<SgsObservation> = serde_json::from_str(body)
        .map_err(|e| CalculatorError::ParseError(format!("unexpected SGS response: {}", e)))?;

    let latest = observations
        .last()
        .ok_or_else(|| CalculatorError::RateUnavailable("SGS returned no observations".into()))?;

    let date = NaiveDate::parse_from_str(latest.data.trim(), "%d/%m/%Y").map_err(|_| {
        CalculatorError::ParseError(format!("invalid SGS date '{}'", latest.data))
    })?;
    let annual_pct = check_cdi_range(parse_decimal_br(&latest.valor)?)?;

    Ok(CdiRate { date, annual_pct })
}

fn offline() -> bool {
    std::env::var_os(OFFLINE_ENV).is_some_and(|v| !v.is_empty())
}

/// Fetch the current CDI rate from `url`.
pub async fn fetch_cdi(url: &str) -> Result<CdiRate, CalculatorError> {
    if offline() {
        return Err(CalculatorError::RateUnavailable(format!(
            "network disabled by {}",
            OFFLINE_ENV
        )));
    }

    info!("Fetching CDI rate from {}", url);
    let unavailable = |e: reqwest::Error| {
        warn!("CDI fetch failed: {}", e);
        CalculatorError::RateUnavailable(e.to_string())
    };

    let body = Client::new()
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(unavailable)?
        .text()
        .await
        .map_err(unavailable)?;

    debug!("SGS response: {}", body);
    let rate = parse_sgs_response(&body)?;
    info!("CDI {}% as of {}", rate.annual_pct, rate.date);
    Ok(rate)
}
