//! # Dining API
//!
//! Two chained calls against the hosted dining API:
//!
//! 1. `GET /locations/{location}/periods/?date=YYYY-MM-DD` lists the meal
//!    periods served that day (breakfast, lunch, ...), each with an opaque id.
//! 2. `GET /locations/{location}/menu?date=YYYY-MM-DD&period={id}` returns the
//!    full menu for one period.
//!
//! The API rejects requests that do not look like they came from a browser,
//! so every request carries the headers the campus site itself sends.
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{
    Client,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    error::DiningError,
    models::{MenuResponse, Period, PeriodsResponse},
};

const BROWSER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
);
const SITE: &str = "https://lsu.campusdish.com";

pub const PERIODS_STAGE: &str = "periods";
pub const MENU_STAGE: &str = "menu";

#[derive(Clone, Debug)]
pub struct DiningClient {
    client: Client,
    base_url: String,
    location_id: String,
}

impl DiningClient {
    pub fn new(base_url: &str, location_id: &str, timeout: Duration) -> Result<Self, DiningError> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            location_id: location_id.to_string(),
        })
    }

    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    pub async fn fetch_periods(&self, date: &str) -> Result<PeriodsResponse, DiningError> {
        validate_date(date)?;

        let url = format!("{}/locations/{}/periods/", self.base_url, self.location_id);
        info!("Fetching periods from {url} for {date}");

        self.get_json(&url, &[("date", date)], PERIODS_STAGE).await
    }

    /// Raw menu JSON for one period, untouched.
    pub async fn fetch_menu(&self, date: &str, period_id: &str) -> Result<Value, DiningError> {
        validate_date(date)?;

        let url = format!("{}/locations/{}/menu", self.base_url, self.location_id);
        info!("Fetching menu from {url} for {date}, period {period_id}");

        self.get_json(&url, &[("date", date), ("period", period_id)], MENU_STAGE)
            .await
    }

    pub async fn fetch_menu_for(
        &self,
        date: &str,
        meal: Option<&str>,
    ) -> Result<Value, DiningError> {
        let periods = self.fetch_periods(date).await?;
        let period = select_period(&periods, date, meal)?;

        info!("Using period {} ({})", period.name, period.id);

        self.fetch_menu(date, &period.id).await
    }

    pub async fn fetch_typed_menu(
        &self,
        date: &str,
        meal: Option<&str>,
    ) -> Result<MenuResponse, DiningError> {
        let menu = self.fetch_menu_for(date, meal).await?;

        Ok(serde_json::from_value(menu)?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        stage: &'static str,
    ) -> Result<T, DiningError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        #[cfg(feature = "verbose")]
        tracing::debug!("{stage} response status: {status}");

        if !status.is_success() {
            warn!("{stage} fetch failed: {status}");
            return Err(DiningError::Status { stage, status });
        }

        let bytes = response.bytes().await?;

        #[cfg(feature = "verbose")]
        tracing::debug!("{stage} response body: {}", String::from_utf8_lossy(&bytes));

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Picks the requested meal period by case-insensitive name, or the first
/// period of the day when no meal is given.
pub fn select_period<'a>(
    periods: &'a PeriodsResponse,
    date: &str,
    meal: Option<&str>,
) -> Result<&'a Period, DiningError> {
    // an empty meal means no meal, like a bare `?meal=`
    let meal = meal.filter(|m| !m.trim().is_empty());

    let not_found = |available: String| DiningError::PeriodNotFound {
        meal: meal.unwrap_or("any").to_string(),
        date: date.to_string(),
        available,
    };

    let periods = match periods.periods.as_deref() {
        Some(periods) if !periods.is_empty() => periods,
        _ => return Err(not_found("none".to_string())),
    };

    let Some(meal) = meal else {
        return Ok(&periods[0]);
    };

    periods
        .iter()
        .find(|p| p.name.to_lowercase() == meal.to_lowercase())
        .ok_or_else(|| {
            not_found(
                periods
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        })
}

pub fn validate_date(date: &str) -> Result<NaiveDate, DiningError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| DiningError::InvalidDate(date.to_string()))
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(REFERER, HeaderValue::from_static("https://lsu.campusdish.com/"));
    headers.insert(ORIGIN, HeaderValue::from_static(SITE));

    headers
}
