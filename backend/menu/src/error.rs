use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiningError {
    #[error("Invalid date {0}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Meal period \"{meal}\" not found for date {date}. Available periods: {available}")]
    PeriodNotFound {
        meal: String,
        date: String,
        available: String,
    },

    #[error("Failed to fetch {stage}: {}", status.as_u16())]
    Status {
        stage: &'static str,
        status: StatusCode,
    },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}
