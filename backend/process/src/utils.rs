use chrono::{Duration, Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Every date from `days_before` before `center` through `days_after` after it.
pub fn date_range(center: NaiveDate, days_before: u32, days_after: u32) -> Vec<NaiveDate> {
    (-i64::from(days_before)..=i64::from(days_after))
        .map(|offset| center + Duration::days(offset))
        .collect()
}
