use crate::error::{ProvisionError, ProvisionResult};
use lazy_static::lazy_static;
use regex::Regex;

/// Hours billed per day
pub const HOURS_PER_DAY: f64 = 24.0;

/// Days billed per month
pub const DAYS_PER_MONTH: f64 = 30.0;

lazy_static! {
    static ref HOURLY_PRICE: Regex =
        Regex::new(r"(?i)^\s*\$\s*([0-9]+(?:\.[0-9]+)?)\s*hourly\s*$").unwrap();
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a price label of the form `$<number> hourly`
pub fn parse_hourly_price(node_type: &str, price: &str) -> ProvisionResult<f64> {
    HOURLY_PRICE
        .captures(price)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .ok_or_else(|| ProvisionError::InvalidPrice {
            node_type: node_type.to_string(),
            value: price.to_string(),
        })
}

/// Monthly cost for a number of instances, assuming 24h days and 30-day months
pub fn monthly_cost(hourly_price: f64, instance_count: u32) -> f64 {
    round2(HOURS_PER_DAY * DAYS_PER_MONTH * hourly_price * f64::from(instance_count))
}
