//! Locally computed values for the checkout form's card expiry selectors.

use std::ops::RangeInclusive;

use chrono::{Datelike, Local};

pub const CARD_YEARS_AHEAD: i32 = 10;

pub fn credit_card_months(start_month: u32) -> RangeInclusive<u32> {
    start_month.clamp(1, 12)..=12
}

pub fn credit_card_years(start_year: i32) -> RangeInclusive<i32> {
    start_year..=start_year.saturating_add(CARD_YEARS_AHEAD)
}

pub fn credit_card_years_from_now() -> RangeInclusive<i32> {
    credit_card_years(Local::now().year())
}

pub fn current_month() -> u32 {
    Local::now().month()
}

#[cfg(test)]
#[path = "tests/checkout_tests.rs"]
mod tests;
