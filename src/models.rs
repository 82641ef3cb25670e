use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One order after normalization. Immutable once the loader has built it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub order_date: Option<NaiveDate>,
    pub category: String,
    pub region: String,
    pub total_amount: f64,
    pub profit_margin: f64,
    pub payment_method: String,
    pub returned: bool,
}

impl Transaction {
    pub fn year(&self) -> Option<i32> {
        self.order_date.map(|d| d.year())
    }

    pub fn month(&self) -> Option<u32> {
        self.order_date.map(|d| d.month())
    }

    pub fn in_year(&self, year: i32) -> bool {
        self.year() == Some(year)
    }
}

/// Intermediate representation of a CSV row before normalization.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub order_date: String,
    pub category: String,
    pub region: String,
    pub total_amount: f64,
    pub profit_margin: f64,
    pub payment_method: String,
    pub returned: String,
}
