use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Transaction;

pub const MONTH_NAMES: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember",
];

/// German name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_orders: usize,
    pub average_order_value: f64,
    pub returned_orders: usize,
    pub return_rate: f64,
}

pub fn key_metrics<'a, I>(records: I) -> KeyMetrics
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut m = KeyMetrics::default();
    for t in records {
        m.total_sales += t.total_amount;
        m.total_profit += t.profit_margin;
        m.total_orders += 1;
        if t.returned {
            m.returned_orders += 1;
        }
    }
    if m.total_orders > 0 {
        m.average_order_value = m.total_sales / m.total_orders as f64;
        m.return_rate = m.returned_orders as f64 / m.total_orders as f64 * 100.0;
    }
    m
}

// ---------------------------------------------------------------------------
// Sales by year
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSales {
    pub year: i32,
    pub total: f64,
}

/// Sales per calendar year, ascending by year. Undated records are skipped.
pub fn sales_by_year<'a, I>(records: I) -> Vec<YearSales>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for t in records {
        if let Some(y) = t.year() {
            *by_year.entry(y).or_insert(0.0) += t.total_amount;
        }
    }
    by_year
        .into_iter()
        .map(|(year, total)| YearSales { year, total })
        .collect()
}

// ---------------------------------------------------------------------------
// Category share within a year
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    pub pct: f64,
}

pub fn sales_by_category<'a, I>(records: I, year: i32) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_cat: BTreeMap<&str, f64> = BTreeMap::new();
    for t in records.into_iter().filter(|t| t.in_year(year)) {
        *by_cat.entry(t.category.as_str()).or_insert(0.0) += t.total_amount;
    }
    let total: f64 = by_cat.values().sum();
    by_cat
        .into_iter()
        .map(|(category, t)| CategoryShare {
            category: category.to_string(),
            total: t,
            pct: if total != 0.0 { t / total * 100.0 } else { 0.0 },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Monthly sales per category within a year
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCategorySales {
    pub month: u32,
    pub month_name: &'static str,
    pub category: String,
    pub total: f64,
}

/// Ordered January to December by month number, then by category.
pub fn monthly_sales_by_category<'a, I>(records: I, year: i32) -> Vec<MonthlyCategorySales>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut grouped: BTreeMap<(u32, &str), f64> = BTreeMap::new();
    for t in records.into_iter().filter(|t| t.in_year(year)) {
        let Some(month) = t.month() else { continue };
        *grouped.entry((month, t.category.as_str())).or_insert(0.0) += t.total_amount;
    }
    grouped
        .into_iter()
        .map(|((month, category), total)| MonthlyCategorySales {
            month,
            month_name: month_name(month),
            category: category.to_string(),
            total,
        })
        .collect()
}
