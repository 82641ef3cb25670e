use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Result, UmsatzError};
use crate::models::{RawRow, Transaction};

// ---------------------------------------------------------------------------
// Label tables
// ---------------------------------------------------------------------------

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "order_date",
    "category",
    "region",
    "total_amount",
    "profit_margin",
    "payment_method",
    "returned",
];

pub const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("Home", "Haus"),
    ("Grocery", "Lebensmittel"),
    ("Electronics", "Elektronik"),
    ("Beauty", "Beauty"),
    ("Toys", "Spielzeug"),
    ("Sports", "Sport"),
];

pub const PAYMENT_LABELS: &[(&str, &str)] = &[
    ("Credit Card", "Kreditkarte"),
    ("UPI", "Überweisung (UPI)"),
    ("COD", "Nachnahme (COD)"),
    ("Debit Card", "Debitkarte"),
    ("Net Banking", "Online-Banking"),
];

/// Map `key` through `table`, returning `key` itself when it has no entry.
pub fn lookup<'a>(table: &[(&'static str, &'static str)], key: &'a str) -> &'a str {
    table
        .iter()
        .find(|(from, _)| *from == key)
        .map_or(key, |(_, to)| *to)
}

fn has_label(table: &[(&'static str, &'static str)], key: &str) -> bool {
    table.iter().any(|(from, _)| *from == key)
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_bool_literal(raw: &str) -> Option<bool> {
    let s = raw.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// How the `returned` column is encoded in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnedEncoding {
    /// Every non-empty cell is a boolean literal.
    Boolean,
    /// Free text; only "yes" counts as returned.
    Text,
}

impl ReturnedEncoding {
    pub fn detect<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let all_bool = cells
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .all(|c| parse_bool_literal(c).is_some());
        if all_bool {
            Self::Boolean
        } else {
            Self::Text
        }
    }

    pub fn parse(&self, raw: &str) -> bool {
        match self {
            Self::Boolean => parse_bool_literal(raw).unwrap_or(false),
            Self::Text => raw.trim().to_lowercase() == "yes",
        }
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut idx = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| UmsatzError::MissingColumn(name.to_string()))?;
    }
    let [i_date, i_cat, i_region, i_total, i_profit, i_payment, i_returned] = idx;

    let mut rows = Vec::new();
    for (n, result) in rdr.records().enumerate() {
        let record = result?;
        let row = n + 1;
        let field = |i: usize| record.get(i).unwrap_or("");
        // Blank or missing cells carry no weight in sums.
        let number = |i: usize, column: &'static str| {
            if field(i).trim().is_empty() {
                return Ok(0.0);
            }
            parse_amount(field(i)).ok_or_else(|| UmsatzError::InvalidNumber {
                row,
                column,
                value: field(i).to_string(),
            })
        };
        rows.push(RawRow {
            order_date: field(i_date).to_string(),
            category: field(i_cat).to_string(),
            region: field(i_region).to_string(),
            total_amount: number(i_total, "total_amount")?,
            profit_margin: number(i_profit, "profit_margin")?,
            payment_method: field(i_payment).to_string(),
            returned: field(i_returned).to_string(),
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Turn raw rows into display-ready transactions. Never drops a row.
pub fn normalize(rows: Vec<RawRow>) -> Vec<Transaction> {
    let encoding = ReturnedEncoding::detect(rows.iter().map(|r| r.returned.as_str()));
    let mut unmapped: BTreeSet<String> = BTreeSet::new();

    let out: Vec<Transaction> = rows
        .into_iter()
        .map(|raw| {
            if !has_label(CATEGORY_LABELS, &raw.category) {
                unmapped.insert(format!("category={}", raw.category));
            }
            if !has_label(PAYMENT_LABELS, &raw.payment_method) {
                unmapped.insert(format!("payment_method={}", raw.payment_method));
            }
            let category = lookup(CATEGORY_LABELS, &raw.category);
            let payment_method = lookup(PAYMENT_LABELS, &raw.payment_method);
            Transaction {
                order_date: parse_order_date(&raw.order_date),
                category: category.to_string(),
                region: raw.region,
                total_amount: raw.total_amount,
                profit_margin: raw.profit_margin,
                payment_method: payment_method.to_string(),
                returned: encoding.parse(&raw.returned),
            }
        })
        .collect();

    for label in &unmapped {
        tracing::debug!(%label, "no display label, passing through");
    }
    out
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let transactions = normalize(read_rows(reader)?);
    let missing_dates = transactions.iter().filter(|t| t.order_date.is_none()).count();
    tracing::info!(rows = transactions.len(), missing_dates, "loaded transactions");
    Ok(transactions)
}

pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path).map_err(|source| UmsatzError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "reading transactions");
    load_from_reader(std::io::BufReader::new(file))
}
