use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::filter::{self, FilterOptions, Selection};
use crate::loader;
use crate::models::Transaction;
use crate::reports::{self, CategoryShare, KeyMetrics, MonthlyCategorySales, YearSales};

/// A loaded transaction table. Built once per process from a CSV file and
/// only read afterwards.
#[derive(Debug, Clone)]
pub struct Session {
    source: Option<PathBuf>,
    transactions: Vec<Transaction>,
}

/// Everything a dashboard page shows for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub year: Option<i32>,
    pub metrics: KeyMetrics,
    pub sales_by_year: Vec<YearSales>,
    pub category_share: Vec<CategoryShare>,
    pub monthly: Vec<MonthlyCategorySales>,
    pub transactions: Vec<Transaction>,
}

impl Session {
    pub fn load(path: &Path) -> Result<Self> {
        let transactions = loader::load_transactions(path)?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            transactions,
        })
    }

    #[cfg(test)]
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            source: None,
            transactions,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn options(&self) -> FilterOptions {
        filter::filter_options(&self.transactions)
    }

    /// The selection's year, or the newest year in the table.
    pub fn resolve_year(&self, selection: &Selection) -> Option<i32> {
        selection.year.or_else(|| self.options().newest_year())
    }

    pub fn select(&self, selection: &Selection) -> Vec<&Transaction> {
        filter::apply(&self.transactions, selection)
    }

    pub fn dashboard(&self, selection: &Selection) -> Dashboard {
        let year = self.resolve_year(selection);
        let trend = self.select(&selection.trend());

        let Some(y) = year else {
            return Dashboard {
                year: None,
                metrics: KeyMetrics::default(),
                sales_by_year: reports::sales_by_year(trend.iter().copied()),
                category_share: Vec::new(),
                monthly: Vec::new(),
                transactions: Vec::new(),
            };
        };

        let detail: Vec<&Transaction> = trend.iter().copied().filter(|t| t.in_year(y)).collect();
        tracing::debug!(year = y, trend = trend.len(), detail = detail.len(), "computing dashboard");

        Dashboard {
            year: Some(y),
            metrics: reports::key_metrics(detail.iter().copied()),
            sales_by_year: reports::sales_by_year(trend.iter().copied()),
            category_share: reports::sales_by_category(trend.iter().copied(), y),
            // The monthly view ignores region/category restrictions.
            monthly: reports::monthly_sales_by_category(&self.transactions, y),
            transactions: detail.into_iter().cloned().collect(),
        }
    }
}
