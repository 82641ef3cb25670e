use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::Transaction;

/// User-chosen restriction of the record set. An empty set means "no
/// restriction" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub year: Option<i32>,
    pub regions: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

impl Selection {
    pub fn new<R, C>(year: Option<i32>, regions: R, categories: C) -> Self
    where
        R: IntoIterator<Item = String>,
        C: IntoIterator<Item = String>,
    {
        Self {
            year,
            regions: regions.into_iter().collect(),
            categories: categories.into_iter().collect(),
        }
    }

    /// Same region/category restriction, any year.
    pub fn trend(&self) -> Self {
        Self {
            year: None,
            ..self.clone()
        }
    }

    pub fn with_year(&self, year: i32) -> Self {
        Self {
            year: Some(year),
            ..self.clone()
        }
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        if !self.regions.is_empty() && !self.regions.contains(&t.region) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&t.category) {
            return false;
        }
        match self.year {
            Some(y) => t.in_year(y),
            None => true,
        }
    }
}

/// Records matching every criterion of `selection`, in input order.
pub fn apply<'a>(transactions: &'a [Transaction], selection: &Selection) -> Vec<&'a Transaction> {
    transactions.iter().filter(|t| selection.matches(t)).collect()
}

/// Distinct values available for each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub regions: Vec<String>,
    /// Newest first.
    pub years: Vec<i32>,
}

impl FilterOptions {
    pub fn newest_year(&self) -> Option<i32> {
        self.years.first().copied()
    }
}

pub fn filter_options(transactions: &[Transaction]) -> FilterOptions {
    let categories: BTreeSet<&str> = transactions.iter().map(|t| t.category.as_str()).collect();
    let regions: BTreeSet<&str> = transactions.iter().map(|t| t.region.as_str()).collect();
    let years: BTreeSet<i32> = transactions.iter().filter_map(|t| t.year()).collect();
    FilterOptions {
        categories: categories.into_iter().map(String::from).collect(),
        regions: regions.into_iter().map(String::from).collect(),
        years: years.into_iter().rev().collect(),
    }
}
