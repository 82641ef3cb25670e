use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::filter::FilterOptions;
use crate::fmt::{count, date, euro, percent, yes_no};
use crate::models::Transaction;
use crate::reports::{CategoryShare, KeyMetrics, MonthlyCategorySales, YearSales};
use crate::session::Dashboard;

fn year_label(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "–".to_string())
}

fn amount(val: f64) -> Cell {
    Cell::new(euro(val)).set_alignment(CellAlignment::Right)
}

// ---------------------------------------------------------------------------
// Pure formatting functions (view data → String)
// ---------------------------------------------------------------------------

pub fn format_summary(year: Option<i32>, m: &KeyMetrics) -> String {
    let y = year_label(year);
    let mut table = Table::new();
    table.set_header(vec!["Kennzahl", "Wert"]);
    table.add_row(vec![Cell::new(format!("Umsatz ({y})")), amount(m.total_sales)]);
    table.add_row(vec![Cell::new(format!("Profit ({y})")), amount(m.total_profit)]);
    table.add_row(vec![
        Cell::new(format!("Bestellungen ({y})")),
        Cell::new(count(m.total_orders)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new(format!("Ø-Bestellwert ({y})")),
        amount(m.average_order_value),
    ]);
    table.add_row(vec![
        Cell::new(format!("Retouren ({y})")),
        Cell::new(format!("{} ({})", count(m.returned_orders), percent(m.return_rate)))
            .set_alignment(CellAlignment::Right),
    ]);
    format!("{}\n{table}", "Kennzahlen".bold())
}

pub fn format_years(rows: &[YearSales]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Jahr", "Umsatz"]);
    for r in rows {
        table.add_row(vec![Cell::new(r.year), amount(r.total)]);
    }
    format!("{}\n{table}", "Umsatzentwicklung im Jahresvergleich".bold())
}

pub fn format_categories(year: Option<i32>, rows: &[CategoryShare]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Kategorie", "Umsatz", "Anteil"]);
    for r in rows {
        table.add_row(vec![
            Cell::new(&r.category),
            amount(r.total),
            Cell::new(percent(r.pct)).set_alignment(CellAlignment::Right),
        ]);
    }
    let title = format!("Umsatzverteilung {}", year_label(year));
    format!("{}\n{table}", title.bold())
}

pub fn format_monthly(year: Option<i32>, rows: &[MonthlyCategorySales]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Monat", "Kategorie", "Umsatz"]);
    for r in rows {
        table.add_row(vec![Cell::new(r.month_name), Cell::new(&r.category), amount(r.total)]);
    }
    let title = format!("Monatlicher Umsatz nach Kategorien ({})", year_label(year));
    format!("{}\n{table}", title.bold())
}

pub fn format_transactions<'a, I>(year: Option<i32>, rows: I) -> String
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut table = Table::new();
    table.set_header(vec![
        "Datum", "Kategorie", "Region", "Umsatz in €", "Gewinn in €", "Zahlungsart", "Retoure",
    ]);
    for t in rows {
        table.add_row(vec![
            Cell::new(date(t.order_date)),
            Cell::new(&t.category),
            Cell::new(&t.region),
            amount(t.total_amount),
            amount(t.profit_margin),
            Cell::new(&t.payment_method),
            Cell::new(yes_no(t.returned)),
        ]);
    }
    let title = format!("Transaktionen {}", year_label(year));
    format!("{}\n{table}", title.bold())
}

pub fn format_options(opts: &FilterOptions) -> String {
    let years: Vec<String> = opts.years.iter().map(|y| y.to_string()).collect();
    let mut table = Table::new();
    table.set_header(vec!["Filter", "Werte"]);
    table.add_row(vec![Cell::new("Jahr"), Cell::new(years.join(", "))]);
    table.add_row(vec![Cell::new("Regionen"), Cell::new(opts.regions.join(", "))]);
    table.add_row(vec![Cell::new("Kategorien"), Cell::new(opts.categories.join(", "))]);
    format!("{}\n{table}", "Filtereinstellungen".bold())
}

pub fn format_dashboard(d: &Dashboard) -> String {
    [
        format_summary(d.year, &d.metrics),
        format_years(&d.sales_by_year),
        format_categories(d.year, &d.category_share),
        format_monthly(d.year, &d.monthly),
        format_transactions(d.year, &d.transactions),
    ]
    .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_txn() -> Transaction {
        Transaction {
            order_date: NaiveDate::from_ymd_opt(2023, 7, 4),
            category: "Elektronik".to_string(),
            region: "North".to_string(),
            total_amount: 1234.5,
            profit_margin: 100.0,
            payment_method: "Nachnahme (COD)".to_string(),
            returned: true,
        }
    }

    #[test]
    fn test_format_summary_german_numbers() {
        let m = KeyMetrics {
            total_sales: 1234.56,
            total_profit: 200.0,
            total_orders: 1500,
            average_order_value: 0.82,
            returned_orders: 0,
            return_rate: 0.0,
        };
        let s = format_summary(Some(2023), &m);
        assert!(s.contains("Umsatz (2023)"));
        assert!(s.contains("1.234,56 €"));
        assert!(s.contains("1.500"));
        assert!(s.contains("0,82 €"));
    }

    #[test]
    fn test_format_transactions_row() {
        let t = sample_txn();
        let s = format_transactions(Some(2023), [&t]);
        assert!(s.contains("04.07.2023"));
        assert!(s.contains("Nachnahme (COD)"));
        assert!(s.contains("1.234,50 €"));
        assert!(s.contains("Ja"));
    }

    #[test]
    fn test_format_monthly_uses_german_months() {
        let rows = vec![MonthlyCategorySales {
            month: 3,
            month_name: "März",
            category: "Haus".to_string(),
            total: 10.0,
        }];
        let s = format_monthly(Some(2024), &rows);
        assert!(s.contains("März"));
        assert!(s.contains("10,00 €"));
    }

    #[test]
    fn test_format_options() {
        let opts = FilterOptions {
            categories: vec!["Haus".to_string(), "Sport".to_string()],
            regions: vec!["North".to_string()],
            years: vec![2024, 2023],
        };
        let s = format_options(&opts);
        assert!(s.contains("2024, 2023"));
        assert!(s.contains("Haus, Sport"));
    }
}
