use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const SALES_CSV: &str = "\
order_id,order_date,category,region,total_amount,profit_margin,payment_method,returned
1,2023-01-15,Home,North,100.00,12.50,Credit Card,No
2,2023-01-20,Electronics,South,1200.00,150.00,COD,Yes
3,2023-03-02,Home,South,200.00,30.00,UPI,no
4,2024-02-11,Sports,North,80.00,8.00,Net Banking,No
5,not-a-date,Toys,North,15.00,1.50,Debit Card,No
";

fn write_sales(dir: &Path) -> PathBuf {
    let path = dir.join("ecommerce_sales.csv");
    std::fs::write(&path, SALES_CSV).unwrap();
    path
}

fn umsatz(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("umsatz").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn summary_json_for_year() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_sales(dir.path());
    let v = json_output(umsatz(dir.path()).args([
        "--file",
        csv.to_str().unwrap(),
        "--format",
        "json",
        "summary",
        "--year",
        "2023",
    ]));
    assert_eq!(v["year"], 2023);
    assert_eq!(v["metrics"]["total_sales"], 1500.0);
    assert_eq!(v["metrics"]["total_profit"], 192.5);
    assert_eq!(v["metrics"]["total_orders"], 3);
    assert_eq!(v["metrics"]["average_order_value"], 500.0);
    assert_eq!(v["metrics"]["returned_orders"], 1);
}

#[test]
fn summary_text_uses_german_formatting() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_sales(dir.path());
    umsatz(dir.path())
        .args(["--file", csv.to_str().unwrap(), "summary", "--year", "2023"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.500,00 €"))
        .stdout(predicate::str::contains("Ø-Bestellwert (2023)"));
}

#[test]
fn categories_filtered_by_region() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_sales(dir.path());
    let v = json_output(umsatz(dir.path()).args([
        "--file",
        csv.to_str().unwrap(),
        "--format",
        "json",
        "categories",
        "--year",
        "2023",
        "--region",
        "South",
    ]));
    let cats = v["categories"].as_array().unwrap();
    assert_eq!(cats.len(), 2);
    assert_eq!(cats[0]["category"], "Elektronik");
    assert_eq!(cats[0]["total"], 1200.0);
    assert_eq!(cats[1]["category"], "Haus");
    assert_eq!(cats[1]["total"], 200.0);
}

#[test]
fn years_sum_matches_dated_sales() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_sales(dir.path());
    let v = json_output(umsatz(dir.path()).args([
        "--file",
        csv.to_str().unwrap(),
        "--format",
        "json",
        "years",
    ]));
    let years = v["years"].as_array().unwrap();
    let labels: Vec<i64> = years.iter().map(|y| y["year"].as_i64().unwrap()).collect();
    assert_eq!(labels, vec![2023, 2024]);
    let sum: f64 = years.iter().map(|y| y["total"].as_f64().unwrap()).sum();
    assert_eq!(sum, 1580.0);
}

#[test]
fn dashboard_defaults_to_newest_year() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_sales(dir.path());
    let v = json_output(umsatz(dir.path()).args([
        "--file",
        csv.to_str().unwrap(),
        "--format",
        "json",
        "dashboard",
    ]));
    assert_eq!(v["year"], 2024);
    assert_eq!(v["metrics"]["total_orders"], 1);
    assert_eq!(v["transactions"][0]["payment_method"], "Online-Banking");
    assert_eq!(v["monthly"][0]["month_name"], "Februar");
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    umsatz(dir.path())
        .args(["--file", "does-not-exist.csv", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("does-not-exist.csv"));
}

#[test]
fn missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, "order_date,category,region\n2023-01-01,Home,North\n").unwrap();
    umsatz(dir.path())
        .args(["--file", path.to_str().unwrap(), "options"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required column: total_amount"));
}

#[test]
fn config_set_file_is_used_by_reports() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_sales(dir.path());
    umsatz(dir.path())
        .args(["config", "set-file", csv.to_str().unwrap()])
        .assert()
        .success();
    umsatz(dir.path())
        .args(["config", "set-format", "json"])
        .assert()
        .success();
    let v = json_output(umsatz(dir.path()).arg("options"));
    assert_eq!(v["years"], serde_json::json!([2024, 2023]));
    assert_eq!(v["regions"], serde_json::json!(["North", "South"]));
}
