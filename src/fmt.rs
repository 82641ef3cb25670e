use chrono::NaiveDate;

fn group_thousands(int_part: &str) -> String {
    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}

/// Format a float with German separators: 1.234,56
pub fn decimal(val: f64) -> String {
    let negative = val < 0.0;
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let body = format!("{},{dec_part}", group_thousands(int_part));
    if negative && fixed != "0.00" {
        format!("-{body}")
    } else {
        body
    }
}

/// Currency display: 1.234,56 €
pub fn euro(val: f64) -> String {
    format!("{} €", decimal(val))
}

/// Integer count with German thousands separator: 1.234
pub fn count(n: usize) -> String {
    group_thousands(&n.to_string())
}

pub fn percent(val: f64) -> String {
    let fixed = format!("{val:.1}");
    format!("{} %", fixed.replace('.', ","))
}

/// DD.MM.YYYY, empty for a missing date.
pub fn date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.format("%d.%m.%Y").to_string()).unwrap_or_default()
}

pub fn yes_no(b: bool) -> &'static str {
    if b {
        "Ja"
    } else {
        "Nein"
    }
}
