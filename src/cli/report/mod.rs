pub mod text;

use serde_json::json;

use crate::cli::{Context, OutputFormat, ReportCommands};
use crate::error::Result;
use crate::filter::Selection;
use crate::models::Transaction;
use crate::reports::{self, CategoryShare, MonthlyCategorySales};
use crate::session::Session;

pub fn dispatch(cmd: &ReportCommands, ctx: &Context) -> Result<()> {
    let session = Session::load(&ctx.data_file)?;
    tracing::info!(
        source = ?session.source(),
        rows = session.transactions().len(),
        "session ready"
    );
    let out = match ctx.format {
        OutputFormat::Text => dispatch_text(cmd, &session),
        OutputFormat::Json => dispatch_json(cmd, &session)?,
    };
    println!("{out}");
    Ok(())
}

fn selection_of(cmd: &ReportCommands) -> Selection {
    match cmd {
        ReportCommands::Summary(args)
        | ReportCommands::Years(args)
        | ReportCommands::Categories(args)
        | ReportCommands::Transactions(args)
        | ReportCommands::Dashboard(args) => args.selection(),
        ReportCommands::Monthly { year } => Selection {
            year: *year,
            ..Selection::default()
        },
        ReportCommands::Options => Selection::default(),
    }
}

/// Year-restricted detail subset: region/category filter plus the resolved year.
fn detail<'a>(session: &'a Session, selection: &Selection) -> (Option<i32>, Vec<&'a Transaction>) {
    match session.resolve_year(selection) {
        Some(y) => (Some(y), session.select(&selection.with_year(y))),
        None => (None, Vec::new()),
    }
}

fn category_view(session: &Session, selection: &Selection) -> (Option<i32>, Vec<CategoryShare>) {
    let year = session.resolve_year(selection);
    let rows = year
        .map(|y| reports::sales_by_category(session.select(&selection.trend()), y))
        .unwrap_or_default();
    (year, rows)
}

/// Monthly view over the whole table; only the year applies.
fn monthly_view(session: &Session, selection: &Selection) -> (Option<i32>, Vec<MonthlyCategorySales>) {
    let year = session.resolve_year(selection);
    let rows = year
        .map(|y| reports::monthly_sales_by_category(session.transactions(), y))
        .unwrap_or_default();
    (year, rows)
}

pub(crate) fn dispatch_text(cmd: &ReportCommands, session: &Session) -> String {
    let sel = selection_of(cmd);
    match cmd {
        ReportCommands::Summary(_) => {
            let (year, rows) = detail(session, &sel);
            text::format_summary(year, &reports::key_metrics(rows))
        }
        ReportCommands::Years(_) => {
            text::format_years(&reports::sales_by_year(session.select(&sel.trend())))
        }
        ReportCommands::Categories(_) => {
            let (year, rows) = category_view(session, &sel);
            text::format_categories(year, &rows)
        }
        ReportCommands::Monthly { .. } => {
            let (year, rows) = monthly_view(session, &sel);
            text::format_monthly(year, &rows)
        }
        ReportCommands::Transactions(_) => {
            let (year, rows) = detail(session, &sel);
            text::format_transactions(year, rows)
        }
        ReportCommands::Options => text::format_options(&session.options()),
        ReportCommands::Dashboard(_) => text::format_dashboard(&session.dashboard(&sel)),
    }
}

pub(crate) fn dispatch_json(cmd: &ReportCommands, session: &Session) -> Result<String> {
    let sel = selection_of(cmd);
    let value = match cmd {
        ReportCommands::Summary(_) => {
            let (year, rows) = detail(session, &sel);
            json!({ "year": year, "metrics": reports::key_metrics(rows) })
        }
        ReportCommands::Years(_) => {
            json!({ "years": reports::sales_by_year(session.select(&sel.trend())) })
        }
        ReportCommands::Categories(_) => {
            let (year, rows) = category_view(session, &sel);
            json!({ "year": year, "categories": rows })
        }
        ReportCommands::Monthly { .. } => {
            let (year, rows) = monthly_view(session, &sel);
            json!({ "year": year, "months": rows })
        }
        ReportCommands::Transactions(_) => {
            let (year, rows) = detail(session, &sel);
            json!({ "year": year, "transactions": rows })
        }
        ReportCommands::Options => serde_json::to_value(session.options())?,
        ReportCommands::Dashboard(_) => serde_json::to_value(session.dashboard(&sel))?,
    };
    Ok(serde_json::to_string_pretty(&value)?)
}
