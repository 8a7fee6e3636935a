use super::ui;
use crate::core::{RateLookupService, TrendAssembler, TrendSeries};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Table};

const BAR_WIDTH: usize = 30;

pub async fn run(
    service: &RateLookupService,
    from: &str,
    to: &str,
    days: u32,
    reference_date: Option<NaiveDate>,
) -> Result<TrendSeries> {
    let assembler = TrendAssembler::new(service);

    let pb = ui::new_spinner("Fetching historical rates...");
    let series = match reference_date {
        Some(date) => assembler.build(from, to, days, date).await,
        None => assembler.build_recent(from, to, days).await,
    };
    pb.finish_and_clear();
    let series = series?;

    println!(
        "\n{}",
        ui::style_text(
            &format!("{} to {} trend", series.from, series.to),
            ui::StyleType::Title
        )
    );
    if series.is_empty() {
        println!(
            "{}",
            ui::style_text("No historical data available.", ui::StyleType::Subtle)
        );
        return Ok(series);
    }

    println!("{}", trend_table(&series));
    if !series.missing.is_empty() {
        let dates: Vec<String> = series.missing.iter().map(|d| d.to_string()).collect();
        println!(
            "{}",
            ui::style_text(
                &format!("No rate for: {}", dates.join(", ")),
                ui::StyleType::Subtle
            )
        );
    }

    Ok(series)
}

/// One row per point with the change from the previous point and a bar.
pub fn trend_table(series: &TrendSeries) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Rate"),
        ui::header_cell("Change"),
        ui::header_cell(""),
    ]);

    let (min, max) = series.range().unwrap_or((0.0, 0.0));
    let mut previous: Option<f64> = None;
    for point in &series.points {
        let change = previous
            .filter(|p| *p > 0.0)
            .map(|p| (point.rate - p) / p * 100.0);
        table.add_row(vec![
            Cell::new(point.date.format("%Y-%m-%d")),
            ui::rate_cell(point.rate),
            ui::change_cell(change),
            Cell::new(ui::bar(point.rate, min, max, BAR_WIDTH)),
        ]);
        previous = Some(point.rate);
    }
    table
}
