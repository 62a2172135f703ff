//! Indicator board: derived datasets over recent readings and LED history.

use anyhow::Result;

use sonda_core::snapshot::{self, BoardSnapshot};
use sonda_core::ApiClient;
use sonda_types::{DISTANCE_BUCKETS, bucketize, group_count_by, led_activity, recent_series};

use crate::format::{self, FormatOptions};

/// How many readings the trend line shows.
const TREND_POINTS: usize = 20;

pub async fn cmd_board(client: &ApiClient, opts: FormatOptions) -> Result<()> {
    let snapshot = snapshot::fetch_board(client).await?;
    print_board(&snapshot, opts);
    Ok(())
}

/// Render a board snapshot. Shared with `watch board`.
pub fn print_board(snapshot: &BoardSnapshot, _opts: FormatOptions) {
    println!("{}", format::stats_summary(&snapshot.stats));

    let series = recent_series(&snapshot.readings, TREND_POINTS);
    if !series.is_empty() {
        let rendered: Vec<String> = series.iter().map(|v| format!("{:.1}", v)).collect();
        println!();
        println!("Trend, oldest first ({} readings):", series.len());
        println!("{}", rendered.join(" "));
    }

    println!();
    println!("Distance ranges:");
    println!(
        "{}",
        format::buckets_table(&bucketize(&snapshot.readings, &DISTANCE_BUCKETS))
    );

    println!();
    println!("LED activity:");
    println!(
        "{}",
        format::activity_table(&led_activity(&snapshot.led_history))
    );

    println!();
    println!("Changes by source:");
    println!(
        "{}",
        format::source_table(&group_count_by(&snapshot.led_history, |e| e.source))
    );
}
