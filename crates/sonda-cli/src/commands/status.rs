//! One-shot overview command.

use anyhow::Result;

use sonda_core::snapshot::{self, DashboardSnapshot};
use sonda_core::{ApiClient, SessionStore};

use crate::format::{self, FormatOptions};

pub async fn cmd_status(
    client: &ApiClient,
    store: &SessionStore,
    opts: FormatOptions,
) -> Result<()> {
    match store.get() {
        Some(session) => println!("Session: {}", session.username()),
        None => println!("Session: (not logged in)"),
    }
    println!("Backend: {}", client.base_url());
    println!();

    let snapshot = snapshot::fetch_dashboard(client).await?;
    print_dashboard(&snapshot, opts);
    Ok(())
}

/// Render a dashboard snapshot. Shared with `watch dashboard`.
pub fn print_dashboard(snapshot: &DashboardSnapshot, opts: FormatOptions) {
    println!("{}", format::stats_summary(&snapshot.stats));
    println!();
    println!("{}", format::leds_table(&snapshot.leds, opts));
    println!();
    println!("Latest readings:");
    println!("{}", format::readings_table(&snapshot.readings));
}
