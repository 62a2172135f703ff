//! Audit events and change history commands.

use anyhow::Result;

use sonda_core::ApiClient;

use crate::cli::HistoryKind;
use crate::format::{self, FormatOptions};

pub async fn cmd_events(client: &ApiClient, limit: u32) -> Result<()> {
    let events = client.list_events(limit).await?;
    println!("{}", format::events_table(&events));
    Ok(())
}

pub async fn cmd_history(
    client: &ApiClient,
    kind: HistoryKind,
    limit: u32,
    opts: FormatOptions,
) -> Result<()> {
    match kind {
        HistoryKind::Led => {
            let entries = client.list_led_history(limit).await?;
            println!("{}", format::led_history_table(&entries, opts));
        }
        HistoryKind::Button => {
            let entries = client.list_button_history(limit).await?;
            println!("{}", format::button_history_table(&entries, opts));
        }
    }
    Ok(())
}
