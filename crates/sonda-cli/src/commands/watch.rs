//! Watch command: keep a view refreshed until Ctrl+C.
//!
//! The refresh cycle itself lives in `sonda_core::poller`; this command
//! only chooses the view, renders each successful snapshot, and tears the
//! poller down on Ctrl+C (or after `--count` cycles). Failed cycles print
//! nothing; the previously rendered state stays on screen.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Notify;

use sonda_core::poller::{self, PollHandle, PollerConfig};
use sonda_core::snapshot::{self, ControlSnapshot};
use sonda_core::ApiClient;
use sonda_types::display_timestamp;

use crate::cli::WatchView;
use crate::commands::{board, status};
use crate::config::Config;
use crate::format::{self, FormatOptions};

pub struct WatchArgs {
    pub view: WatchView,
    pub interval: Option<u64>,
    pub count: u32,
    pub opts: FormatOptions,
}

pub async fn cmd_watch(client: ApiClient, config: &Config, args: WatchArgs) -> Result<()> {
    let (name, default_secs) = match args.view {
        WatchView::Dashboard => ("dashboard", config.dashboard_interval),
        WatchView::Control => ("control", config.control_interval),
        WatchView::Board => ("board", config.board_interval),
    };
    let interval = Duration::from_secs(args.interval.unwrap_or(default_secs));

    if args.count > 0 {
        eprintln!(
            "Watching {} | Interval: {}s | Count: {} | Press Ctrl+C to stop",
            name,
            interval.as_secs(),
            args.count
        );
    } else {
        eprintln!(
            "Watching {} | Interval: {}s | Press Ctrl+C to stop",
            name,
            interval.as_secs()
        );
    }
    eprintln!("{}", "-".repeat(50));

    let poller_config = PollerConfig::new(name, interval);
    let cycles = Arc::new(AtomicU32::new(0));
    let done = Arc::new(Notify::new());
    let handle = spawn_view(
        client,
        poller_config,
        args.view,
        args.opts,
        Arc::clone(&cycles),
        args.count,
        Arc::clone(&done),
    );

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nShutting down...");
        }
        _ = done.notified() => {
            eprintln!("Completed {} cycles.", cycles.load(Ordering::SeqCst));
        }
    }

    handle.stop();
    handle.join().await;
    Ok(())
}

fn spawn_view(
    client: ApiClient,
    config: PollerConfig,
    view: WatchView,
    opts: FormatOptions,
    cycles: Arc<AtomicU32>,
    count: u32,
    done: Arc<Notify>,
) -> PollHandle {
    match view {
        WatchView::Dashboard => poller::spawn(
            config,
            move || {
                let client = client.clone();
                async move { snapshot::fetch_dashboard(&client).await }
            },
            move |snap| {
                cycle_header();
                status::print_dashboard(&snap, opts);
                finish_cycle(&cycles, count, &done);
            },
        ),
        WatchView::Control => poller::spawn(
            config,
            move || {
                let client = client.clone();
                async move { snapshot::fetch_control(&client).await }
            },
            move |snap| {
                cycle_header();
                print_control(&snap, opts);
                finish_cycle(&cycles, count, &done);
            },
        ),
        WatchView::Board => poller::spawn(
            config,
            move || {
                let client = client.clone();
                async move { snapshot::fetch_board(&client).await }
            },
            move |snap| {
                cycle_header();
                board::print_board(&snap, opts);
                finish_cycle(&cycles, count, &done);
            },
        ),
    }
}

fn print_control(snapshot: &ControlSnapshot, opts: FormatOptions) {
    match snapshot.latest_reading() {
        Some(reading) => println!(
            "Distancia: {:.1} cm ({})",
            reading.value,
            display_timestamp(&reading.timestamp)
        ),
        None => println!("Distancia: waiting for readings..."),
    }
    println!();
    println!("{}", format::leds_table(&snapshot.leds, opts));
    println!();
    println!("{}", format::buttons_table(&snapshot.buttons, opts));
    println!();
    println!("{}", format::events_table(&snapshot.events));
}

fn cycle_header() {
    let timestamp = chrono::Local::now().format("%H:%M:%S");
    println!("--- {} ---", timestamp);
}

fn finish_cycle(cycles: &AtomicU32, count: u32, done: &Notify) {
    let completed = cycles.fetch_add(1, Ordering::SeqCst) + 1;
    if count > 0 && completed >= count {
        // notify_one stores a permit, so a finish racing the select! above
        // is never lost.
        done.notify_one();
    }
}
