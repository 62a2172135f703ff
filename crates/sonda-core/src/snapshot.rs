//! Per-view resource snapshots.
//!
//! Each view refreshes a fixed set of resources together. The fetchers here
//! issue all of a view's requests concurrently with `try_join!`, so a
//! snapshot is either complete and internally consistent or an error, which is the
//! all-or-nothing unit the poller applies.

use sonda_types::{ButtonState, Event, LedHistoryEntry, LedState, SensorReading, Statistics};

use crate::client::ApiClient;
use crate::error::Result;

/// How many readings the dashboard view shows.
pub const DASHBOARD_READINGS: u32 = 10;
/// How many readings the control view shows.
pub const CONTROL_READINGS: u32 = 20;
/// How many events the control view shows.
pub const CONTROL_EVENTS: u32 = 15;
/// How many readings feed the board's trend and histogram datasets.
pub const BOARD_READINGS: u32 = 50;
/// How many LED history entries feed the board's tallies.
pub const BOARD_LED_HISTORY: u32 = 100;
/// How many records of each kind a report works over.
pub const REPORT_RECORDS: u32 = 1000;

/// Dashboard view: headline statistics, LED states, latest readings.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub stats: Statistics,
    pub leds: Vec<LedState>,
    pub readings: Vec<SensorReading>,
}

/// Control view: LEDs, buttons, recent readings, recent events.
#[derive(Debug, Clone)]
pub struct ControlSnapshot {
    pub leds: Vec<LedState>,
    pub buttons: Vec<ButtonState>,
    pub readings: Vec<SensorReading>,
    pub events: Vec<Event>,
}

impl ControlSnapshot {
    /// Most recent reading, if any arrived yet.
    pub fn latest_reading(&self) -> Option<&SensorReading> {
        self.readings.first()
    }
}

/// Indicator board view: statistics plus the raw series the chart datasets
/// are derived from.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub stats: Statistics,
    pub readings: Vec<SensorReading>,
    pub led_history: Vec<LedHistoryEntry>,
}

/// Record sets a report is generated from. Fetched once, not polled.
#[derive(Debug, Clone)]
pub struct ReportData {
    pub readings: Vec<SensorReading>,
    pub led_history: Vec<LedHistoryEntry>,
}

pub async fn fetch_dashboard(client: &ApiClient) -> Result<DashboardSnapshot> {
    let (stats, leds, readings) = tokio::try_join!(
        client.statistics(),
        client.list_leds(),
        client.list_readings(DASHBOARD_READINGS),
    )?;
    Ok(DashboardSnapshot {
        stats,
        leds,
        readings,
    })
}

pub async fn fetch_control(client: &ApiClient) -> Result<ControlSnapshot> {
    let (leds, buttons, readings, events) = tokio::try_join!(
        client.list_leds(),
        client.list_buttons(),
        client.list_readings(CONTROL_READINGS),
        client.list_events(CONTROL_EVENTS),
    )?;
    Ok(ControlSnapshot {
        leds,
        buttons,
        readings,
        events,
    })
}

pub async fn fetch_board(client: &ApiClient) -> Result<BoardSnapshot> {
    let (stats, readings, led_history) = tokio::try_join!(
        client.statistics(),
        client.list_readings(BOARD_READINGS),
        client.list_led_history(BOARD_LED_HISTORY),
    )?;
    Ok(BoardSnapshot {
        stats,
        readings,
        led_history,
    })
}

pub async fn fetch_report_data(client: &ApiClient) -> Result<ReportData> {
    let (readings, led_history) = tokio::try_join!(
        client.list_readings(REPORT_RECORDS),
        client.list_led_history(REPORT_RECORDS),
    )?;
    Ok(ReportData {
        readings,
        led_history,
    })
}
