//! Output formatting utilities: tables and colored values.
//!
//! Table headers reuse the report column vocabulary (`Fecha`, `Usuario`,
//! `Estado`, ...) so the terminal views read like the exported artifacts.

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use sonda_types::{
    Bucket, ButtonHistoryEntry, ButtonState, Event, LedActivity, LedHistoryEntry, LedState,
    SensorReading, Source, Statistics, display_timestamp,
};

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
}

impl FormatOptions {
    /// Render a LED/button state, colored when allowed.
    pub fn on_off(&self, on: bool) -> String {
        match (on, self.no_color) {
            (true, true) => "ON".to_string(),
            (false, true) => "OFF".to_string(),
            (true, false) => "ON".green().bold().to_string(),
            (false, false) => "OFF".dimmed().to_string(),
        }
    }
}

/// Headline statistics, one line per figure (live views show one decimal).
pub fn stats_summary(stats: &Statistics) -> String {
    format!(
        "Total de lecturas: {}\nPromedio: {:.1} cm\nMínimo: {:.1} cm\nMáximo: {:.1} cm",
        stats.total_count, stats.mean, stats.min, stats.max
    )
}

pub fn readings_table(readings: &[SensorReading]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Fecha", "Valor (cm)", "Tipo"]);
    for reading in readings {
        builder.push_record([
            display_timestamp(&reading.timestamp),
            format!("{:.1}", reading.value),
            reading.device_type.clone(),
        ]);
    }
    styled(builder)
}

pub fn leds_table(leds: &[LedState], opts: FormatOptions) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Id", "Nombre", "Color", "Estado"]);
    for led in leds {
        builder.push_record([
            led.id.to_string(),
            led.name.clone(),
            led.color.clone(),
            opts.on_off(led.on),
        ]);
    }
    styled(builder)
}

pub fn buttons_table(buttons: &[ButtonState], opts: FormatOptions) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Id", "Nombre", "Estado"]);
    for button in buttons {
        builder.push_record([
            button.id.to_string(),
            button.name.clone(),
            opts.on_off(button.on),
        ]);
    }
    styled(builder)
}

pub fn events_table(events: &[Event]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Fecha", "Usuario", "Acción", "Detalles"]);
    for event in events {
        builder.push_record([
            display_timestamp(&event.timestamp),
            event.actor.clone(),
            event.action.clone(),
            event.details.clone(),
        ]);
    }
    styled(builder)
}

pub fn led_history_table(entries: &[LedHistoryEntry], opts: FormatOptions) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Fecha", "Usuario", "LED", "Estado", "Fuente"]);
    for entry in entries {
        builder.push_record([
            display_timestamp(&entry.timestamp),
            entry.actor.clone(),
            format!("LED {}", entry.device_id),
            opts.on_off(entry.on),
            entry.source.to_string(),
        ]);
    }
    styled(builder)
}

pub fn button_history_table(entries: &[ButtonHistoryEntry], opts: FormatOptions) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Fecha", "Usuario", "Pulsador", "Estado", "Fuente"]);
    for entry in entries {
        builder.push_record([
            display_timestamp(&entry.timestamp),
            entry.actor.clone(),
            format!("Pulsador {}", entry.device_id),
            opts.on_off(entry.on),
            entry.source.to_string(),
        ]);
    }
    styled(builder)
}

pub fn buckets_table(buckets: &[Bucket]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Rango", "Cantidad"]);
    for bucket in buckets {
        builder.push_record([bucket.label.clone(), bucket.count.to_string()]);
    }
    styled(builder)
}

pub fn activity_table(activity: &[LedActivity]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["LED", "Encendido", "Apagado"]);
    for tally in activity {
        builder.push_record([
            format!("LED {}", tally.device_id),
            tally.on.to_string(),
            tally.off.to_string(),
        ]);
    }
    styled(builder)
}

pub fn source_table(tallies: &[(Source, usize)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Fuente", "Cantidad"]);
    for (source, count) in tallies {
        builder.push_record([source.to_string(), count.to_string()]);
    }
    styled(builder)
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_off_plain() {
        let opts = FormatOptions { no_color: true };
        assert_eq!(opts.on_off(true), "ON");
        assert_eq!(opts.on_off(false), "OFF");
    }

    #[test]
    fn readings_table_has_header_and_rows() {
        let readings = vec![SensorReading {
            id: 1,
            device_type: "HC-SR05".to_string(),
            value: 12.34,
            timestamp: "2026-03-14T09:26:53".to_string(),
        }];
        let table = readings_table(&readings);
        assert!(table.contains("Valor (cm)"));
        assert!(table.contains("12.3"));
        assert!(table.contains("14/03/2026 09:26:53"));
    }
}
