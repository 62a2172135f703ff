//! XLSX encoding of a filtered record set.
//!
//! Unlike the document export there is no row cap: every filtered record
//! becomes a sheet row. All cells are written as display strings (localized
//! timestamps, two-decimal values), a deliberate trade-off that loses
//! re-parseable numeric cells and gains a sheet that reads exactly like the
//! document.

use rust_xlsxwriter::Workbook;

use crate::{ExportError, ReportRecords};
use sonda_types::display_timestamp;

/// Name of the single sheet in every export.
const SHEET_NAME: &str = "Reporte";

/// Build the sheet contents: a header row followed by one row per record.
pub fn sheet_rows(records: ReportRecords<'_>) -> Vec<Vec<String>> {
    match records {
        ReportRecords::Sensors(rows) => {
            let mut out = vec![to_row(["Fecha", "Tipo", "Valor (cm)"])];
            out.extend(rows.iter().map(|reading| {
                vec![
                    display_timestamp(&reading.timestamp),
                    reading.device_type.clone(),
                    format!("{:.2}", reading.value),
                ]
            }));
            out
        }
        ReportRecords::LedHistory(rows) => {
            let mut out = vec![to_row(["Fecha", "Usuario", "LED", "Estado", "Fuente"])];
            out.extend(rows.iter().map(|entry| {
                vec![
                    display_timestamp(&entry.timestamp),
                    entry.actor.clone(),
                    format!("LED {}", entry.device_id),
                    if entry.on { "ON" } else { "OFF" }.to_string(),
                    entry.source.to_string(),
                ]
            }));
            out
        }
    }
}

/// Encode the record set into XLSX bytes.
pub fn render_xlsx(records: ReportRecords<'_>) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (row_idx, row) in sheet_rows(records).iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            worksheet.write_string(row_idx as u32, col_idx as u16, cell.as_str())?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn to_row<const N: usize>(cells: [&str; N]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonda_types::{LedHistoryEntry, SensorReading, Source};

    fn readings(n: usize) -> Vec<SensorReading> {
        (1..=n)
            .map(|i| SensorReading {
                id: i as i64,
                device_type: "HC-SR05".to_string(),
                value: i as f64 + 0.5,
                timestamp: "2026-03-14T09:26:53".to_string(),
            })
            .collect()
    }

    #[test]
    fn all_records_become_rows() {
        let rows = readings(45);
        let sheet = sheet_rows(ReportRecords::Sensors(&rows));
        // Header plus one row per record, no cap.
        assert_eq!(sheet.len(), 46);
        assert_eq!(sheet[0], vec!["Fecha", "Tipo", "Valor (cm)"]);
        assert_eq!(sheet[1][2], "1.50");
        assert_eq!(sheet[45][2], "45.50");
    }

    #[test]
    fn cells_are_display_strings() {
        let rows = readings(1);
        let sheet = sheet_rows(ReportRecords::Sensors(&rows));
        assert_eq!(sheet[1][0], "14/03/2026 09:26:53");
    }

    #[test]
    fn led_rows_carry_state_and_source() {
        let entries = vec![LedHistoryEntry {
            id: 1,
            device_id: 2,
            actor: "ana".to_string(),
            on: true,
            source: Source::Hardware,
            timestamp: "2026-03-14T09:26:53".to_string(),
        }];
        let sheet = sheet_rows(ReportRecords::LedHistory(&entries));
        assert_eq!(sheet[1], vec![
            "14/03/2026 09:26:53".to_string(),
            "ana".to_string(),
            "LED 2".to_string(),
            "ON".to_string(),
            "HARDWARE".to_string(),
        ]);
    }

    #[test]
    fn renders_xlsx_bytes() {
        let rows = readings(3);
        let bytes = render_xlsx(ReportRecords::Sensors(&rows)).unwrap();
        // XLSX is a zip container.
        assert!(bytes.starts_with(b"PK"));
    }
}
