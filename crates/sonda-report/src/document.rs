//! Paginated document layout.
//!
//! The layout is computed as plain positioned text runs on A4 pages, kept
//! separate from PDF encoding so the row cap, pagination, and statistics
//! trailer are testable without parsing PDF bytes. Geometry follows the
//! original dashboard's report: coordinates in millimeters from the top-left
//! corner, a new page once the cursor exhausts the page's vertical budget.

use sonda_types::{SensorReading, compute_statistics, display_timestamp};

use crate::{DateRange, ReportKind, ReportRecords};

/// A4 page size in millimeters.
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

/// Maximum rows rendered in the document table. A design limit, not an
/// error: the statistics trailer still covers the full record set.
pub const DOC_ROW_CAP: usize = 30;

/// Vertical cursor position past which a new page starts.
const Y_BREAK: f32 = 270.0;
/// Cursor position of the first line on a continuation page.
const Y_TOP: f32 = 20.0;
/// Line height of a table row.
const ROW_STEP: f32 = 7.0;

const TITLE: &str = "Reporte del Sistema HC-SR05";

/// Column x positions (mm) for the sensor table: Fecha, Valor, Tipo.
const SENSOR_COLS: [f32; 3] = [20.0, 100.0, 150.0];
/// Column x positions (mm) for the LED history table.
const LED_COLS: [f32; 5] = [20.0, 70.0, 110.0, 140.0, 170.0];

/// One positioned text run. `y` is measured from the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct DocText {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub text: String,
}

/// One laid-out page.
#[derive(Debug, Clone, Default)]
pub struct DocPage {
    pub texts: Vec<DocText>,
}

/// A fully laid-out document, ready for rendering.
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub pages: Vec<DocPage>,
}

/// Lay out a report document for `records`.
pub fn layout(records: ReportRecords<'_>, range: DateRange) -> Document {
    let mut cursor = Cursor::new();

    cursor.text(20.0, 20.0, TITLE);
    cursor.size = 12.0;
    cursor.text(20.0, 35.0, format!("Tipo: {}", records.kind().label()));
    cursor.text(20.0, 42.0, format!("Fecha: {}", range.label()));
    cursor.text(20.0, 49.0, format!("Total de registros: {}", records.len()));

    cursor.y = 60.0;
    cursor.size = 10.0;

    match records {
        ReportRecords::Sensors(rows) => {
            cursor.row(&SENSOR_COLS, ["Fecha", "Valor (cm)", "Tipo"]);
            for reading in rows.iter().take(DOC_ROW_CAP) {
                cursor.row(
                    &SENSOR_COLS,
                    [
                        display_timestamp(&reading.timestamp),
                        format!("{:.2}", reading.value),
                        reading.device_type.clone(),
                    ],
                );
            }
            if !rows.is_empty() {
                statistics_block(&mut cursor, rows);
            }
        }
        ReportRecords::LedHistory(rows) => {
            cursor.row(&LED_COLS, ["Fecha", "Usuario", "LED", "Estado", "Fuente"]);
            for entry in rows.iter().take(DOC_ROW_CAP) {
                cursor.row(
                    &LED_COLS,
                    [
                        display_timestamp(&entry.timestamp),
                        entry.actor.clone(),
                        format!("LED {}", entry.device_id),
                        if entry.on { "ON" } else { "OFF" }.to_string(),
                        entry.source.to_string(),
                    ],
                );
            }
        }
    }

    Document {
        title: TITLE.to_string(),
        pages: cursor.pages,
    }
}

/// Summary trailer over the FULL filtered set, not just the rows shown.
fn statistics_block(cursor: &mut Cursor, rows: &[SensorReading]) {
    let stats = compute_statistics(rows);

    cursor.y += 10.0;
    cursor.size = 12.0;
    cursor.line("Estadísticas:");
    cursor.size = 10.0;
    cursor.line(format!("Promedio: {:.2} cm", stats.mean));
    cursor.line(format!("Mínimo: {:.2} cm", stats.min));
    cursor.line(format!("Máximo: {:.2} cm", stats.max));
}

/// Layout cursor: tracks the vertical position and breaks pages when the
/// vertical budget is exhausted.
struct Cursor {
    pages: Vec<DocPage>,
    y: f32,
    size: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![DocPage::default()],
            y: Y_TOP,
            size: 20.0,
        }
    }

    /// Place a text run at an absolute position, ignoring the cursor.
    fn text(&mut self, x: f32, y: f32, text: impl Into<String>) {
        let size = self.size;
        self.pages.last_mut().expect("at least one page").texts.push(DocText {
            x,
            y,
            size,
            text: text.into(),
        });
    }

    fn break_page_if_needed(&mut self) {
        if self.y > Y_BREAK {
            self.pages.push(DocPage::default());
            self.y = Y_TOP;
        }
    }

    /// Place one table row at the cursor and advance it.
    fn row<S: Into<String>, const N: usize>(&mut self, cols: &[f32; N], cells: [S; N]) {
        self.break_page_if_needed();
        let y = self.y;
        for (x, cell) in cols.iter().zip(cells) {
            self.text(*x, y, cell);
        }
        self.y += ROW_STEP;
    }

    /// Place one full-width line at the cursor and advance it.
    fn line(&mut self, text: impl Into<String>) {
        self.break_page_if_needed();
        let y = self.y;
        self.text(20.0, y, text);
        self.y += ROW_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonda_types::{LedHistoryEntry, Source};

    fn readings(n: usize) -> Vec<SensorReading> {
        (1..=n)
            .map(|i| SensorReading {
                id: i as i64,
                device_type: "HC-SR05".to_string(),
                value: i as f64,
                timestamp: format!("2026-03-{:02}T10:00:00", (i % 28) + 1),
            })
            .collect()
    }

    fn led_entries(n: usize) -> Vec<LedHistoryEntry> {
        (1..=n)
            .map(|i| LedHistoryEntry {
                id: i as i64,
                device_id: (i % 3) as i64 + 1,
                actor: "ana".to_string(),
                on: i % 2 == 0,
                source: Source::Web,
                timestamp: format!("2026-03-{:02}T10:00:00", (i % 28) + 1),
            })
            .collect()
    }

    /// Data rows in the sensor table: text runs in the value column,
    /// excluding the header label.
    fn sensor_data_rows(doc: &Document) -> usize {
        doc.pages
            .iter()
            .flat_map(|p| p.texts.iter())
            .filter(|t| t.x == SENSOR_COLS[1] && t.text != "Valor (cm)")
            .count()
    }

    #[test]
    fn table_is_capped_but_statistics_cover_everything() {
        let rows = readings(45);
        let doc = layout(ReportRecords::Sensors(&rows), DateRange::default());

        assert_eq!(sensor_data_rows(&doc), DOC_ROW_CAP);

        // Mean of 1..=45 is 23; extrema come from the full set, not the
        // 30 rows shown.
        let all_text: Vec<&str> = doc
            .pages
            .iter()
            .flat_map(|p| p.texts.iter().map(|t| t.text.as_str()))
            .collect();
        assert!(all_text.contains(&"Estadísticas:"));
        assert!(all_text.contains(&"Promedio: 23.00 cm"));
        assert!(all_text.contains(&"Mínimo: 1.00 cm"));
        assert!(all_text.contains(&"Máximo: 45.00 cm"));
        assert!(all_text.contains(&"Total de registros: 45"));
    }

    #[test]
    fn full_table_pushes_statistics_to_a_new_page() {
        let rows = readings(45);
        let doc = layout(ReportRecords::Sensors(&rows), DateRange::default());

        assert_eq!(doc.pages.len(), 2);
        let last_page_text: Vec<&str> = doc.pages[1]
            .texts
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert!(last_page_text.contains(&"Estadísticas:"));
    }

    #[test]
    fn short_report_fits_one_page() {
        let rows = readings(5);
        let doc = layout(ReportRecords::Sensors(&rows), DateRange::default());
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(sensor_data_rows(&doc), 5);
    }

    #[test]
    fn led_report_rows() {
        let rows = led_entries(8);
        let doc = layout(ReportRecords::LedHistory(&rows), DateRange::default());

        let states: Vec<&DocText> = doc.pages[0]
            .texts
            .iter()
            .filter(|t| t.x == LED_COLS[3] && t.text != "Estado")
            .collect();
        assert_eq!(states.len(), 8);
        assert!(states.iter().all(|t| t.text == "ON" || t.text == "OFF"));
    }

    #[test]
    fn empty_report_has_header_and_no_rows() {
        let doc = layout(ReportRecords::Sensors(&[]), DateRange::default());
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(sensor_data_rows(&doc), 0);
        let all_text: Vec<&str> = doc.pages[0]
            .texts
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert!(all_text.contains(&"Total de registros: 0"));
        assert!(!all_text.contains(&"Estadísticas:"));
    }
}
