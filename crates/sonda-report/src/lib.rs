//! Report generation: paginated PDF documents and flat XLSX spreadsheets.
//!
//! Both exports are pure, synchronous transformations from a filtered
//! record set to artifact bytes; writing those bytes somewhere is the
//! caller's business. The document export caps its table at
//! [`document::DOC_ROW_CAP`] rows (with a statistics trailer computed over
//! the FULL set); the spreadsheet export writes every record.
//!
//! An empty record set is not an error; it produces an artifact with a
//! header and no rows.

pub mod document;
pub mod pdf;
pub mod sheet;

use time::Date;
use time::macros::format_description;

use sonda_types::{LedHistoryEntry, SensorReading};

/// Errors from artifact rendering.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("Spreadsheet generation failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Which record set a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Sensors,
    LedHistory,
}

impl ReportKind {
    /// Filename component, e.g. `reporte_sensores_*.pdf`.
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::Sensors => "sensores",
            ReportKind::LedHistory => "leds",
        }
    }

    /// Human label for the document header.
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Sensors => "Sensores",
            ReportKind::LedHistory => "LEDs",
        }
    }
}

/// The records a report is generated from, already filtered by date range.
#[derive(Debug, Clone, Copy)]
pub enum ReportRecords<'a> {
    Sensors(&'a [SensorReading]),
    LedHistory(&'a [LedHistoryEntry]),
}

impl ReportRecords<'_> {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportRecords::Sensors(_) => ReportKind::Sensors,
            ReportRecords::LedHistory(_) => ReportKind::LedHistory,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReportRecords::Sensors(rows) => rows.len(),
            ReportRecords::LedHistory(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The date range a report was filtered by, for the document header.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateRange {
    /// Header rendering, e.g. `"2026-03-01 a 2026-03-07"`. An absent bound
    /// renders as `"todas"` (the range was a pass-through).
    pub fn label(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                format!("{} a {}", iso_date(start), iso_date(end))
            }
            _ => "todas".to_string(),
        }
    }
}

fn iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Artifact filename: `reporte_<type>_<epochMillis>.<ext>`.
pub fn export_filename(kind: ReportKind, extension: &str, epoch_millis: i64) -> String {
    format!("reporte_{}_{}.{}", kind.slug(), epoch_millis, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn filename_pattern() {
        assert_eq!(
            export_filename(ReportKind::Sensors, "pdf", 1767312000000),
            "reporte_sensores_1767312000000.pdf"
        );
        assert_eq!(
            export_filename(ReportKind::LedHistory, "xlsx", 1),
            "reporte_leds_1.xlsx"
        );
    }

    #[test]
    fn range_label() {
        let range = DateRange {
            start: Some(date!(2026-03-01)),
            end: Some(date!(2026-03-07)),
        };
        assert_eq!(range.label(), "2026-03-01 a 2026-03-07");
        assert_eq!(DateRange::default().label(), "todas");
    }
}
