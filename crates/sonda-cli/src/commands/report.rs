//! Report export command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use time::{Date, OffsetDateTime};
use tracing::info;

use sonda_core::ApiClient;
use sonda_core::snapshot;
use sonda_report::{DateRange, ReportRecords, document, export_filename, pdf, sheet};
use sonda_types::filter_by_date_range;

use crate::cli::{ExportFormat, ReportKindArg};
use crate::config::Config;

pub struct ReportArgs {
    pub kind: ReportKindArg,
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
}

pub async fn cmd_report(client: &ApiClient, config: &Config, args: ReportArgs) -> Result<()> {
    let data = snapshot::fetch_report_data(client).await?;
    let range = DateRange {
        start: args.from,
        end: args.to,
    };
    let dir = resolve_export_dir(args.output, config);

    let (path, count) = match args.kind {
        ReportKindArg::Sensores => {
            let filtered = filter_by_date_range(&data.readings, args.from, args.to);
            let path = write_artifact(ReportRecords::Sensors(&filtered), range, args.format, &dir)?;
            (path, filtered.len())
        }
        ReportKindArg::Leds => {
            let filtered = filter_by_date_range(&data.led_history, args.from, args.to);
            let path =
                write_artifact(ReportRecords::LedHistory(&filtered), range, args.format, &dir)?;
            (path, filtered.len())
        }
    };

    println!("Report written to {} ({} records)", path.display(), count);
    Ok(())
}

fn resolve_export_dir(output: Option<PathBuf>, config: &Config) -> PathBuf {
    if let Some(dir) = output {
        return dir;
    }
    if !config.export_directory.is_empty() {
        return PathBuf::from(&config.export_directory);
    }
    dirs::download_dir()
        .or_else(dirs::document_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn write_artifact(
    records: ReportRecords<'_>,
    range: DateRange,
    format: ExportFormat,
    dir: &Path,
) -> Result<PathBuf> {
    let epoch_millis = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;

    let (bytes, filename) = match format {
        ExportFormat::Pdf => {
            let doc = document::layout(records, range);
            (
                pdf::render_pdf(&doc)?,
                export_filename(records.kind(), "pdf", epoch_millis),
            )
        }
        ExportFormat::Xlsx => (
            sheet::render_xlsx(records)?,
            export_filename(records.kind(), "xlsx", epoch_millis),
        ),
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    let path = dir.join(filename);
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Report exported");
    Ok(path)
}
