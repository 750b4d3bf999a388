//! File export of output records: delimited text or a styled spreadsheet.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use crate::{CoreError, OutputRecord, ValidationError, COLUMN_HEADERS};

const SHEET_NAME: &str = "Stock Analysis";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Xlsx,
}

impl ExportFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ValidationError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("tsv" | "tab") => Ok(Self::Tsv),
            Some("xlsx") => Ok(Self::Xlsx),
            _ => Err(ValidationError::UnsupportedExport {
                path: path.display().to_string(),
            }),
        }
    }

    /// Field separator, `None` for the spreadsheet format.
    pub const fn delimiter(self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Xlsx => None,
        }
    }
}

/// Write the header row, then one row per record.
pub fn write_delimited<W: Write>(
    writer: W,
    records: &[OutputRecord],
    delimiter: u8,
) -> Result<(), CoreError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    csv_writer.write_record(COLUMN_HEADERS)?;
    for record in records {
        csv_writer.write_record(record.to_row())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Single-sheet workbook: bold centred header, centred cells, thin borders
/// on every cell, column widths fitted to the longest entry.
pub fn xlsx_workbook(records: &[OutputRecord]) -> Result<Workbook, XlsxError> {
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in (0u16..).zip(COLUMN_HEADERS) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }
    for (row, record) in (1u32..).zip(records) {
        for (col, value) in (0u16..).zip(record.to_row()) {
            worksheet.write_string_with_format(row, col, value, &cell_format)?;
        }
    }
    for (col, width) in (0u16..).zip(column_widths(records)) {
        worksheet.set_column_width(col, width)?;
    }

    Ok(workbook)
}

/// Write the spreadsheet export to `path`.
pub fn write_xlsx(path: &Path, records: &[OutputRecord]) -> Result<(), CoreError> {
    let mut workbook = xlsx_workbook(records)?;
    workbook.save(path)?;
    Ok(())
}

fn column_widths(records: &[OutputRecord]) -> [f64; 9] {
    let mut longest = COLUMN_HEADERS.map(|header| header.chars().count());
    for record in records {
        for (max, value) in longest.iter_mut().zip(record.to_row()) {
            *max = (*max).max(value.chars().count());
        }
    }
    longest.map(|chars| (chars + 2) as f64 * 1.2)
}

/// Create `path` and export into it. Returns the number of data rows.
pub fn export_to_path(path: &Path, records: &[OutputRecord]) -> Result<usize, CoreError> {
    let format = ExportFormat::from_path(path)?;
    export_as(path, records, format)
}

/// Export with a format already resolved from the path.
pub fn export_as(
    path: &Path,
    records: &[OutputRecord],
    format: ExportFormat,
) -> Result<usize, CoreError> {
    match format.delimiter() {
        Some(delimiter) => write_delimited(File::create(path)?, records, delimiter)?,
        None => write_xlsx(path, records)?,
    }
    tracing::info!(path = %path.display(), rows = records.len(), ?format, "records exported");
    Ok(records.len())
}
