use std::io::{self, Write};

use pegscan_core::{write_delimited, OutputRecord, TickerSymbol, COLUMN_HEADERS};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::{CommandOutput, ListOverview, LookupOutput, Notice};
use crate::error::CliError;

const COLUMN_WIDTHS: [usize; 9] = [10, 12, 10, 10, 12, 20, 20, 20, 20];
const RULE_WIDTH: usize = 134;
const FOOTER: &str = "Note: Data is fetched from Yahoo Finance.\n\
If you see blank fields, it means the data wasn't available or there was an issue fetching it.";

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match output {
        CommandOutput::Lookup(lookup) => {
            render_lookup(&mut out, lookup, format, pretty)?;
            report_failures(lookup);
        }
        CommandOutput::Lists(overview) => render_lists(&mut out, overview, format, pretty)?,
        CommandOutput::Notice(notice) => render_notice(&mut out, notice, format, pretty)?,
    }

    out.flush()?;
    Ok(())
}

fn render_lookup<W: Write>(
    out: &mut W,
    lookup: &LookupOutput,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            out.write_all(format_table(&lookup.outcome.records).as_bytes())?;
            writeln!(out, "\n{FOOTER}")?;
        }
        OutputFormat::Json => write_json(out, lookup, pretty)?,
        OutputFormat::Csv => write_delimited(&mut *out, &lookup.outcome.records, b',')?,
    }

    if let Some(export) = &lookup.export {
        let path = export.path.display();
        match &export.error {
            None => eprintln!("exported {} rows to {path}", export.rows),
            Some(error) => eprintln!("warning: export to {path} failed: {error}"),
        }
    }
    Ok(())
}

fn report_failures(lookup: &LookupOutput) {
    for failure in &lookup.outcome.failures {
        eprintln!(
            "warning: {}: {} ({})",
            failure.ticker, failure.message, failure.code
        );
    }
}

fn render_lists<W: Write>(
    out: &mut W,
    overview: &ListOverview,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, overview, pretty)?,
        OutputFormat::Table => {
            writeln!(out, "last used : {}", joined(&overview.last, ", "))?;
            if overview.saved.is_empty() {
                writeln!(out, "no saved lists")?;
            }
            for (name, tickers) in &overview.saved {
                writeln!(out, "{name:<10}: {}", joined(tickers, ", "))?;
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv_writer(out);
            writer.write_record(["List", "Tickers"])?;
            writer.write_record(["(last)", joined(&overview.last, " ").as_str()])?;
            for (name, tickers) in &overview.saved {
                writer.write_record([name.as_str(), joined(tickers, " ").as_str()])?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn render_notice<W: Write>(
    out: &mut W,
    notice: &Notice,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, notice, pretty)?,
        OutputFormat::Table | OutputFormat::Csv => {
            if notice.tickers.is_empty() {
                writeln!(out, "{}", notice.message)?;
            } else {
                writeln!(out, "{}: {}", notice.message, joined(&notice.tickers, ", "))?;
            }
        }
    }
    Ok(())
}

/// Fixed-width console table: header, dash rule, one line per record.
pub fn format_table(records: &[OutputRecord]) -> String {
    let mut table = String::new();
    table.push_str(&format_line(COLUMN_HEADERS));
    table.push('\n');
    table.push_str(&"-".repeat(RULE_WIDTH));
    table.push('\n');
    for record in records {
        table.push_str(&format_line(record.to_row()));
        table.push('\n');
    }
    table
}

fn format_line(cells: [&str; 9]) -> String {
    cells
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn csv_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().from_writer(out)
}

fn joined(tickers: &[TickerSymbol], separator: &str) -> String {
    tickers
        .iter()
        .map(TickerSymbol::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}
