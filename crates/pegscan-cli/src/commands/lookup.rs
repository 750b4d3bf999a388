use pegscan_core::{export_as, run_batch, ExportFormat, TickerSource, WatchlistStore};

use crate::cli::LookupArgs;
use crate::error::CliError;

use super::{parse_tickers, CommandOutput, ExportSummary, LookupOutput};

pub async fn run(
    args: &LookupArgs,
    store: &WatchlistStore,
    source: &dyn TickerSource,
) -> Result<CommandOutput, CliError> {
    let tickers = if !args.tickers.is_empty() {
        parse_tickers(&args.tickers)?
    } else if let Some(name) = &args.list {
        store.get_list(name)?
    } else {
        store.load_last()?
    };

    if tickers.is_empty() {
        return Err(CliError::Command(String::from(
            "no tickers to look up: pass tickers, use --list NAME, or save a list first",
        )));
    }

    let export_target = args
        .output
        .as_ref()
        .map(|path| ExportFormat::from_path(path).map(|format| (path, format)))
        .transpose()?;

    if !args.no_save {
        store.save_last(&tickers)?;
    }

    let outcome = run_batch(&tickers, source).await;

    // A failed write still returns the fetched records.
    let export = export_target.map(|(path, format)| {
        match export_as(path, &outcome.records, format) {
            Ok(rows) => ExportSummary {
                path: path.clone(),
                rows,
                error: None,
            },
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "export failed");
                ExportSummary {
                    path: path.clone(),
                    rows: 0,
                    error: Some(error.to_string()),
                }
            }
        }
    });

    Ok(CommandOutput::Lookup(LookupOutput { outcome, export }))
}
