use pegscan_core::{edit_tickers, ValidationError, WatchlistStore};

use crate::cli::ListCommand;
use crate::error::CliError;

use super::{parse_tickers, CommandOutput, ListOverview, Notice};

pub fn run(command: &ListCommand, store: &WatchlistStore) -> Result<CommandOutput, CliError> {
    match command {
        ListCommand::Show => Ok(CommandOutput::Lists(ListOverview {
            last: store.load_last()?,
            saved: store.load_lists()?,
        })),
        ListCommand::Save(args) => {
            let tickers = parse_tickers(&args.tickers)?;
            store.save_list(&args.name, &tickers)?;
            Ok(notice(format!("saved list '{}'", args.name.trim()), tickers))
        }
        ListCommand::Use(args) => {
            let tickers = store.get_list(&args.name)?;
            store.save_last(&tickers)?;
            Ok(notice(format!("using list '{}'", args.name.trim()), tickers))
        }
        ListCommand::Delete(args) => {
            if !store.delete_list(&args.name)? {
                return Err(ValidationError::UnknownList {
                    name: args.name.trim().to_owned(),
                }
                .into());
            }
            Ok(notice(format!("deleted list '{}'", args.name.trim()), Vec::new()))
        }
        ListCommand::Edit(args) => {
            if args.remove.is_empty() && args.add.is_empty() {
                return Err(CliError::Command(String::from(
                    "nothing to edit: pass --remove and/or --add",
                )));
            }
            let add = parse_tickers(&args.add)?;
            let edited = edit_tickers(&store.load_last()?, &args.remove, &add);
            store.save_last(&edited)?;
            Ok(notice(String::from("updated last-used list"), edited))
        }
    }
}

fn notice(message: String, tickers: Vec<pegscan_core::TickerSymbol>) -> CommandOutput {
    CommandOutput::Notice(Notice { message, tickers })
}
