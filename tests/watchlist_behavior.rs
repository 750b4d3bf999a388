//! Behavior-driven tests for ticker lists and file export
//!
//! These tests work against real files in a temporary directory.

use std::fs;

use pegscan_core::{
    edit_tickers, export_to_path, parse_ticker_list, CoreError, OutputRecord, TickerSymbol,
    ValidationError, WatchlistStore,
};
use tempfile::tempdir;

fn tickers(raw: &str) -> Vec<TickerSymbol> {
    parse_ticker_list(raw).expect("valid tickers")
}

// =============================================================================
// Last-used list
// =============================================================================

#[test]
fn fresh_store_has_no_last_list_and_no_saved_lists() {
    // Given: An empty store directory that does not exist yet
    let dir = tempdir().expect("tempdir");
    let store = WatchlistStore::new(dir.path().join("never-created"));

    // When / Then: Reading gives empty results rather than errors
    assert!(store.load_last().expect("load last").is_empty());
    assert!(store.load_lists().expect("load lists").is_empty());
    assert!(store.list_names().expect("names").is_empty());
}

#[test]
fn last_list_round_trips_through_a_comma_joined_file() {
    // Given: A user who looked up three tickers
    let dir = tempdir().expect("tempdir");
    let store = WatchlistStore::new(dir.path());

    // When: The list is saved
    store
        .save_last(&tickers("AAPL MSFT BRK.B"))
        .expect("save last");

    // Then: The file is comma-joined and reads back in order
    let raw = fs::read_to_string(dir.path().join("last_tickers.txt")).expect("file written");
    assert_eq!(raw, "AAPL,MSFT,BRK.B");
    assert_eq!(store.load_last().expect("load"), tickers("AAPL MSFT BRK.B"));
}

#[test]
fn hand_edited_last_list_skips_bad_entries() {
    // Given: A last-used file edited by hand with junk in it
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("last_tickers.txt"), "aapl, ,bad ticker,MSFT,aapl\n")
        .expect("seed file");
    let store = WatchlistStore::new(dir.path());

    // When: It is loaded
    let loaded = store.load_last().expect("load");

    // Then: Valid tickers survive once each, in order
    assert_eq!(loaded, tickers("AAPL MSFT"));
}

// =============================================================================
// Named lists
// =============================================================================

#[test]
fn named_lists_are_saved_listed_and_deleted() {
    // Given: A store with two named lists
    let dir = tempdir().expect("tempdir");
    let store = WatchlistStore::new(dir.path());
    store.save_list("tech", &tickers("AAPL MSFT")).expect("save tech");
    store.save_list(" banks ", &tickers("JPM")).expect("save banks");

    // When: The names are listed
    let names = store.list_names().expect("names");

    // Then: Names come back trimmed and sorted
    assert_eq!(names, ["banks", "tech"]);
    assert_eq!(store.get_list("tech").expect("get"), tickers("AAPL MSFT"));

    // And: Deleting reports whether the list existed
    assert!(store.delete_list("tech").expect("delete"));
    assert!(!store.delete_list("tech").expect("delete again"));
    assert_eq!(store.list_names().expect("names"), ["banks"]);
}

#[test]
fn saving_under_an_existing_name_replaces_the_list() {
    // Given: A saved list
    let dir = tempdir().expect("tempdir");
    let store = WatchlistStore::new(dir.path());
    store.save_list("tech", &tickers("AAPL")).expect("save");

    // When: The same name is saved again
    store.save_list("tech", &tickers("NVDA AMD")).expect("save again");

    // Then: The new tickers replace the old ones
    assert_eq!(store.get_list("tech").expect("get"), tickers("NVDA AMD"));
}

#[test]
fn saved_lists_file_is_a_json_object_of_ticker_arrays() {
    // Given: One saved list
    let dir = tempdir().expect("tempdir");
    let store = WatchlistStore::new(dir.path());
    store.save_list("tech", &tickers("AAPL MSFT")).expect("save");

    // When: The file is read directly
    let raw = fs::read_to_string(dir.path().join("saved_lists.json")).expect("file written");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");

    // Then: It maps the name to an array of symbols
    assert_eq!(value, serde_json::json!({ "tech": ["AAPL", "MSFT"] }));
}

#[test]
fn unknown_and_blank_list_names_are_rejected() {
    // Given: An empty store
    let dir = tempdir().expect("tempdir");
    let store = WatchlistStore::new(dir.path());

    // When / Then: Unknown names and blank names fail validation
    assert!(matches!(
        store.get_list("ghost"),
        Err(CoreError::Validation(ValidationError::UnknownList { .. }))
    ));
    assert!(matches!(
        store.save_list("  ", &tickers("AAPL")),
        Err(CoreError::Validation(ValidationError::EmptyListName))
    ));
}

#[test]
fn corrupt_saved_lists_file_is_a_serialization_error() {
    // Given: A saved-lists file that is not JSON
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("saved_lists.json"), "{ not json").expect("seed");
    let store = WatchlistStore::new(dir.path());

    // When / Then: Loading reports the problem instead of losing lists
    assert!(matches!(store.load_lists(), Err(CoreError::Serialization(_))));
}

// =============================================================================
// Editing
// =============================================================================

#[test]
fn edit_removes_named_tickers_and_appends_new_ones() {
    // Given: A current list
    let current = tickers("AAPL MSFT NVDA");

    // When: MSFT is removed and AMD plus a duplicate NVDA are added
    let edited = edit_tickers(&current, &["msft".to_owned()], &tickers("AMD NVDA"));

    // Then: Order of first appearance is kept without duplicates
    assert_eq!(edited, tickers("AAPL NVDA AMD"));
}

#[test]
fn edit_with_all_starts_over() {
    // Given: A current list
    let current = tickers("AAPL MSFT");

    // When: ALL is removed and one ticker added
    let edited = edit_tickers(&current, &["all".to_owned()], &tickers("IBM"));

    // Then: Only the new ticker remains
    assert_eq!(edited, tickers("IBM"));
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn export_writes_header_and_one_row_per_record() {
    // Given: Two records, one degraded
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ratios.csv");
    let mut full = OutputRecord::unavailable(TickerSymbol::parse("XYZ").expect("valid"));
    full.forward_pe = String::from("20.50");
    full.calculated_peg = String::from("2.05");
    let degraded = OutputRecord::unavailable(TickerSymbol::parse("BAD").expect("valid"));

    // When: They are exported
    let rows = export_to_path(&path, &[full, degraded]).expect("export");

    // Then: The file has a header and both rows
    assert_eq!(rows, 2);
    let written = fs::read_to_string(&path).expect("export file");
    let lines: Vec<&str> = written.lines().collect();
    assert!(lines[0].starts_with("Ticker,Forward P/E,"));
    assert_eq!(lines[1], "XYZ,20.50,,2.05,,,,,");
    assert_eq!(lines[2], "BAD,,,,,,,,");
}

#[test]
fn spreadsheet_export_writes_a_workbook_file() {
    // Given: Two records and a spreadsheet path
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ratios.xlsx");
    let records = [
        OutputRecord::unavailable(TickerSymbol::parse("XYZ").expect("valid")),
        OutputRecord::unavailable(TickerSymbol::parse("ABC").expect("valid")),
    ];

    // When: They are exported
    let rows = export_to_path(&path, &records).expect("export");

    // Then: A zip-packaged workbook lands on disk
    assert_eq!(rows, 2);
    let bytes = fs::read(&path).expect("workbook file");
    assert!(bytes.len() > 1_000);
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn export_to_unsupported_extension_creates_nothing() {
    // Given: An OpenDocument path
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ratios.ods");

    // When: Export is attempted
    let result = export_to_path(&path, &[]);

    // Then: It fails validation and no file appears
    assert!(matches!(
        result,
        Err(CoreError::Validation(ValidationError::UnsupportedExport { .. }))
    ));
    assert!(!path.exists());
}
