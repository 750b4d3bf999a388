//! HTML → [`TabularDocument`] conversion.
//!
//! Every `<table>` becomes a block, every `<tr>` a row, and every `<td>` or
//! `<th>` a cell holding its visible text with whitespace collapsed.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::{TableBlock, TableRow, TabularDocument};

static TABLE: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("table").ok());
static ROW: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("tr").ok());
static CELL: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("td, th").ok());

/// Parse a page into its tables. Pages without tables give an empty document.
pub fn parse_tabular_document(html: &str) -> TabularDocument {
    let (Some(table), Some(row), Some(cell)) = (TABLE.as_ref(), ROW.as_ref(), CELL.as_ref())
    else {
        return TabularDocument::empty();
    };

    let page = Html::parse_document(html);
    let tables = page
        .select(table)
        .map(|table_el| {
            let rows = table_el
                .select(row)
                .map(|row_el| TableRow::new(row_el.select(cell).map(cell_text)))
                .filter(|row| !row.is_empty())
                .collect();
            TableBlock::new(rows)
        })
        .collect();

    TabularDocument::new(tables)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let mut text = String::new();
    for word in cell.text().flat_map(str::split_whitespace) {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(word);
    }
    text
}
