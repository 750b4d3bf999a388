/// One row of plain-text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    cells: Vec<String>,
}

impl TableRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One table block: an ordered sequence of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBlock {
    rows: Vec<TableRow>,
}

impl TableBlock {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }
}

/// Immutable table → row → cell view over a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularDocument {
    tables: Vec<TableBlock>,
}

impl TabularDocument {
    pub fn new(tables: Vec<TableBlock>) -> Self {
        Self { tables }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a document from nested cell text, one outer entry per table.
    pub fn from_cells<T, R, C>(tables: T) -> Self
    where
        T: IntoIterator<Item = R>,
        R: IntoIterator<Item = Vec<C>>,
        C: Into<String>,
    {
        Self {
            tables: tables
                .into_iter()
                .map(|rows| TableBlock::new(rows.into_iter().map(TableRow::new).collect()))
                .collect(),
        }
    }

    pub fn tables(&self) -> &[TableBlock] {
        &self.tables
    }

    /// Rows of every table in document order.
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.tables.iter().flat_map(|table| table.rows.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(|table| table.rows.is_empty())
    }
}
