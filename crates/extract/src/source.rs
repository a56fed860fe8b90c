use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Table read failed: {0}")]
    Read(String),
    #[error("Table source supplied no pages")]
    NoPages,
}

/// One page of extracted table text.
///
/// The extractor promotes the first printed row of each page into the column
/// headers, so headers are treated as data exactly like body cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Where a piece of text came from. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Header { column: usize },
    Body { row: usize, column: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub page: usize,
    pub kind: CellKind,
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CellKind::Header { column } => write!(f, "page {} header {}", self.page, column),
            CellKind::Body { row, column } => {
                write!(f, "page {} row {} col {}", self.page, row, column)
            }
        }
    }
}

impl Page {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Every data-bearing cell in processing order: headers first, then body
    /// cells row-major.
    pub fn cells(&self, page: usize) -> impl Iterator<Item = (CellRef, &str)> + '_ {
        let headers = self.headers.iter().enumerate().map(move |(column, text)| {
            (CellRef { page, kind: CellKind::Header { column } }, text.as_str())
        });
        let body = self.rows.iter().enumerate().flat_map(move |(row, cells)| {
            cells.iter().enumerate().map(move |(column, text)| {
                (CellRef { page, kind: CellKind::Body { row, column } }, text.as_str())
            })
        });
        headers.chain(body)
    }

    pub fn cell_count(&self) -> usize {
        self.headers.len() + self.rows.iter().map(Vec::len).sum::<usize>()
    }
}

/// Anything that can hand over the pages of a results document.
pub trait TableSource: Send + Sync {
    fn pages(&self) -> Result<Vec<Page>, SourceError>;
}

/// Pages already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub pages: Vec<Page>,
}

impl InMemorySource {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// A single page with one header cell and no body, handy for feeding a
    /// raw text blob through the pipeline.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![Page::new(vec![text.into()], Vec::new())])
    }
}

impl TableSource for InMemorySource {
    fn pages(&self) -> Result<Vec<Page>, SourceError> {
        Ok(self.pages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cells_yield_headers_before_body() {
        let page = Page::new(
            strings(&["h0", "h1"]),
            vec![strings(&["a", "b"]), strings(&["c"])],
        );
        let texts: Vec<&str> = page.cells(0).map(|(_, t)| t).collect();
        assert_eq!(texts, ["h0", "h1", "a", "b", "c"]);
        assert_eq!(page.cell_count(), 5);
    }

    #[test]
    fn cell_refs_carry_positions() {
        let page = Page::new(strings(&["h"]), vec![strings(&["x", "y"])]);
        let refs: Vec<CellRef> = page.cells(3).map(|(r, _)| r).collect();
        assert_eq!(refs[0].kind, CellKind::Header { column: 0 });
        assert_eq!(refs[2].kind, CellKind::Body { row: 0, column: 1 });
        assert_eq!(refs[2].to_string(), "page 3 row 0 col 1");
    }

    #[test]
    fn in_memory_source_returns_pages() {
        let src = InMemorySource::from_text("07/11/25 E 5-1-1");
        let pages = src.pages().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].headers, ["07/11/25 E 5-1-1"]);
        assert!(pages[0].rows.is_empty());
    }
}
