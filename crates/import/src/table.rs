use std::io::Read;
use std::path::{Path, PathBuf};

use drawsheet_extract::{Page, SourceError, TableSource};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error in {path}: {source}")]
    CsvError {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("No table files found in {0}")]
    NoTableFiles(PathBuf),
}

impl From<ImportError> for SourceError {
    fn from(e: ImportError) -> Self {
        match e {
            ImportError::IoError(io) => SourceError::Io(io),
            other => SourceError::Read(other.to_string()),
        }
    }
}

/// How the exported page tables are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageProfile {
    /// Field delimiter; `None` picks tab for `.tsv` files and comma otherwise.
    pub delimiter: Option<u8>,
    /// First record is the column header row.
    pub has_header: bool,
}

impl Default for PageProfile {
    fn default() -> Self {
        Self { delimiter: None, has_header: true }
    }
}

impl PageProfile {
    fn delimiter_for(&self, path: &Path) -> u8 {
        self.delimiter.unwrap_or_else(|| {
            let is_tsv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
            if is_tsv { b'\t' } else { b',' }
        })
    }
}

/// Reads exported page tables from disk, one file per page.
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    inputs: Vec<PathBuf>,
    profile: PageProfile,
}

impl CsvTableSource {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self { inputs, profile: PageProfile::default() }
    }

    pub fn with_profile(mut self, profile: PageProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Input files in page order. Directories expand to their `.csv`/`.tsv`
    /// entries sorted by file name.
    pub fn page_files(&self) -> Result<Vec<PathBuf>, ImportError> {
        let mut files = Vec::new();
        for input in &self.inputs {
            if !input.is_dir() {
                files.push(input.clone());
                continue;
            }
            let mut found: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_table_file(p))
                .collect();
            if found.is_empty() {
                return Err(ImportError::NoTableFiles(input.clone()));
            }
            found.sort();
            files.extend(found);
        }
        Ok(files)
    }

    pub fn read_page_file(&self, path: &Path) -> Result<Page, ImportError> {
        let file = std::fs::File::open(path)?;
        read_page(file, self.profile.delimiter_for(path), self.profile.has_header)
            .map_err(|source| ImportError::CsvError { path: path.to_path_buf(), source })
    }
}

impl TableSource for CsvTableSource {
    fn pages(&self) -> Result<Vec<Page>, SourceError> {
        let mut pages = Vec::new();
        for path in self.page_files()? {
            let page = self.read_page_file(&path)?;
            debug!(path = %path.display(), cells = page.cell_count(), "page loaded");
            pages.push(page);
        }
        Ok(pages)
    }
}

fn is_table_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv") || e.eq_ignore_ascii_case("tsv"))
}

/// Parse one exported page. Ragged rows are kept as-is.
pub fn read_page<R: Read>(data: R, delimiter: u8, has_header: bool) -> Result<Page, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(data);

    let headers = if has_header {
        reader.headers()?.iter().map(|s| s.to_string()).collect()
    } else {
        Vec::new()
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(Page::new(headers, rows))
}
