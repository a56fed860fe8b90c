pub mod table;

pub use table::{read_page, CsvTableSource, ImportError, PageProfile};
