pub mod writer;

pub use writer::{write_result_set, write_results, StorageError, WriteOutcome};
