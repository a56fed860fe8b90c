pub mod aggregate;
pub mod chunk;
pub mod error;
pub mod grammar;
pub mod partition;
pub mod pipeline;
pub mod source;

pub use aggregate::{parse_short_date, AggregateReport, Aggregated, Aggregator, NormalizedDraw};
pub use chunk::split_fragments;
pub use error::ExtractError;
pub use grammar::parse_fragment;
pub use partition::{partition, Partitioned};
pub use pipeline::{DrawPipeline, PipelineOutput};
pub use source::{CellKind, CellRef, InMemorySource, Page, SourceError, TableSource};
