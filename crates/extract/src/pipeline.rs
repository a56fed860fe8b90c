use drawsheet_core::{Config, SessionLabels};
use tracing::{info, warn};

use crate::aggregate::{AggregateReport, Aggregator};
use crate::error::ExtractError;
use crate::partition::{partition, Partitioned};
use crate::source::{SourceError, TableSource};

/// The result of a single extraction run.
#[derive(Debug)]
pub struct PipelineOutput {
    pub results: Partitioned,
    pub report: AggregateReport,
}

/// Orchestrates: pages → chunk + parse → dedup → normalize → sort → partition.
pub struct DrawPipeline<S: TableSource> {
    source: S,
    aggregator: Aggregator,
    labels: SessionLabels,
}

impl<S: TableSource> DrawPipeline<S> {
    pub fn new(source: S, aggregator: Aggregator, labels: SessionLabels) -> Self {
        Self { source, aggregator, labels }
    }

    pub fn from_config(source: S, config: &Config) -> Self {
        let aggregator = Aggregator::new(config.missing_marker.clone()).parallel(config.parallel);
        Self::new(source, aggregator, config.labels.clone())
    }

    /// Run to completion. Nothing is returned on failure, so callers never
    /// see a partial result.
    pub fn run(&self) -> Result<PipelineOutput, ExtractError> {
        // 1. Pull every page up front.
        let pages = self.source.pages()?;
        if pages.is_empty() {
            return Err(SourceError::NoPages.into());
        }
        info!(pages = pages.len(), "table source loaded");

        // 2. Extract, dedup, normalize and sort.
        let aggregated = self.aggregator.aggregate(&pages)?;

        // 3. Split by session.
        let results = partition(aggregated.draws, &self.labels);
        for set in results.sets() {
            if set.is_empty() {
                warn!(session = %set.session, "no {} results were found", set.label);
            }
        }

        Ok(PipelineOutput { results, report: aggregated.report })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{InMemorySource, Page};

    struct FailingSource;

    impl TableSource for FailingSource {
        fn pages(&self) -> Result<Vec<Page>, SourceError> {
            Err(SourceError::Read("document could not be opened".into()))
        }
    }

    #[test]
    fn run_splits_sessions() {
        let pipeline = DrawPipeline::from_config(
            InMemorySource::from_text("07/11/25 E 5- 1 - 1 FB 1\n07/10/25 M 2-2-2"),
            &Config::default(),
        );
        let out = pipeline.run().unwrap();
        assert_eq!(out.results.evening.len(), 1);
        assert_eq!(out.results.midday.len(), 1);
        assert_eq!(out.report.kept(), 2);
    }

    #[test]
    fn failing_source_is_fatal() {
        let pipeline = DrawPipeline::from_config(FailingSource, &Config::default());
        let err = pipeline.run().unwrap_err();
        assert!(matches!(err, ExtractError::SourceUnavailable(SourceError::Read(_))));
    }

    #[test]
    fn zero_pages_is_fatal() {
        let pipeline = DrawPipeline::from_config(InMemorySource::new(vec![]), &Config::default());
        let err = pipeline.run().unwrap_err();
        assert!(matches!(err, ExtractError::SourceUnavailable(SourceError::NoPages)));
    }

    #[test]
    fn pages_without_records_give_empty_sets() {
        let pipeline = DrawPipeline::from_config(
            InMemorySource::from_text("garbage text no date"),
            &Config::default(),
        );
        let out = pipeline.run().unwrap();
        assert!(out.results.midday.is_empty());
        assert!(out.results.evening.is_empty());
    }
}
