use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use drawsheet_core::{Config, OutputFormat};
use drawsheet_extract::{DrawPipeline, InMemorySource, Partitioned, PipelineOutput, TableSource};
use drawsheet_import::{CsvTableSource, PageProfile};
use drawsheet_storage::{write_results, WriteOutcome};
use serde::ser::{Serialize, SerializeMap, Serializer};

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(p) => Config::load(p).with_context(|| format!("loading config {}", p.display())),
        None => Ok(Config::default()),
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub out_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub parallel: bool,
}

pub fn apply_overrides(mut config: Config, overrides: Overrides) -> Config {
    if let Some(dir) = overrides.out_dir {
        config.output.dir = dir;
    }
    if let Some(format) = overrides.format {
        config.output.format = format;
    }
    config.parallel |= overrides.parallel;
    config
}

fn run_pipeline<S: TableSource>(source: S, config: &Config) -> anyhow::Result<PipelineOutput> {
    DrawPipeline::from_config(source, config)
        .run()
        .context("extraction aborted; no output written")
}

/// Full run: page tables in, one results file per non-empty session out.
pub fn extract(inputs: Vec<PathBuf>, has_header: bool, config: &Config) -> anyhow::Result<()> {
    let source = CsvTableSource::new(inputs)
        .with_profile(PageProfile { has_header, ..PageProfile::default() });
    let out = run_pipeline(source, config)?;
    let report = &out.report;
    println!(
        "Extracted {} draws from {} pages ({} duplicates removed, {} fragments skipped)",
        report.kept(),
        report.pages,
        report.duplicates,
        report.rejected
    );

    let outcomes = write_results(out.results.sets(), &config.output)
        .context("writing results")?;
    for (set, outcome) in out.results.sets().into_iter().zip(&outcomes) {
        match outcome {
            WriteOutcome::Written { path, rows } => {
                println!("Saved {rows} {} results to {}", set.label, path.display())
            }
            WriteOutcome::Skipped { .. } => println!("No {} results were found.", set.label),
        }
    }
    Ok(())
}

/// Debug aid: run a raw text blob through the same pipeline and print JSON.
pub fn parse_stdin(config: &Config) -> anyhow::Result<()> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text).context("reading stdin")?;
    println!("{}", render_json(&text, config)?);
    Ok(())
}

/// Both sessions keyed by label, Midday first, rows in column order.
struct SessionsJson<'a>(&'a Partitioned);

impl Serialize for SessionsJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sets = self.0.sets();
        let mut map = serializer.serialize_map(Some(sets.len()))?;
        for set in sets {
            map.serialize_entry(&set.label, &set.rows)?;
        }
        map.end()
    }
}

fn render_json(text: &str, config: &Config) -> anyhow::Result<String> {
    let out = run_pipeline(InMemorySource::from_text(text), config)?;
    Ok(serde_json::to_string_pretty(&SessionsJson(&out.results))?)
}
