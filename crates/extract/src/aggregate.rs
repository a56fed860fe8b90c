use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info, trace};

use drawsheet_core::{Digit, DrawNumber, DrawRecord, Session};

use crate::chunk::split_fragments;
use crate::error::ExtractError;
use crate::grammar::parse_fragment;
use crate::source::Page;

/// A draw whose date has been resolved to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDraw {
    pub date: NaiveDate,
    pub session: Session,
    pub number: DrawNumber,
    pub fireball: Option<Digit>,
}

/// Counters for one aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateReport {
    pub pages: usize,
    pub cells: usize,
    pub fragments: usize,
    pub parsed: usize,
    pub rejected: usize,
    pub duplicates: usize,
}

impl AggregateReport {
    pub fn kept(&self) -> usize {
        self.parsed - self.duplicates
    }

    fn absorb(&mut self, page: &PageHarvest) {
        self.pages += 1;
        self.cells += page.cells;
        self.fragments += page.fragments;
        self.parsed += page.records.len();
        self.rejected += page.rejected;
    }
}

/// Records recognized on a single page, in extraction order.
#[derive(Debug, Clone, Default)]
pub struct PageHarvest {
    pub records: Vec<DrawRecord>,
    pub cells: usize,
    pub fragments: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone)]
pub struct Aggregated {
    /// Newest first; same-day draws keep extraction order.
    pub draws: Vec<NormalizedDraw>,
    pub report: AggregateReport,
}

/// Runs chunking and parsing over every cell of every page, then dedups,
/// normalizes dates and sorts.
#[derive(Debug, Clone)]
pub struct Aggregator {
    missing_marker: String,
    parallel: bool,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new("nan")
    }
}

impl Aggregator {
    pub fn new(missing_marker: impl Into<String>) -> Self {
        Self { missing_marker: missing_marker.into(), parallel: false }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn harvest_page(&self, index: usize, page: &Page) -> PageHarvest {
        let mut harvest = PageHarvest::default();
        for (cell, text) in page.cells(index) {
            harvest.cells += 1;
            for fragment in split_fragments(text, &self.missing_marker) {
                harvest.fragments += 1;
                match parse_fragment(fragment) {
                    Some(record) => harvest.records.push(record),
                    None => {
                        harvest.rejected += 1;
                        trace!(%cell, fragment, "fragment rejected");
                    }
                }
            }
        }
        debug!(
            page = index,
            cells = harvest.cells,
            records = harvest.records.len(),
            rejected = harvest.rejected,
            "page harvested"
        );
        harvest
    }

    pub fn aggregate(&self, pages: &[Page]) -> Result<Aggregated, ExtractError> {
        let mut report = AggregateReport::default();
        let mut records = Vec::new();
        for harvest in self.harvest_all(pages) {
            report.absorb(&harvest);
            records.extend(harvest.records);
        }

        let before = records.len();
        dedup_exact(&mut records);
        report.duplicates = before - records.len();

        let mut draws = records
            .into_iter()
            .map(normalize)
            .collect::<Result<Vec<_>, _>>()?;
        // `sort_by` is stable: ties stay in extraction order.
        draws.sort_by(|a, b| b.date.cmp(&a.date));

        info!(
            pages = report.pages,
            parsed = report.parsed,
            duplicates = report.duplicates,
            kept = draws.len(),
            "aggregation complete"
        );
        Ok(Aggregated { draws, report })
    }

    #[cfg(feature = "parallel")]
    fn harvest_all(&self, pages: &[Page]) -> Vec<PageHarvest> {
        use rayon::prelude::*;

        if self.parallel {
            // Indexed collect keeps page order.
            return pages
                .par_iter()
                .enumerate()
                .map(|(i, page)| self.harvest_page(i, page))
                .collect();
        }
        self.harvest_sequential(pages)
    }

    #[cfg(not(feature = "parallel"))]
    fn harvest_all(&self, pages: &[Page]) -> Vec<PageHarvest> {
        if self.parallel {
            tracing::warn!("built without the `parallel` feature; processing pages sequentially");
        }
        self.harvest_sequential(pages)
    }

    fn harvest_sequential(&self, pages: &[Page]) -> Vec<PageHarvest> {
        pages
            .iter()
            .enumerate()
            .map(|(i, page)| self.harvest_page(i, page))
            .collect()
    }
}

/// Drop records identical in every field, keeping the first occurrence.
fn dedup_exact(records: &mut Vec<DrawRecord>) {
    let mut seen = HashSet::with_capacity(records.len());
    records.retain(|r| seen.insert(r.clone()));
}

fn normalize(record: DrawRecord) -> Result<NormalizedDraw, ExtractError> {
    let date = parse_short_date(&record.date)
        .ok_or_else(|| ExtractError::MalformedDate { raw: record.date.clone() })?;
    Ok(NormalizedDraw {
        date,
        session: record.session,
        number: record.number,
        fireball: record.fireball,
    })
}

/// `MM/DD/YY`, with every two-digit year placed in the 2000s.
pub fn parse_short_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let yy: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(0..100).contains(&yy) {
        return None;
    }
    NaiveDate::from_ymd_opt(2000 + yy, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(headers: &[&str], rows: &[&[&str]]) -> Page {
        Page::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect(),
        )
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── parse_short_date ─────────────────────────────────────────────────────

    #[test]
    fn short_date_resolves_to_2000s() {
        assert_eq!(parse_short_date("07/11/25"), Some(ymd(2025, 7, 11)));
        assert_eq!(parse_short_date("12/31/99"), Some(ymd(2099, 12, 31)));
        assert_eq!(parse_short_date("01/01/00"), Some(ymd(2000, 1, 1)));
    }

    #[test]
    fn short_date_rejects_impossible_dates() {
        assert_eq!(parse_short_date("13/01/25"), None);
        assert_eq!(parse_short_date("02/30/25"), None);
        assert_eq!(parse_short_date("00/10/25"), None);
        assert_eq!(parse_short_date("garbage"), None);
    }

    #[test]
    fn leap_day_depends_on_year() {
        assert_eq!(parse_short_date("02/29/24"), Some(ymd(2024, 2, 29)));
        assert_eq!(parse_short_date("02/29/25"), None);
    }

    // ── aggregate ────────────────────────────────────────────────────────────

    #[test]
    fn header_cells_carry_data() {
        let p = page(&["07/11/25 E 5- 1 - 1 FB 1", "Unnamed: 1"], &[&["07/10/25 M 2-2-2", "nan"]]);
        let out = Aggregator::default().aggregate(&[p]).unwrap();
        assert_eq!(out.draws.len(), 2);
        assert_eq!(out.draws[0].date, ymd(2025, 7, 11));
        assert_eq!(out.draws[0].session, Session::Evening);
        assert_eq!(out.draws[1].number.to_string(), "222");
    }

    #[test]
    fn multi_record_cell_is_split() {
        let p = page(&[], &[&["07/11/25 E 5-1-1 FB 1\n07/11/25 M 0-0-3\n07/10/25 E 9-9-9 FB"]]);
        let out = Aggregator::default().aggregate(&[p]).unwrap();
        assert_eq!(out.draws.len(), 3);
        assert_eq!(out.report.fragments, 3);
        assert_eq!(out.report.rejected, 0);
    }

    #[test]
    fn same_fragment_in_header_and_body_dedups() {
        let text = "07/11/25 E 5- 1 - 1 FB 1";
        let p = page(&[text], &[&[text]]);
        let out = Aggregator::default().aggregate(&[p]).unwrap();
        assert_eq!(out.draws.len(), 1);
        assert_eq!(out.report.parsed, 2);
        assert_eq!(out.report.duplicates, 1);
        assert_eq!(out.report.kept(), 1);
    }

    #[test]
    fn near_duplicates_are_kept() {
        let p = page(&["07/11/25 E 5-1-1 FB 1", "07/11/25 E 5-1-7 FB 1"], &[]);
        let out = Aggregator::default().aggregate(&[p]).unwrap();
        assert_eq!(out.draws.len(), 2);
    }

    #[test]
    fn fireball_presence_distinguishes_records() {
        let p = page(&["07/11/25 E 5-1-1 FB 1", "07/11/25 E 5-1-1"], &[]);
        let out = Aggregator::default().aggregate(&[p]).unwrap();
        assert_eq!(out.draws.len(), 2);
    }

    #[test]
    fn sorted_descending_with_stable_ties() {
        let p = page(
            &[],
            &[
                &["01/05/25 M 1-1-1", "03/01/25 E 2-2-2"],
                &["03/01/25 M 3-3-3", "12/31/24 E 4-4-4"],
            ],
        );
        let out = Aggregator::default().aggregate(&[p]).unwrap();
        let numbers: Vec<String> = out.draws.iter().map(|d| d.number.to_string()).collect();
        assert_eq!(numbers, ["222", "333", "111", "444"]);
        assert!(out.draws.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn feeding_a_page_twice_is_idempotent() {
        let p = page(&["07/11/25 E 5-1-1 FB 1"], &[&["07/10/25 M 2-2-2", "07/09/25 E 0-1-2 FB 3"]]);
        let once = Aggregator::default().aggregate(&[p.clone()]).unwrap();
        let twice = Aggregator::default().aggregate(&[p.clone(), p]).unwrap();
        assert_eq!(once.draws, twice.draws);
    }

    #[test]
    fn garbage_yields_nothing_without_error() {
        let p = page(&["garbage text no date"], &[&["", "nan", "Page 3 of 9"]]);
        let out = Aggregator::default().aggregate(&[p]).unwrap();
        assert!(out.draws.is_empty());
        assert_eq!(out.report.rejected, 2);
        assert_eq!(out.report.cells, 4);
    }

    #[test]
    fn malformed_date_is_fatal() {
        let p = page(&["07/10/25 M 2-2-2"], &[&["13/45/25 E 1-2-3"]]);
        let err = Aggregator::default().aggregate(&[p]).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedDate { ref raw } if raw == "13/45/25"));
    }

    #[test]
    fn custom_missing_marker() {
        let p = page(&["--"], &[&["--", "07/10/25 M 2-2-2"]]);
        let out = Aggregator::new("--").aggregate(&[p]).unwrap();
        assert_eq!(out.report.fragments, 1);
        assert_eq!(out.draws.len(), 1);
    }

    #[test]
    fn parallel_matches_sequential() {
        let pages: Vec<Page> = (1..=9u32)
            .map(|d| {
                let header = format!("07/0{d}/25 E {d}-{d}-{d}");
                let body = format!("07/0{d}/25 M 0-0-{d}\n07/05/25 E 5-5-5");
                page(&[header.as_str()], &[&[body.as_str()]])
            })
            .collect();
        let seq = Aggregator::default().aggregate(&pages).unwrap();
        let par = Aggregator::default().parallel(true).aggregate(&pages).unwrap();
        assert_eq!(seq.draws, par.draws);
        assert_eq!(seq.report, par.report);
    }
}
