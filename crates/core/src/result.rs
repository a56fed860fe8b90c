use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::draw::{fireball_text, Digit, DrawNumber};
use crate::session::Session;

/// A normalized draw with its session implied by the set it lives in.
/// Field order and names are the persisted column contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Number")]
    pub number: DrawNumber,
    #[serde(rename = "Fireball", with = "fireball_text")]
    pub fireball: Option<Digit>,
}

pub const RESULT_COLUMNS: [&str; 3] = ["Date", "Number", "Fireball"];

/// All draws for one session, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub session: Session,
    /// Human-facing name for the session, taken from configuration.
    pub label: String,
    pub rows: Vec<ResultRow>,
}

impl ResultSet {
    pub fn new(session: Session, label: impl Into<String>) -> Self {
        Self { session, label: label.into(), rows: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }

    pub fn is_date_descending(&self) -> bool {
        self.rows.windows(2).all(|w| w[0].date >= w[1].date)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
