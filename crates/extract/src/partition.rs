use drawsheet_core::{ResultRow, ResultSet, Session, SessionLabels};

use crate::aggregate::NormalizedDraw;

/// The two per-session result sets of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioned {
    pub midday: ResultSet,
    pub evening: ResultSet,
}

impl Partitioned {
    pub fn get(&self, session: Session) -> &ResultSet {
        match session {
            Session::Midday => &self.midday,
            Session::Evening => &self.evening,
        }
    }

    pub fn sets(&self) -> [&ResultSet; 2] {
        [&self.midday, &self.evening]
    }
}

/// Split sorted draws by session. Relative order is preserved and the
/// session moves from each row onto its set.
pub fn partition(draws: Vec<NormalizedDraw>, labels: &SessionLabels) -> Partitioned {
    let mut midday = ResultSet::new(Session::Midday, labels.label(Session::Midday));
    let mut evening = ResultSet::new(Session::Evening, labels.label(Session::Evening));

    for draw in draws {
        let row = ResultRow { date: draw.date, number: draw.number, fireball: draw.fireball };
        match draw.session {
            Session::Midday => midday.rows.push(row),
            Session::Evening => evening.rows.push(row),
        }
    }

    Partitioned { midday, evening }
}
