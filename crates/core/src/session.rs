use std::fmt;

/// Which of the two daily draws a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Session {
    Midday,
    Evening,
}

impl Session {
    pub const ALL: [Session; 2] = [Session::Midday, Session::Evening];

    /// Maps the single-letter session code printed on the results sheet.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(Session::Midday),
            'E' => Some(Session::Evening),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Session::Midday => 'M',
            Session::Evening => 'E',
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Midday => write!(f, "Midday"),
            Session::Evening => write!(f, "Evening"),
        }
    }
}

impl std::str::FromStr for Session {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "midday" | "m" => Ok(Session::Midday),
            "evening" | "e" => Ok(Session::Evening),
            other => Err(format!("Unknown session: '{other}'")),
        }
    }
}
