use std::sync::OnceLock;

use regex::{Captures, Regex};

use drawsheet_core::{Digit, DrawNumber, DrawRecord, Session};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// record  := DATE WS SESSION WS D WS? '-' WS? D WS? '-' WS? D (WS 'FB' WS? D?)?
re!(re_record, concat!(
    r"(?P<date>[0-9]{2}/[0-9]{2}/[0-9]{2})",
    r"\s+(?P<session>[EM])",
    r"\s+(?P<d1>[0-9])\s*-\s*(?P<d2>[0-9])\s*-\s*(?P<d3>[0-9])",
    r"(?:\s+FB\s*(?P<fireball>[0-9]?))?",
));

// ── Public parsing API ───────────────────────────────────────────────────────

/// Recognize one draw record inside a fragment.
///
/// `None` is the normal outcome for headers, captions and OCR debris.
pub fn parse_fragment(fragment: &str) -> Option<DrawRecord> {
    let c = re_record().captures(fragment)?;

    let session = Session::from_code(c.name("session")?.as_str().chars().next()?)?;
    let number = DrawNumber::new([digit(&c, "d1")?, digit(&c, "d2")?, digit(&c, "d3")?]);
    // `FB` may be printed with its digit missing.
    let fireball = c.name("fireball").and_then(|m| m.as_str().chars().next()).and_then(Digit::from_char);

    Some(DrawRecord {
        date: c.name("date")?.as_str().to_string(),
        session,
        number,
        fireball,
    })
}

fn digit(c: &Captures<'_>, group: &str) -> Option<Digit> {
    c.name(group)?.as_str().chars().next().and_then(Digit::from_char)
}

// ── Tests ────────────────────────────────────────────────────────────────────
