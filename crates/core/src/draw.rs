use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::session::Session;

/// A single ASCII decimal digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Digit(value))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.is_ascii_digit().then(|| Digit(c as u8 - b'0'))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three drawn digits, in draw order. Always renders as exactly three
/// characters, leading zeros included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrawNumber([Digit; 3]);

impl DrawNumber {
    pub fn new(digits: [Digit; 3]) -> Self {
        DrawNumber(digits)
    }
}

impl fmt::Display for DrawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a}{b}{c}")
    }
}

impl FromStr for DrawNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<Digit> = s.chars().filter_map(Digit::from_char).collect();
        match digits.as_slice() {
            [a, b, c] if s.len() == 3 => Ok(DrawNumber([*a, *b, *c])),
            _ => Err(format!("Draw number must be exactly three digits: '{s}'")),
        }
    }
}

impl Serialize for DrawNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DrawNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for an optional fireball digit: absent is the empty string,
/// never `null`.
pub mod fireball_text {
    use super::Digit;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Digit>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.collect_str(d),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Digit>, D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(None),
            (Some(c), None) => Digit::from_char(c)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid fireball digit: '{s}'"))),
            _ => Err(serde::de::Error::custom(format!("Invalid fireball digit: '{s}'"))),
        }
    }
}

/// One draw as recognized in the extracted text, before date normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrawRecord {
    /// Raw `MM/DD/YY` as printed.
    pub date: String,
    pub session: Session,
    pub number: DrawNumber,
    pub fireball: Option<Digit>,
}

impl DrawRecord {
    /// Fireball rendered the way it is persisted.
    pub fn fireball_text(&self) -> String {
        self.fireball.map(|d| d.to_string()).unwrap_or_default()
    }
}
