//! Birth/survival rule sets

use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Rule string for Conway's Game of Life
pub const CONWAY: &str = "B3/S23";

/// Largest neighbor count a cell can have in the Moore neighborhood
pub const MAX_NEIGHBORS: u8 = 8;

/// Which half of a rule string an error was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Birth,
    Survival,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Birth => write!(f, "birth"),
            Section::Survival => write!(f, "survival"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("expected exactly one '/' separator, found {found} segment(s)")]
    SegmentCount { found: usize },
    #[error("{section} section is empty")]
    MissingMarker { section: Section },
    #[error("invalid character {ch:?} in {section} section")]
    InvalidDigit { section: Section, ch: char },
}

/// Neighbor counts that cause birth and survival.
///
/// Parsed from strings of the form `B<digits>/S<digits>`, e.g. `B36/S23`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    birth: BTreeSet<u8>,
    survive: BTreeSet<u8>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            birth: BTreeSet::from([3]),
            survive: BTreeSet::from([2, 3]),
        }
    }
}

impl RuleSet {
    pub fn new(birth: impl IntoIterator<Item = u8>, survive: impl IntoIterator<Item = u8>) -> Self {
        Self {
            birth: birth.into_iter().collect(),
            survive: survive.into_iter().collect(),
        }
    }

    /// Parse a rule string, falling back to `B3/S23` if it is malformed.
    ///
    /// Never fails: a bad string is reported through `tracing` and the whole
    /// rule set is replaced by the default, so no partially parsed digits survive.
    pub fn parse(spec: &str) -> Self {
        match Self::try_parse(spec) {
            Ok(rules) => rules,
            Err(e) => {
                warn!(spec = %spec, error = %e, "rule invalid, defaulting to game of life");
                Self::default()
            }
        }
    }

    /// Strict version of [`RuleSet::parse`].
    ///
    /// The first character of each half is a marker and is skipped without
    /// being checked. Every other character must be a single decimal digit.
    pub fn try_parse(spec: &str) -> Result<Self, RuleError> {
        let segments: Vec<&str> = spec.split('/').collect();
        let [birth, survive] = segments.as_slice() else {
            return Err(RuleError::SegmentCount {
                found: segments.len(),
            });
        };

        Ok(Self {
            birth: parse_section(birth, Section::Birth)?,
            survive: parse_section(survive, Section::Survival)?,
        })
    }

    pub fn births(&self) -> &BTreeSet<u8> {
        &self.birth
    }

    pub fn survivals(&self) -> &BTreeSet<u8> {
        &self.survive
    }

    #[inline]
    pub fn is_birth(&self, count: u8) -> bool {
        self.birth.contains(&count)
    }

    #[inline]
    pub fn is_survival(&self, count: u8) -> bool {
        self.survive.contains(&count)
    }

    /// Whether a cell is alive next generation given its state and neighbor count
    #[inline]
    pub fn next_state(&self, alive: bool, count: u8) -> bool {
        if alive {
            self.is_survival(count)
        } else {
            self.is_birth(count)
        }
    }
}

fn parse_section(section: &str, kind: Section) -> Result<BTreeSet<u8>, RuleError> {
    let mut chars = section.chars();
    if chars.next().is_none() {
        return Err(RuleError::MissingMarker { section: kind });
    }

    chars
        .map(|ch| {
            ch.to_digit(10)
                .map(|d| d as u8)
                .ok_or(RuleError::InvalidDigit { section: kind, ch })
        })
        .collect()
}

impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "B{}/S{}",
            self.birth.iter().join(""),
            self.survive.iter().join("")
        )
    }
}
