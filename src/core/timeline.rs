//! Timeline navigation over the manifest's fixed date sequence.
//!
//! Neighbour steps (`next`, `previous`) refuse to move past either end and
//! leave the current key unchanged. Week jumps (`next-7`, `previous-7`) clamp
//! to the first or last date instead.

use crate::core::{
    date_key::DateKey,
    error::{Result, ViewerError},
};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    First,
    Last,
    Next,
    Previous,
    NextWeek,
    PreviousWeek,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::First,
        Direction::PreviousWeek,
        Direction::Previous,
        Direction::Next,
        Direction::NextWeek,
        Direction::Last,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::First => "first",
            Direction::Last => "last",
            Direction::Next => "next",
            Direction::Previous => "previous",
            Direction::NextWeek => "next-7",
            Direction::PreviousWeek => "previous-7",
        }
    }
}

impl FromStr for Direction {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "first" => Ok(Direction::First),
            "last" => Ok(Direction::Last),
            "next" => Ok(Direction::Next),
            "previous" => Ok(Direction::Previous),
            "next-7" => Ok(Direction::NextWeek),
            "previous-7" => Ok(Direction::PreviousWeek),
            other => Err(ViewerError::unknown_direction(other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const WEEK: usize = 7;

/// The ordered, immutable date sequence of a session
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    dates: Vec<DateKey>,
}

impl Timeline {
    /// Build from manifest dates. Out-of-order or duplicate keys are sorted
    /// and deduplicated; an empty sequence is rejected.
    pub fn new(mut dates: Vec<DateKey>) -> Result<Self> {
        if dates.is_empty() {
            return Err(ViewerError::EmptyManifest);
        }
        if !dates.windows(2).all(|pair| pair[0] < pair[1]) {
            log::warn!("Manifest dates are not strictly ascending, normalizing");
            dates.sort();
            dates.dedup();
        }
        Ok(Self { dates })
    }

    pub fn first(&self) -> &DateKey {
        &self.dates[0]
    }

    pub fn last(&self) -> &DateKey {
        &self.dates[self.dates.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[DateKey] {
        &self.dates
    }

    pub fn position(&self, key: &DateKey) -> Option<usize> {
        self.dates.binary_search(key).ok()
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        self.position(key).is_some()
    }

    /// `(min, max)` as `YYYY-MM-DD`, bounds for a date input
    pub fn bounds(&self) -> (String, String) {
        (self.first().to_date_string(), self.last().to_date_string())
    }

    /// Fail with `DateNotAvailable` unless `key` is in the sequence
    pub fn require(&self, key: &DateKey) -> Result<()> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(ViewerError::DateNotAvailable {
                key: key.clone(),
                first: self.first().clone(),
                last: self.last().clone(),
            })
        }
    }

    /// Resolve the key reached from `current` in `direction`
    pub fn next_date_key(&self, current: &DateKey, direction: Direction) -> DateKey {
        let len = self.dates.len();
        match direction {
            Direction::First => return self.first().clone(),
            Direction::Last => return self.last().clone(),
            _ => {}
        }

        // An unknown key sits just before the first date
        let Some(i) = self.position(current) else {
            return match direction {
                Direction::Next | Direction::PreviousWeek => self.first().clone(),
                Direction::NextWeek => self.dates.get(WEEK - 1).unwrap_or(self.last()).clone(),
                _ => current.clone(),
            };
        };

        let target = match direction {
            Direction::Next if i + 1 < len => i + 1,
            Direction::Previous if i > 0 => i - 1,
            Direction::NextWeek if i + WEEK < len => i + WEEK,
            Direction::NextWeek => len - 1,
            Direction::PreviousWeek if i >= WEEK => i - WEEK,
            Direction::PreviousWeek => 0,
            _ => i,
        };
        self.dates[target].clone()
    }
}
