use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::PipelineError;

/// Index of the region name within a raw row.
pub const REGION_FIELD: usize = 1;
/// Index of the first day column within a raw row.
pub const FIRST_DAY_FIELD: usize = 4;

// ---------------------------------------------------------------------------
// Row / Table – tokenized source data
// ---------------------------------------------------------------------------

/// One tokenized line of the source table.
pub type Row = Vec<String>;

/// The tokenized source table: header plus data rows.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Number of day columns, derived once from the header.
    pub fn day_count(&self) -> usize {
        self.header.len().saturating_sub(FIRST_DAY_FIELD)
    }

    /// Header labels of the day columns (dates in the published data).
    pub fn day_labels(&self) -> Vec<String> {
        self.header.iter().skip(FIRST_DAY_FIELD).cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// Series / SeriesCollection
// ---------------------------------------------------------------------------

/// One region's values, one per day in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Series {
            name: name.into(),
            values,
        }
    }

    /// Value of the final day, if there is one.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Ordered, uniquely keyed series that all share the same length.
///
/// Iteration order is meaningful: once ranked, every derived collection keeps
/// exactly the same key order. There are no mutators; each pipeline stage
/// builds a new collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesCollection {
    entries: Vec<Series>,
    day_count: usize,
}

impl SeriesCollection {
    /// Build a collection, checking every series has `day_count` values.
    pub fn new(day_count: usize, entries: Vec<Series>) -> Result<Self, PipelineError> {
        if let Some(bad) = entries.iter().find(|s| s.len() != day_count) {
            return Err(PipelineError::InconsistentSeriesLength {
                region: bad.name.clone(),
                expected: day_count,
                actual: bad.len(),
            });
        }
        Ok(SeriesCollection { entries, day_count })
    }

    /// Used by stages that map a valid collection onto a same-shaped one.
    pub(crate) fn from_validated(day_count: usize, entries: Vec<Series>) -> Self {
        debug_assert!(entries.iter().all(|s| s.len() == day_count));
        SeriesCollection { entries, day_count }
    }

    pub fn day_count(&self) -> usize {
        self.day_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.entries.iter()
    }

    /// Region names in collection order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|s| s.name.as_str()).collect()
    }

    /// Series at a ranked position.
    pub fn at(&self, index: usize) -> Option<&Series> {
        self.entries.get(index)
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.entries.iter().find(|s| s.name == name)
    }

    pub(crate) fn into_entries(self) -> Vec<Series> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a SeriesCollection {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// View – which derived collection is displayed
// ---------------------------------------------------------------------------

/// The three selectable views of the same data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Total,
    Daily,
    Growth,
}

impl View {
    pub const ALL: [View; 3] = [View::Total, View::Daily, View::Growth];

    /// Human readable label for buttons and headings.
    pub fn label(self) -> &'static str {
        match self {
            View::Total => "Total",
            View::Daily => "Daily",
            View::Growth => "Growth",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Total => write!(f, "total"),
            View::Daily => write!(f, "daily"),
            View::Growth => write!(f, "growth"),
        }
    }
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "total" => Ok(View::Total),
            "daily" => Ok(View::Daily),
            "growth" => Ok(View::Growth),
            other => Err(format!("unknown view '{other}' (expected total, daily or growth)")),
        }
    }
}
