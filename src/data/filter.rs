use crate::color::ColoredRegion;

// ---------------------------------------------------------------------------
// Region filter: which ranked bars are shown
// ---------------------------------------------------------------------------

/// Name query plus an optional cap on the number of bars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionFilter {
    /// Case-insensitive substring; empty means "no constraint".
    pub query: String,
    /// Show at most this many matching regions.
    pub limit: Option<usize>,
}

impl RegionFilter {
    pub fn matches(&self, name: &str) -> bool {
        let query = self.query.trim();
        query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Return indices of regions that pass the filter, in ranked order.
///
/// Ranks are never recomputed here; filtering only hides bars.
pub fn filtered_indices(regions: &[ColoredRegion], filter: &RegionFilter) -> Vec<usize> {
    let limit = filter.limit.unwrap_or(usize::MAX);
    regions
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.matches(&r.name))
        .map(|(i, _)| i)
        .take(limit)
        .collect()
}
