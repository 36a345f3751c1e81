use crate::color::{colorize, ColorScale, ColoredRegion};

use super::aggregate::aggregate;
use super::derive::{derive_daily, derive_growth};
use super::error::PipelineError;
use super::model::{SeriesCollection, Table, View};
use super::rank::rank;

// ---------------------------------------------------------------------------
// PipelineState – the three views computed once per load
// ---------------------------------------------------------------------------

/// Everything derived from one loaded table.
///
/// Built once by [`PipelineState::build`] and never mutated afterwards; a view
/// switch only re-runs the colour mapper against one of the collections.
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub day_labels: Vec<String>,
    total: SeriesCollection,
    daily: SeriesCollection,
    growth: SeriesCollection,
}

impl PipelineState {
    /// Aggregate → rank → derive daily → derive growth.
    pub fn build(table: &Table) -> Result<Self, PipelineError> {
        let day_count = table.day_count();
        let total = rank(aggregate(&table.rows, day_count)?)?;
        if total.is_empty() {
            log::warn!("table has no named regions");
        }
        let daily = derive_daily(&total);
        let growth = derive_growth(&daily);
        log::debug!(
            "pipeline built: {} regions x {} days",
            total.len(),
            day_count
        );

        Ok(PipelineState {
            day_labels: table.day_labels(),
            total,
            daily,
            growth,
        })
    }

    pub fn series(&self, view: View) -> &SeriesCollection {
        match view {
            View::Total => &self.total,
            View::Daily => &self.daily,
            View::Growth => &self.growth,
        }
    }

    /// Colour output for `view`, in ranked order.
    pub fn colorize(&self, view: View, scale: &ColorScale) -> Vec<ColoredRegion> {
        colorize(self.series(view), scale)
    }

    pub fn region_count(&self) -> usize {
        self.total.len()
    }

    pub fn day_count(&self) -> usize {
        self.total.day_count()
    }
}
