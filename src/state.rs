use std::sync::mpsc::{Receiver, TryRecvError};

use anyhow::Result;

use crate::color::{ColorScale, ColoredRegion};
use crate::config::Config;
use crate::data::filter::{filtered_indices, RegionFilter};
use crate::data::loader::{spawn_load, Source};
use crate::data::model::{Table, View};
use crate::data::pipeline::PipelineState;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Colour scale built from the config anchors.
    pub scale: ColorScale,

    /// Derived views of the last successful load (None until then).
    pub pipeline: Option<PipelineState>,

    /// Which derived view is displayed.
    pub view: View,

    /// Colour output for `view`, in ranked order (cached).
    pub colored: Vec<ColoredRegion>,

    /// Region name query / top-N limit.
    pub filter: RegionFilter,

    /// Indices into `colored` passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Background load in flight, if any.
    pending: Option<Receiver<Result<Table>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            scale: config.color_scale(),
            view: config.default_view,
            config,
            pipeline: None,
            colored: Vec::new(),
            filter: RegionFilter::default(),
            visible_indices: Vec::new(),
            status_message: None,
            pending: None,
        }
    }

    /// Whether a load operation is in progress.
    pub fn loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start loading in the background. Replaces any load still in flight.
    pub fn start_load(&mut self, source: Source) {
        log::info!("loading {source}");
        self.status_message = Some(format!("Loading {source}…"));
        self.pending = Some(spawn_load(source));
    }

    /// Pick up a finished background load, if there is one.
    ///
    /// Returns `true` when the state changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                match result {
                    Ok(table) => self.set_table(&table),
                    Err(e) => self.report_error(e),
                }
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.status_message = Some("Error: loader stopped without a result".into());
                true
            }
        }
    }

    /// Run the full pipeline on a freshly loaded table.
    ///
    /// On failure the previous pipeline is kept.
    pub fn set_table(&mut self, table: &Table) {
        match PipelineState::build(table) {
            Ok(pipeline) => {
                log::info!(
                    "Loaded {} regions over {} days",
                    pipeline.region_count(),
                    pipeline.day_count()
                );
                self.pipeline = Some(pipeline);
                self.view = self.config.default_view;
                self.status_message = None;
                self.recolor();
            }
            Err(e) => self.report_error(e.into()),
        }
    }

    /// Switch the displayed view; only the colour mapper runs again.
    pub fn set_view(&mut self, view: View) {
        if view == self.view {
            return;
        }
        log::info!("switching to {view} view");
        self.view = view;
        self.recolor();
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.colored, &self.filter);
    }

    fn recolor(&mut self) {
        self.colored = match &self.pipeline {
            Some(p) => p.colorize(self.view, &self.scale),
            None => Vec::new(),
        };
        self.refilter();
    }

    fn report_error(&mut self, e: anyhow::Error) {
        log::error!("Failed to load data: {e:#}");
        self.status_message = Some(format!("Error: {e:#}"));
    }
}
