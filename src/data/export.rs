use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::color::{css_rgb, ColorScale};

use super::model::View;
use super::pipeline::PipelineState;

/// JSON snapshot of one coloured view.
#[derive(Debug, Serialize)]
pub struct ViewExport<'a> {
    pub view: View,
    pub days: &'a [String],
    pub regions: Vec<RegionExport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RegionExport<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
    pub colors: Vec<String>,
}

/// Build the export document for `view`, regions in ranked order.
pub fn build_export<'a>(
    state: &'a PipelineState,
    view: View,
    scale: &ColorScale,
) -> ViewExport<'a> {
    let colored = state.colorize(view, scale);
    let regions = state
        .series(view)
        .iter()
        .zip(colored)
        .map(|(series, region)| RegionExport {
            name: &series.name,
            values: &series.values,
            colors: region.colors.into_iter().map(css_rgb).collect(),
        })
        .collect();

    ViewExport {
        view,
        days: &state.day_labels,
        regions,
    }
}

/// Write the export document as pretty JSON.
pub fn write_export(path: &Path, state: &PipelineState, view: View, scale: &ColorScale) -> Result<()> {
    let doc = build_export(state, view, scale);
    let text = serde_json::to_string_pretty(&doc).context("serializing export")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "exported {} view ({} regions) to {}",
        view,
        doc.regions.len(),
        path.display()
    );
    Ok(())
}
