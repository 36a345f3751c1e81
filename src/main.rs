mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use app::StripesApp;
use config::{load_config, Config};
use data::export::write_export;
use data::loader::{load, Source};
use data::model::View;
use data::pipeline::PipelineState;
use state::AppState;

/// Per-region day stripes for cumulative case tables.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// CSV table to open on startup.
    path: Option<PathBuf>,

    /// Fetch the table over HTTP; without a value the configured URL is used.
    #[arg(long, num_args = 0..=1, default_missing_value = "", conflicts_with = "path")]
    url: Option<String>,

    /// JSON config file (defaults to ./covid-stripes.json when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// View to show or export: total, daily or growth.
    #[arg(long)]
    view: Option<View>,

    /// Write the coloured view as JSON and exit without opening a window.
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

impl Cli {
    fn source(&self, default_url: &str) -> Option<Source> {
        match (&self.path, &self.url) {
            (Some(path), _) => Some(Source::File(path.clone())),
            (None, Some(url)) if url.is_empty() => Some(Source::Url(default_url.to_string())),
            (None, Some(url)) => Some(Source::Url(url.clone())),
            (None, None) => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref());
    if let Some(view) = cli.view {
        config.default_view = view;
    }
    let source = cli.source(&config.source_url);

    if let Some(out) = &cli.export {
        let source = source.context("--export needs a PATH or --url to read from")?;
        return export_headless(&source, out, config.default_view, &config);
    }

    let mut state = AppState::new(config);
    if let Some(source) = source {
        state.start_load(source);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Covid Stripes",
        options,
        Box::new(|_cc| Ok(Box::new(StripesApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running window: {e}"))
}

/// Load → pipeline → colour one view → JSON, without a window.
fn export_headless(
    source: &Source,
    out: &std::path::Path,
    view: View,
    config: &Config,
) -> anyhow::Result<()> {
    let table = load(source).with_context(|| format!("loading {source}"))?;
    let pipeline = PipelineState::build(&table)?;
    log::info!(
        "Loaded {} regions over {} days",
        pipeline.region_count(),
        pipeline.day_count()
    );
    write_export(out, &pipeline, view, &config.color_scale())
}
