use eframe::egui;

use crate::state::AppState;
use crate::ui::{bars, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StripesApp {
    pub state: AppState,
}

impl StripesApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for StripesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();
        if self.state.loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ---- Top panel: menu bar and view selector ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filter and legend ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: one bar per region ----
        egui::CentralPanel::default().show(ctx, |ui| {
            bars::region_bars(ui, &self.state);
        });
    }
}
