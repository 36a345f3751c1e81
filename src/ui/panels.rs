use eframe::egui::{self, Color32, DragValue, RichText, Sense, Ui};

use crate::data::export::write_export;
use crate::data::loader::Source;
use crate::data::model::View;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter and legend
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Regions");
    ui.separator();

    if state.pipeline.is_none() {
        ui.label("No table loaded.");
        return;
    }

    let mut changed = false;

    ui.strong("Name contains");
    changed |= ui.text_edit_singleline(&mut state.filter.query).changed();

    ui.add_space(4.0);
    let mut limited = state.filter.limit.is_some();
    if ui.checkbox(&mut limited, "Top N only").changed() {
        state.filter.limit = if limited { Some(20) } else { None };
        changed = true;
    }
    if let Some(limit) = state.filter.limit.as_mut() {
        changed |= ui
            .add(DragValue::new(limit).range(1..=500).prefix("N = "))
            .changed();
    }

    if changed {
        state.refilter();
    }

    ui.separator();
    ui.label(format!(
        "{} of {} regions shown",
        state.visible_indices.len(),
        state.colored.len()
    ));

    ui.separator();
    legend(ui, state);
}

/// Gradient strip from the low to the high anchor.
fn legend(ui: &mut Ui, state: &AppState) {
    ui.strong("Scale (per bar)");
    let steps = state.scale.gradient(32);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), 12.0), Sense::hover());
    let w = rect.width() / steps.len() as f32;
    for (i, c) in steps.iter().enumerate() {
        let x0 = rect.left() + i as f32 * w;
        let cell = egui::Rect::from_min_max(
            egui::pos2(x0, rect.top()),
            egui::pos2(x0 + w + 0.5, rect.bottom()),
        );
        ui.painter().rect_filled(cell, 0.0, *c);
    }
    ui.horizontal(|ui: &mut Ui| {
        ui.small("0");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.small("bar max");
        });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load from URL").clicked() {
                let url = state.config.source_url.clone();
                state.start_load(Source::Url(url));
                ui.close_menu();
            }
            ui.separator();
            let can_export = state.pipeline.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export view…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let current = state.view;
        for view in View::ALL {
            if ui.selectable_label(current == view, view.label()).clicked() {
                state.set_view(view);
            }
        }

        ui.separator();

        if let Some(p) = &state.pipeline {
            ui.label(format!("{} regions, {} days", p.region_count(), p.day_count()));
        }

        if state.loading() {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open time-series table")
        .add_filter("CSV", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.start_load(Source::File(path));
    }
}

fn export_dialog(state: &mut AppState) {
    let Some(pipeline) = &state.pipeline else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export view")
        .set_file_name(format!("{}.json", state.view))
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = write_export(&path, pipeline, state.view, &state.scale) {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
