use eframe::egui::{self, Color32, Rect, RichText, ScrollArea, Sense, Ui};

use crate::color::ColoredRegion;
use crate::data::model::Series;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Stacked day bars (central panel)
// ---------------------------------------------------------------------------

/// Render one horizontal bar per visible region, days left to right.
pub fn region_bars(ui: &mut Ui, state: &AppState) {
    let pipeline = match &state.pipeline {
        Some(p) => p,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                let text = if state.loading() {
                    "Loading…"
                } else {
                    "Open a table to view regions  (File → Open CSV… / Load from URL)"
                };
                ui.heading(text);
            });
            return;
        }
    };

    let series = pipeline.series(state.view);
    let bar_height = state.config.bar_height;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for &idx in &state.visible_indices {
                let (Some(region), Some(values)) = (state.colored.get(idx), series.at(idx))
                else {
                    continue;
                };
                ui.label(RichText::new(format!("{}. {}", idx + 1, region.name)).strong());
                bar(ui, region, values, &pipeline.day_labels, bar_height);
                ui.add_space(6.0);
            }
        });
}

/// A single bar; hovering a day shows its label and value.
fn bar(ui: &mut Ui, region: &ColoredRegion, series: &Series, day_labels: &[String], height: f32) {
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), Sense::hover());
    let n = region.colors.len();
    if n == 0 {
        ui.painter().rect_filled(rect, 0.0, Color32::DARK_GRAY);
        return;
    }

    let painter = ui.painter_at(rect);
    let day_width = rect.width() / n as f32;
    for (i, color) in region.colors.iter().enumerate() {
        let x0 = rect.left() + i as f32 * day_width;
        // half-point overlap hides seams between days
        let day = Rect::from_min_max(
            egui::pos2(x0, rect.top()),
            egui::pos2(x0 + day_width + 0.5, rect.bottom()),
        );
        painter.rect_filled(day, 0.0, *color);
    }

    if let Some(pos) = response.hover_pos() {
        let i = (((pos.x - rect.left()) / day_width) as usize).min(n - 1);
        let label = day_labels.get(i).map(String::as_str).unwrap_or("?");
        let value = series.values.get(i).copied().unwrap_or_default();
        response.on_hover_text(format!("{label}: {}", format_value(value)));
    }
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.4}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_print_without_decimals() {
        assert_eq!(format_value(1200.0), "1200");
        assert_eq!(format_value(-3.0), "-3");
        assert_eq!(format_value(0.5), "0.5000");
    }
}
