use egui::{Color32, RichText, Stroke};

use super::palette::parse_color;
use crate::models::category::{Category, CategorySelection};

/// Row of toggle chips, one per catalog category.
///
/// Returns true when the selection changed this frame.
pub fn render_category_bar(
    ui: &mut egui::Ui,
    categories: &[Category],
    selection: &mut CategorySelection,
) -> bool {
    let mut changed = false;

    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new("Categories:").strong());

        for category in categories {
            let selected = selection.contains(&category.name);
            let color = parse_color(&category.color).unwrap_or(Color32::GRAY);

            let text = if selected {
                RichText::new(&category.name).color(Color32::WHITE)
            } else {
                RichText::new(&category.name).color(color)
            };
            let button = egui::Button::new(text)
                .fill(if selected { color } else { Color32::TRANSPARENT })
                .stroke(Stroke::new(1.0, color))
                .rounding(10.0);

            if ui.add(button).clicked() {
                let now_selected = selection.toggle(&category.name);
                log::debug!(
                    "Category '{}' {}",
                    category.name,
                    if now_selected { "selected" } else { "deselected" }
                );
                changed = true;
            }
        }

        if !selection.is_empty() && ui.small_button("Clear").clicked() {
            selection.clear();
            changed = true;
        }
    });

    changed
}
