use egui::Color32;
use std::collections::HashMap;

use crate::models::category::Category;

const FALLBACK_TAG: Color32 = Color32::from_rgb(107, 114, 128);

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` into a color.
pub fn parse_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        3 => {
            let expand = |i: usize| channel(hex[i..i + 1].repeat(2).as_str());
            Some(Color32::from_rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Some(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        8 => Some(Color32::from_rgba_unmultiplied(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => None,
    }
}

/// Colors used to paint the availability grid.
#[derive(Clone, Copy)]
pub(crate) struct GridPalette {
    pub cell_bg: Color32,
    pub weekend_bg: Color32,
    pub available_bg: Color32,
    pub drag_overlay: Color32,
    pub drag_border: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub label: Color32,
}

impl GridPalette {
    pub fn for_visuals(visuals: &egui::Visuals) -> Self {
        let accent = visuals.selection.bg_fill;
        if visuals.dark_mode {
            Self {
                cell_bg: Color32::from_gray(32),
                weekend_bg: Color32::from_gray(26),
                available_bg: Color32::from_rgb(30, 60, 45),
                drag_overlay: with_alpha(accent, 110),
                drag_border: accent,
                hour_line: Color32::from_gray(70),
                slot_line: Color32::from_gray(45),
                label: Color32::from_gray(170),
            }
        } else {
            Self {
                cell_bg: Color32::WHITE,
                weekend_bg: Color32::from_gray(246),
                available_bg: Color32::from_rgb(220, 245, 228),
                drag_overlay: with_alpha(accent, 90),
                drag_border: accent,
                hour_line: Color32::from_gray(200),
                slot_line: Color32::from_gray(230),
                label: Color32::GRAY,
            }
        }
    }
}

/// Tag colors keyed by category name.
#[derive(Default)]
pub(crate) struct TagColors {
    colors: HashMap<String, Color32>,
}

impl TagColors {
    pub fn from_categories(categories: &[Category]) -> Self {
        Self {
            colors: categories
                .iter()
                .filter_map(|c| parse_color(&c.color).map(|color| (c.name.clone(), color)))
                .collect(),
        }
    }

    /// Catalog color for `label`, grey for labels no longer in the catalog.
    pub fn get(&self, label: &str) -> Color32 {
        self.colors.get(label).copied().unwrap_or(FALLBACK_TAG)
    }
}
