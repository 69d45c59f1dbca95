//! Availability grid widget.
//!
//! Paints a `GridModel` as time rows x day columns and translates raw pointer
//! input into grid events. Cells are hit-tested by rectangle rather than by
//! egui hover, because egui stops reporting hover on other widgets while one
//! widget is being dragged.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::palette::{GridPalette, TagColors};
use crate::models::category::Category;
use crate::services::grid::{GridCell, GridModel};

pub const SLOT_HEIGHT: f32 = 28.0;
pub const TIME_LABEL_WIDTH: f32 = 56.0;
const HEADER_HEIGHT: f32 = 32.0;
const MIN_COLUMN_WIDTH: f32 = 90.0;
const TAG_HEIGHT: f32 = 14.0;

/// Pointer input mapped onto grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPointerEvent {
    Down { date: NaiveDate, time: NaiveTime },
    Enter { date: NaiveDate, time: NaiveTime },
    Up,
    /// Released outside every cell; the gesture is abandoned
    Cancel,
}

/// Draw the grid and report pointer events for this frame.
///
/// `dragging` tells the widget whether a gesture is in progress, so that
/// moves and releases are only reported while one is.
pub fn render_availability_grid(
    ui: &mut egui::Ui,
    model: &GridModel,
    categories: &[Category],
    dragging: bool,
) -> Vec<GridPointerEvent> {
    let palette = GridPalette::for_visuals(ui.visuals());
    let tag_colors = TagColors::from_categories(categories);
    let columns = model.dates.len().max(1) as f32;
    let col_width = ((ui.available_width() - TIME_LABEL_WIDTH) / columns).max(MIN_COLUMN_WIDTH);

    ui.spacing_mut().item_spacing = Vec2::ZERO;

    render_header(ui, &model.dates, col_width, &palette);

    let mut hitboxes: Vec<(Rect, NaiveDate, NaiveTime)> = Vec::new();
    for row in &model.rows {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;

            let (label_rect, _) =
                ui.allocate_exact_size(Vec2::new(TIME_LABEL_WIDTH, SLOT_HEIGHT), Sense::hover());
            if row.time.minute() == 0 {
                ui.painter().text(
                    Pos2::new(label_rect.right() - 6.0, label_rect.top() + 2.0),
                    Align2::RIGHT_TOP,
                    &row.label,
                    FontId::proportional(12.0),
                    palette.label,
                );
            }

            for cell in &row.cells {
                let (rect, _) = ui.allocate_exact_size(
                    Vec2::new(col_width, SLOT_HEIGHT),
                    Sense::click_and_drag(),
                );
                paint_cell(ui, rect, cell, &palette, &tag_colors);
                hitboxes.push((rect, cell.date, cell.time));
            }
        });
    }

    collect_pointer_events(ui, &hitboxes, dragging)
}

fn render_header(ui: &mut egui::Ui, dates: &[NaiveDate], col_width: f32, palette: &GridPalette) {
    ui.horizontal(|ui| {
        ui.add_space(TIME_LABEL_WIDTH);
        for date in dates {
            let (rect, _) =
                ui.allocate_exact_size(Vec2::new(col_width, HEADER_HEIGHT), Sense::hover());
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                date.format("%a %d %b").to_string(),
                FontId::proportional(13.0),
                palette.label,
            );
        }
    });
}

fn paint_cell(
    ui: &egui::Ui,
    rect: Rect,
    cell: &GridCell,
    palette: &GridPalette,
    tag_colors: &TagColors,
) {
    let painter = ui.painter();
    let is_weekend = cell.date.weekday().num_days_from_monday() >= 5;

    let bg = if cell.persisted {
        palette.available_bg
    } else if is_weekend {
        palette.weekend_bg
    } else {
        palette.cell_bg
    };
    painter.rect_filled(rect, 0.0, bg);

    let line = if cell.time.minute() == 0 {
        palette.hour_line
    } else {
        palette.slot_line
    };
    painter.line_segment([rect.left_top(), rect.right_top()], Stroke::new(1.0, line));
    painter.line_segment(
        [rect.right_top(), rect.right_bottom()],
        Stroke::new(1.0, palette.slot_line),
    );

    if cell.persisted {
        paint_tags(painter, rect, &cell.categories, tag_colors);
    }

    // Drag highlight is drawn over stored tags so both stay visible.
    if cell.dragging {
        let inner = rect.shrink(1.0);
        painter.rect_filled(inner, 2.0, palette.drag_overlay);
        painter.rect_stroke(inner, 2.0, Stroke::new(1.5, palette.drag_border));
    }
}

fn paint_tags(painter: &egui::Painter, rect: Rect, categories: &[String], tag_colors: &TagColors) {
    if categories.is_empty() {
        return;
    }

    let gap = 2.0;
    let available = rect.width() - gap * (categories.len() as f32 + 1.0);
    let tag_width = (available / categories.len() as f32).max(4.0);
    let top = rect.center().y - TAG_HEIGHT / 2.0;

    for (i, label) in categories.iter().enumerate() {
        let left = rect.left() + gap + i as f32 * (tag_width + gap);
        let tag_rect = Rect::from_min_size(Pos2::new(left, top), Vec2::new(tag_width, TAG_HEIGHT));
        let color = tag_colors.get(label);
        painter.rect_filled(tag_rect, 3.0, color);

        let text = painter.layout_no_wrap(
            label.clone(),
            FontId::proportional(10.0),
            Color32::WHITE,
        );
        if text.size().x <= tag_rect.width() - 4.0 {
            painter.galley(
                Pos2::new(tag_rect.left() + 2.0, tag_rect.center().y - text.size().y / 2.0),
                text,
                Color32::WHITE,
            );
        }
    }
}

fn collect_pointer_events(
    ui: &egui::Ui,
    hitboxes: &[(Rect, NaiveDate, NaiveTime)],
    dragging: bool,
) -> Vec<GridPointerEvent> {
    let (pressed, released, down, pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.primary_down(),
            i.pointer.interact_pos().or(i.pointer.hover_pos()),
        )
    });

    let hovered = pos.and_then(|pos| {
        hitboxes
            .iter()
            .find(|(rect, _, _)| rect.contains(pos))
            .map(|(_, date, time)| (*date, *time))
    });

    let mut events = Vec::new();
    if pressed {
        if let Some((date, time)) = hovered {
            events.push(GridPointerEvent::Down { date, time });
        }
    } else if dragging && down {
        if let Some((date, time)) = hovered {
            events.push(GridPointerEvent::Enter { date, time });
        }
    }

    if released && (dragging || !events.is_empty()) {
        events.push(match hovered {
            Some(_) => GridPointerEvent::Up,
            None => GridPointerEvent::Cancel,
        });
    }

    events
}

/// Approximate pixel height of a grid with `rows` time rows.
pub fn grid_height(rows: usize) -> f32 {
    HEADER_HEIGHT + rows as f32 * SLOT_HEIGHT
}

/// Row index for a time on a half-open axis starting at `start`.
pub fn row_for_time(start: NaiveTime, step_minutes: u32, time: NaiveTime) -> Option<usize> {
    let step = step_minutes.max(1) as i64;
    let offset = (time - start).num_minutes();
    if offset < 0 || offset % step != 0 {
        return None;
    }
    Some((offset / step) as usize)
}
