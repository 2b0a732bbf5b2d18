//! Card grid: layout, painting, click-to-open and drag-to-reorder

use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, Pos2, Rect, Sense, Stroke, StrokeKind};

use crate::gui::constants::*;
use crate::reorder::{DragReorder, DropSide, DropTarget, ReorderRequest};
use crate::thumbnail;
use crate::types::{Card, Mode};

#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    Open(String),
    Edit(String),
    Delete(String),
    Reorder(ReorderRequest),
}

/// Card rectangles in display order, left-to-right then top-to-bottom
pub fn layout(origin: Pos2, available_width: f32, count: usize, stacked: bool) -> Vec<Rect> {
    if stacked {
        let width = available_width.max(CARD_WIDTH);
        return (0..count)
            .map(|i| {
                let top = origin.y + i as f32 * (STACKED_CARD_HEIGHT + CARD_SPACING);
                Rect::from_min_size(egui::pos2(origin.x, top), egui::vec2(width, STACKED_CARD_HEIGHT))
            })
            .collect();
    }

    let columns = (((available_width + CARD_SPACING) / (CARD_WIDTH + CARD_SPACING)).floor() as usize).max(1);
    (0..count)
        .map(|i| {
            let (row, col) = (i / columns, i % columns);
            let min = egui::pos2(
                origin.x + col as f32 * (CARD_WIDTH + CARD_SPACING),
                origin.y + row as f32 * (CARD_HEIGHT + CARD_SPACING),
            );
            Rect::from_min_size(min, egui::vec2(CARD_WIDTH, CARD_HEIGHT))
        })
        .collect()
}

/// Card under `pointer` with the side the dragged card would land on
fn drop_target(cards: &[Card], rects: &[Rect], pointer: Pos2) -> Option<DropTarget> {
    cards
        .iter()
        .zip(rects)
        .find(|(_, rect)| rect.contains(pointer))
        .map(|(card, rect)| DropTarget::at(&card.id, pointer.y, rect.top(), rect.height()))
}

pub fn ui(
    ui: &mut egui::Ui,
    mode: Mode,
    cards: &[Card],
    stacked: bool,
    drag: &mut DragReorder,
) -> Option<CardAction> {
    if cards.is_empty() {
        empty_state(ui, mode);
        return None;
    }

    let mut action = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let origin = ui.cursor().min;
            let rects = layout(origin, ui.available_width(), cards.len(), stacked);
            let content = rects.iter().fold(Rect::NOTHING, |acc, r| acc.union(*r));
            ui.allocate_rect(content, Sense::hover());

            let pointer = ui.input(|i| i.pointer.interact_pos());

            for (card, rect) in cards.iter().zip(&rects) {
                let rect = *rect;
                let response = ui.interact(rect, ui.id().with(("card", &card.id)), Sense::click_and_drag());

                paint_card(ui, mode, card, rect, stacked, drag.dragged_id() == Some(card.id.as_str()));

                if response.drag_started() {
                    drag.grab(&card.id);
                }
                if response.dragged() {
                    drag.hover_over(pointer.and_then(|p| drop_target(cards, &rects, p)));
                }
                if response.drag_stopped() {
                    let target = pointer.and_then(|p| drop_target(cards, &rects, p));
                    if let Some(request) = drag.release(target) {
                        action = Some(CardAction::Reorder(request));
                    }
                }
                if response.clicked() {
                    action = Some(CardAction::Open(card.id.clone()));
                }

                if drag.dragged_id().is_none()
                    && ui.rect_contains_pointer(rect)
                    && let Some(card_action) = card_buttons(ui, card, rect)
                {
                    action = Some(card_action);
                }
            }

            if let Some(hover) = drag.hover()
                && let Some(rect) = cards.iter().zip(&rects).find(|(c, _)| c.id == hover.card_id).map(|(_, r)| *r)
            {
                paint_drop_indicator(ui, rect, hover.side, stacked);
            }
        });

    action
}

fn empty_state(ui: &mut egui::Ui, mode: Mode) {
    let message = match mode {
        Mode::Web => "No web links yet",
        Mode::Folders => "No folder links yet",
    };
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.label(egui::RichText::new(message).size(18.0).color(LABEL_TEXT));
        ui.add_space(ITEM_SPACING);
        ui.label(egui::RichText::new("Right-click anywhere to add one").color(MUTED_TEXT));
    });
}

fn paint_card(ui: &egui::Ui, mode: Mode, card: &Card, rect: Rect, stacked: bool, is_dragged: bool) {
    let painter = ui.painter_at(rect);
    let radius = CornerRadius::same(CARD_CORNER_RADIUS);
    let background = thumbnail::background_color(card);
    let fill = if is_dragged { background.gamma_multiply(0.5) } else { background };
    painter.rect_filled(rect, radius, fill);

    if ui.rect_contains_pointer(rect) {
        painter.rect_stroke(rect, radius, Stroke::new(1.0, LABEL_TEXT), StrokeKind::Inside);
    }

    let title = card.title.as_deref();
    let label = thumbnail::shows_label(mode, card).then(|| thumbnail::display_label(mode, card));
    let title_color = thumbnail::title_color(card);

    if stacked {
        let icon_rect = Rect::from_center_size(
            egui::pos2(rect.left() + GRID_PADDING + STACKED_ICON_SIZE / 2.0, rect.center().y),
            egui::vec2(STACKED_ICON_SIZE, STACKED_ICON_SIZE),
        );
        paint_thumbnail(ui, mode, card, icon_rect);

        let text_left = icon_rect.right() + ITEM_SPACING;
        let lines = stacked_lines(mode, card);
        let mut y = rect.center().y - 8.0 * (lines.len() as f32 - 1.0);
        for (i, line) in lines.into_iter().enumerate() {
            let (size, color) = if i == 0 { (14.0, title_color) } else { (11.0, LABEL_TEXT) };
            painter.text(
                egui::pos2(text_left, y),
                Align2::LEFT_CENTER,
                line,
                FontId::proportional(size),
                color,
            );
            y += 16.0;
        }
        return;
    }

    let text_height = 40.0;
    let image_rect = Rect::from_min_max(rect.min, egui::pos2(rect.right(), rect.bottom() - text_height));
    if thumbnail::is_custom_image(card) {
        paint_thumbnail(ui, mode, card, image_rect);
    } else {
        let icon_rect = Rect::from_center_size(image_rect.center(), egui::vec2(FAVICON_SIZE, FAVICON_SIZE));
        paint_thumbnail(ui, mode, card, icon_rect);
    }

    let mut baseline = rect.bottom() - text_height + 12.0;
    if let Some(title) = title {
        painter.text(
            egui::pos2(rect.center().x, baseline),
            Align2::CENTER_CENTER,
            title,
            FontId::proportional(14.0),
            title_color,
        );
        baseline += 16.0;
    }
    if let Some(label) = label {
        let size = if title.is_none() { 14.0 } else { 11.0 };
        painter.text(
            egui::pos2(rect.center().x, baseline),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(size),
            LABEL_TEXT,
        );
    }
}

/// Text beside the icon in stacked rows: title first, then the label when it is shown
fn stacked_lines(mode: Mode, card: &Card) -> Vec<String> {
    let label = thumbnail::shows_label(mode, card).then(|| thumbnail::display_label(mode, card));
    card.title.clone().into_iter().chain(label).collect()
}

/// Paint the card image or favicon; unloadable images leave the background showing
fn paint_thumbnail(ui: &egui::Ui, mode: Mode, card: &Card, rect: Rect) {
    let Some(uri) = thumbnail::thumbnail_uri(mode, card) else {
        return;
    };
    let image = egui::Image::new(uri).corner_radius(CornerRadius::same(CARD_CORNER_RADIUS));
    if image.load_for_size(ui.ctx(), rect.size()).is_ok() {
        image.paint_at(ui, rect);
    }
}

fn paint_drop_indicator(ui: &egui::Ui, rect: Rect, side: DropSide, stacked: bool) {
    let color = ui.visuals().selection.stroke.color;
    let y = match side {
        DropSide::Before => rect.top() - CARD_SPACING / 2.0,
        DropSide::After => rect.bottom() + CARD_SPACING / 2.0,
    };
    let inset = if stacked { 0.0 } else { CARD_CORNER_RADIUS as f32 };
    ui.painter().line_segment(
        [egui::pos2(rect.left() + inset, y), egui::pos2(rect.right() - inset, y)],
        Stroke::new(DROP_INDICATOR_WIDTH, color),
    );
}

/// Edit and delete buttons in the card's top-right corner
fn card_buttons(ui: &mut egui::Ui, card: &Card, rect: Rect) -> Option<CardAction> {
    let size = egui::vec2(CARD_BUTTON_SIZE, CARD_BUTTON_SIZE);
    let delete_rect = Rect::from_min_size(
        egui::pos2(rect.right() - CARD_BUTTON_SIZE - 4.0, rect.top() + 4.0),
        size,
    );
    let edit_rect = delete_rect.translate(egui::vec2(-(CARD_BUTTON_SIZE + 4.0), 0.0));

    let small = |text: &'static str| egui::Button::new(text).small().fill(Color32::from_black_alpha(160));
    if ui.put(edit_rect, small("✏")).on_hover_text("Edit").clicked() {
        return Some(CardAction::Edit(card.id.clone()));
    }
    if ui.put(delete_rect, small("🗑")).on_hover_text("Delete").clicked() {
        return Some(CardAction::Delete(card.id.clone()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            title: None,
            target: format!("https://{id}.example"),
            image: None,
            theme_color: None,
        }
    }

    #[test]
    fn test_grid_wraps_to_available_width() {
        // Room for exactly three columns
        let width = CARD_WIDTH * 3.0 + CARD_SPACING * 2.0;
        let rects = layout(Pos2::ZERO, width, 4, false);
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[2].top(), 0.0);
        assert_eq!(rects[3].left(), 0.0);
        assert_eq!(rects[3].top(), CARD_HEIGHT + CARD_SPACING);
    }

    #[test]
    fn test_narrow_window_still_has_one_column() {
        let rects = layout(Pos2::ZERO, 10.0, 2, false);
        assert_eq!(rects[0].left(), rects[1].left());
    }

    #[test]
    fn test_stacked_rows_fill_width() {
        let rects = layout(egui::pos2(5.0, 5.0), 500.0, 3, true);
        assert!(rects.iter().all(|r| r.width() == 500.0 && r.height() == STACKED_CARD_HEIGHT));
        assert_eq!(rects[1].top(), 5.0 + STACKED_CARD_HEIGHT + CARD_SPACING);
    }

    #[test]
    fn test_drop_target_uses_vertical_midpoint() {
        let cards = vec![card("A"), card("B")];
        let rects = layout(Pos2::ZERO, 500.0, 2, true);
        let b = rects[1];

        let above = drop_target(&cards, &rects, egui::pos2(10.0, b.top() + 5.0)).unwrap();
        assert_eq!((above.card_id.as_str(), above.side), ("B", DropSide::Before));

        let below = drop_target(&cards, &rects, egui::pos2(10.0, b.bottom() - 5.0)).unwrap();
        assert_eq!(below.side, DropSide::After);

        assert_eq!(drop_target(&cards, &rects, egui::pos2(10.0, b.bottom() + 50.0)), None);
    }

    #[test]
    fn test_stacked_web_card_shows_title_and_host() {
        let mut web = card("docs");
        web.title = Some("Docs".to_string());
        assert_eq!(stacked_lines(Mode::Web, &web), vec!["Docs".to_string(), "docs.example".to_string()]);

        assert_eq!(stacked_lines(Mode::Web, &card("news")), vec!["news.example".to_string()]);
    }

    #[test]
    fn test_stacked_folder_card_title_hides_path() {
        let mut folder = Card {
            id: "f".to_string(),
            title: None,
            target: "/home/me/Projects".to_string(),
            image: None,
            theme_color: None,
        };
        assert_eq!(stacked_lines(Mode::Folders, &folder), vec!["Projects".to_string()]);

        folder.title = Some("Work".to_string());
        assert_eq!(stacked_lines(Mode::Folders, &folder), vec!["Work".to_string()]);
    }
}
