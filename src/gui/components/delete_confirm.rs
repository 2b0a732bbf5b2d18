use eframe::egui;

use crate::gui::constants::*;
use crate::types::Card;

/// Confirmation text shown before deleting `card`
pub fn confirm_message(card: &Card) -> String {
    format!("Delete \"{}\"?", card.title.as_deref().unwrap_or("this item"))
}

#[derive(Default)]
pub struct DeleteConfirm {
    /// Card id and the message shown for it
    pending: Option<(String, String)>,
}

impl DeleteConfirm {
    pub fn open(&mut self, card: &Card) {
        self.pending = Some((card.id.clone(), confirm_message(card)));
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn close(&mut self) {
        self.pending = None;
    }

    /// Returns the id to delete once the user confirms
    pub fn ui(&mut self, ctx: &egui::Context) -> Option<String> {
        let (card_id, message) = self.pending.as_ref()?;
        let mut confirmed = None;
        let mut cancelled = false;

        egui::Window::new("Confirm Delete")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                ui.colored_label(DANGER_COLOR, "This cannot be undone!");
                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        confirmed = Some(card_id.clone());
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if confirmed.is_some() || cancelled {
            self.pending = None;
        }
        confirmed
    }
}
