//! Add/edit card dialog

use eframe::egui;
use tracing::debug;

use crate::color::HexColor;
use crate::constants::{cards::DEFAULT_URL_SCHEME, defaults};
use crate::gui::constants::*;
use crate::ipc::ChromeClient;
use crate::types::{Card, CardDraft, Mode};

/// Trim the target and, for web cards, add `https://` when no scheme is given
///
/// `None` when the target is empty.
pub fn normalize_target(mode: Mode, raw: &str) -> Option<String> {
    let target = raw.trim();
    if target.is_empty() {
        return None;
    }
    match mode {
        Mode::Web if !target.starts_with("http://") && !target.starts_with("https://") => {
            Some(format!("{DEFAULT_URL_SCHEME}{target}"))
        }
        _ => Some(target.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    None,
    Save { card_id: Option<String>, draft: CardDraft },
}

#[derive(Default)]
pub struct CardEditor {
    open: bool,
    /// `None` while adding a new card
    card_id: Option<String>,
    draft: CardDraft,
    picker_color: egui::Color32,
    error: Option<String>,
}

impl CardEditor {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open_new(&mut self, accent: &str) {
        self.card_id = None;
        self.draft = CardDraft::default();
        self.picker_color = picker_color(accent);
        self.error = None;
        self.open = true;
    }

    pub fn open_edit(&mut self, card: &Card) {
        self.card_id = Some(card.id.clone());
        self.draft = CardDraft::from_card(card);
        self.picker_color = picker_color(&self.draft.theme_color);
        self.error = None;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn ui(&mut self, ctx: &egui::Context, mode: Mode, chrome: &ChromeClient) -> EditorAction {
        if !self.open {
            return EditorAction::None;
        }

        let mut action = EditorAction::None;
        let title = match (&self.card_id, mode) {
            (None, Mode::Web) => "Add Link",
            (None, Mode::Folders) => "Add Folder",
            (Some(_), Mode::Web) => "Edit Link",
            (Some(_), Mode::Folders) => "Edit Folder",
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(EDITOR_WIDTH)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Title (optional):");
                ui.text_edit_singleline(&mut self.draft.title);
                ui.add_space(ITEM_SPACING);

                match mode {
                    Mode::Web => {
                        ui.label("URL:");
                        ui.add(egui::TextEdit::singleline(&mut self.draft.target).hint_text("https://example.com"));
                    }
                    Mode::Folders => {
                        ui.label("Folder path:");
                        ui.horizontal(|ui| {
                            ui.add(egui::TextEdit::singleline(&mut self.draft.target).hint_text("/path/to/folder"));
                            if ui.button("Browse…").clicked()
                                && let Some(path) = chrome.pick_folder_path()
                            {
                                self.draft.target = path;
                            }
                        });
                    }
                }
                ui.add_space(ITEM_SPACING);

                ui.label("Image (optional):");
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(&mut self.draft.image).hint_text("file:// or https:// URL"));
                    if ui.button("Browse…").clicked()
                        && let Some(url) = chrome.pick_image_file()
                    {
                        self.draft.image = url;
                    }
                });
                ui.add_space(ITEM_SPACING);

                ui.label("Theme color (optional):");
                ui.horizontal(|ui| {
                    if ui.color_edit_button_srgba(&mut self.picker_color).changed() {
                        self.draft.theme_color = HexColor::from_color32(self.picker_color).to_hex_string();
                    }
                    let text = ui.add(egui::TextEdit::singleline(&mut self.draft.theme_color).hint_text("#RRGGBB"));
                    if text.changed()
                        && HexColor::is_rgb_hex(&self.draft.theme_color)
                        && let Some(color) = HexColor::parse(&self.draft.theme_color)
                    {
                        self.picker_color = color.to_color32();
                    }
                    if ui.small_button("Clear").clicked() {
                        self.draft.theme_color.clear();
                    }
                });

                if let Some(error) = &self.error {
                    ui.add_space(ITEM_SPACING);
                    ui.colored_label(DANGER_COLOR, error);
                }

                ui.add_space(ITEM_SPACING);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        match normalize_target(mode, &self.draft.target) {
                            Some(target) => {
                                let mut draft = self.draft.clone();
                                draft.target = target;
                                debug!(card_id = ?self.card_id, "Card editor saved");
                                action = EditorAction::Save {
                                    card_id: self.card_id.clone(),
                                    draft,
                                };
                                self.open = false;
                            }
                            None => {
                                self.error = Some(match mode {
                                    Mode::Web => "Please enter a URL".to_string(),
                                    Mode::Folders => "Please enter a folder path".to_string(),
                                });
                            }
                        }
                    }

                    if ui.button("Cancel").clicked() {
                        self.open = false;
                    }
                });
            });

        action
    }
}

/// Picker starting color: the given hex, or the default accent
fn picker_color(hex: &str) -> egui::Color32 {
    HexColor::parse(hex)
        .or_else(|| HexColor::parse(defaults::THEME_COLOR))
        .map(HexColor::to_color32)
        .unwrap_or(egui::Color32::GRAY)
}
