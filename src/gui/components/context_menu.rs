//! Right-click menu: add card, display toggles, opacity and window controls

use eframe::egui::{self, Order, Pos2};

use crate::config::Settings;
use crate::gui::constants::*;
use crate::types::Mode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    AddCard,
    ToggleStacked,
    ToggleAlwaysOnTop,
    ToggleAutoTransparency,
    SetOpacity(f32),
    Minimize,
    Close,
}

impl MenuAction {
    /// Actions after which the menu stays open
    fn keeps_menu_open(self) -> bool {
        matches!(self, MenuAction::SetOpacity(_))
    }
}

#[derive(Debug, Default)]
pub struct ContextMenu {
    position: Option<Pos2>,
}

impl ContextMenu {
    pub fn open_at(&mut self, position: Pos2) {
        self.position = Some(position);
    }

    pub fn is_open(&self) -> bool {
        self.position.is_some()
    }

    pub fn close(&mut self) {
        self.position = None;
    }

    pub fn ui(&mut self, ctx: &egui::Context, mode: Mode, settings: &Settings) -> Option<MenuAction> {
        let position = self.position?;

        let mut action = None;
        let area = egui::Area::new(egui::Id::new("context_menu"))
            .order(Order::Foreground)
            .fixed_pos(position)
            .constrain(true)
            .show(ctx, |ui| {
                egui::Frame::menu(ui.style()).show(ui, |ui| {
                    ui.set_min_width(180.0);

                    let add_label = match mode {
                        Mode::Web => "➕ Add Link",
                        Mode::Folders => "➕ Add Folder",
                    };
                    if ui.button(add_label).clicked() {
                        action = Some(MenuAction::AddCard);
                    }
                    ui.separator();

                    let mut stacked = settings.stacked_mode;
                    if ui.checkbox(&mut stacked, "Stacked view").changed() {
                        action = Some(MenuAction::ToggleStacked);
                    }
                    let mut on_top = settings.always_on_top;
                    if ui.checkbox(&mut on_top, "Always on top").changed() {
                        action = Some(MenuAction::ToggleAlwaysOnTop);
                    }
                    let mut auto = settings.auto_transparency;
                    if ui.checkbox(&mut auto, "Auto transparency").changed() {
                        action = Some(MenuAction::ToggleAutoTransparency);
                    }

                    ui.add_space(ITEM_SPACING / 2.0);
                    ui.label("Canvas opacity:");
                    let mut opacity = settings.canvas_opacity;
                    if ui
                        .add(egui::Slider::new(&mut opacity, 0.0..=1.0).show_value(false))
                        .changed()
                    {
                        action = Some(MenuAction::SetOpacity(opacity));
                    }
                    ui.separator();

                    if ui.button("Minimize").clicked() {
                        action = Some(MenuAction::Minimize);
                    }
                    if ui.button("Close").clicked() {
                        action = Some(MenuAction::Close);
                    }
                });
            });

        let clicked_outside = ctx.input(|i| {
            i.pointer.primary_clicked()
                && i.pointer.interact_pos().is_some_and(|p| !area.response.rect.contains(p))
        });

        match action {
            Some(a) if a.keeps_menu_open() => {}
            Some(_) => self.close(),
            None if clicked_outside => self.close(),
            None => {}
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_opacity_keeps_menu_open() {
        assert!(MenuAction::SetOpacity(0.5).keeps_menu_open());
        assert!(!MenuAction::AddCard.keeps_menu_open());
        assert!(!MenuAction::ToggleStacked.keeps_menu_open());
    }

    #[test]
    fn test_open_close() {
        let mut menu = ContextMenu::default();
        menu.open_at(Pos2::new(10.0, 20.0));
        assert!(menu.is_open());
        menu.close();
        assert!(!menu.is_open());
    }
}
