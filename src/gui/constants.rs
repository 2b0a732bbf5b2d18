//! GUI-specific constants for layout, colors and fading

use eframe::egui;

/// Custom title bar
pub const TITLE_BAR_HEIGHT: f32 = 32.0;
pub const TITLE_BUTTON_SIZE: f32 = 22.0;

/// Bottom-right drag handle
pub const RESIZE_HANDLE_SIZE: f32 = 16.0;

/// Layout spacing
pub const GRID_PADDING: f32 = 12.0;
pub const CARD_SPACING: f32 = 10.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Standard grid cards
pub const CARD_WIDTH: f32 = 160.0;
pub const CARD_HEIGHT: f32 = 130.0;
pub const FAVICON_SIZE: f32 = 48.0;

/// Stacked rows
pub const STACKED_CARD_HEIGHT: f32 = 44.0;
pub const STACKED_ICON_SIZE: f32 = 24.0;

pub const CARD_CORNER_RADIUS: u8 = 8;
pub const CARD_BUTTON_SIZE: f32 = 20.0;
pub const DROP_INDICATOR_WIDTH: f32 = 3.0;

/// Colors
pub const CANVAS_COLOR: egui::Color32 = egui::Color32::from_rgb(0x14, 0x14, 0x14);
pub const TITLE_BAR_COLOR: egui::Color32 = egui::Color32::from_rgb(0x1e, 0x1e, 0x1e);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(0x80, 0x80, 0x80);
pub const LABEL_TEXT: egui::Color32 = egui::Color32::from_rgb(0xa0, 0xa0, 0xa0);
pub const DANGER_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);

/// Whole-window opacity while auto-transparency has faded the canvas
pub const FADED_OPACITY: f32 = 0.3;

/// Editor window width
pub const EDITOR_WIDTH: f32 = 360.0;
