//! Pinboard window implemented with egui/eframe

use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Instant;

use anyhow::{anyhow, Result};
use eframe::egui::{self, Align, CursorIcon, Key, Layout, Rect, Sense, Stroke, UiBuilder, ViewportCommand};
use eframe::{CreationContext, NativeOptions};
use tracing::{error, info, warn};

use super::components::card_editor::{CardEditor, EditorAction};
use super::components::card_grid::{self, CardAction};
use super::components::context_menu::{ContextMenu, MenuAction};
use super::components::delete_confirm::DeleteConfirm;
use super::constants::*;
use super::resize::ResizeCoalescer;
use crate::board::{Board, ModeSwitch};
use crate::color::color_or;
use crate::config::WindowBounds;
use crate::constants::{defaults, timing, window};
use crate::ipc::{join_host, spawn_host, ChromeClient};
use crate::opener;
use crate::persistence::JsonFileStore;
use crate::reorder::DragReorder;
use crate::types::Mode;
use crate::window::{EguiWindow, NativeDialogs, WindowChrome};

/// Fade only when nothing is engaging the window and no target was just opened
fn should_fade(
    auto_transparency: bool,
    focused: bool,
    pointer_inside: bool,
    suppressed_until: Option<Instant>,
    now: Instant,
) -> bool {
    auto_transparency
        && !focused
        && !pointer_inside
        && suppressed_until.is_none_or(|until| now >= until)
}

struct PinboardApp {
    board: Board<JsonFileStore>,
    chrome: ChromeClient,
    host: Option<JoinHandle<()>>,
    drag: DragReorder,
    editor: CardEditor,
    delete_confirm: DeleteConfirm,
    menu: ContextMenu,
    resize: ResizeCoalescer,
    /// Last pointer position in screen space during a title-bar drag
    move_anchor: Option<egui::Pos2>,
    fade_suppressed_until: Option<Instant>,
    last_reported: Option<WindowBounds>,
}

impl PinboardApp {
    fn new(
        cc: &CreationContext<'_>,
        board: Board<JsonFileStore>,
        bounds: WindowBounds,
        bounds_path: PathBuf,
    ) -> Self {
        info!("Initializing pinboard window");
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let chrome = WindowChrome::new(EguiWindow::new(cc.egui_ctx.clone()), bounds, bounds_path);
        let (client, host) = spawn_host(chrome, NativeDialogs);
        Self::from_parts(board, client, Some(host))
    }

    fn from_parts(board: Board<JsonFileStore>, chrome: ChromeClient, host: Option<JoinHandle<()>>) -> Self {
        chrome.set_always_on_top(board.settings().always_on_top);
        Self {
            board,
            chrome,
            host,
            drag: DragReorder::new(),
            editor: CardEditor::default(),
            delete_confirm: DeleteConfirm::default(),
            menu: ContextMenu::default(),
            resize: ResizeCoalescer::default(),
            move_anchor: None,
            fade_suppressed_until: None,
            last_reported: None,
        }
    }

    fn handle_escape(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.key_pressed(Key::Escape)) {
            return;
        }
        let dialog_open = self.editor.is_open() || self.delete_confirm.is_open() || self.menu.is_open();
        self.editor.close();
        self.delete_confirm.close();
        self.menu.close();
        if !dialog_open {
            self.drag.cancel();
        }
    }

    /// Forward geometry changes made outside our own gestures (WM moves, first placement)
    fn report_bounds(&mut self, ctx: &egui::Context) {
        // The host owns geometry for the whole gesture, including its release frame
        if self.move_anchor.is_some() || self.resize.has_pending() {
            return;
        }
        let observed = ctx.input(|i| {
            if i.pointer.any_down() || i.pointer.any_released() {
                return None;
            }
            let outer = i.viewport().outer_rect?;
            let inner = i.viewport().inner_rect?;
            Some(WindowBounds {
                x: Some(outer.min.x.round() as i32),
                y: Some(outer.min.y.round() as i32),
                width: inner.width().round() as u32,
                height: inner.height().round() as u32,
            })
        });
        if let Some(bounds) = observed
            && self.last_reported != Some(bounds)
        {
            self.last_reported = Some(bounds);
            self.chrome.observed(bounds);
        }
    }

    fn switch_mode(&mut self, mode: Mode) {
        if let ModeSwitch::Switched(mode) = self.board.switch_mode(mode) {
            info!(mode = %mode, "Active mode changed");
            self.drag.cancel();
            self.editor.close();
            self.delete_confirm.close();
        }
    }

    fn title_bar(&mut self, ui: &mut egui::Ui) {
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), TITLE_BAR_HEIGHT),
            Sense::click_and_drag(),
        );
        ui.painter().rect_filled(rect, 0.0, TITLE_BAR_COLOR);

        let screen_pointer = ui.ctx().input(|i| {
            Some(i.viewport().outer_rect?.min + i.pointer.interact_pos()?.to_vec2())
        });
        if response.drag_started() {
            self.move_anchor = screen_pointer;
            if screen_pointer.is_none() {
                // Position unknown to us (e.g. Wayland); let the compositor move the window
                ui.ctx().send_viewport_cmd(ViewportCommand::StartDrag);
            }
        }
        if response.dragged()
            && let (Some(anchor), Some(pointer)) = (self.move_anchor, screen_pointer)
        {
            let delta = pointer - anchor;
            let (dx, dy) = (delta.x.round() as i32, delta.y.round() as i32);
            if dx != 0 || dy != 0 {
                self.chrome.move_by(dx, dy);
                self.move_anchor = Some(anchor + egui::vec2(dx as f32, dy as f32));
            }
        }
        if response.drag_stopped() {
            self.move_anchor = None;
        }

        let content = rect.shrink2(egui::vec2(ITEM_SPACING, 0.0));
        ui.scope_builder(
            UiBuilder::new().max_rect(content).layout(Layout::left_to_right(Align::Center)),
            |ui| {
                let mode = self.board.mode();
                for (tab, label) in [(Mode::Web, "🌐 Web"), (Mode::Folders, "📁 Folders")] {
                    if ui.selectable_label(mode == tab, label).clicked() {
                        self.switch_mode(tab);
                    }
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let button = |text: &'static str| egui::Button::new(text).min_size(egui::vec2(TITLE_BUTTON_SIZE, TITLE_BUTTON_SIZE));
                    if ui.add(button("✕")).on_hover_text("Close").clicked() {
                        self.chrome.close();
                    }
                    if ui.add(button("➖")).on_hover_text("Minimize").clicked() {
                        self.chrome.minimize();
                    }
                    if ui.add(button("➕")).on_hover_text("Add").clicked() {
                        self.editor.open_new(&self.board.settings().theme_color);
                    }
                });
            },
        );
    }

    fn resize_handle(&mut self, ui: &mut egui::Ui, now: Instant) {
        let corner = ui.max_rect().max;
        let rect = Rect::from_min_max(corner - egui::vec2(RESIZE_HANDLE_SIZE, RESIZE_HANDLE_SIZE), corner);
        let response = ui
            .interact(rect, ui.id().with("resize_handle"), Sense::drag())
            .on_hover_cursor(CursorIcon::ResizeNwSe);

        let stroke = Stroke::new(1.0, MUTED_TEXT);
        for offset in [4.0, 8.0, 12.0] {
            ui.painter().line_segment(
                [egui::pos2(corner.x - offset, corner.y - 2.0), egui::pos2(corner.x - 2.0, corner.y - offset)],
                stroke,
            );
        }

        if response.dragged()
            && let Some((dx, dy)) = self.resize.push(response.drag_delta(), now)
        {
            self.chrome.resize_by(dx, dy);
        }
        if response.drag_stopped()
            && let Some((dx, dy)) = self.resize.finish()
        {
            self.chrome.resize_by(dx, dy);
        }
    }

    fn apply_card_action(&mut self, action: CardAction, now: Instant) {
        match action {
            CardAction::Open(card_id) => self.open_card(&card_id, now),
            CardAction::Edit(card_id) => {
                if let Some(card) = self.board.get(&card_id) {
                    self.editor.open_edit(card);
                }
            }
            CardAction::Delete(card_id) => {
                if let Some(card) = self.board.get(&card_id) {
                    self.delete_confirm.open(card);
                }
            }
            CardAction::Reorder(request) => {
                self.board.reorder(&request.dragged_id, &request.target_id, request.side);
            }
        }
    }

    fn open_card(&mut self, card_id: &str, now: Instant) {
        let Some(card) = self.board.get(card_id) else {
            return;
        };
        let target = card.target.clone();

        self.fade_suppressed_until = Some(now + timing::OPENING_GRACE_PERIOD);
        if !self.chrome.notify_opening_external() {
            warn!("Window host did not acknowledge opening notification");
        }
        if let Err(e) = opener::open_target(self.board.mode(), &target) {
            error!(error = ?e, card_id = %card_id, "Failed to open card target");
        }
    }

    fn apply_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::AddCard => self.editor.open_new(&self.board.settings().theme_color),
            MenuAction::ToggleStacked => {
                self.board.update_settings(|s| s.stacked_mode = !s.stacked_mode);
            }
            MenuAction::ToggleAlwaysOnTop => {
                let on_top = self
                    .board
                    .update_settings(|s| s.always_on_top = !s.always_on_top)
                    .always_on_top;
                self.chrome.set_always_on_top(on_top);
            }
            MenuAction::ToggleAutoTransparency => {
                self.board.update_settings(|s| s.auto_transparency = !s.auto_transparency);
            }
            MenuAction::SetOpacity(opacity) => {
                self.board.update_settings(|s| s.canvas_opacity = opacity);
            }
            MenuAction::Minimize => self.chrome.minimize(),
            MenuAction::Close => self.chrome.close(),
        }
    }

    fn apply_editor_action(&mut self, action: EditorAction) {
        match action {
            EditorAction::None => {}
            EditorAction::Save { card_id: None, draft } => {
                self.board.add(draft);
            }
            EditorAction::Save { card_id: Some(card_id), draft } => {
                if self.board.update(&card_id, draft).is_none() {
                    warn!(card_id = %card_id, "Edited card no longer exists");
                }
            }
        }
    }
}

impl eframe::App for PinboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.handle_escape(ctx);
        self.report_bounds(ctx);
        if let Some((dx, dy)) = self.resize.poll(now) {
            self.chrome.resize_by(dx, dy);
        }

        let settings = self.board.settings().clone();
        let faded = should_fade(
            settings.auto_transparency,
            ctx.input(|i| i.viewport().focused.unwrap_or(true)),
            ctx.input(|i| i.pointer.has_pointer()),
            self.fade_suppressed_until,
            now,
        );
        let accent = color_or(Some(&settings.theme_color), defaults::THEME_COLOR);
        let canvas = CANVAS_COLOR.gamma_multiply(settings.canvas_opacity);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(canvas))
            .show(ctx, |ui| {
                if faded {
                    ui.set_opacity(FADED_OPACITY);
                }
                ui.visuals_mut().selection.bg_fill = accent;
                ui.visuals_mut().selection.stroke.color = accent;

                let background = ui.interact(ui.max_rect(), ui.id().with("background"), Sense::click());

                self.title_bar(ui);

                let card_action = egui::Frame::new()
                    .inner_margin(GRID_PADDING)
                    .show(ui, |ui| {
                        card_grid::ui(ui, self.board.mode(), self.board.list(), settings.stacked_mode, &mut self.drag)
                    })
                    .inner;

                self.resize_handle(ui, now);

                if background.secondary_clicked()
                    && let Some(position) = background.interact_pointer_pos()
                {
                    self.menu.open_at(position);
                }
                if let Some(action) = card_action {
                    self.apply_card_action(action, now);
                }
            });

        if let Some(action) = self.menu.ui(ctx, self.board.mode(), &settings) {
            self.apply_menu_action(action);
        }
        let editor_action = self.editor.ui(ctx, self.board.mode(), &self.chrome);
        self.apply_editor_action(editor_action);
        if let Some(card_id) = self.delete_confirm.ui(ctx) {
            self.board.remove(&card_id);
        }

        if self.resize.has_pending() {
            ctx.request_repaint_after(timing::RESIZE_COALESCE_INTERVAL);
        }
        if let Some(until) = self.fade_suppressed_until {
            if until > now {
                ctx.request_repaint_after(until - now);
            } else {
                self.fade_suppressed_until = None;
            }
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0; 4]
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.chrome.shutdown();
        if let Some(host) = self.host.take() {
            join_host(host);
        }
        info!("Pinboard exiting");
    }
}

pub fn run_gui(board: Board<JsonFileStore>, bounds: WindowBounds, bounds_path: PathBuf) -> Result<()> {
    let level = if board.settings().always_on_top {
        egui::WindowLevel::AlwaysOnTop
    } else {
        egui::WindowLevel::Normal
    };
    let mut viewport = egui::ViewportBuilder::default()
        .with_title(window::TITLE)
        .with_inner_size([bounds.width as f32, bounds.height as f32])
        .with_min_inner_size([window::MIN_WIDTH as f32, window::MIN_HEIGHT as f32])
        .with_decorations(false)
        .with_transparent(true)
        .with_window_level(level);
    if let Some((x, y)) = bounds.position() {
        viewport = viewport.with_position([x as f32, y as f32]);
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        window::TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(PinboardApp::new(cc, board, bounds, bounds_path)))),
    )
    .map_err(|err| anyhow!("Failed to launch pinboard window: {err}"))
}
