//! `WindowBackend` over eframe viewport commands

use eframe::egui::{self, ViewportCommand, WindowLevel};

use super::WindowBackend;

/// Drives the root viewport; the context is shared with the UI thread
#[derive(Clone)]
pub struct EguiWindow {
    ctx: egui::Context,
}

impl EguiWindow {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }

    fn send(&self, command: ViewportCommand) {
        self.ctx.send_viewport_cmd(command);
        // Commands are only applied on the next frame
        self.ctx.request_repaint();
    }
}

impl WindowBackend for EguiWindow {
    fn set_outer_position(&mut self, x: i32, y: i32) {
        self.send(ViewportCommand::OuterPosition(egui::pos2(x as f32, y as f32)));
    }

    fn set_inner_size(&mut self, width: u32, height: u32) {
        self.send(ViewportCommand::InnerSize(egui::vec2(width as f32, height as f32)));
    }

    fn set_always_on_top(&mut self, on_top: bool) {
        let level = if on_top {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        };
        self.send(ViewportCommand::WindowLevel(level));
    }

    fn set_minimized(&mut self, minimized: bool) {
        self.send(ViewportCommand::Minimized(minimized));
    }

    fn show(&mut self) {
        self.send(ViewportCommand::Visible(true));
    }

    fn focus(&mut self) {
        self.send(ViewportCommand::Focus);
    }

    fn close(&mut self) {
        self.send(ViewportCommand::Close);
    }
}
