//! egui presentation layer

mod app;
mod components;
mod constants;
mod resize;

pub use app::run_gui;
