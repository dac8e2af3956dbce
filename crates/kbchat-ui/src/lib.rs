//! egui panels and the UI-level state that drives them.

pub mod state;
pub mod theme;
pub mod panels;
