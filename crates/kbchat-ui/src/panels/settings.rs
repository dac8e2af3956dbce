//! Settings panel: service address, knowledge base and request timeout.

use egui::{self, RichText, Vec2};
use crate::state::{SettingsForm, SaveFeedback};
use crate::theme::*;

/// What the caller should do after rendering the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    /// Nothing to do
    None,
    /// The user clicked Save
    SaveClicked,
    /// Probe the service again with the current config
    RecheckClicked,
    /// Forget the stored settings and go back to defaults
    ResetClicked,
}

/// Render the settings panel. Returns an action for the caller to handle.
pub fn settings_panel(
    ui: &mut egui::Ui,
    form: &mut SettingsForm,
    save_feedback: Option<&SaveFeedback>,
) -> SettingsAction {
    let mut action = SettingsAction::None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            // ── Service Section ──────────────────────────────
            ui.label(RichText::new("Service").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("API Base URL").color(TEXT_SECONDARY).small());
            ui.add(
                egui::TextEdit::singleline(&mut form.api_base)
                    .hint_text("http://localhost:8080"),
            );

            ui.add_space(4.0);

            ui.label(RichText::new("Knowledge Base ID (optional)").color(TEXT_SECONDARY).small());
            ui.add(
                egui::TextEdit::singleline(&mut form.knowledge_base_id)
                    .hint_text("server default"),
            );

            ui.add_space(4.0);

            ui.checkbox(&mut form.timeout_enabled, "Request timeout");
            ui.add_enabled(
                form.timeout_enabled,
                egui::Slider::new(&mut form.timeout_secs, 5..=300).suffix(" s"),
            );

            // ── Buttons ──────────────────────────────────────
            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(
                        RichText::new("Save Settings")
                            .color(BG_PRIMARY)
                            .strong(),
                    )
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(120.0, 28.0)),
                );
                if btn.clicked() {
                    action = SettingsAction::SaveClicked;
                }

                if ui.button("Re-check connection").clicked() {
                    action = SettingsAction::RecheckClicked;
                }
            });

            ui.add_space(4.0);
            if ui
                .button(RichText::new("Reset to defaults").color(TEXT_SECONDARY).small())
                .clicked()
            {
                action = SettingsAction::ResetClicked;
            }

            if let Some(fb) = save_feedback {
                let color = if fb.success { SUCCESS } else { ERROR };
                ui.label(RichText::new(&fb.message).color(color).small());
            }
        });

    action
}
