//! Chat panel: conversation log, citation sources and the input box.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use kbchat_core::controller::ConversationController;
use kbchat_types::message::{Message, Role};
use crate::state::{UiState, STATUS_SENDING};
use crate::theme::*;

const SOURCE_EXCERPT_CHARS: usize = 280;

/// What the caller should do after rendering the chat panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    None,
    /// Send the controller's input buffer
    Submit,
    /// Start a new conversation
    Clear,
}

/// Whether the Send button should be enabled
pub fn can_send(input: &str, busy: bool) -> bool {
    !input.trim().is_empty() && !busy
}

/// Shorten `text` to at most `max_chars` characters, marking the cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

/// Render the chat panel.
pub fn chat_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    controller: &mut ConversationController,
) -> ChatAction {
    let mut action = ChatAction::None;
    let busy = controller.state().is_busy();

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(
                        RichText::new("Knowledge Chat")
                            .color(TEXT_PRIMARY)
                            .strong(),
                    );
                    let badge_color = match state.connected {
                        Some(true) => SUCCESS,
                        Some(false) => ERROR,
                        None => TEXT_SECONDARY,
                    };
                    ui.label(RichText::new("●").color(badge_color));
                    ui.label(
                        RichText::new(state.connection_label())
                            .color(TEXT_SECONDARY)
                            .small(),
                    );

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let clear_btn = ui.add_enabled(
                            !busy && !controller.state().messages().is_empty(),
                            egui::Button::new(RichText::new("New chat").color(TEXT_PRIMARY))
                                .corner_radius(PANEL_ROUNDING),
                        );
                        if clear_btn.clicked() {
                            action = ChatAction::Clear;
                        }

                        let status_color = if busy {
                            WARNING
                        } else if state.last_error.is_some() {
                            ERROR
                        } else {
                            SUCCESS
                        };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                    });
                });

                ui.separator();

                // Messages area
                let available_height = ui.available_height() - 90.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        let messages = controller.state().messages();
                        if messages.is_empty() {
                            ui.add_space(24.0);
                            ui.vertical_centered(|ui| {
                                ui.label(
                                    RichText::new("Ask a question about your documents.")
                                        .color(TEXT_SECONDARY),
                                );
                            });
                        }

                        for message in messages {
                            ui.push_id(&message.id, |ui| render_message(ui, message));
                            ui.add_space(4.0);
                        }

                        if busy {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new(STATUS_SENDING).color(TEXT_SECONDARY).italics());
                            });
                        }

                        if state.scroll_to_bottom {
                            ui.scroll_to_cursor(Some(Align::BOTTOM));
                            state.scroll_to_bottom = false;
                        }
                    });

                ui.add_space(8.0);

                // Input area: Enter sends, Shift+Enter inserts a newline
                ui.horizontal(|ui| {
                    let input_id = ui.make_persistent_id("chat_input");
                    let has_focus = ui.memory(|m| m.has_focus(input_id));
                    let enter_pressed = has_focus
                        && ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter));

                    let input = egui::TextEdit::multiline(&mut controller.input)
                        .id(input_id)
                        .hint_text("Type a message... (Shift+Enter for a new line)")
                        .desired_rows(2)
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add(input);

                    let send_enabled = can_send(&controller.input, busy);
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(
                            RichText::new("Send").color(if send_enabled { BG_PRIMARY } else { TEXT_SECONDARY }),
                        )
                        .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(60.0, 0.0)),
                    );

                    if (enter_pressed && send_enabled) || send_btn.clicked() {
                        action = ChatAction::Submit;
                        response.request_focus();
                    }
                });

                if let Some(session) = &state.session_label {
                    ui.label(
                        RichText::new(format!("Session {}", session))
                            .color(TEXT_SECONDARY)
                            .small(),
                    );
                }
            });
        });

    action
}

fn render_message(ui: &mut egui::Ui, message: &Message) {
    let is_error = message.role == Role::Assistant && message.content.starts_with("Error: ");
    let (label_color, bg) = match message.role {
        Role::User => (ACCENT, BG_USER),
        Role::Assistant if is_error => (ERROR, BG_ERROR),
        Role::Assistant => (SUCCESS, BG_SECONDARY),
    };
    let time = message
        .timestamp
        .with_timezone(&chrono::Local)
        .format("%H:%M")
        .to_string();

    egui::Frame::default()
        .fill(bg)
        .corner_radius(BUBBLE_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(message.role.label()).color(label_color).strong().small());
                ui.label(RichText::new(time).color(TEXT_SECONDARY).small());
            });
            ui.label(RichText::new(&message.content).color(TEXT_PRIMARY));

            if message.has_sources() {
                egui::CollapsingHeader::new(
                    RichText::new(format!("Sources ({})", message.sources.len()))
                        .color(TEXT_SECONDARY)
                        .small(),
                )
                .id_salt("sources")
                .default_open(false)
                .show(ui, |ui| {
                    for (i, source) in message.sources.iter().enumerate() {
                        egui::Frame::default()
                            .fill(BG_SURFACE)
                            .corner_radius(PANEL_ROUNDING)
                            .inner_margin(6.0)
                            .show(ui, |ui| {
                                ui.label(
                                    RichText::new(format!("[{}] {}", i + 1, excerpt(&source.content, SOURCE_EXCERPT_CHARS)))
                                        .color(TEXT_PRIMARY)
                                        .small(),
                                );
                                if let Some(uri) = source.uri() {
                                    ui.label(RichText::new(uri).color(ACCENT).monospace().small());
                                }
                            });
                    }
                });
            }
        });
}
