//! Main egui application: composes the panels and drives the controller.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use kbchat_core::controller::ConversationController;
use kbchat_core::event_bus::EventBus;
use kbchat_core::ports::{ChatTransport, SettingsStore};
use kbchat_core::settings::{load_config, reset_config, save_config};
use kbchat_platform::http::HttpChatTransport;
use kbchat_platform::storage::open_settings_store;
use kbchat_types::config::ClientConfig;
use kbchat_ui::panels::chat::{self, ChatAction};
use kbchat_ui::panels::settings::{self, SettingsAction};
use kbchat_ui::state::{SaveFeedback, UiState};
use kbchat_ui::theme;

const APP_TITLE: &str = "AWS S3 Knowledge Chatbot";

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    config: ClientConfig,
    event_bus: EventBus,
    controller: Rc<RefCell<ConversationController>>,
    transport: Rc<dyn ChatTransport>,
    storage: Rc<dyn SettingsStore>,
    /// Filled once the stored config has been read
    restored_config: Rc<RefCell<Option<ClientConfig>>>,
    /// Filled when an async settings save settles
    save_feedback: Rc<RefCell<Option<SaveFeedback>>>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = ClientConfig::default();
        let event_bus = EventBus::new();
        let controller = ConversationController::new(event_bus.clone())
            .with_knowledge_base(config.knowledge_base_id.clone());
        let transport: Rc<dyn ChatTransport> = Rc::new(HttpChatTransport::new(config.clone()));
        let storage = open_settings_store();

        let app = Self {
            ui_state: UiState::new(&config),
            config,
            event_bus,
            controller: Rc::new(RefCell::new(controller)),
            transport,
            storage,
            restored_config: Rc::new(RefCell::new(None)),
            save_feedback: Rc::new(RefCell::new(None)),
            first_frame: true,
        };

        // The first health probe runs once the stored config is applied
        Self::restore_config(app.storage.clone(), app.restored_config.clone(), cc.egui_ctx.clone());

        app
    }

    /// Read the stored config (async); picked up on the next frame
    fn restore_config(
        storage: Rc<dyn SettingsStore>,
        slot: Rc<RefCell<Option<ClientConfig>>>,
        ctx: egui::Context,
    ) {
        wasm_bindgen_futures::spawn_local(async move {
            let config = load_config(storage.as_ref()).await;
            *slot.borrow_mut() = Some(config);
            ctx.request_repaint();
        });
    }

    /// Persist the config (async); result is shown in the settings panel
    fn save_config(&self, config: ClientConfig, ctx: &egui::Context) {
        let storage = self.storage.clone();
        let slot = self.save_feedback.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let feedback = match save_config(storage.as_ref(), &config).await {
                Ok(()) => SaveFeedback {
                    message: "Settings saved".to_string(),
                    success: true,
                },
                Err(e) => {
                    log::warn!("Saving settings failed: {}", e);
                    SaveFeedback {
                        message: e.to_string(),
                        success: false,
                    }
                }
            };
            *slot.borrow_mut() = Some(feedback);
            ctx.request_repaint();
        });
    }

    /// Drop the stored config (async); defaults are applied on the next frame
    fn reset_config(&self, ctx: &egui::Context) {
        let storage = self.storage.clone();
        let restored = self.restored_config.clone();
        let slot = self.save_feedback.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let feedback = match reset_config(storage.as_ref()).await {
                Ok(defaults) => {
                    *restored.borrow_mut() = Some(defaults);
                    SaveFeedback {
                        message: "Settings reset to defaults".to_string(),
                        success: true,
                    }
                }
                Err(e) => {
                    log::warn!("Resetting settings failed: {}", e);
                    SaveFeedback {
                        message: e.to_string(),
                        success: false,
                    }
                }
            };
            *slot.borrow_mut() = Some(feedback);
            ctx.request_repaint();
        });
    }

    /// Swap in a new config: rebuild the transport and re-probe the service.
    fn apply_config(&mut self, config: ClientConfig, ctx: &egui::Context) {
        self.transport = Rc::new(HttpChatTransport::new(config.clone()));
        self.controller
            .borrow_mut()
            .set_knowledge_base(config.knowledge_base_id.clone());
        self.ui_state.reset_settings_form(&config);
        log::info!("Using chat service at {}", self.transport.base_url());
        self.config = config;
        self.probe_health(ctx);
    }

    fn probe_health(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let transport = self.transport.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let outcome = transport.probe_health().await;
            controller.borrow_mut().record_health(outcome);
            ctx.request_repaint();
        });
    }

    /// Send the input buffer to the service (async)
    fn dispatch_submit(&self, ctx: &egui::Context) {
        let pending = {
            let mut controller = self.controller.borrow_mut();
            let text = controller.input.clone();
            controller.begin_submit(&text)
        };
        let Some(pending) = pending else {
            return;
        };

        let controller = self.controller.clone();
        let transport = self.transport.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let outcome = transport.exchange(pending.request.clone()).await;
            controller.borrow_mut().finish_submit(pending, outcome);
            ctx.request_repaint();
        });
    }

    fn handle_settings_action(&mut self, action: SettingsAction, ctx: &egui::Context) {
        match action {
            SettingsAction::None => {}
            SettingsAction::SaveClicked => {
                let config = self.ui_state.settings_form.to_config();
                if let Err(e) = config.validate() {
                    self.ui_state.settings_feedback = Some(SaveFeedback {
                        message: e.to_string(),
                        success: false,
                    });
                    return;
                }
                self.ui_state.settings_feedback = None;
                self.save_config(config.clone(), ctx);
                self.apply_config(config, ctx);
            }
            SettingsAction::RecheckClicked => self.probe_health(ctx),
            SettingsAction::ResetClicked => self.reset_config(ctx),
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        let restored = self.restored_config.borrow_mut().take();
        if let Some(config) = restored {
            self.apply_config(config, ctx);
        }

        let feedback = self.save_feedback.borrow_mut().take();
        if feedback.is_some() {
            self.ui_state.settings_feedback = feedback;
        }

        if self.event_bus.has_pending() {
            self.ui_state.process_events(self.event_bus.drain());
            ctx.request_repaint();
        }

        if self.controller.borrow().state().is_busy() {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(APP_TITLE)
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!("Service: {}", self.transport.base_url()))
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                if let Some(kb) = &self.config.knowledge_base_id {
                    ui.label(
                        RichText::new(format!("| KB: {}", kb))
                            .color(theme::TEXT_SECONDARY)
                            .small(),
                    );
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }
                });
            });
        });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            let action = SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    settings::settings_panel(
                        ui,
                        &mut self.ui_state.settings_form,
                        self.ui_state.settings_feedback.as_ref(),
                    )
                })
                .inner;
            self.handle_settings_action(action, ctx);
        }

        // ── Conversation ─────────────────────────────────────
        let action = CentralPanel::default()
            .show(ctx, |ui| {
                let mut controller = self.controller.borrow_mut();
                chat::chat_panel(ui, &mut self.ui_state, &mut controller)
            })
            .inner;

        match action {
            ChatAction::None => {}
            ChatAction::Submit => self.dispatch_submit(ctx),
            ChatAction::Clear => {
                self.controller.borrow_mut().clear();
                log::info!("Conversation cleared");
            }
        }
    }
}
