//! UI-level state that drives rendering.
//!
//! The conversation itself lives in the controller; this is the projection
//! of controller events that only the UI cares about (status line,
//! connection badge, scroll requests, settings form).

use kbchat_types::config::ClientConfig;
use kbchat_types::event::ChatEvent;

pub const STATUS_READY: &str = "Ready";
pub const STATUS_SENDING: &str = "Thinking...";
pub const STATUS_FAILED: &str = "Last request failed";

/// State visible to UI panels
pub struct UiState {
    /// Status line text
    pub status_text: String,
    /// Last health probe result; `None` until the first probe settles
    pub connected: Option<bool>,
    /// Error text of the last failed exchange
    pub last_error: Option<String>,
    /// Session id shown in the footer
    pub session_label: Option<String>,
    /// Whether settings panel is open
    pub show_settings: bool,
    /// Editable copy of the client config
    pub settings_form: SettingsForm,
    pub settings_feedback: Option<SaveFeedback>,
    /// Set when new messages arrived and the log should follow them
    pub scroll_to_bottom: bool,
}

/// Save feedback passed in from the app layer
#[derive(Debug, Clone, PartialEq)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

/// String-backed form for editing `ClientConfig`
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    pub api_base: String,
    pub knowledge_base_id: String,
    pub timeout_enabled: bool,
    pub timeout_secs: u32,
}

impl SettingsForm {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            api_base: config.api_base.clone(),
            knowledge_base_id: config.knowledge_base_id.clone().unwrap_or_default(),
            timeout_enabled: config.request_timeout_ms.is_some(),
            timeout_secs: config
                .request_timeout_ms
                .map(|ms| u32::try_from(ms.div_ceil(1000)).unwrap_or(u32::MAX))
                .unwrap_or(30),
        }
    }

    pub fn to_config(&self) -> ClientConfig {
        let kb = self.knowledge_base_id.trim();
        ClientConfig {
            api_base: self.api_base.trim().to_string(),
            knowledge_base_id: if kb.is_empty() { None } else { Some(kb.to_string()) },
            request_timeout_ms: self
                .timeout_enabled
                .then(|| u64::from(self.timeout_secs) * 1000),
        }
    }
}

impl UiState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            status_text: STATUS_READY.to_string(),
            connected: None,
            last_error: None,
            session_label: None,
            show_settings: false,
            settings_form: SettingsForm::from_config(config),
            settings_feedback: None,
            scroll_to_bottom: false,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::ConnectivityChanged { connected } => {
                    self.connected = Some(connected);
                }
                ChatEvent::MessageAppended { .. } => {
                    self.scroll_to_bottom = true;
                }
                ChatEvent::ExchangeStarted => {
                    self.status_text = STATUS_SENDING.to_string();
                    self.last_error = None;
                }
                ChatEvent::ExchangeFinished { success, error } => {
                    self.status_text = if success { STATUS_READY } else { STATUS_FAILED }.to_string();
                    self.last_error = error;
                }
                ChatEvent::SessionChanged { session_id } => {
                    self.session_label = session_id;
                }
                ChatEvent::Cleared => {
                    self.session_label = None;
                    self.last_error = None;
                    if self.status_text == STATUS_FAILED {
                        self.status_text = STATUS_READY.to_string();
                    }
                }
            }
        }
    }

    pub fn connection_label(&self) -> &str {
        match self.connected {
            None => "Checking...",
            Some(true) => "Connected",
            Some(false) => "Disconnected",
        }
    }

    /// Replace the form contents, e.g. after settings were restored
    pub fn reset_settings_form(&mut self, config: &ClientConfig) {
        self.settings_form = SettingsForm::from_config(config);
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}
