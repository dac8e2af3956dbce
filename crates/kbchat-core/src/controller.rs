//! Conversation controller: owns the message log and session identifier.
//!
//! Each submission runs `Idle → Sending → Idle`:
//! 1. Guard against empty input and a request already in flight
//! 2. Append the user message and mark the controller busy
//! 3. Exchange with the server
//! 4. Append the answer (or an `Error: …` reply) and clear busy
//!
//! The async entry points are thin wrappers over synchronous halves so the
//! app can share the controller through `Rc<RefCell<_>>` without holding a
//! borrow across the network call.

use kbchat_types::{
    Result,
    api::{ChatRequest, ChatResponse},
    event::ChatEvent,
    message::Message,
};
use crate::event_bus::EventBus;
use crate::ports::ChatTransport;

/// Observable conversation state. Read-only outside the controller.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    session_id: Option<String>,
    busy: bool,
    connected: bool,
}

impl ConversationState {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// True while an exchange is outstanding
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Result of the last health probe. Informational only.
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// An exchange that has been started but not yet settled.
#[derive(Debug, Clone)]
pub struct PendingExchange {
    pub request: ChatRequest,
    epoch: u64,
}

pub struct ConversationController {
    state: ConversationState,
    /// Pending text in the input box
    pub input: String,
    knowledge_base_id: Option<String>,
    event_bus: EventBus,
    /// Bumped on every clear; replies from an older epoch are dropped
    epoch: u64,
}

impl ConversationController {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            state: ConversationState::default(),
            input: String::new(),
            knowledge_base_id: None,
            event_bus,
            epoch: 0,
        }
    }

    pub fn with_knowledge_base(mut self, knowledge_base_id: Option<String>) -> Self {
        self.knowledge_base_id = knowledge_base_id;
        self
    }

    pub fn set_knowledge_base(&mut self, knowledge_base_id: Option<String>) {
        self.knowledge_base_id = knowledge_base_id;
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Probe the service once and record whether it answered.
    pub async fn initialize(&mut self, transport: &dyn ChatTransport) {
        let outcome = transport.probe_health().await;
        self.record_health(outcome);
    }

    pub fn record_health(&mut self, outcome: Result<()>) {
        let connected = match outcome {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Health check failed: {}", e);
                false
            }
        };
        log::info!("Chat service {}", if connected { "connected" } else { "disconnected" });
        self.state.connected = connected;
        self.event_bus.emit(ChatEvent::ConnectivityChanged { connected });
    }

    /// Send `text` and wait for the reply. Returns false when the
    /// submission was ignored (blank input or already busy).
    pub async fn submit(&mut self, text: &str, transport: &dyn ChatTransport) -> bool {
        let Some(pending) = self.begin_submit(text) else {
            return false;
        };
        let outcome = transport.exchange(pending.request.clone()).await;
        self.finish_submit(pending, outcome);
        true
    }

    /// Submit whatever is in the input buffer.
    pub async fn submit_input(&mut self, transport: &dyn ChatTransport) -> bool {
        let text = self.input.clone();
        self.submit(&text, transport).await
    }

    /// First half of a submission: record the user message and build the
    /// request. `None` means the submission is a no-op.
    ///
    /// The stored message keeps the text exactly as typed; trimming is only
    /// used to detect blank input.
    pub fn begin_submit(&mut self, text: &str) -> Option<PendingExchange> {
        if text.trim().is_empty() || self.state.busy {
            return None;
        }

        self.append(Message::user(text));
        self.input.clear();
        self.state.busy = true;
        self.event_bus.emit(ChatEvent::ExchangeStarted);

        let request = ChatRequest::new(text)
            .with_session(self.state.session_id.clone())
            .with_knowledge_base(self.knowledge_base_id.clone());
        log::debug!(
            "Sending message ({} chars, session {:?})",
            request.message.len(),
            request.session_id
        );

        Some(PendingExchange { request, epoch: self.epoch })
    }

    /// Second half of a submission. Always leaves the controller idle.
    pub fn finish_submit(&mut self, pending: PendingExchange, outcome: Result<ChatResponse>) {
        let current = pending.epoch == self.epoch;
        if !current {
            log::debug!("Dropping reply for a cleared conversation");
        }

        let (success, error) = match outcome {
            Ok(response) => {
                if current {
                    let sources = response.sources.unwrap_or_default();
                    self.append(Message::assistant(response.response, sources));
                    self.state.session_id = Some(response.session_id.clone());
                    self.event_bus.emit(ChatEvent::SessionChanged {
                        session_id: Some(response.session_id),
                    });
                }
                (true, None)
            }
            Err(e) => {
                let text = e.user_message();
                log::warn!("Chat exchange failed: {}", text);
                if current {
                    self.append(Message::assistant(format!("Error: {}", text), Vec::new()));
                }
                (false, Some(text))
            }
        };

        self.state.busy = false;
        self.event_bus.emit(ChatEvent::ExchangeFinished { success, error });
    }

    /// Start a new conversation. Connectivity is left as is.
    pub fn clear(&mut self) {
        self.state.messages.clear();
        self.state.session_id = None;
        self.epoch += 1;
        self.event_bus.emit(ChatEvent::Cleared);
    }

    fn append(&mut self, message: Message) {
        let index = self.state.messages.len();
        let role = message.role;
        self.state.messages.push(message);
        self.event_bus.emit(ChatEvent::MessageAppended { index, role });
    }
}
