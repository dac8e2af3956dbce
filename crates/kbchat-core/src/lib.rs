//! Conversation core: port traits, the conversation controller, and the
//! event bus that feeds the UI. No platform dependencies.

pub mod ports;
pub mod event_bus;
pub mod controller;
pub mod settings;


pub use controller::{ConversationController, ConversationState, PendingExchange};
pub use event_bus::EventBus;
