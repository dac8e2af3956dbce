use serde::{Deserialize, Serialize};
use crate::message::Role;

/// Events emitted by the conversation controller.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// Result of a health probe
    ConnectivityChanged { connected: bool },

    /// A message was appended to the log at `index`
    MessageAppended { index: usize, role: Role },

    /// A chat exchange was sent to the server
    ExchangeStarted,

    /// The outstanding exchange settled
    ExchangeFinished { success: bool, error: Option<String> },

    /// The server assigned (or the user cleared) the session identifier
    SessionChanged { session_id: Option<String> },

    /// Log and session were reset
    Cleared,
}
