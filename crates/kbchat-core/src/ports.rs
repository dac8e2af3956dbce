//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `kbchat-core` (pure Rust).
//! Implementations live in `kbchat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use kbchat_types::{
    Result,
    api::{ChatRequest, ChatResponse},
};

// ─── Transport Port ──────────────────────────────────────────

/// Outbound calls to the chatbot service.
///
/// Implementations make a single attempt per call; retrying is left to
/// the user.
#[async_trait(?Send)]
pub trait ChatTransport {
    /// `GET /api/health`. Any 2xx is success.
    async fn probe_health(&self) -> Result<()>;

    /// `POST /api/chat`
    async fn exchange(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Base address requests are sent to (for logging/debug)
    fn base_url(&self) -> &str;
}

// ─── Settings Port ───────────────────────────────────────────

#[async_trait(?Send)]
pub trait SettingsStore {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
