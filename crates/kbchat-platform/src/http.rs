//! HTTP transport for the chatbot service.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility.
//! Every call is a single attempt bounded by the configured timeout.

use std::future::Future;
use async_trait::async_trait;
use futures::future::{self, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;

use kbchat_core::ports::ChatTransport;
use kbchat_types::{
    ChatError, Result,
    api::{extract_error_message, ChatRequest, ChatResponse},
    config::{ClientConfig, MAX_TIMEOUT_MS},
};

const HEALTH_PATH: &str = "/api/health";
const CHAT_PATH: &str = "/api/chat";

pub struct HttpChatTransport {
    config: ClientConfig,
    base_url: String,
}

impl HttpChatTransport {
    pub fn new(config: ClientConfig) -> Self {
        let base_url = config.api_base.trim_end_matches('/').to_string();
        Self { config, base_url }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn bounded<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        with_timeout(self.config.request_timeout_ms, fut).await
    }
}

/// Race `fut` against a timer of `timeout_ms`. `None` awaits `fut` unbounded.
///
/// Delays are capped at `MAX_TIMEOUT_MS`; browser timers treat larger
/// values as negative and fire immediately.
pub async fn with_timeout<T>(
    timeout_ms: Option<u64>,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    let Some(ms) = timeout_ms else {
        return fut.await;
    };

    let delay = u32::try_from(ms.min(MAX_TIMEOUT_MS)).unwrap_or(i32::MAX as u32);
    let timer = TimeoutFuture::new(delay);
    futures::pin_mut!(fut, timer);
    match future::select(fut, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ChatError::Timeout(ms)),
    }
}

#[async_trait(?Send)]
impl ChatTransport for HttpChatTransport {
    async fn probe_health(&self) -> Result<()> {
        let url = self.config.endpoint(HEALTH_PATH);

        self.bounded(async {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| ChatError::Network(e.to_string()))?;

            if !response.ok() {
                return Err(status_error(&response, &url));
            }
            Ok::<(), ChatError>(())
        })
        .await
    }

    async fn exchange(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = self.config.endpoint(CHAT_PATH);

        self.bounded(async {
            let response = Request::post(&url)
                .json(&request)
                .map_err(|e| ChatError::Serialization(e.to_string()))?
                .send()
                .await
                .map_err(|e| ChatError::Network(e.to_string()))?;

            if !response.ok() {
                let status = response.status();
                let status_text = response.status_text();
                let body = response.text().await.unwrap_or_default();
                return Err(failure_error(status, status_text, &url, &body));
            }

            response
                .json::<ChatResponse>()
                .await
                .map_err(|e| ChatError::Serialization(e.to_string()))
        })
        .await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn status_error(response: &Response, url: &str) -> ChatError {
    ChatError::Status {
        status: response.status(),
        status_text: response.status_text(),
        url: url.to_string(),
    }
}

/// Classify a non-2xx chat response: the body's `error` field wins,
/// otherwise the HTTP status line describes the failure.
pub fn failure_error(status: u16, status_text: String, url: &str, body: &str) -> ChatError {
    match extract_error_message(body) {
        Some(message) => ChatError::Server { status, message },
        None => ChatError::Status {
            status,
            status_text,
            url: url.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_field_wins() {
        let err = failure_error(
            500,
            "Internal Server Error".to_string(),
            "http://h/api/chat",
            r#"{"error":"Failed to get response: AccessDenied","session_id":"s"}"#,
        );
        assert_eq!(err.to_string(), "Failed to get response: AccessDenied");
    }

    #[test]
    fn plain_text_body_uses_status_line() {
        let err = failure_error(400, "Bad Request".to_string(), "http://h/api/chat", "Message is required\n");
        assert_eq!(
            err,
            ChatError::Status {
                status: 400,
                status_text: "Bad Request".to_string(),
                url: "http://h/api/chat".to_string(),
            }
        );
    }

    #[test]
    fn base_url_is_trimmed() {
        let transport = HttpChatTransport::new(ClientConfig {
            api_base: "http://localhost:8080//".to_string(),
            ..ClientConfig::default()
        });
        assert_eq!(transport.base_url(), "http://localhost:8080");
        assert_eq!(transport.config().endpoint(CHAT_PATH), "http://localhost:8080/api/chat");
    }
}
