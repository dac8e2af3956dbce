#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::api::*;
    use crate::event::*;
    use crate::config::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert!(msg.sources.is_empty());
        assert!(!msg.has_sources());
    }

    #[test]
    fn test_message_user_keeps_whitespace() {
        let msg = Message::user("  padded question \n");
        assert_eq!(msg.content, "  padded question \n");
    }

    #[test]
    fn test_message_assistant_with_sources() {
        let msg = Message::assistant(
            "S3 is object storage",
            vec![Source::new("excerpt", Some("s3://bucket/doc.pdf".to_string()))],
        );
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.has_sources());
        assert_eq!(msg.sources[0].uri(), Some("s3://bucket/doc.pdf"));
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("x");
        let b = Message::user("x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_timestamps_are_ordered() {
        let a = Message::user("first");
        let b = Message::assistant("second", Vec::new());
        assert!(a.timestamp <= b.timestamp);
    }

    #[test]
    fn test_message_serialization_omits_empty_sources() {
        let msg = Message::user("test input");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("sources"));
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.role, Role::User);
        assert_eq!(deserialized.content, "test input");
        assert_eq!(deserialized.id, msg.id);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), r#""assistant""#);
        let role: Role = serde_json::from_str(r#""assistant""#).unwrap();
        assert_eq!(role, Role::Assistant);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::User.label(), "You");
        assert_eq!(Role::Assistant.label(), "Assistant");
    }

    #[test]
    fn test_source_without_uri() {
        let source: Source = serde_json::from_str(r#"{"content":"text","location":{}}"#).unwrap();
        assert_eq!(source.content, "text");
        assert!(source.uri().is_none());
    }

    #[test]
    fn test_source_missing_location() {
        let source: Source = serde_json::from_str(r#"{"content":"text"}"#).unwrap();
        assert_eq!(source.location, SourceLocation::default());
    }

    // ─── Wire Type Tests ─────────────────────────────────────

    #[test]
    fn test_chat_request_omits_absent_fields() {
        let req = ChatRequest::new("What is S3?");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "What is S3?" }));
    }

    #[test]
    fn test_chat_request_with_session_and_kb() {
        let req = ChatRequest::new("hi")
            .with_session(Some("abc123".to_string()))
            .with_knowledge_base(Some("KB42".to_string()));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["session_id"], "abc123");
        assert_eq!(json["knowledge_base_id"], "KB42");
    }

    #[test]
    fn test_chat_response_minimal() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"response":"S3 is...","session_id":"abc123"}"#).unwrap();
        assert_eq!(resp.response, "S3 is...");
        assert_eq!(resp.session_id, "abc123");
        assert!(resp.sources.is_none());
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_chat_response_with_sources() {
        let body = r#"{
            "response": "Buckets hold objects.",
            "session_id": "s-1",
            "sources": [
                {"content": "A bucket is a container", "location": {"uri": "s3://docs/buckets.md"}},
                {"content": "No location", "location": {}}
            ]
        }"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        let sources = resp.sources.unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].uri(), Some("s3://docs/buckets.md"));
        assert!(sources[1].uri().is_none());
    }

    #[test]
    fn test_chat_response_missing_session_is_error() {
        let result = serde_json::from_str::<ChatResponse>(r#"{"response":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_error_message_json() {
        let body = r#"{"error":"Failed to get response: throttled","session_id":"s1"}"#;
        assert_eq!(
            extract_error_message(body),
            Some("Failed to get response: throttled".to_string())
        );
    }

    #[test]
    fn test_extract_error_message_plain_text() {
        assert_eq!(extract_error_message("Method not allowed\n"), None);
    }

    #[test]
    fn test_extract_error_message_missing_or_blank() {
        assert_eq!(extract_error_message(r#"{"session_id":"s1"}"#), None);
        assert_eq!(extract_error_message(r#"{"error":"  "}"#), None);
        assert_eq!(extract_error_message(""), None);
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::MessageAppended { index: 0, role: Role::User };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("MessageAppended"));
        let back: ChatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://localhost:8080");
        assert!(config.knowledge_base_id.is_none());
        assert_eq!(config.request_timeout_ms, Some(30_000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_endpoint_joins_cleanly() {
        let mut config = ClientConfig::default();
        assert_eq!(config.endpoint("/api/chat"), "http://localhost:8080/api/chat");

        config.api_base = "https://chat.example.com/".to_string();
        assert_eq!(config.endpoint("/api/health"), "https://chat.example.com/api/health");
        assert_eq!(config.endpoint("api/health"), "https://chat.example.com/api/health");
    }

    #[test]
    fn test_config_validate_rejects_bad_base() {
        let mut config = ClientConfig::default();
        config.api_base = "  ".to_string();
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));

        config.api_base = "localhost:8080".to_string();
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));
    }

    #[test]
    fn test_config_validate_rejects_zero_timeout() {
        let config = ClientConfig {
            request_timeout_ms: Some(0),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_rejects_huge_timeout() {
        let config = ClientConfig {
            request_timeout_ms: Some(3_000_000_000),
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));

        let config = ClientConfig {
            request_timeout_ms: Some(MAX_TIMEOUT_MS),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_base":"http://10.0.0.5:9000"}"#).unwrap();
        assert_eq!(config.api_base, "http://10.0.0.5:9000");
        assert_eq!(config.request_timeout_ms, Some(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn test_config_explicit_null_timeout() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_base":"http://h","request_timeout_ms":null}"#).unwrap();
        assert!(config.request_timeout_ms.is_none());
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = ChatError::Server { status: 500, message: "timeout".to_string() };
        assert_eq!(err.to_string(), "timeout");

        let err = ChatError::Status {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            url: "http://h/api/chat".to_string(),
        };
        assert_eq!(err.to_string(), "Http failure response for http://h/api/chat: 502 Bad Gateway");

        let err = ChatError::Timeout(5000);
        assert_eq!(err.to_string(), "Timeout after 5000ms");

        let err = ChatError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_error_user_message_fallback() {
        assert_eq!(ChatError::Other(String::new()).user_message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(
            ChatError::Server { status: 500, message: " ".to_string() }.user_message(),
            "Failed to get response"
        );
        assert_eq!(ChatError::Other("boom".to_string()).user_message(), "boom");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }

    #[test]
    fn test_result_alias() {
        fn fails() -> crate::Result<()> {
            Err(ChatError::Other("x".to_string()))
        }
        assert!(fails().is_err());
    }
}
