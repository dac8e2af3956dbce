use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message in the conversation log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// A single entry in the conversation log.
///
/// Messages are immutable once created: the log only ever appends
/// new ones or is cleared wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Client-side identity, stable across frames
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Citations returned alongside an answer
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sources: Vec<Source>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), Vec::new())
    }

    pub fn assistant(text: impl Into<String>, sources: Vec<Source>) -> Self {
        Self::new(Role::Assistant, text.into(), sources)
    }

    fn new(role: Role, content: String, sources: Vec<Source>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            timestamp: Utc::now(),
            sources,
        }
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}

/// A retrieved passage the answer was grounded on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub content: String,
    #[serde(default)]
    pub location: SourceLocation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uri: Option<String>,
}

impl Source {
    pub fn new(content: impl Into<String>, uri: Option<String>) -> Self {
        Self {
            content: content.into(),
            location: SourceLocation { uri },
        }
    }

    pub fn uri(&self) -> Option<&str> {
        self.location.uri.as_deref()
    }
}
