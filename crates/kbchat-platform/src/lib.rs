//! Browser adapters for the kbchat-core ports.

pub mod http;
pub mod storage;

pub use http::HttpChatTransport;
