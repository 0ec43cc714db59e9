//! Errors surfaced by the completion client.
//!
//! Display strings are the user-facing (localized) messages of the product;
//! callers render them directly without further translation.

use crate::ConfigError;

/// Errors from the chat-completion pipeline.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum ClientError {
    /// One or more required settings are absent.
    #[display("{_0}")]
    #[from]
    Config(ConfigError),

    /// Transport failure before a response arrived.
    #[display("网络连接失败，请检查网络连接或稍后重试")]
    Network(String),

    /// API returned a non-2xx status.
    #[display("API请求失败 ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// 2xx response whose body is not valid JSON.
    #[display("API返回数据格式无效")]
    ResponseParsing(String),

    /// 2xx response without a usable choices list.
    #[display("API返回数据格式错误")]
    EmptyChoices,

    /// Builder error
    #[display("请求构造失败: {_0}")]
    Builder(String),
}

impl ClientError {
    /// Build an [`ClientError::Api`] from an upstream error body.
    ///
    /// Tries to extract `error.message` from a JSON body, falling back to
    /// the raw body text, then to a generic placeholder.
    pub fn upstream(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if body.is_empty() {
                    "未知错误".to_string()
                } else {
                    body.to_string()
                }
            });

        Self::Api { status, message }
    }
}

impl std::error::Error for ClientError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_extracts_error_message() {
        let err = ClientError::upstream(429, r#"{"error":{"message":"rate limited"}}"#);
        assert_eq!(err.to_string(), "API请求失败 (429): rate limited");
    }

    #[test]
    fn upstream_falls_back_to_raw_body() {
        let err = ClientError::upstream(502, "bad gateway");
        assert_eq!(err.to_string(), "API请求失败 (502): bad gateway");
    }

    #[test]
    fn upstream_handles_empty_body() {
        let err = ClientError::upstream(500, "");
        assert_eq!(err.to_string(), "API请求失败 (500): 未知错误");
    }

    #[test]
    fn upstream_ignores_json_without_error_field() {
        let err = ClientError::upstream(500, r#"{"detail":"oops"}"#);
        assert_eq!(err.to_string(), r#"API请求失败 (500): {"detail":"oops"}"#);
    }
}
