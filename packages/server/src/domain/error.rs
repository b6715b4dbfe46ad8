//! Domain error types.
//!
//! Every port (trait) the core depends on reports failures through one of
//! these enums. Analytic and generation failures are absorbed by the prompt
//! engine; only session lookup failures surface to callers.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("session id must not be empty")]
    EmptySessionId,

    #[error("channel name must not be empty")]
    EmptyChannelName,

    #[error("invalid channel name '{0}'")]
    InvalidChannelName(String),

    #[error("chatter id must not be empty")]
    EmptyChatterId,

    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),
}

/// Session repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("session '{0}' not found")]
    SessionNotFound(String),
}

/// Message push (dispatcher) errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信対象の誰にも届かなかった
    #[error("no subscriber reached ({0} targets)")]
    NoneDelivered(usize),
}

/// Suggestion generator failures. All of them mean "use the fallback picker".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("suggestion generator timed out after {0} ms")]
    Timeout(u64),

    #[error("suggestion generator quota of {0} calls per minute exceeded")]
    QuotaExceeded(u32),

    #[error("malformed suggestion: {0}")]
    Malformed(String),

    #[error("suggestion generator is not configured")]
    NotConfigured,

    #[error("suggestion backend error: {0}")]
    Backend(String),
}

/// Headline / trivia fetch failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExternalDataError {
    #[error("external data request failed: {0}")]
    Request(String),

    #[error("unexpected external data payload: {0}")]
    Payload(String),
}

/// Channel / viewer information fetch failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamInfoError {
    #[error("stream info request failed: {0}")]
    Request(String),

    #[error("unexpected stream info payload: {0}")]
    Payload(String),

    #[error("stream info source is not configured")]
    NotConfigured,
}

/// Template registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template '{template}' requires placeholder '{{{placeholder}}}' but no value was supplied")]
    MissingPlaceholder {
        template: &'static str,
        placeholder: &'static str,
    },

    #[error("template '{template}' references unknown placeholder '{{{token}}}'")]
    UnknownPlaceholder {
        template: &'static str,
        token: String,
    },
}
