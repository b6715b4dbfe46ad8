//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RepositoryError, SessionId};

/// セッション操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("invalid language '{0}'")]
    InvalidLanguage(String),
}

impl SessionError {
    pub fn not_found(id: &SessionId) -> Self {
        Self::SessionNotFound(id.as_str().to_string())
    }
}

impl From<RepositoryError> for SessionError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::SessionNotFound(id) => Self::SessionNotFound(id),
        }
    }
}

/// プロンプト選択のエラー
///
/// 生成・分析の失敗はここには現れない（フォールバックで吸収される）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectPromptError {
    #[error("session '{0}' not found")]
    SessionNotFound(String),

    /// 選択中にセッションが切断された。結果は破棄される
    #[error("session '{0}' was disconnected")]
    SessionClosed(String),
}

impl From<RepositoryError> for SelectPromptError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::SessionNotFound(id) => Self::SessionNotFound(id),
        }
    }
}
