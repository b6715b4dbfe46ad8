//! UseCase: プロンプトの表示言語の変更
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SetLanguageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 以降のテンプレート選択・文章生成が指定言語で行われる前提になる
//! - 未対応の言語コードがセッション状態を壊さないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：対応言語への変更
//! - 異常系：未対応の言語コード、存在しないセッション

use std::sync::Arc;

use crate::domain::{LanguageCode, SessionId, SessionRepository};

use super::error::SessionError;

/// 表示言語変更のユースケース
pub struct SetLanguageUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl SetLanguageUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// セッションの言語を変更する
    ///
    /// セッションの存在確認を言語コードの検証より先に行う。
    pub async fn execute(
        &self,
        session_id: &SessionId,
        language: &str,
    ) -> Result<LanguageCode, SessionError> {
        let shared = self.repository.get(session_id).await?;
        let language = LanguageCode::parse(language)
            .map_err(|_| SessionError::InvalidLanguage(language.to_string()))?;

        let mut session = shared.lock().await;
        if !session.connected {
            return Err(SessionError::not_found(session_id));
        }
        session.metrics.set_language(language);
        tracing::info!("Session '{}' language set to '{}'", session_id, language);
        Ok(language)
    }
}
