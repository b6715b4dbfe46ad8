use async_trait::async_trait;

use crate::domain::{GeneratorError, LanguageCode, SuggestionContext, SuggestionGenerator};

/// 生成サービスが設定されていない場合の実装。常にフォールバックへ回す
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSuggestionGenerator;

#[async_trait]
impl SuggestionGenerator for DisabledSuggestionGenerator {
    async fn generate(
        &self,
        _context: &SuggestionContext,
        _language: LanguageCode,
    ) -> Result<String, GeneratorError> {
        Err(GeneratorError::NotConfigured)
    }
}
