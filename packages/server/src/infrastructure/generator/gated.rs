//! 生成サービスの呼び出し制御
//!
//! ## 責務
//!
//! - 1 回の呼び出しをタイムアウトで打ち切る
//! - 1 分あたりの呼び出し回数を制限する（試行した時点で 1 回と数える）
//! - 応答を検証する（空でない、200 文字以内、`{token}` が残っていない）
//!
//! どの失敗も `GeneratorError` として返り、呼び出し元はフォールバックを使う。
//!
//! 回数制限は `governor` のトークンバケット。上限までは続けて呼べ、
//! その後は 60 秒 / 上限 ごとに 1 回分ずつ回復する。

use std::{num::NonZeroU32, sync::Arc, time::Duration};

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::{Clock as RateClock, DefaultClock},
};

use crate::domain::{
    GeneratorError, LanguageCode, SuggestionContext, SuggestionGenerator,
    template::contains_known_placeholder,
};

const MAX_SUGGESTION_CHARS: usize = 200;
const DEFAULT_CALLS_PER_MINUTE: NonZeroU32 = match NonZeroU32::new(15) {
    Some(n) => n,
    None => NonZeroU32::MIN,
};

/// 呼び出し制限の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorLimits {
    pub timeout: Duration,
    pub calls_per_minute: NonZeroU32,
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5_000),
            calls_per_minute: DEFAULT_CALLS_PER_MINUTE,
        }
    }
}

pub struct GatedSuggestionGenerator {
    inner: Arc<dyn SuggestionGenerator>,
    limits: GeneratorLimits,
    /// 枠が空いていれば 1 回分を消費して true。governor の型引数を外に出さないためクロージャで持つ
    check_quota: Box<dyn Fn() -> bool + Send + Sync>,
}

impl GatedSuggestionGenerator {
    pub fn new(inner: Arc<dyn SuggestionGenerator>, limits: GeneratorLimits) -> Self {
        Self::with_clock(inner, limits, &DefaultClock::default())
    }

    /// 回数制限の時計を指定して作る
    pub fn with_clock<C>(
        inner: Arc<dyn SuggestionGenerator>,
        limits: GeneratorLimits,
        clock: &C,
    ) -> Self
    where
        C: RateClock + Send + Sync + 'static,
        C::Instant: Send + Sync + 'static,
    {
        let limiter =
            RateLimiter::direct_with_clock(Quota::per_minute(limits.calls_per_minute), clock);
        Self {
            inner,
            limits,
            check_quota: Box::new(move || limiter.check().is_ok()),
        }
    }

    fn acquire(&self) -> Result<(), GeneratorError> {
        if (self.check_quota)() {
            Ok(())
        } else {
            Err(GeneratorError::QuotaExceeded(self.limits.calls_per_minute.get()))
        }
    }
}

fn validate(text: String) -> Result<String, GeneratorError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(GeneratorError::Malformed("empty response".to_string()));
    }
    let length = text.chars().count();
    if length > MAX_SUGGESTION_CHARS {
        return Err(GeneratorError::Malformed(format!(
            "response is {length} characters long"
        )));
    }
    if contains_known_placeholder(text) {
        return Err(GeneratorError::Malformed(
            "response contains an unresolved placeholder".to_string(),
        ));
    }
    Ok(text.to_string())
}

#[async_trait]
impl SuggestionGenerator for GatedSuggestionGenerator {
    async fn generate(
        &self,
        context: &SuggestionContext,
        language: LanguageCode,
    ) -> Result<String, GeneratorError> {
        if let Err(e) = self.acquire() {
            tracing::warn!("Suggestion generator rate limit reached: {}", e);
            return Err(e);
        }

        let result = tokio::time::timeout(
            self.limits.timeout,
            self.inner.generate(context, language),
        )
        .await
        .map_err(|_| GeneratorError::Timeout(self.limits.timeout.as_millis() as u64))
        .and_then(|result| result)
        .and_then(validate);

        match &result {
            Ok(text) => tracing::debug!("Generated suggestion: {}", text),
            Err(GeneratorError::NotConfigured) => {}
            Err(e) => tracing::warn!("Suggestion generator unavailable: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GiftTierPolicy, MetricsAggregate, MockSuggestionGenerator, TimeContext, Timestamp};
    use governor::clock::FakeRelativeClock;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - タイムアウト、回数制限、応答の検証
    //
    // 【なぜこのテストが必要か】
    // - 生成サービスの不調がプロンプト選択を止めないことの前提になる
    // - 回数制限は試行時点で数える（失敗した呼び出しも枠を消費する）
    //
    // 【補足】
    // - 回数制限の時計は FakeRelativeClock で進める
    // ========================================

    struct PendingGenerator;

    #[async_trait]
    impl SuggestionGenerator for PendingGenerator {
        async fn generate(
            &self,
            _context: &SuggestionContext,
            _language: LanguageCode,
        ) -> Result<String, GeneratorError> {
            std::future::pending().await
        }
    }

    fn context() -> SuggestionContext {
        let metrics = MetricsAggregate::new(Timestamp::new(0), GiftTierPolicy::default());
        SuggestionContext::from_aggregate(&metrics, TimeContext::at(Timestamp::new(0), 0))
    }

    fn replying(text: &'static str) -> Arc<dyn SuggestionGenerator> {
        let mut mock = MockSuggestionGenerator::new();
        mock.expect_generate()
            .returning(move |_, _| Ok(text.to_string()));
        Arc::new(mock)
    }

    fn limits(calls_per_minute: u32) -> GeneratorLimits {
        GeneratorLimits {
            timeout: Duration::from_millis(50),
            calls_per_minute: NonZeroU32::new(calls_per_minute).unwrap(),
        }
    }

    fn gated(inner: Arc<dyn SuggestionGenerator>, calls_per_minute: u32) -> GatedSuggestionGenerator {
        GatedSuggestionGenerator::with_clock(
            inner,
            limits(calls_per_minute),
            &FakeRelativeClock::default(),
        )
    }

    #[tokio::test]
    async fn test_valid_response_is_trimmed() {
        // テスト項目: 正常な応答は前後の空白を除いて返る
        // given (前提条件):
        let generator = gated(replying("  Say hi to chat!  "), 15);

        // when (操作):
        let result = generator.generate(&context(), LanguageCode::En).await;

        // then (期待する結果):
        assert_eq!(result, Ok("Say hi to chat!".to_string()));
    }

    #[tokio::test]
    async fn test_timeout() {
        // テスト項目: 応答が返らない場合は Timeout になる
        // given (前提条件):
        let generator = gated(Arc::new(PendingGenerator), 15);

        // when (操作):
        let result = generator.generate(&context(), LanguageCode::En).await;

        // then (期待する結果):
        assert_eq!(result, Err(GeneratorError::Timeout(50)));
    }

    #[tokio::test]
    async fn test_quota_recovers_over_the_minute() {
        // テスト項目: 上限まで続けて呼ぶと QuotaExceeded、60 秒 / 上限 が経つと 1 回分だけ回復する
        // given (前提条件):
        let clock = FakeRelativeClock::default();
        let generator = GatedSuggestionGenerator::with_clock(replying("ok"), limits(2), &clock);

        // when (操作):
        let first = generator.generate(&context(), LanguageCode::En).await;
        let second = generator.generate(&context(), LanguageCode::En).await;
        let third = generator.generate(&context(), LanguageCode::En).await;
        clock.advance(Duration::from_secs(30));
        let fourth = generator.generate(&context(), LanguageCode::En).await;
        let fifth = generator.generate(&context(), LanguageCode::En).await;

        // then (期待する結果):
        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(third, Err(GeneratorError::QuotaExceeded(2)));
        assert!(fourth.is_ok());
        assert_eq!(fifth, Err(GeneratorError::QuotaExceeded(2)));
    }

    #[tokio::test]
    async fn test_exceeded_quota_does_not_call_backend() {
        // テスト項目: 枠が無いときは生成サービスを呼ばない
        // given (前提条件):
        let mut mock = MockSuggestionGenerator::new();
        mock.expect_generate()
            .times(1)
            .returning(|_, _| Ok("ok".to_string()));
        let generator = gated(Arc::new(mock), 1);

        // when (操作):
        let first = generator.generate(&context(), LanguageCode::En).await;
        let second = generator.generate(&context(), LanguageCode::En).await;

        // then (期待する結果):
        assert!(first.is_ok());
        assert_eq!(second, Err(GeneratorError::QuotaExceeded(1)));
    }

    #[tokio::test]
    async fn test_failed_attempts_consume_quota() {
        // テスト項目: タイムアウトした試行も回数に含まれる
        // given (前提条件):
        let generator = gated(Arc::new(PendingGenerator), 1);

        // when (操作):
        let first = generator.generate(&context(), LanguageCode::En).await;
        let second = generator.generate(&context(), LanguageCode::En).await;

        // then (期待する結果):
        assert!(matches!(first, Err(GeneratorError::Timeout(_))));
        assert_eq!(second, Err(GeneratorError::QuotaExceeded(1)));
    }

    #[tokio::test]
    async fn test_malformed_responses() {
        // テスト項目: 空・長すぎる・プレースホルダーが残った応答は Malformed になる
        // given (前提条件):
        let long: &'static str = Box::leak("a".repeat(201).into_boxed_str());

        // when (操作):
        let mut results = Vec::new();
        for text in ["   ", long, "Welcome {viewerCount} viewers"] {
            let generator = gated(replying(text), 15);
            results.push(generator.generate(&context(), LanguageCode::En).await);
        }

        // then (期待する結果):
        for result in results {
            assert!(matches!(result, Err(GeneratorError::Malformed(_))), "{result:?}");
        }
    }

    #[tokio::test]
    async fn test_exactly_200_characters_is_accepted() {
        // テスト項目: 200 文字ちょうどの応答は受け付ける
        // given (前提条件):
        let text: &'static str = Box::leak("é".repeat(200).into_boxed_str());
        let generator = gated(replying(text), 15);

        // when (操作):
        let result = generator.generate(&context(), LanguageCode::En).await;

        // then (期待する結果):
        assert_eq!(result.map(|t| t.chars().count()), Ok(200));
    }
}
