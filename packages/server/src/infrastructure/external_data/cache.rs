//! 外部データのプロセス共有キャッシュ
//!
//! キーは内容の種類（見出し / 豆知識）。どのセッションからも読み書きできる。
//! 同じ種類の取得が同時に走った場合は 1 回の取得にまとめられる。
//! 取得に失敗した場合は既定の文言を返し、キャッシュには入れない。

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use moka::future::Cache;

use crate::domain::{ExternalDataError, ExternalDataSource};

pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

pub const DEFAULT_HEADLINE: &str = "Streaming Tips";
pub const DEFAULT_TRIVIA: &str =
    "Did you know that streaming can help you build amazing communities?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Headline,
    Trivia,
}

impl ContentKind {
    fn default_text(&self) -> &'static str {
        match self {
            Self::Headline => DEFAULT_HEADLINE,
            Self::Trivia => DEFAULT_TRIVIA,
        }
    }
}

pub struct CachedExternalDataSource {
    inner: Arc<dyn ExternalDataSource>,
    cache: Cache<ContentKind, Option<String>>,
}

impl CachedExternalDataSource {
    pub fn new(inner: Arc<dyn ExternalDataSource>) -> Self {
        Self::with_ttl(inner, CACHE_TTL)
    }

    pub fn with_ttl(inner: Arc<dyn ExternalDataSource>, ttl: Duration) -> Self {
        tracing::debug!("External data cache TTL: {:?}", ttl);

        let cache = Cache::builder()
            .max_capacity(2)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }

    async fn get(&self, kind: ContentKind) -> Option<String> {
        let fetch = async {
            match kind {
                ContentKind::Headline => self.inner.headline().await,
                ContentKind::Trivia => self.inner.trivia().await,
            }
        };

        match self.cache.try_get_with(kind, fetch).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to fetch {:?}, using default: {}", kind, e);
                Some(kind.default_text().to_string())
            }
        }
    }
}

#[async_trait]
impl ExternalDataSource for CachedExternalDataSource {
    async fn headline(&self) -> Result<Option<String>, ExternalDataError> {
        Ok(self.get(ContentKind::Headline).await)
    }

    async fn trivia(&self) -> Result<Option<String>, ExternalDataError> {
        Ok(self.get(ContentKind::Trivia).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockExternalDataSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - TTL 内は取得元を呼ばずにキャッシュを返す
    // - TTL を過ぎると取得し直す
    // - 取得失敗時は既定の文言になり、キャッシュされない
    // - 同時の取得は 1 回にまとめられる
    //
    // 【補足】
    // - 有効期限はキャッシュ内部の時計で測るため、TTL を短くして実時間で待つ
    // ========================================

    /// 呼ばれた回数を数え、少し待ってから応答する取得元
    struct SlowSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ExternalDataSource for SlowSource {
        async fn headline(&self) -> Result<Option<String>, ExternalDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(Some("Slow news".to_string()))
        }

        async fn trivia(&self) -> Result<Option<String>, ExternalDataError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_cached_within_ttl() {
        // テスト項目: TTL 以内の 2 回目の取得は取得元を呼ばない
        // given (前提条件):
        let mut mock = MockExternalDataSource::new();
        mock.expect_headline()
            .times(1)
            .returning(|| Ok(Some("Big news".to_string())));
        let source = CachedExternalDataSource::new(Arc::new(mock));

        // when (操作):
        let first = source.headline().await;
        let second = source.headline().await;

        // then (期待する結果):
        assert_eq!(first, Ok(Some("Big news".to_string())));
        assert_eq!(second, Ok(Some("Big news".to_string())));
    }

    #[tokio::test]
    async fn test_refetch_after_ttl() {
        // テスト項目: TTL を過ぎると取得し直す
        // given (前提条件):
        let mut mock = MockExternalDataSource::new();
        mock.expect_trivia()
            .times(2)
            .returning(|| Ok(Some("Octopuses have three hearts".to_string())));
        let source = CachedExternalDataSource::with_ttl(Arc::new(mock), Duration::from_millis(50));

        // when (操作):
        source.trivia().await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
        let result = source.trivia().await;

        // then (期待する結果):
        assert_eq!(result, Ok(Some("Octopuses have three hearts".to_string())));
    }

    #[tokio::test]
    async fn test_failure_uses_default_and_is_not_cached() {
        // テスト項目: 取得失敗時は既定の文言を返し、次回は取得し直す
        // given (前提条件):
        let mut mock = MockExternalDataSource::new();
        mock.expect_trivia()
            .times(2)
            .returning(|| Err(ExternalDataError::Request("offline".to_string())));
        let source = CachedExternalDataSource::new(Arc::new(mock));

        // when (操作):
        let first = source.trivia().await;
        let second = source.trivia().await;

        // then (期待する結果):
        assert_eq!(first, Ok(Some(DEFAULT_TRIVIA.to_string())));
        assert_eq!(second, Ok(Some(DEFAULT_TRIVIA.to_string())));
    }

    #[tokio::test]
    async fn test_kinds_are_cached_independently() {
        // テスト項目: 見出しと豆知識は別々にキャッシュされる
        // given (前提条件):
        let mut mock = MockExternalDataSource::new();
        mock.expect_headline().times(1).returning(|| Ok(None));
        mock.expect_trivia()
            .times(1)
            .returning(|| Ok(Some("fact".to_string())));
        let source = CachedExternalDataSource::new(Arc::new(mock));

        // when (操作):
        let headline = source.headline().await;
        let trivia = source.trivia().await;
        let headline_again = source.headline().await;

        // then (期待する結果):
        assert_eq!(headline, Ok(None));
        assert_eq!(trivia, Ok(Some("fact".to_string())));
        assert_eq!(headline_again, Ok(None));
    }

    #[tokio::test]
    async fn test_concurrent_loads_are_merged() {
        // テスト項目: 同じ種類の取得が同時に走っても取得元は 1 回しか呼ばれない
        // given (前提条件):
        let inner = Arc::new(SlowSource {
            calls: AtomicUsize::new(0),
        });
        let source = CachedExternalDataSource::new(inner.clone());

        // when (操作):
        let (a, b) = tokio::join!(source.headline(), source.headline());

        // then (期待する結果):
        assert_eq!(a, Ok(Some("Slow news".to_string())));
        assert_eq!(b, Ok(Some("Slow news".to_string())));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }
}
