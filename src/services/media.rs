//! 媒体生成管线
//!
//! 生成/缓存/去重契约的共享实现：从语义输入派生稳定键，查持久缓存，
//! 未命中才调用外部生成，制品落盘后以稳定引用记录缓存条目。
//! 语义相同的请求不会付两次生成成本。
//!
//! 缓存查询失败按未命中处理，缓存写入尽力而为——两者都只记日志。

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::artifact_store::{ArtifactStore, MediaKind};
use crate::cache::content_cache::ContentCache;
use crate::cache::key::{ArtifactKind, cache_key};
use crate::error::{AppError, Result};
use crate::genai::client::GenerativeClient;
use crate::observability::AppMetrics;

/// 媒体生成管线 trait
#[async_trait]
pub trait MediaPipeline: Send + Sync {
    /// 语音合成，返回制品引用
    async fn speech(&self, text: &str, voice: &str) -> Result<String>;

    /// 配图合成，返回制品引用
    async fn illustration(&self, prompt: &str) -> Result<String>;
}

/// 媒体生成管线实现
pub struct MediaPipelineImpl {
    cache: Arc<dyn ContentCache>,
    store: Arc<dyn ArtifactStore>,
    genai: Arc<dyn GenerativeClient>,
    metrics: Arc<AppMetrics>,
    /// 图像模型名，参与键派生
    image_model: String,
    /// 语音模型名，参与键派生
    speech_model: String,
}

impl MediaPipelineImpl {
    pub fn new(
        cache: Arc<dyn ContentCache>,
        store: Arc<dyn ArtifactStore>,
        genai: Arc<dyn GenerativeClient>,
        metrics: Arc<AppMetrics>,
        image_model: String,
        speech_model: String,
    ) -> Self {
        Self {
            cache,
            store,
            genai,
            metrics,
            image_model,
            speech_model,
        }
    }

    /// 缓存优先的生成流程
    async fn resolve<F>(&self, key: &str, kind: MediaKind, generate: F) -> Result<String>
    where
        F: Future<Output = Result<Vec<u8>>>,
    {
        match self.cache.lookup(key).await {
            Ok(Some(reference)) => {
                debug!("Artifact cache hit: {}", key);
                self.metrics.record_cache_lookup(true);
                return Ok(reference);
            }
            Ok(None) => self.metrics.record_cache_lookup(false),
            // 缓存不可达按未命中处理，生成照常进行
            Err(e) => {
                warn!("Artifact cache lookup failed, treating as miss: {}", e);
                self.metrics.record_cache_lookup(false);
            }
        }

        self.metrics.record_generation_call();
        let bytes = generate.await?;
        if bytes.is_empty() {
            return Err(AppError::Generation(
                "Backend returned empty artifact payload".to_string(),
            ));
        }

        let reference = self.store.store(&bytes, kind).await?;

        if let Err(e) = self.cache.store(key, &reference).await {
            warn!("Artifact cache store failed (continuing): {}", e);
        }

        Ok(reference)
    }
}

#[async_trait]
impl MediaPipeline for MediaPipelineImpl {
    async fn speech(&self, text: &str, voice: &str) -> Result<String> {
        let key = cache_key(
            ArtifactKind::Speech,
            &[text, voice, &self.speech_model],
        );
        self.resolve(&key, MediaKind::Audio, self.genai.synthesize_speech(text, voice))
            .await
    }

    async fn illustration(&self, prompt: &str) -> Result<String> {
        let key = cache_key(ArtifactKind::Illustration, &[prompt, &self.image_model]);
        self.resolve(&key, MediaKind::Image, self.genai.synthesize_image(prompt))
            .await
    }
}

/// 创建媒体生成管线
pub fn create_media_pipeline(
    cache: Arc<dyn ContentCache>,
    store: Arc<dyn ArtifactStore>,
    genai: Arc<dyn GenerativeClient>,
    metrics: Arc<AppMetrics>,
    image_model: String,
    speech_model: String,
) -> Box<dyn MediaPipeline> {
    Box::new(MediaPipelineImpl::new(
        cache,
        store,
        genai,
        metrics,
        image_model,
        speech_model,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::content_cache::InMemoryContentCache;
    use crate::genai::client::MockGenerativeClient;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// 记录写入的制品存储替身
    #[derive(Default)]
    struct RecordingStore {
        stored: Mutex<Vec<Vec<u8>>>,
        counter: AtomicU32,
    }

    #[async_trait]
    impl ArtifactStore for RecordingStore {
        async fn store(&self, bytes: &[u8], kind: MediaKind) -> Result<String> {
            if bytes.is_empty() {
                return Err(AppError::InvalidArtifact("empty".into()));
            }
            self.stored.lock().unwrap().push(bytes.to_vec());
            let n = self.counter.fetch_add(1, Ordering::SeqCst);
            let partition = match kind {
                MediaKind::Image => "images",
                MediaKind::Audio => "audio",
                MediaKind::Other => "misc",
            };
            Ok(format!("{}/{}.bin", partition, n))
        }

        async fn delete(&self, _reference: &str) -> Result<()> {
            Ok(())
        }
    }

    /// 查询必败的缓存替身
    struct BrokenCache;

    #[async_trait]
    impl ContentCache for BrokenCache {
        async fn lookup(&self, _key: &str) -> Result<Option<String>> {
            Err(AppError::StorageUnavailable("cache down".into()))
        }

        async fn store(&self, _key: &str, _reference: &str) -> Result<()> {
            Err(AppError::StorageUnavailable("cache down".into()))
        }
    }

    fn pipeline_with(
        cache: Arc<dyn ContentCache>,
        genai: MockGenerativeClient,
    ) -> MediaPipelineImpl {
        MediaPipelineImpl::new(
            cache,
            Arc::new(RecordingStore::default()),
            Arc::new(genai),
            Arc::new(AppMetrics::default()),
            "img-model".into(),
            "tts-model".into(),
        )
    }

    #[tokio::test]
    async fn test_speech_generates_once_for_identical_input() {
        let mut genai = MockGenerativeClient::new();
        genai
            .expect_synthesize_speech()
            .times(1)
            .returning(|_, _| Ok(b"mp3-bytes".to_vec()));

        let pipeline = pipeline_with(Arc::new(InMemoryContentCache::new()), genai);

        let first = pipeline.speech("hello", "alloy").await.unwrap();
        let second = pipeline.speech("hello", "alloy").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_voice_change_misses_cache() {
        let mut genai = MockGenerativeClient::new();
        genai
            .expect_synthesize_speech()
            .times(2)
            .returning(|_, _| Ok(b"mp3-bytes".to_vec()));

        let pipeline = pipeline_with(Arc::new(InMemoryContentCache::new()), genai);

        let alloy = pipeline.speech("hello", "alloy").await.unwrap();
        let nova = pipeline.speech("hello", "nova").await.unwrap();
        assert_ne!(alloy, nova);
    }

    #[tokio::test]
    async fn test_cache_failure_treated_as_miss() {
        let mut genai = MockGenerativeClient::new();
        genai
            .expect_synthesize_image()
            .times(1)
            .returning(|_| Ok(b"png-bytes".to_vec()));

        let pipeline = pipeline_with(Arc::new(BrokenCache), genai);

        let reference = pipeline.illustration("a right triangle").await.unwrap();
        assert!(reference.starts_with("images/"));
    }

    #[tokio::test]
    async fn test_cache_lookups_and_generation_calls_are_counted() {
        let mut genai = MockGenerativeClient::new();
        genai
            .expect_synthesize_speech()
            .times(1)
            .returning(|_, _| Ok(b"mp3-bytes".to_vec()));

        let metrics = Arc::new(AppMetrics::default());
        let pipeline = MediaPipelineImpl::new(
            Arc::new(InMemoryContentCache::new()),
            Arc::new(RecordingStore::default()),
            Arc::new(genai),
            metrics.clone(),
            "img-model".into(),
            "tts-model".into(),
        );

        pipeline.speech("hello", "alloy").await.unwrap();
        pipeline.speech("hello", "alloy").await.unwrap();

        let output = metrics.gather();
        assert!(output.contains("cache_misses_total 1"));
        assert!(output.contains("cache_hits_total 1"));
        assert!(output.contains("generation_calls_total 1"));
    }

    #[tokio::test]
    async fn test_empty_backend_payload_is_generation_error() {
        let mut genai = MockGenerativeClient::new();
        genai
            .expect_synthesize_image()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let pipeline = pipeline_with(Arc::new(InMemoryContentCache::new()), genai);

        let err = pipeline.illustration("anything").await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }
}
