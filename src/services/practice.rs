//! 练习题生成服务
//!
//! 一次结构化补全请求整批题目（摊薄外部调用成本），逐题按题干哈希
//! 去重，需要配图的题目并发走媒体管线，逐题独立持久化。批次整体
//! 失败时返回空列表而不是报错——零可用题目也是合法（降级）响应。

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::key::content_hash;
use crate::error::{AppError, Result};
use crate::genai::client::GenerativeClient;
use crate::genai::retry::structured_with_retry;
use crate::models::attempt_repository::AttemptRepository;
use crate::models::plan_repository::PlanRepository;
use crate::models::question::{GeneratedQuestion, PracticeQuestion};
use crate::models::question_repository::QuestionRepository;
use crate::observability::AppMetrics;
use crate::services::media::MediaPipeline;

/// 单次生成请求的上限
const MAX_BATCH_SIZE: usize = 20;

/// 薄弱模式下参与提示词的主题数
const WEAK_TOPIC_LIMIT: usize = 3;

/// 生成参数
#[derive(Debug, Clone)]
pub struct GenerateParams {
    /// 期望题目数量
    pub count: usize,
    /// 难度（1-5）
    pub difficulty: u8,
    /// 薄弱模式：偏向历史错误率高的主题
    pub weakness_mode: bool,
}

/// 生成批次的结构化形状
#[derive(Debug, Default, Deserialize)]
struct QuestionBatch {
    #[serde(default)]
    questions: Vec<GeneratedQuestion>,
}

/// 练习题生成服务 trait
#[async_trait]
pub trait PracticeService: Send + Sync {
    /// 为指定计划生成一批练习题
    ///
    /// 返回实际接受的子集，可能少于请求数量（去重或降级所致）。
    async fn generate(
        &self,
        user_id: &str,
        plan_id: &str,
        params: GenerateParams,
    ) -> Result<Vec<PracticeQuestion>>;
}

/// 练习题生成服务实现
pub struct PracticeServiceImpl {
    plan_repository: Arc<dyn PlanRepository>,
    question_repository: Arc<dyn QuestionRepository>,
    attempt_repository: Arc<dyn AttemptRepository>,
    genai: Arc<dyn GenerativeClient>,
    media: Arc<dyn MediaPipeline>,
    metrics: Arc<AppMetrics>,
    max_parse_attempts: u32,
}

impl PracticeServiceImpl {
    pub fn new(
        plan_repository: Arc<dyn PlanRepository>,
        question_repository: Arc<dyn QuestionRepository>,
        attempt_repository: Arc<dyn AttemptRepository>,
        genai: Arc<dyn GenerativeClient>,
        media: Arc<dyn MediaPipeline>,
        metrics: Arc<AppMetrics>,
        max_parse_attempts: u32,
    ) -> Self {
        Self {
            plan_repository,
            question_repository,
            attempt_repository,
            genai,
            media,
            metrics,
            max_parse_attempts,
        }
    }

    fn validate(params: &GenerateParams) -> Result<()> {
        if params.count == 0 || params.count > MAX_BATCH_SIZE {
            return Err(AppError::Validation(format!(
                "count must be between 1 and {}",
                MAX_BATCH_SIZE
            )));
        }
        if !(1..=5).contains(&params.difficulty) {
            return Err(AppError::Validation(
                "difficulty must be between 1 and 5".to_string(),
            ));
        }
        Ok(())
    }

    /// 为一道题解析配图引用；任何失败都不致命
    async fn resolve_image(&self, item: &GeneratedQuestion) -> Option<String> {
        let prompt = item.image_prompt.as_deref()?;
        if prompt.trim().is_empty() {
            return None;
        }

        match self.media.illustration(prompt).await {
            Ok(reference) => Some(reference),
            Err(e) => {
                warn!("Illustration unavailable, keeping question without image: {}", e);
                None
            }
        }
    }
}

/// 构造批次生成提示词
fn build_generation_prompt(
    goal: &str,
    subject: Option<&str>,
    count: usize,
    difficulty: u8,
    weak_topics: &[String],
) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are generating practice questions for a tutoring application.\n",
    );
    match subject {
        Some(subject) => {
            prompt.push_str(&format!("Subject: {}. Learning goal: {}.\n", subject, goal))
        }
        None => prompt.push_str(&format!("Learning goal: {}.\n", goal)),
    }

    if weak_topics.is_empty() {
        prompt.push_str("Cover the goal broadly across its main topics.\n");
    } else {
        prompt.push_str(&format!(
            "Focus on the learner's weakest topics: {}.\n",
            weak_topics.join(", ")
        ));
    }

    prompt.push_str(&format!(
        "Produce exactly {} questions at difficulty {} (scale 1-5).\n",
        count, difficulty
    ));
    prompt.push_str(
        "Respond with a single JSON object: {\"questions\": [{\"question\": string, \
         \"question_type\": one of [\"multiple_choice\", \"short_answer\", \"long_answer\", \
         \"code_fill\", \"code_implementation\", \"drawing\", \"audio_recording\", \"video\", \
         \"visual_analysis\"], \"topic\": string, \"difficulty\": integer, \
         \"choices\": [string] or null, \"answer\": string, \"explanation\": string, \
         \"image_prompt\": string or null}]}.\n\
         Set image_prompt only when the question needs an illustration. No prose outside JSON.",
    );
    prompt
}

#[async_trait]
impl PracticeService for PracticeServiceImpl {
    async fn generate(
        &self,
        user_id: &str,
        plan_id: &str,
        params: GenerateParams,
    ) -> Result<Vec<PracticeQuestion>> {
        Self::validate(&params)?;

        // 计划不存在要在任何外部生成调用之前失败，避免白花成本
        let plan = self
            .plan_repository
            .get_by_id(plan_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Plan not found: {}", plan_id)))?;

        let weak_topics: Vec<String> = if params.weakness_mode {
            match self
                .attempt_repository
                .top_weak_topics(user_id, plan_id, WEAK_TOPIC_LIMIT)
                .await
            {
                Ok(topics) => topics.into_iter().map(|t| t.topic).collect(),
                Err(e) => {
                    warn!("Weak topic lookup failed, falling back to broad coverage: {}", e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let prompt = build_generation_prompt(
            &plan.goal,
            plan.subject.as_deref(),
            params.count,
            params.difficulty,
            &weak_topics,
        );

        let outcome =
            structured_with_retry::<QuestionBatch>(&*self.genai, &prompt, self.max_parse_attempts)
                .await
                .or_degraded(QuestionBatch::default());
        if outcome.is_degraded() {
            self.metrics.record_degraded();
        }
        let batch = outcome.into_inner();

        // 批内去重 + 对已持久化题干的静默去重；接受的子集可能小于请求量
        let mut seen_hashes: HashSet<String> = HashSet::new();
        let mut accepted: Vec<GeneratedQuestion> = Vec::new();

        for item in batch.questions.into_iter().take(params.count) {
            if item.question.trim().is_empty() {
                debug!("Dropping batch item with empty question text");
                continue;
            }

            let hash = content_hash(&item.question);
            if !seen_hashes.insert(hash.clone()) {
                debug!("Dropping duplicate question within batch: {}", hash);
                continue;
            }
            if self.question_repository.exists_by_hash(&hash).await? {
                debug!("Dropping already persisted question: {}", hash);
                continue;
            }
            accepted.push(item);
        }

        // 不同题目的配图并发合成，缩短整批延迟
        let image_refs: Vec<Option<String>> =
            join_all(accepted.iter().map(|item| self.resolve_image(item))).await;

        let mut questions = Vec::with_capacity(accepted.len());
        for (item, image_reference) in accepted.into_iter().zip(image_refs) {
            let question = PracticeQuestion::from_generated(
                plan_id,
                item,
                params.difficulty,
                image_reference,
            );

            // 并发窗口内另一写者先占到哈希：按"已存在，跳过"处理
            if self.question_repository.create_if_new(&question).await? {
                questions.push(question);
            } else {
                debug!(
                    "Question persisted concurrently elsewhere, skipping: {}",
                    question.content_hash
                );
            }
        }

        self.metrics.record_questions_generated(questions.len() as u64);
        info!(
            "Generated {}/{} questions for plan {} (weakness_mode={})",
            questions.len(),
            params.count,
            plan_id,
            params.weakness_mode
        );
        Ok(questions)
    }
}

/// 创建练习题生成服务
pub fn create_practice_service(
    plan_repository: Arc<dyn PlanRepository>,
    question_repository: Arc<dyn QuestionRepository>,
    attempt_repository: Arc<dyn AttemptRepository>,
    genai: Arc<dyn GenerativeClient>,
    media: Arc<dyn MediaPipeline>,
    metrics: Arc<AppMetrics>,
    max_parse_attempts: u32,
) -> Box<dyn PracticeService> {
    Box::new(PracticeServiceImpl::new(
        plan_repository,
        question_repository,
        attempt_repository,
        genai,
        media,
        metrics,
        max_parse_attempts,
    ))
}
