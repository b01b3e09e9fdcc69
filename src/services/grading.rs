//! 作答评判服务
//!
//! 每个答案发起一次结构化评判调用；评判彻底失败时落到"判错 + 通用
//! 解释"的降级结果，提交流程永不因单个答案的生成故障而中断。
//! 客户端可能携带过期题目 ID，查不到的题静默跳过。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::genai::client::GenerativeClient;
use crate::genai::retry::structured_with_retry;
use crate::models::attempt::AttemptLog;
use crate::models::attempt_repository::AttemptRepository;
use crate::models::plan_repository::PlanRepository;
use crate::models::question::PracticeQuestion;
use crate::models::question_repository::QuestionRepository;
use crate::observability::AppMetrics;

/// 评分阈值：达到即给予肯定性总结
const PRAISE_THRESHOLD: u32 = 80;

/// 评判降级时的通用解释
const DEGRADED_EXPLANATION: &str =
    "We could not grade this answer automatically. Please compare it with the reference explanation.";

/// 单题提交
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerSubmission {
    /// 题目 ID
    pub question_id: String,
    /// 提交的答案
    pub answer: String,
}

/// 单题评判结果
#[derive(Debug, Clone, Serialize)]
pub struct GradedAnswer {
    /// 题目 ID
    pub question_id: String,
    /// 是否正确
    pub is_correct: bool,
    /// 评判解析
    pub explanation: String,
    /// 薄弱点标签
    pub weakness_tag: Option<String>,
}

/// 整卷提交结果
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    /// 百分制得分（四舍五入）
    pub score: u32,
    /// 总结文案
    pub message: String,
    /// 逐题结果
    pub results: Vec<GradedAnswer>,
}

/// 评判调用的结构化形状
#[derive(Debug, Deserialize)]
struct GradeVerdict {
    is_correct: bool,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    weakness_tag: Option<String>,
}

impl GradeVerdict {
    fn degraded() -> Self {
        Self {
            is_correct: false,
            explanation: DEGRADED_EXPLANATION.to_string(),
            weakness_tag: None,
        }
    }
}

/// 作答评判服务 trait
#[async_trait]
pub trait GradingService: Send + Sync {
    /// 评判一批提交并落作答日志
    async fn submit(
        &self,
        user_id: &str,
        plan_id: &str,
        answers: Vec<AnswerSubmission>,
    ) -> Result<SubmissionOutcome>;
}

/// 作答评判服务实现
pub struct GradingServiceImpl {
    plan_repository: Arc<dyn PlanRepository>,
    question_repository: Arc<dyn QuestionRepository>,
    attempt_repository: Arc<dyn AttemptRepository>,
    genai: Arc<dyn GenerativeClient>,
    metrics: Arc<AppMetrics>,
    max_parse_attempts: u32,
}

impl GradingServiceImpl {
    pub fn new(
        plan_repository: Arc<dyn PlanRepository>,
        question_repository: Arc<dyn QuestionRepository>,
        attempt_repository: Arc<dyn AttemptRepository>,
        genai: Arc<dyn GenerativeClient>,
        metrics: Arc<AppMetrics>,
        max_parse_attempts: u32,
    ) -> Self {
        Self {
            plan_repository,
            question_repository,
            attempt_repository,
            genai,
            metrics,
            max_parse_attempts,
        }
    }

    async fn grade_one(&self, question: &PracticeQuestion, answer: &str) -> GradeVerdict {
        let prompt = build_grading_prompt(question, answer);
        let outcome =
            structured_with_retry::<GradeVerdict>(&*self.genai, &prompt, self.max_parse_attempts)
                .await
                .or_degraded(GradeVerdict::degraded());
        if outcome.is_degraded() {
            self.metrics.record_degraded();
        }
        outcome.into_inner()
    }
}

/// 构造评判提示词
fn build_grading_prompt(question: &PracticeQuestion, answer: &str) -> String {
    format!(
        "You are grading a student's answer for a tutoring application.\n\
         Question: {}\n\
         Reference answer: {}\n\
         Reference explanation: {}\n\
         Student answer: {}\n\
         Respond with a single JSON object: {{\"is_correct\": boolean, \
         \"explanation\": string (one short paragraph for the student), \
         \"weakness_tag\": string (short concept label) or null}}. No prose outside JSON.",
        question.payload.question, question.payload.answer, question.payload.explanation, answer
    )
}

/// 百分制得分，零题提交得 0 分而不是除零错误
fn compute_score(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * correct as f64 / total as f64).round() as u32
}

/// 按固定阈值选择总结文案
fn summary_message(score: u32) -> &'static str {
    if score >= PRAISE_THRESHOLD {
        "Great work! You have a solid grasp of this material."
    } else {
        "Keep practicing. Review the explanations below and try again."
    }
}

#[async_trait]
impl GradingService for GradingServiceImpl {
    async fn submit(
        &self,
        user_id: &str,
        plan_id: &str,
        answers: Vec<AnswerSubmission>,
    ) -> Result<SubmissionOutcome> {
        self.plan_repository
            .get_by_id(plan_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Plan not found: {}", plan_id)))?;

        let mut results = Vec::with_capacity(answers.len());

        for submission in answers {
            let Some(question) = self
                .question_repository
                .get_by_question_id(&submission.question_id)
                .await?
            else {
                // 过期的客户端题目 ID，容忍并跳过
                debug!("Skipping unknown question: {}", submission.question_id);
                continue;
            };

            let verdict = self.grade_one(&question, &submission.answer).await;

            let log = AttemptLog::new(
                user_id,
                plan_id,
                &question.id,
                &submission.answer,
                verdict.is_correct,
                &verdict.explanation,
                verdict.weakness_tag.clone(),
            );
            self.attempt_repository.create(&log).await?;

            results.push(GradedAnswer {
                question_id: question.id,
                is_correct: verdict.is_correct,
                explanation: verdict.explanation,
                weakness_tag: verdict.weakness_tag,
            });
        }

        let correct = results.iter().filter(|r| r.is_correct).count();
        let score = compute_score(correct, results.len());

        info!(
            "Graded {} answers for plan {}: score {}",
            results.len(),
            plan_id,
            score
        );

        Ok(SubmissionOutcome {
            score,
            message: summary_message(score).to_string(),
            results,
        })
    }
}

/// 创建作答评判服务
pub fn create_grading_service(
    plan_repository: Arc<dyn PlanRepository>,
    question_repository: Arc<dyn QuestionRepository>,
    attempt_repository: Arc<dyn AttemptRepository>,
    genai: Arc<dyn GenerativeClient>,
    metrics: Arc<AppMetrics>,
    max_parse_attempts: u32,
) -> Box<dyn GradingService> {
    Box::new(GradingServiceImpl::new(
        plan_repository,
        question_repository,
        attempt_repository,
        genai,
        metrics,
        max_parse_attempts,
    ))
}
