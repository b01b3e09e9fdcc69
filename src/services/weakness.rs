//! 薄弱点分析服务
//!
//! 从作答日志按需聚合薄弱知识点，并为每个知识点挑出曾答错的题目
//! 作为复习推荐。推荐只复用已持久化的题目与其制品引用，分析路径
//! 不触发任何生成调用。

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::attempt::WeaknessTopic;
use crate::models::attempt_repository::AttemptRepository;
use crate::models::plan_repository::PlanRepository;
use crate::models::question::PracticeQuestion;
use crate::models::question_repository::QuestionRepository;

/// 纳入报告的薄弱知识点上限
const REPORT_TOPIC_LIMIT: usize = 5;

/// 每个知识点的复习推荐题数
const RECOMMEND_PER_TOPIC: usize = 2;

/// 薄弱点报告
#[derive(Debug, Clone, Serialize)]
pub struct WeaknessReport {
    /// 按答错次数降序的薄弱知识点
    pub topics: Vec<WeaknessTopic>,
    /// 复习推荐（复用历史题目，跨知识点去重）
    pub recommended: Vec<PracticeQuestion>,
}

/// 薄弱点分析服务 trait
#[async_trait]
pub trait WeaknessService: Send + Sync {
    /// 分析用户在某学习计划下的薄弱点
    async fn analyze(&self, user_id: &str, plan_id: &str) -> Result<WeaknessReport>;
}

/// 薄弱点分析服务实现
pub struct WeaknessServiceImpl {
    plan_repository: Arc<dyn PlanRepository>,
    question_repository: Arc<dyn QuestionRepository>,
    attempt_repository: Arc<dyn AttemptRepository>,
}

impl WeaknessServiceImpl {
    pub fn new(
        plan_repository: Arc<dyn PlanRepository>,
        question_repository: Arc<dyn QuestionRepository>,
        attempt_repository: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            plan_repository,
            question_repository,
            attempt_repository,
        }
    }
}

#[async_trait]
impl WeaknessService for WeaknessServiceImpl {
    async fn analyze(&self, user_id: &str, plan_id: &str) -> Result<WeaknessReport> {
        self.plan_repository
            .get_by_id(plan_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Plan not found: {}", plan_id)))?;

        let topics = self
            .attempt_repository
            .top_weak_topics(user_id, plan_id, REPORT_TOPIC_LIMIT)
            .await?;

        let mut recommended_ids: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for topic in &topics {
            let wrong_ids = self
                .attempt_repository
                .wrong_question_ids(user_id, plan_id, &topic.topic, RECOMMEND_PER_TOPIC)
                .await?;
            for id in wrong_ids {
                if seen.insert(id.clone()) {
                    recommended_ids.push(id);
                }
            }
        }

        let recommended = self.question_repository.get_many(&recommended_ids).await?;

        info!(
            "Weakness analysis for plan {}: {} topics, {} recommendations",
            plan_id,
            topics.len(),
            recommended.len()
        );

        Ok(WeaknessReport {
            topics,
            recommended,
        })
    }
}

/// 创建薄弱点分析服务
pub fn create_weakness_service(
    plan_repository: Arc<dyn PlanRepository>,
    question_repository: Arc<dyn QuestionRepository>,
    attempt_repository: Arc<dyn AttemptRepository>,
) -> Box<dyn WeaknessService> {
    Box::new(WeaknessServiceImpl::new(
        plan_repository,
        question_repository,
        attempt_repository,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attempt::AttemptLog;
    use crate::models::plan::StudyPlan;
    use crate::models::question::{GeneratedQuestion, QuestionType};
    use crate::services::test_support::{
        CountingClient, InMemoryAttemptRepository, InMemoryPlanRepository,
        InMemoryQuestionRepository,
    };
    use std::sync::atomic::Ordering;

    fn question(plan_id: &str, text: &str, topic: &str) -> PracticeQuestion {
        PracticeQuestion::from_generated(
            plan_id,
            GeneratedQuestion {
                question: text.to_string(),
                question_type: QuestionType::ShortAnswer,
                topic: topic.to_string(),
                difficulty: Some(2),
                choices: None,
                answer: "a".to_string(),
                explanation: "e".to_string(),
                image_prompt: None,
            },
            2,
            Some("images/cached.png".to_string()),
        )
    }

    struct Fixture {
        plan: StudyPlan,
        question_repo: Arc<InMemoryQuestionRepository>,
        attempt_repo: Arc<InMemoryAttemptRepository>,
        service: WeaknessServiceImpl,
    }

    fn fixture() -> Fixture {
        let plan = StudyPlan::new("u1", "math review", None);
        let plan_repo = Arc::new(InMemoryPlanRepository::with_plan(plan.clone()));
        let question_repo = Arc::new(InMemoryQuestionRepository::default());
        let attempt_repo = Arc::new(InMemoryAttemptRepository::default());

        let service = WeaknessServiceImpl::new(
            plan_repo,
            question_repo.clone(),
            attempt_repo.clone(),
        );

        Fixture {
            plan,
            question_repo,
            attempt_repo,
            service,
        }
    }

    async fn log_wrong(f: &Fixture, question_id: &str, topic: &str) {
        let log = AttemptLog::new(
            "u1",
            &f.plan.id,
            question_id,
            "wrong",
            false,
            "no",
            Some(topic.to_string()),
        );
        f.attempt_repo.create(&log).await.unwrap();
    }

    #[tokio::test]
    async fn test_topics_ranked_by_wrong_count() {
        let f = fixture();

        let q1 = question(&f.plan.id, "q1", "fractions");
        let q2 = question(&f.plan.id, "q2", "fractions");
        let q3 = question(&f.plan.id, "q3", "decimals");
        for q in [&q1, &q2, &q3] {
            f.question_repo.insert(q.clone());
        }

        log_wrong(&f, &q1.id, "fractions").await;
        log_wrong(&f, &q2.id, "fractions").await;
        log_wrong(&f, &q3.id, "decimals").await;

        let report = f.service.analyze("u1", &f.plan.id).await.unwrap();

        assert_eq!(report.topics.len(), 2);
        assert_eq!(report.topics[0].topic, "fractions");
        assert_eq!(report.topics[0].wrong_count, 2);
        assert_eq!(report.topics[1].topic, "decimals");
    }

    #[tokio::test]
    async fn test_recommendations_reuse_stored_questions() {
        let f = fixture();

        let q1 = question(&f.plan.id, "q1", "fractions");
        f.question_repo.insert(q1.clone());
        log_wrong(&f, &q1.id, "fractions").await;

        let report = f.service.analyze("u1", &f.plan.id).await.unwrap();

        assert_eq!(report.recommended.len(), 1);
        assert_eq!(report.recommended[0].id, q1.id);
        // 制品引用原样带回，没有重新合成
        assert_eq!(
            report.recommended[0].image_reference.as_deref(),
            Some("images/cached.png")
        );
    }

    #[tokio::test]
    async fn test_recommendations_deduped_across_topics() {
        let f = fixture();

        let q1 = question(&f.plan.id, "q1", "fractions");
        f.question_repo.insert(q1.clone());
        // 同一题多次答错只推荐一次
        log_wrong(&f, &q1.id, "fractions").await;
        log_wrong(&f, &q1.id, "fractions").await;

        let report = f.service.analyze("u1", &f.plan.id).await.unwrap();
        assert_eq!(report.recommended.len(), 1);
    }

    #[tokio::test]
    async fn test_analysis_makes_no_synthesis_calls() {
        let client = Arc::new(CountingClient::scripted(vec![]));
        let plan = StudyPlan::new("u1", "math review", None);
        let plan_repo = Arc::new(InMemoryPlanRepository::with_plan(plan.clone()));
        let question_repo = Arc::new(InMemoryQuestionRepository::default());
        let attempt_repo = Arc::new(InMemoryAttemptRepository::default());

        let q1 = question(&plan.id, "q1", "fractions");
        question_repo.insert(q1.clone());
        attempt_repo
            .create(&AttemptLog::new(
                "u1",
                &plan.id,
                &q1.id,
                "wrong",
                false,
                "no",
                Some("fractions".to_string()),
            ))
            .await
            .unwrap();

        let service = WeaknessServiceImpl::new(plan_repo, question_repo, attempt_repo);
        let report = service.analyze("u1", &plan.id).await.unwrap();

        // 推荐携带既有配图引用，但整个分析路径零生成调用
        assert_eq!(report.recommended.len(), 1);
        assert_eq!(
            report.recommended[0].image_reference.as_deref(),
            Some("images/cached.png")
        );
        assert_eq!(client.complete_calls.load(Ordering::SeqCst), 0);
        assert_eq!(client.image_count(), 0);
        assert_eq!(client.speech_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_history_yields_empty_report() {
        let f = fixture();

        let report = f.service.analyze("u1", &f.plan.id).await.unwrap();
        assert!(report.topics.is_empty());
        assert!(report.recommended.is_empty());
    }

    #[tokio::test]
    async fn test_missing_plan_rejected() {
        let f = fixture();

        let err = f.service.analyze("u1", "no-such-plan").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_correct_answers_do_not_surface_topics() {
        let f = fixture();

        let q1 = question(&f.plan.id, "q1", "fractions");
        f.question_repo.insert(q1.clone());
        let log = AttemptLog::new(
            "u1",
            &f.plan.id,
            &q1.id,
            "right",
            true,
            "ok",
            Some("fractions".to_string()),
        );
        f.attempt_repo.create(&log).await.unwrap();

        let report = f.service.analyze("u1", &f.plan.id).await.unwrap();
        assert!(report.topics.is_empty());
    }
}
