//! 作答记录仓储
//!
//! 追加写入作答日志，并为薄弱点分析提供按 (user, plan) 的聚合查询。
//! 错误次数与错误率是真实聚合值，不是占位数据。

use async_trait::async_trait;
use serde::Deserialize;
use surrealdb::{Surreal, engine::any::Any};

use crate::error::{AppError, Result};
use crate::models::attempt::{AttemptLog, WeaknessTopic};

/// 作答记录仓储 trait
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// 追加作答记录
    async fn create(&self, log: &AttemptLog) -> Result<AttemptLog>;

    /// 按答错次数取薄弱知识点 Top-K
    async fn top_weak_topics(
        &self,
        user_id: &str,
        plan_id: &str,
        k: usize,
    ) -> Result<Vec<WeaknessTopic>>;

    /// 某知识点下曾答错的题目 ID（去重）
    async fn wrong_question_ids(
        &self,
        user_id: &str,
        plan_id: &str,
        topic: &str,
        limit: usize,
    ) -> Result<Vec<String>>;
}

/// 聚合查询行
#[derive(Debug, Deserialize)]
struct TopicRow {
    topic: String,
    wrong_count: u64,
    attempts: u64,
}

#[derive(Debug, Deserialize)]
struct QuestionIdRow {
    question_id: String,
}

/// 作答记录仓储实现
#[derive(Clone)]
pub struct AttemptRepositoryImpl {
    db: Surreal<Any>,
}

impl AttemptRepositoryImpl {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttemptRepository for AttemptRepositoryImpl {
    async fn create(&self, log: &AttemptLog) -> Result<AttemptLog> {
        let created: Option<AttemptLog> = self
            .db
            .create(("attempt_log", log.id.as_str()))
            .content(log.clone())
            .await?;

        created
            .ok_or_else(|| AppError::Database(format!("Failed to create attempt log: {}", log.id)))
    }

    async fn top_weak_topics(
        &self,
        user_id: &str,
        plan_id: &str,
        k: usize,
    ) -> Result<Vec<WeaknessTopic>> {
        let query = "
            SELECT weakness_tag AS topic,
                   count(is_correct = false) AS wrong_count,
                   count() AS attempts
            FROM attempt_log
            WHERE user_id = $user_id
              AND plan_id = $plan_id
              AND weakness_tag != NONE
            GROUP BY topic
            ORDER BY wrong_count DESC
            LIMIT $k
        ";
        let rows: Vec<TopicRow> = self
            .db
            .query(query)
            .bind(("user_id", user_id.to_string()))
            .bind(("plan_id", plan_id.to_string()))
            .bind(("k", k))
            .await?
            .take(0)?;

        Ok(rows
            .into_iter()
            .filter(|row| row.wrong_count > 0)
            .map(|row| WeaknessTopic::from_counts(&row.topic, row.wrong_count, row.attempts))
            .collect())
    }

    async fn wrong_question_ids(
        &self,
        user_id: &str,
        plan_id: &str,
        topic: &str,
        limit: usize,
    ) -> Result<Vec<String>> {
        let query = "
            SELECT question_id FROM attempt_log
            WHERE user_id = $user_id
              AND plan_id = $plan_id
              AND weakness_tag = $topic
              AND is_correct = false
            GROUP BY question_id
            LIMIT $limit
        ";
        let rows: Vec<QuestionIdRow> = self
            .db
            .query(query)
            .bind(("user_id", user_id.to_string()))
            .bind(("plan_id", plan_id.to_string()))
            .bind(("topic", topic.to_string()))
            .bind(("limit", limit))
            .await?
            .take(0)?;

        Ok(rows.into_iter().map(|row| row.question_id).collect())
    }
}
