//! 题目仓储
//!
//! 题目按生成的 uuid 作为记录键持久化；题干哈希通过独立的
//! `question_hash` 声明表做存储级去重，并发下的重复插入会以
//! "already exists" 的形式暴露并被当作重复跳过。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{Surreal, engine::any::Any};

use crate::error::{AppError, Result};
use crate::models::question::PracticeQuestion;

/// 哈希占位记录（question_hash 表的内容）
#[derive(Debug, Serialize, Deserialize)]
struct HashClaim {
    question_id: String,
    created_at: DateTime<Utc>,
}

/// 题目仓储 trait
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// 持久化题目，题干哈希已存在时返回 false（不写入）
    async fn create_if_new(&self, question: &PracticeQuestion) -> Result<bool>;

    /// 题干哈希是否已存在
    async fn exists_by_hash(&self, content_hash: &str) -> Result<bool>;

    /// 根据题目 ID 获取
    async fn get_by_question_id(&self, question_id: &str) -> Result<Option<PracticeQuestion>>;

    /// 批量获取，缺失的 ID 静默跳过
    async fn get_many(&self, question_ids: &[String]) -> Result<Vec<PracticeQuestion>>;

    /// 按计划列出题目
    async fn list_by_plan(
        &self,
        plan_id: &str,
        limit: usize,
        start: usize,
    ) -> Result<Vec<PracticeQuestion>>;

    /// 按计划统计题目数量
    async fn count_by_plan(&self, plan_id: &str) -> Result<u64>;
}

/// 题目仓储实现
#[derive(Clone)]
pub struct QuestionRepositoryImpl {
    db: Surreal<Any>,
}

impl QuestionRepositoryImpl {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    /// 占位题干哈希，已被占位时返回 false
    async fn claim_hash(&self, question: &PracticeQuestion) -> Result<bool> {
        let claim = HashClaim {
            question_id: question.id.clone(),
            created_at: Utc::now(),
        };

        let created: std::result::Result<Option<HashClaim>, surrealdb::Error> = self
            .db
            .create(("question_hash", question.content_hash.as_str()))
            .content(claim)
            .await;

        match created {
            Ok(Some(_)) => Ok(true),
            Ok(None) => Ok(false),
            // 记录键冲突即并发重复，按"已存在，跳过"处理
            Err(e) if e.to_string().contains("already exists") => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl QuestionRepository for QuestionRepositoryImpl {
    async fn create_if_new(&self, question: &PracticeQuestion) -> Result<bool> {
        if !self.claim_hash(question).await? {
            return Ok(false);
        }

        let created: Option<PracticeQuestion> = self
            .db
            .create(("question", question.id.as_str()))
            .content(question.clone())
            .await?;

        created
            .map(|_| true)
            .ok_or_else(|| AppError::Database(format!("Failed to create question: {}", question.id)))
    }

    async fn exists_by_hash(&self, content_hash: &str) -> Result<bool> {
        let claim: Option<HashClaim> = self.db.select(("question_hash", content_hash)).await?;
        Ok(claim.is_some())
    }

    async fn get_by_question_id(&self, question_id: &str) -> Result<Option<PracticeQuestion>> {
        let result: Option<PracticeQuestion> = self.db.select(("question", question_id)).await?;
        Ok(result)
    }

    async fn get_many(&self, question_ids: &[String]) -> Result<Vec<PracticeQuestion>> {
        let mut questions = Vec::with_capacity(question_ids.len());

        for id in question_ids {
            if let Some(question) = self.get_by_question_id(id).await? {
                questions.push(question);
            }
        }

        Ok(questions)
    }

    async fn list_by_plan(
        &self,
        plan_id: &str,
        limit: usize,
        start: usize,
    ) -> Result<Vec<PracticeQuestion>> {
        let query = "
            SELECT * FROM question
            WHERE plan_id = $plan_id
            ORDER BY created_at DESC
            LIMIT $limit START $start
        ";
        let result: Vec<PracticeQuestion> = self
            .db
            .query(query)
            .bind(("plan_id", plan_id.to_string()))
            .bind(("limit", limit))
            .bind(("start", start))
            .await?
            .take(0)?;
        Ok(result)
    }

    async fn count_by_plan(&self, plan_id: &str) -> Result<u64> {
        let query = "
            SELECT count() FROM question
            WHERE plan_id = $plan_id
            GROUP ALL
        ";
        let result: Vec<serde_json::Value> = self
            .db
            .query(query)
            .bind(("plan_id", plan_id.to_string()))
            .await?
            .take(0)?;
        Ok(result
            .first()
            .and_then(|v| v.get("count"))
            .and_then(|c| c.as_u64())
            .unwrap_or(0))
    }
}
