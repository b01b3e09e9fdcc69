//! 学习计划仓储

use async_trait::async_trait;
use surrealdb::{Surreal, engine::any::Any};

use crate::error::{AppError, Result};
use crate::models::plan::StudyPlan;

/// 学习计划仓储 trait
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// 创建学习计划
    async fn create(&self, plan: &StudyPlan) -> Result<StudyPlan>;

    /// 根据 ID 获取计划
    async fn get_by_id(&self, id: &str) -> Result<Option<StudyPlan>>;

    /// 按用户列出计划
    async fn list_by_user(&self, user_id: &str, limit: usize, start: usize)
    -> Result<Vec<StudyPlan>>;
}

/// 学习计划仓储实现
#[derive(Clone)]
pub struct PlanRepositoryImpl {
    db: Surreal<Any>,
}

impl PlanRepositoryImpl {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanRepository for PlanRepositoryImpl {
    async fn create(&self, plan: &StudyPlan) -> Result<StudyPlan> {
        let created: Option<StudyPlan> = self
            .db
            .create(("plan", plan.id.as_str()))
            .content(plan.clone())
            .await?;

        created.ok_or_else(|| AppError::Database(format!("Failed to create plan: {}", plan.id)))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<StudyPlan>> {
        let result: Option<StudyPlan> = self.db.select(("plan", id)).await?;
        Ok(result)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        limit: usize,
        start: usize,
    ) -> Result<Vec<StudyPlan>> {
        let query = "
            SELECT * FROM plan
            WHERE user_id = $user_id
            ORDER BY created_at DESC
            LIMIT $limit START $start
        ";
        let result: Vec<StudyPlan> = self
            .db
            .query(query)
            .bind(("user_id", user_id.to_string()))
            .bind(("limit", limit))
            .bind(("start", start))
            .await?
            .take(0)?;
        Ok(result)
    }
}
