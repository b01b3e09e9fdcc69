//! 学习计划 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::plan::StudyPlan;

/// 创建学习计划请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CreatePlanRequest {
    /// 学习目标
    pub goal: String,
    /// 学科
    pub subject: Option<String>,
}

/// 学习计划响应
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    /// 计划 ID
    pub plan_id: String,
    /// 学习目标
    pub goal: String,
    /// 学科
    pub subject: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl From<StudyPlan> for PlanResponse {
    fn from(plan: StudyPlan) -> Self {
        Self {
            plan_id: plan.id,
            goal: plan.goal,
            subject: plan.subject,
            created_at: plan.created_at,
        }
    }
}

/// 学习计划列表响应
#[derive(Debug, Serialize)]
pub struct PlanListResponse {
    /// 计划列表
    pub plans: Vec<PlanResponse>,
    /// 本页数量
    pub count: usize,
}
