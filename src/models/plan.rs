use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 学习计划
///
/// 计划/目标本身属于外部协作方，这里只保留练习引擎所需的最小面：
/// 生成提示词用的学习目标与归属用户。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyPlan {
    /// 计划唯一标识（存储层用 `plan_id`，`id` 为 SurrealDB 保留字段）
    #[serde(rename = "plan_id")]
    pub id: String,

    /// 归属用户
    pub user_id: String,

    /// 学习目标（提示词素材）
    pub goal: String,

    /// 学科
    pub subject: Option<String>,

    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl StudyPlan {
    /// 创建新学习计划
    pub fn new(user_id: &str, goal: &str, subject: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            goal: goal.to_string(),
            subject,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_create() {
        let plan = StudyPlan::new("u1", "basic arithmetic", Some("math".into()));
        assert_eq!(plan.user_id, "u1");
        assert_eq!(plan.goal, "basic arithmetic");
        assert!(!plan.id.is_empty());
    }
}
