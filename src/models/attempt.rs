use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 作答记录
///
/// 每次提交一条，创建后不可变，由薄弱点分析按需聚合。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptLog {
    /// 记录唯一标识（存储层用 `attempt_id`，`id` 为 SurrealDB 保留字段）
    #[serde(rename = "attempt_id")]
    pub id: String,

    /// 作答用户
    pub user_id: String,

    /// 所属学习计划
    pub plan_id: String,

    /// 题目标识
    pub question_id: String,

    /// 提交的答案
    pub submitted_answer: String,

    /// 是否正确
    pub is_correct: bool,

    /// AI 评判解析
    pub explanation: String,

    /// 薄弱点标签（评判失败或无法归因时为空）
    pub weakness_tag: Option<String>,

    /// 作答时间
    pub solved_at: DateTime<Utc>,
}

impl AttemptLog {
    /// 创建新作答记录
    pub fn new(
        user_id: &str,
        plan_id: &str,
        question_id: &str,
        submitted_answer: &str,
        is_correct: bool,
        explanation: &str,
        weakness_tag: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            plan_id: plan_id.to_string(),
            question_id: question_id.to_string(),
            submitted_answer: submitted_answer.to_string(),
            is_correct,
            explanation: explanation.to_string(),
            weakness_tag: weakness_tag.filter(|t| !t.trim().is_empty()),
            solved_at: Utc::now(),
        }
    }
}

/// 薄弱知识点（派生数据，不持久化）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeaknessTopic {
    /// 知识点主题
    pub topic: String,
    /// 答错次数
    pub wrong_count: u64,
    /// 错误率（0.0 - 1.0）
    pub error_rate: f64,
}

impl WeaknessTopic {
    /// 按答错次数与总次数计算错误率
    pub fn from_counts(topic: &str, wrong_count: u64, attempts: u64) -> Self {
        let error_rate = if attempts == 0 {
            0.0
        } else {
            wrong_count as f64 / attempts as f64
        };
        Self {
            topic: topic.to_string(),
            wrong_count,
            error_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_log_blank_tag_normalized() {
        let log = AttemptLog::new("u1", "p1", "q1", "42", true, "ok", Some("  ".into()));
        assert!(log.weakness_tag.is_none());

        let log = AttemptLog::new("u1", "p1", "q1", "42", false, "no", Some("fractions".into()));
        assert_eq!(log.weakness_tag.as_deref(), Some("fractions"));
    }

    #[test]
    fn test_weakness_topic_error_rate() {
        let topic = WeaknessTopic::from_counts("fractions", 3, 4);
        assert_eq!(topic.wrong_count, 3);
        assert!((topic.error_rate - 0.75).abs() < f64::EPSILON);

        let empty = WeaknessTopic::from_counts("fractions", 0, 0);
        assert_eq!(empty.error_rate, 0.0);
    }
}
