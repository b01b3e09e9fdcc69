//! 薄弱点分析 DTO

use serde::Serialize;

use crate::api::dto::practice_dto::QuestionView;
use crate::models::attempt::WeaknessTopic;
use crate::services::weakness::WeaknessReport;

/// 薄弱知识点视图
#[derive(Debug, Serialize)]
pub struct WeaknessTopicView {
    /// 知识点主题
    pub topic: String,
    /// 答错次数
    pub wrong_count: u64,
    /// 错误率（0.0 - 1.0）
    pub error_rate: f64,
}

impl From<WeaknessTopic> for WeaknessTopicView {
    fn from(topic: WeaknessTopic) -> Self {
        Self {
            topic: topic.topic,
            wrong_count: topic.wrong_count,
            error_rate: topic.error_rate,
        }
    }
}

/// 薄弱点报告响应
#[derive(Debug, Serialize)]
pub struct WeaknessReportResponse {
    /// 薄弱知识点（按答错次数降序）
    pub topics: Vec<WeaknessTopicView>,
    /// 复习推荐（复用历史题目）
    pub recommended: Vec<QuestionView>,
}

impl From<WeaknessReport> for WeaknessReportResponse {
    fn from(report: WeaknessReport) -> Self {
        Self {
            topics: report.topics.into_iter().map(Into::into).collect(),
            recommended: report.recommended.into_iter().map(Into::into).collect(),
        }
    }
}
