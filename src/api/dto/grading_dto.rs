//! 作答提交 DTO

use serde::{Deserialize, Serialize};

use crate::services::grading::{GradedAnswer, SubmissionOutcome};

/// 单题作答
#[derive(Debug, Deserialize)]
pub struct AnswerItem {
    /// 题目 ID
    pub question_id: String,
    /// 提交的答案
    pub answer: String,
}

/// 整卷提交请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SubmitAnswersRequest {
    /// 逐题作答
    pub answers: Vec<AnswerItem>,
}

/// 单题评判视图
#[derive(Debug, Serialize)]
pub struct GradedAnswerView {
    /// 题目 ID
    pub question_id: String,
    /// 是否正确
    pub is_correct: bool,
    /// 评判解析
    pub explanation: String,
    /// 薄弱点标签
    pub weakness_tag: Option<String>,
}

impl From<GradedAnswer> for GradedAnswerView {
    fn from(graded: GradedAnswer) -> Self {
        Self {
            question_id: graded.question_id,
            is_correct: graded.is_correct,
            explanation: graded.explanation,
            weakness_tag: graded.weakness_tag,
        }
    }
}

/// 整卷提交响应
#[derive(Debug, Serialize)]
pub struct SubmitAnswersResponse {
    /// 百分制得分
    pub score: u32,
    /// 总结文案
    pub message: String,
    /// 逐题结果
    pub results: Vec<GradedAnswerView>,
}

impl From<SubmissionOutcome> for SubmitAnswersResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        Self {
            score: outcome.score,
            message: outcome.message,
            results: outcome.results.into_iter().map(Into::into).collect(),
        }
    }
}
