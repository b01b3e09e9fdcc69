//! 练习生成 DTO
//!
//! 对外的题目视图不携带参考答案、解析与内容哈希，这些只在评判
//! 路径内部使用。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question::{PracticeQuestion, QuestionType};

/// 练习生成请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct GeneratePracticeRequest {
    /// 题目数量
    pub count: Option<usize>,
    /// 目标难度（1-5）
    pub difficulty: Option<u8>,
    /// 是否按薄弱点定向出题
    pub weakness_mode: Option<bool>,
}

/// 对外题目视图
#[derive(Debug, Serialize)]
pub struct QuestionView {
    /// 题目 ID
    pub question_id: String,
    /// 知识点主题
    pub topic: String,
    /// 题型
    pub question_type: QuestionType,
    /// 难度（1-5）
    pub difficulty: u8,
    /// 题干
    pub question: String,
    /// 选项（仅选择题）
    pub choices: Option<Vec<String>>,
    /// 配图引用
    pub image_reference: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl From<PracticeQuestion> for QuestionView {
    fn from(question: PracticeQuestion) -> Self {
        Self {
            question_id: question.id,
            topic: question.topic,
            question_type: question.question_type,
            difficulty: question.difficulty,
            question: question.payload.question,
            choices: question.payload.choices,
            image_reference: question.image_reference,
            created_at: question.created_at,
        }
    }
}

/// 练习生成响应
#[derive(Debug, Serialize)]
pub struct GeneratePracticeResponse {
    /// 计划 ID
    pub plan_id: String,
    /// 生成的题目
    pub questions: Vec<QuestionView>,
    /// 本批数量
    pub count: usize,
}
