use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::key::content_hash;

/// 题目类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// 选择题
    MultipleChoice,
    /// 简答题
    ShortAnswer,
    /// 论述题
    LongAnswer,
    /// 代码填空
    CodeFill,
    /// 代码实现
    CodeImplementation,
    /// 绘图题
    Drawing,
    /// 口述录音题
    AudioRecording,
    /// 视频题
    Video,
    /// 看图分析题
    VisualAnalysis,
}

impl Default for QuestionType {
    fn default() -> Self {
        QuestionType::ShortAnswer
    }
}

/// 生成批次中的单个题目载荷
///
/// 生成式后端按此结构返回批次；答案与解析仅供评判和推荐复用，
/// 不会随对外题目视图泄露。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    /// 题干文本
    pub question: String,
    /// 题目类型
    #[serde(default)]
    pub question_type: QuestionType,
    /// 知识点主题
    #[serde(default)]
    pub topic: String,
    /// 难度（1-5）
    #[serde(default)]
    pub difficulty: Option<u8>,
    /// 选择题选项
    #[serde(default)]
    pub choices: Option<Vec<String>>,
    /// 参考答案
    #[serde(default)]
    pub answer: String,
    /// 答案解析
    #[serde(default)]
    pub explanation: String,
    /// 配图指令（非空表示需要配图）
    #[serde(default)]
    pub image_prompt: Option<String>,
}

impl GeneratedQuestion {
    /// 题目是否声明需要配图
    pub fn needs_image(&self) -> bool {
        self.image_prompt
            .as_deref()
            .map(|p| !p.trim().is_empty())
            .unwrap_or(false)
    }
}

/// 练习题实体
///
/// `content_hash` 是题干文本的 sha256，既是去重依据也是存储记录键，
/// 同一哈希的题目最多持久化一条。创建后不再修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeQuestion {
    /// 题目唯一标识（存储层用 `question_id`，`id` 为 SurrealDB 保留字段）
    #[serde(rename = "question_id")]
    pub id: String,

    /// 所属学习计划
    pub plan_id: String,

    /// 题干内容哈希
    pub content_hash: String,

    /// 知识点主题
    pub topic: String,

    /// 题目类型
    pub question_type: QuestionType,

    /// 难度（1-5）
    pub difficulty: u8,

    /// 配图制品引用
    pub image_reference: Option<String>,

    /// 原始生成载荷（答案/解析查询用）
    pub payload: GeneratedQuestion,

    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl PracticeQuestion {
    /// 从生成载荷创建题目
    pub fn from_generated(
        plan_id: &str,
        generated: GeneratedQuestion,
        fallback_difficulty: u8,
        image_reference: Option<String>,
    ) -> Self {
        let difficulty = generated
            .difficulty
            .filter(|d| (1..=5).contains(d))
            .unwrap_or(fallback_difficulty);

        Self {
            id: Uuid::new_v4().to_string(),
            plan_id: plan_id.to_string(),
            content_hash: content_hash(&generated.question),
            topic: generated.topic.clone(),
            question_type: generated.question_type,
            difficulty,
            image_reference,
            payload: generated,
            created_at: Utc::now(),
        }
    }
}
