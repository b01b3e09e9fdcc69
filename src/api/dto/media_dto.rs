//! 媒体合成 DTO

use serde::{Deserialize, Serialize};

/// 语音合成请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SynthesizeSpeechRequest {
    /// 待朗读文本
    pub text: String,
    /// 音色（缺省使用服务配置）
    pub voice: Option<String>,
}

/// 语音合成响应
#[derive(Debug, Serialize)]
pub struct SynthesizeSpeechResponse {
    /// 音频制品引用（合成不可用时为空）
    pub reference: Option<String>,
}
