use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SurrealDB 连接地址
    pub url: String,
    /// 命名空间
    pub namespace: String,
    /// 数据库名称
    pub database: String,
    /// 用户名
    pub username: String,
    /// 密码
    pub password: String,
    /// 连接超时（秒）
    pub connection_timeout: u64,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
    /// 最大请求体大小（字节）
    pub max_request_size: usize,
}

/// 安全配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// API 密钥（为空时不校验）
    pub api_key: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
}

/// 生成式后端配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GenAiConfig {
    /// 后端地址（OpenAI 兼容）
    pub base_url: String,
    /// API 密钥
    pub api_key: String,
    /// 文本/结构化补全模型
    pub completion_model: String,
    /// 图像合成模型
    pub image_model: String,
    /// 语音合成模型
    pub speech_model: String,
    /// 默认语音音色
    pub default_voice: String,
    /// 请求超时（秒）
    pub request_timeout: u64,
    /// 结构化解码最大尝试次数
    pub max_parse_attempts: u32,
}

/// 制品存储配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ArtifactConfig {
    /// 制品根目录
    pub data_dir: PathBuf,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 服务器配置
    pub server: ServerConfig,
    /// 安全配置
    pub security: SecurityConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 生成式后端配置
    pub genai: GenAiConfig,
    /// 制品存储配置
    pub artifacts: ArtifactConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            database: DatabaseConfig {
                url: "ws://localhost:8000".into(),
                namespace: "minerva".into(),
                database: "practice".into(),
                username: "root".into(),
                password: "root".into(),
                connection_timeout: 30,
            },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                request_timeout: 120,
                max_request_size: 10 * 1024 * 1024,
            },
            security: SecurityConfig {
                api_key: String::new(),
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: true,
            },
            genai: GenAiConfig {
                base_url: "http://localhost:11434".into(),
                api_key: String::new(),
                completion_model: "gpt-4o-mini".into(),
                image_model: "dall-e-3".into(),
                speech_model: "tts-1".into(),
                default_voice: "alloy".into(),
                request_timeout: 120,
                max_parse_attempts: 2,
            },
            artifacts: ArtifactConfig {
                data_dir: PathBuf::from("./data/artifacts"),
            },
            app_name: "minerva".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config
    }
}
