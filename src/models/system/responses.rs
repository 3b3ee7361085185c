use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct SystemSettingsResponse {
    pub system_name: String,             // 系统名称
    pub max_file_size: u64,              // 单文件最大字节数
    pub allowed_file_types: Vec<String>, // 允许的资料类型
    pub environment: String,             // 运行环境
    pub log_level: String,               // 日志级别
}

/// 服务健康状态
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
    pub uptime_seconds: i64,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

/// AI 服务健康状态
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct AiHealthResponse {
    pub ai_service: String,
    pub base_url: String,
}
