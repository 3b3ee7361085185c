//! AI 服务的请求/响应结构与错误类型

use actix_web::http::StatusCode as HttpStatus;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ErrorCode;
use crate::models::quizzes::entities::{QuizDifficulty, QuizQuestion};

/// 调用 AI 服务时的错误
#[derive(Debug, Error)]
pub enum AiServiceError {
    /// 基础地址无法解析
    #[error("Invalid AI service URL: {0}")]
    InvalidUrl(String),
    /// 无法建立连接
    #[error("AI service is unavailable: {0}")]
    Unavailable(String),
    /// AI 服务返回 404
    #[error("AI service resource not found: {0}")]
    NotFound(String),
    /// 其他非 2xx 响应
    #[error("Unexpected AI service response ({status}): {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    /// 请求在收到响应前失败（超时、解码失败等）
    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// 响应缺少必要内容
    #[error("AI service returned an empty response")]
    EmptyResponse,
}

impl AiServiceError {
    /// 对外暴露的 HTTP 状态码：连接失败 503，资源不存在 404，其余 502
    pub fn status_code(&self) -> HttpStatus {
        match self {
            Self::Unavailable(_) => HttpStatus::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => HttpStatus::NOT_FOUND,
            _ => HttpStatus::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Unavailable(_) => ErrorCode::AiServiceUnavailable,
            Self::NotFound(_) => ErrorCode::AiResourceNotFound,
            _ => ErrorCode::AiServiceError,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProcessMaterialPayload<'a> {
    pub file_path: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProcessMaterialResult {
    #[serde(default)]
    pub extracted_text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IngestPayload<'a> {
    pub material_id: String,
    pub extracted_text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmbedPayload<'a> {
    pub lecture_id: String,
    pub chunks: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StudyBuddyPayload<'a> {
    pub question: &'a str,
    pub lecture_id: String,
}

/// 学习助手回答
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudyBuddyAnswer {
    pub answer: String,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub sources_used: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateQuizPayload<'a> {
    pub material_id: String,
    pub difficulty: &'a str,
    pub question_count: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateQuizResult {
    #[serde(default)]
    pub questions: Vec<GeneratedQuestion>,
}

/// AI 生成的题目
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: i32,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl GeneratedQuestion {
    pub fn into_quiz_question(self, difficulty: QuizDifficulty) -> QuizQuestion {
        QuizQuestion {
            question: self.question,
            options: self.options,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
            difficulty,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthResult {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: String,
}
