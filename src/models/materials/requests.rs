use super::entities::{AiStatus, MaterialFileType, MaterialStatus};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct StudyBuddyRequest {
    pub question: String,
    pub material_id: i64,
}

// 新建资料记录（用于存储层）
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub course_id: i64,
    pub uploaded_by: i64,
    pub title: String,
    pub file_name: String,
    pub stored_name: String,
    pub file_type: MaterialFileType,
}

// 资料处理状态更新，None 表示不修改
#[derive(Debug, Clone, Default)]
pub struct MaterialStateUpdate {
    pub status: Option<MaterialStatus>,
    pub ai_status: Option<AiStatus>,
    pub text_content: Option<String>,
    pub chunk_count: Option<i32>,
}
