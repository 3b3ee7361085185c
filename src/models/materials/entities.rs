use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    // 文本提取状态
    #[ts(export, export_to = "material.ts")]
    pub enum MaterialStatus {
        Pending => "pending",
        Processing => "processing",
        Ready => "ready",
    }
}

crate::define_string_enum! {
    // AI 服务处理状态
    #[ts(export, export_to = "material.ts")]
    pub enum AiStatus {
        Pending => "pending",
        Processed => "processed",
        Failed => "failed",
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "material.ts")]
    pub enum MaterialFileType {
        Txt => "txt",
        Markdown => "md",
        Pdf => "pdf",
        Docx => "docx",
    }
}

impl MaterialFileType {
    /// 根据文件扩展名判断类型（不区分大小写）
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        ext.parse().ok()
    }

    /// 纯文本类型可直接在进程内解码
    pub fn is_plain_text(&self) -> bool {
        matches!(self, Self::Txt | Self::Markdown)
    }

    pub fn extension(&self) -> String {
        format!(".{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct Material {
    pub id: i64,
    pub course_id: i64,
    pub uploaded_by: i64,
    pub title: String,
    // 用户上传时的原始文件名
    pub file_name: String,
    // 磁盘上的存储文件名
    pub stored_name: String,
    pub file_type: MaterialFileType,
    pub status: MaterialStatus,
    pub ai_status: AiStatus,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub text_content: Option<String>,
    pub chunk_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(
            MaterialFileType::from_extension(".PDF"),
            Some(MaterialFileType::Pdf)
        );
        assert_eq!(
            MaterialFileType::from_extension("md"),
            Some(MaterialFileType::Markdown)
        );
        assert_eq!(MaterialFileType::from_extension(".pptx"), None);
        assert!(MaterialFileType::Txt.is_plain_text());
        assert!(!MaterialFileType::Docx.is_plain_text());
        assert_eq!(MaterialFileType::Docx.extension(), ".docx");
    }
}
