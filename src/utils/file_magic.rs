use crate::models::materials::entities::MaterialFileType;

const PDF_MAGIC: &[u8] = b"%PDF";
// OOXML 文档是 ZIP 容器
const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

/// 校验上传资料的文件头是否与其类型相符
///
/// 文本类资料没有魔术字节，只要求开头不含 NUL 字节。
pub fn validate_magic_bytes(data: &[u8], file_type: MaterialFileType) -> bool {
    if data.is_empty() {
        return false;
    }

    match file_type {
        MaterialFileType::Pdf => data.starts_with(PDF_MAGIC),
        MaterialFileType::Docx => data.starts_with(ZIP_MAGIC),
        MaterialFileType::Txt | MaterialFileType::Markdown => {
            !data.iter().take(512).any(|&b| b == 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic() {
        assert!(validate_magic_bytes(b"%PDF-1.7\n", MaterialFileType::Pdf));
        assert!(!validate_magic_bytes(b"%PDF-1.7\n", MaterialFileType::Docx));
    }

    #[test]
    fn test_docx_magic() {
        let header = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00];
        assert!(validate_magic_bytes(&header, MaterialFileType::Docx));
        assert!(!validate_magic_bytes(&header, MaterialFileType::Pdf));
    }

    #[test]
    fn test_text_rejects_binary() {
        assert!(validate_magic_bytes(b"# Lecture 1\n", MaterialFileType::Markdown));
        assert!(validate_magic_bytes("第一章".as_bytes(), MaterialFileType::Txt));
        assert!(!validate_magic_bytes(&[0x7F, 0x45, 0x4C, 0x46, 0x00], MaterialFileType::Txt));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], MaterialFileType::Pdf));
        assert!(!validate_magic_bytes(&[], MaterialFileType::Txt));
    }
}
