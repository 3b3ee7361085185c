//! 文本分块
//!
//! 把抽取出的文档文本切成有重叠的词窗口，供向量化服务使用。
//! 窗口 `i` 覆盖词区间 `[i * step, i * step + chunk_size)`，其中 `step = chunk_size - overlap`。

use serde::{Deserialize, Serialize};

use crate::errors::{PrepEaseError, Result};

pub const DEFAULT_CHUNK_SIZE: usize = 600;
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// 分块窗口配置（对应配置文件中的 `chunker.*`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkerConfig {
    /// 创建并校验窗口配置
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        let config = Self {
            chunk_size,
            overlap,
        };
        config.validate()?;
        Ok(config)
    }

    /// 步长必须为正，否则窗口无法前进
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(PrepEaseError::invalid_configuration(
                "chunk_size must be greater than 0",
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(PrepEaseError::invalid_configuration(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// 按当前配置分块
    pub fn split(&self, text: &str) -> Result<Vec<String>> {
        chunk(text, self.chunk_size, self.overlap)
    }
}

/// 规范化文本：所有空白（含换行）折叠为单个空格并去掉首尾空白
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 把文本切成重叠的词窗口
///
/// 空文本或纯空白返回空列表，由调用方决定是否视为错误。
/// 词数不超过 `chunk_size` 时只返回一个块。
pub fn chunk(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    let config = ChunkerConfig {
        chunk_size,
        overlap,
    };
    config.validate()?;

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Vec::new());
    }

    if words.len() <= chunk_size {
        return Ok(vec![words.join(" ")]);
    }

    let step = config.step();
    let mut chunks = Vec::with_capacity(words.len().div_ceil(step));
    let mut start = 0;

    loop {
        let end = (start + chunk_size).min(words.len());
        chunks.push(words[start..end].join(" "));
        if end >= words.len() {
            break;
        }
        start += step;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_words(count: usize) -> String {
        (0..count)
            .map(|i| format!("w{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  a \n\n b\t\tc  "), "a b c");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_empty_input_returns_no_chunks() {
        assert!(chunk("", 600, 100).unwrap().is_empty());
        assert!(chunk("   \n\n  ", 600, 100).unwrap().is_empty());
    }

    #[test]
    fn test_short_text_is_single_normalized_chunk() {
        let chunks = chunk("Hello   world\n\nfrom  PrepEase", 600, 100).unwrap();
        assert_eq!(chunks, vec!["Hello world from PrepEase".to_string()]);
    }

    #[test]
    fn test_exactly_chunk_size_words_is_single_chunk() {
        let text = numbered_words(10);
        let chunks = chunk(&text, 10, 3).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn test_sliding_window_boundaries() {
        // 25 个词，窗口 10，重叠 2，步长 8：[0,10) [8,18) [16,25)
        let text = numbered_words(25);
        let chunks = chunk(&text, 10, 2).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].starts_with("w0 ") && chunks[0].ends_with(" w9"));
        assert!(chunks[1].starts_with("w8 ") && chunks[1].ends_with(" w17"));
        assert!(chunks[2].starts_with("w16 ") && chunks[2].ends_with(" w24"));
    }

    #[test]
    fn test_no_trailing_duplicate_chunk() {
        // 18 个词恰好落在第二个窗口末尾
        let text = numbered_words(18);
        let chunks = chunk(&text, 10, 2).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].ends_with(" w17"));
    }

    #[test]
    fn test_overlap_removed_reconstructs_words() {
        let text = numbered_words(1337);
        let (size, overlap) = (600, 100);
        let chunks = chunk(&text, size, overlap).unwrap();

        let mut rebuilt: Vec<String> = Vec::new();
        for (i, c) in chunks.iter().enumerate() {
            let words = c.split(' ').map(str::to_string);
            if i == 0 {
                rebuilt.extend(words);
            } else {
                rebuilt.extend(words.skip(overlap));
            }
        }
        assert_eq!(rebuilt.join(" "), text);
    }

    #[test]
    fn test_invalid_configuration() {
        let err = chunk("a b c", 10, 10).unwrap_err();
        assert_eq!(err.code(), "E014");
        assert!(chunk("a b c", 10, 11).is_err());
        assert!(chunk("a b c", 0, 0).is_err());
        assert!(ChunkerConfig::new(5, 5).is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ChunkerConfig::default();
        assert_eq!(config.chunk_size, 600);
        assert_eq!(config.overlap, 100);
        assert!(config.validate().is_ok());
        assert_eq!(config.split("one two").unwrap(), vec!["one two".to_string()]);
    }
}
