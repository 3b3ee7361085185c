//! 外部 AI 服务客户端
//!
//! 文本抽取、向量化、学习助手问答与测验生成都由独立的 AI 服务完成，
//! 这里只负责 HTTP 调用与错误归类。

mod client;
mod types;

pub use client::AiClient;
pub use types::{AiServiceError, GeneratedQuestion, StudyBuddyAnswer};
