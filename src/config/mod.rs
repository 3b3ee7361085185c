//! 应用配置
//!
//! 按 默认值 → `config.toml` → `config.{APP_ENV}.toml` → `PREPEASE_*` 环境变量
//! → 具名环境变量 的顺序叠加。

mod r#impl;
mod structs;

pub use structs::*;
