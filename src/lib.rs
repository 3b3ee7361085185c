//! PrepEase - 学习管理平台后端服务
//!
//! 基于 Actix Web 构建的课程、资料、作业与测验管理后端，
//! 文本抽取、向量检索和测验生成委托给独立的 AI 服务。
//!
//! # 架构
//! - `ai`: 外部 AI 服务客户端
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `grading`: 测验判分与学生表现汇总
//! - `middlewares`: 认证授权与限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数（含文本分块）

pub mod ai;
pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod grading;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
