//! ClassPoint - 学校学业评估服务
//!
//! 基于 Actix Web 构建：教师按学习目标为班组评分，协调员跟踪完成度并导出报表。
//!
//! # 架构
//! - `cache`: 缓存层（Moka）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `render`: Excel 报表渲染
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod render;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
