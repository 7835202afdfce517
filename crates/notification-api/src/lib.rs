//! 通知查询服务（C端）
//!
//! 提供通知列表、未读计数、标记已读和删除的 REST API。
//!
//! ## 模块结构
//!
//! - `auth`: 调用方身份提取
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型定义
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 序列化：serde (camelCase)

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, Result};
pub use state::AppState;
