//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{handlers, state::AppState};

/// 构建通知相关的路由
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::list_notifications))
        .route(
            "/notifications/unread-count",
            get(handlers::unread_count),
        )
        .route("/notifications/mark-read", post(handlers::mark_read))
        .route(
            "/notifications/{id}",
            delete(handlers::delete_notification),
        )
}

/// 构建探针路由（公开路由，无需认证）
pub fn probe_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
}

/// 汇总全部路由
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(notification_routes())
        .merge(probe_routes())
}
